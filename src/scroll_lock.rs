//! Page scroll-lock
//!
//! While a modal is open the page body must not scroll. The lock is held by
//! a guard: acquiring returns a [`ScrollGuard`], and the lock is released when
//! every guard has been dropped, whichever way its owner goes away.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scroll-lock state of one rendered document
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock scrolling until the returned guard is dropped
    pub fn acquire(&self) -> ScrollGuard {
        self.holders.fetch_add(1, Ordering::AcqRel);
        ScrollGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::Acquire) > 0
    }
}

/// Holds the scroll-lock; releases it on drop
#[derive(Debug)]
pub struct ScrollGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::AcqRel);
    }
}
