//! Home page sections
//!
//! Every section follows the same lifecycle: on mount it issues exactly one
//! read, shows a skeleton while that read is pending, then renders whatever
//! arrived. A failed read is indistinguishable from an empty one; there is no
//! retry and no refetch until the page is mounted again.
//!
//! The interactive parts (catalog tabs and pages, roster subject switch and
//! carousel, hero auto-advance, news reveal) are plain state machines so they
//! can be driven from query parameters on the server or by timers in
//! [`roster::LiveRoster`] and [`hero::LiveHeroCarousel`].

pub mod catalog;
pub mod hero;
pub mod news;
pub mod roster;
pub mod timer;

use std::future::Future;

use tracing::warn;

use crate::storage::StorageError;

pub use catalog::CourseCatalog;
pub use hero::{HeroCarousel, LiveHeroCarousel, ResolvedSlide};
pub use news::NewsFeed;
pub use roster::{FacultyRoster, LiveRoster};
pub use timer::TimerHandle;

/// Render state of a section
#[derive(Debug, Clone, PartialEq)]
pub enum Section<C> {
    /// Read still pending: render the skeleton
    Loading,
    /// Read settled (possibly empty)
    Ready(C),
}

impl<C> Section<C> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Section::Loading)
    }

    pub fn ready(&self) -> Option<&C> {
        match self {
            Section::Ready(c) => Some(c),
            Section::Loading => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut C> {
        match self {
            Section::Ready(c) => Some(c),
            Section::Loading => None,
        }
    }

    pub fn map<D>(self, f: impl FnOnce(C) -> D) -> Section<D> {
        match self {
            Section::Ready(c) => Section::Ready(f(c)),
            Section::Loading => Section::Loading,
        }
    }
}

/// Mount-once loader for one section's rows
#[derive(Debug)]
pub struct SectionLoader<T> {
    name: &'static str,
    mounted: bool,
    state: Section<Vec<T>>,
}

impl<T> SectionLoader<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            mounted: false,
            state: Section::Loading,
        }
    }

    /// Issue the section's read. Only the first call reaches the store;
    /// later calls return immediately without invoking `read`.
    pub async fn mount<F, Fut>(&mut self, read: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, StorageError>>,
    {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let rows = match read().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(section = self.name, error = %e, "Section read failed; rendering empty");
                Vec::new()
            }
        };
        self.state = Section::Ready(rows);
    }

    pub fn state(&self) -> &Section<Vec<T>> {
        &self.state
    }

    pub fn into_state(self) -> Section<Vec<T>> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_loader_mounts_once() {
        let calls = Cell::new(0);
        let mut loader = SectionLoader::new("news");
        assert!(loader.state().is_loading());

        loader
            .mount(|| {
                calls.set(calls.get() + 1);
                async { Ok(vec![1, 2, 3]) }
            })
            .await;
        loader
            .mount(|| {
                calls.set(calls.get() + 1);
                async { Ok(vec![9]) }
            })
            .await;

        assert_eq!(calls.get(), 1);
        assert_eq!(loader.state(), &Section::Ready(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_loader_failure_is_empty() {
        let mut loader: SectionLoader<u8> = SectionLoader::new("faculty");
        loader
            .mount(|| async { Err(StorageError::NetworkError("offline".to_string())) })
            .await;
        assert_eq!(loader.into_state(), Section::Ready(Vec::new()));
    }

    #[test]
    fn test_section_map_keeps_loading() {
        let section: Section<Vec<u8>> = Section::Loading;
        assert!(section.map(|v| v.len()).is_loading());
    }
}
