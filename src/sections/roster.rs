//! Faculty roster: subject tabs with a timed cross-fade and a member carousel

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::models::Faculty;

use super::timer::{TimerHandle, lock};

/// Fade-out before the team is swapped
pub const FADE_OUT: Duration = Duration::from_millis(300);
/// Pause after the swap before fading in
pub const SWITCH_SETTLE: Duration = Duration::from_millis(50);
/// Fade-in of the new team
pub const FADE_IN: Duration = Duration::from_millis(300);

/// A roster tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const FOUNDER: &str = "founder";

pub const SUBJECTS: [Subject; 4] = [
    Subject {
        key: FOUNDER,
        label: "Founder",
        icon: "⭐",
    },
    Subject {
        key: "english",
        label: "學姐英文",
        icon: "📚",
    },
    Subject {
        key: "math-leopard",
        label: "獵豹數學",
        icon: "🔢",
    },
    Subject {
        key: "science-zhenlin",
        label: "鎮麟自然",
        icon: "🔬",
    },
];

pub const DEFAULT_SUBJECT: &str = "english";

pub fn subject(key: &str) -> Option<&'static Subject> {
    SUBJECTS.iter().find(|s| s.key == key)
}

/// How the current team is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One large card
    Founder,
    /// Uniform grid, carousel on narrow viewports
    Grid,
}

/// Cross-fade progress of a subject switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Idle,
    FadingOut { target: &'static str },
    Switched,
    FadingIn,
}

/// Roster view state over the loaded faculty
#[derive(Debug, Clone)]
pub struct FacultyRoster {
    faculty: Vec<Faculty>,
    selected: &'static str,
    current_index: usize,
    phase: FadePhase,
}

impl FacultyRoster {
    pub fn new(faculty: Vec<Faculty>) -> Self {
        Self {
            faculty,
            selected: DEFAULT_SUBJECT,
            current_index: 0,
            phase: FadePhase::Idle,
        }
    }

    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    pub fn selected(&self) -> &'static str {
        self.selected
    }

    pub fn selected_subject(&self) -> &'static Subject {
        subject(self.selected).unwrap_or(&SUBJECTS[1])
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Content is hidden while fading out and during the swap
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, FadePhase::FadingOut { .. } | FadePhase::Switched)
    }

    /// Start switching to `key`.
    ///
    /// Returns the delay after which [`FacultyRoster::on_timer`] must run, or
    /// `None` when nothing changes: an unknown key, or the subject already
    /// shown. A request made mid-transition retargets the fade and restarts
    /// its timer.
    pub fn request_subject(&mut self, key: &str) -> Option<Duration> {
        let subject = subject(key)?;
        if subject.key == self.selected {
            return None;
        }
        self.current_index = 0;
        self.phase = FadePhase::FadingOut {
            target: subject.key,
        };
        Some(FADE_OUT)
    }

    /// Advance the cross-fade one step; returns the delay until the next step
    pub fn on_timer(&mut self) -> Option<Duration> {
        match self.phase {
            FadePhase::FadingOut { target } => {
                self.selected = target;
                self.current_index = 0;
                self.phase = FadePhase::Switched;
                Some(SWITCH_SETTLE)
            }
            FadePhase::Switched => {
                self.phase = FadePhase::FadingIn;
                Some(FADE_IN)
            }
            FadePhase::FadingIn => {
                self.phase = FadePhase::Idle;
                None
            }
            FadePhase::Idle => None,
        }
    }

    /// Run any pending transition to completion
    pub fn settle(&mut self) {
        while self.phase != FadePhase::Idle {
            self.on_timer();
        }
    }

    /// Switch immediately, without a fade
    pub fn select_subject(&mut self, key: &str) {
        if self.request_subject(key).is_some() {
            self.settle();
        }
    }

    /// Members of the selected subject
    pub fn current_team(&self) -> Vec<&Faculty> {
        self.faculty
            .iter()
            .filter(|f| f.subject == self.selected)
            .collect()
    }

    pub fn layout(&self) -> Layout {
        if self.selected == FOUNDER {
            Layout::Founder
        } else {
            Layout::Grid
        }
    }

    /// Heading above the cards
    pub fn heading(&self) -> &'static str {
        match self.layout() {
            Layout::Founder => "創辦人介紹",
            Layout::Grid => "教師介紹",
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_member(&self) -> Option<&Faculty> {
        self.current_team().get(self.current_index).copied()
    }

    /// Carousel arrows and dots are only useful with more than one member
    pub fn show_carousel_controls(&self) -> bool {
        self.current_team().len() > 1
    }

    pub fn next(&mut self) {
        let n = self.current_team().len();
        if n > 0 {
            self.current_index = (self.current_index + 1) % n;
        }
    }

    pub fn prev(&mut self) {
        let n = self.current_team().len();
        if n > 0 {
            self.current_index = (self.current_index + n - 1) % n;
        }
    }

    /// Jump to a dot indicator; out-of-range indices are ignored
    pub fn go_to(&mut self, index: usize) {
        if index < self.current_team().len() {
            self.current_index = index;
        }
    }
}

/// A roster whose subject switches run on a real timer.
///
/// At most one transition timer exists; a new request replaces it, and
/// dropping the roster aborts it.
#[derive(Debug)]
pub struct LiveRoster {
    roster: Arc<Mutex<FacultyRoster>>,
    timer: Mutex<Option<TimerHandle>>,
}

impl LiveRoster {
    pub fn new(roster: FacultyRoster) -> Self {
        Self {
            roster: Arc::new(Mutex::new(roster)),
            timer: Mutex::new(None),
        }
    }

    /// Request a subject switch; must be called inside a tokio runtime
    pub fn select_subject(&self, key: &str) {
        let Some(delay) = lock(&self.roster).request_subject(key) else {
            return;
        };

        let roster = Arc::clone(&self.roster);
        let handle = TimerHandle::spawn(async move {
            let mut delay = delay;
            loop {
                tokio::time::sleep(delay).await;
                match lock(&roster).on_timer() {
                    Some(next) => delay = next,
                    None => break,
                }
            }
        });
        *lock(&self.timer) = Some(handle);
    }

    /// Read the current state
    pub fn with<R>(&self, f: impl FnOnce(&FacultyRoster) -> R) -> R {
        f(&lock(&self.roster))
    }

    /// Carousel navigation and other immediate changes
    pub fn update<R>(&self, f: impl FnOnce(&mut FacultyRoster) -> R) -> R {
        f(&mut lock(&self.roster))
    }
}
