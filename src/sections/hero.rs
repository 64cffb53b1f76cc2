//! Hero carousel

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{Instant, interval_at};
use uuid::Uuid;

use crate::client::JoinedSlide;
use crate::models::present;

use super::timer::{TimerHandle, lock};

/// Auto-advance period
pub const AUTO_ADVANCE: Duration = Duration::from_secs(5);

/// Shortest period [`LiveHeroCarousel`] accepts; `interval_at` panics on zero
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Display fields of a slide after resolving its news reference
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedSlide {
    pub id: Uuid,
    pub image_url: String,
    pub alt: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    /// News detail route when the slide links to an article
    pub link: Option<String>,
}

impl ResolvedSlide {
    /// News fields override the slide's own when the article was found
    pub fn resolve(joined: &JoinedSlide) -> Self {
        let slide = &joined.slide;
        match &joined.news {
            Some(news) => Self {
                id: slide.id,
                image_url: news.image_url.clone(),
                alt: present(&slide.alt_text).unwrap_or(news.title.as_str()).to_string(),
                title: news.title.clone(),
                description: news.excerpt.clone(),
                category: present(&news.category).map(str::to_string),
                link: Some(news.href()),
            },
            None => Self {
                id: slide.id,
                image_url: slide.image_url.clone(),
                alt: present(&slide.alt_text)
                    .unwrap_or(slide.title.as_str())
                    .to_string(),
                title: slide.title.clone(),
                description: slide.description.clone(),
                category: None,
                link: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeroCarousel {
    slides: Vec<ResolvedSlide>,
    current: usize,
}

impl HeroCarousel {
    pub fn new(joined: &[JoinedSlide]) -> Self {
        Self {
            slides: joined.iter().map(ResolvedSlide::resolve).collect(),
            current: 0,
        }
    }

    pub fn slides(&self) -> &[ResolvedSlide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&ResolvedSlide> {
        self.slides.get(self.current)
    }

    /// Next slide, wrapping after the last
    pub fn advance(&mut self) {
        if !self.slides.is_empty() {
            self.current = (self.current + 1) % self.slides.len();
        }
    }

    pub fn prev(&mut self) {
        let n = self.slides.len();
        if n > 0 {
            self.current = (self.current + n - 1) % n;
        }
    }

    /// Show slide `index`; out-of-range indices are ignored
    pub fn go_to(&mut self, index: usize) {
        if index < self.slides.len() {
            self.current = index;
        }
    }

    /// Replace the slides, returning to the first if the index no longer fits
    pub fn replace_slides(&mut self, joined: &[JoinedSlide]) {
        self.slides = joined.iter().map(ResolvedSlide::resolve).collect();
        if self.current >= self.slides.len() {
            self.current = 0;
        }
    }
}

/// A hero carousel advancing itself every [`AUTO_ADVANCE`].
///
/// The repeating timer is restarted whenever the slide count changes and
/// aborted when the carousel is dropped.
#[derive(Debug)]
pub struct LiveHeroCarousel {
    carousel: Arc<Mutex<HeroCarousel>>,
    timer: Mutex<Option<TimerHandle>>,
    period: Duration,
}

impl LiveHeroCarousel {
    /// Start auto-advancing; must be called inside a tokio runtime.
    ///
    /// Periods below one millisecond are raised to it.
    pub fn start(carousel: HeroCarousel, period: Duration) -> Self {
        let live = Self {
            carousel: Arc::new(Mutex::new(carousel)),
            timer: Mutex::new(None),
            period: period.max(MIN_PERIOD),
        };
        live.restart_timer();
        live
    }

    fn restart_timer(&self) {
        let mut timer = lock(&self.timer);
        // Cancel before spawning so two timers never overlap.
        *timer = None;
        if lock(&self.carousel).is_empty() {
            return;
        }

        let carousel = Arc::clone(&self.carousel);
        let period = self.period;
        *timer = Some(TimerHandle::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                lock(&carousel).advance();
            }
        }));
    }

    /// Swap in a new slide list; the timer restarts when the count changes
    pub fn set_slides(&self, joined: &[JoinedSlide]) {
        let changed = {
            let mut carousel = lock(&self.carousel);
            let before = carousel.len();
            carousel.replace_slides(joined);
            carousel.len() != before
        };
        if changed {
            self.restart_timer();
        }
    }

    pub fn current_index(&self) -> usize {
        lock(&self.carousel).current_index()
    }

    pub fn current(&self) -> Option<ResolvedSlide> {
        lock(&self.carousel).current().cloned()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.timer).as_ref().is_some_and(|t| !t.is_finished())
    }
}
