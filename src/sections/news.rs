//! News feed with incremental reveal

use crate::models::News;

/// Cards shown initially and added per "load more"
pub const NEWS_STEP: usize = 6;

#[derive(Debug, Clone)]
pub struct NewsFeed {
    items: Vec<News>,
    display_count: usize,
}

impl NewsFeed {
    pub fn new(items: Vec<News>) -> Self {
        Self {
            items,
            display_count: NEWS_STEP,
        }
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    pub fn visible(&self) -> &[News] {
        &self.items[..self.display_count.min(self.items.len())]
    }

    pub fn has_more(&self) -> bool {
        self.display_count < self.items.len()
    }

    pub fn load_more(&mut self) {
        if self.has_more() {
            self.display_count += NEWS_STEP;
        }
    }

    /// Restore a reveal count from a link; never below the initial count
    pub fn reveal(&mut self, count: usize) {
        self.display_count = count.max(NEWS_STEP);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
