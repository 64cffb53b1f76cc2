//! Page loaders
//!
//! Each route has a loader that performs the page's reads and returns a
//! view model for [`crate::render`]. Loaders never fail: store errors become
//! empty sections or the not-found view.

pub mod course;
pub mod home;
pub mod news;

pub use course::load_course_page;
pub use home::{HomePage, HomeParams};
pub use news::{NewsPage, Segment, linkify, load_news_page};

/// Outcome of a detail page lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<T> {
    Found(T),
    NotFound,
}

impl<T> Detail<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Detail::Found(page) => Some(page),
            Detail::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Detail::Found(_))
    }
}
