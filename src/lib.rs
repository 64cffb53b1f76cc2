//! Academy Site - Wego Elite Academy marketing website
//!
//! Provides:
//! - Table store access (hosted PostgREST API or in-memory fixtures)
//! - Typed content reads (courses, faculty, hero slides, news)
//! - Section state machines (catalog tabs and paging, roster cross-fade,
//!   hero auto-advance, news reveal)
//! - Page loaders and HTML rendering
//! - The HTTP server and its binary

pub mod client;
pub mod config;
pub mod models;
pub mod pages;
pub mod render;
pub mod scroll_lock;
pub mod sections;
pub mod storage;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use client::{ContentClient, JoinedSlide};
pub use config::{ConfigError, SiteConfig, SiteInfo};
pub use storage::{Query, StorageError, TableStore};
#[cfg(feature = "api-backend")]
pub use storage::api::ApiTableStore;
pub use storage::memory::MemoryTableStore;

pub use models::{Course, Faculty, GradeBand, HeroSlide, News};
pub use pages::{Detail, HomePage, HomeParams, NewsPage};
pub use scroll_lock::{ScrollGuard, ScrollLock};
pub use sections::{
    CourseCatalog, FacultyRoster, HeroCarousel, LiveHeroCarousel, LiveRoster, NewsFeed, Section,
};
