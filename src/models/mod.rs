//! Models module
//!
//! Typed rows of the four tables the site reads. Every column is optional on
//! the wire: reads project a subset of columns and the hosted store returns
//! `null` for unset text, so text and list fields fall back to empty values.

pub mod course;
pub mod faculty;
pub mod hero;
pub mod news;

pub use course::{Course, GradeBand};
pub use faculty::Faculty;
pub use hero::HeroSlide;
pub use news::News;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize optional text, treating blank strings as absent.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

pub(crate) fn default_true() -> bool {
    true
}

/// Non-empty text or `None`, for conditionally rendered fields.
pub fn present(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(text) }
}
