//! Hero slide model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{default_true, null_as_default};

/// A hero carousel slide, optionally pointing at a news article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HeroSlide {
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Weak reference into `news`; the target may be missing or inactive
    #[serde(default)]
    pub news_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_index: i64,
}
