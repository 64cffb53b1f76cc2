//! Faculty model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{blank_as_none, default_true, null_as_default};

/// An instructor; `subject` partitions the roster into tabs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Faculty {
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credentials: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub video_thumbnail_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_index: i64,
}
