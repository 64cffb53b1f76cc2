//! News model

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{blank_as_none, default_true, null_as_default};

/// A news article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct News {
    pub id: Uuid,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_image_url: String,
    /// Date or timestamp as stored; see [`News::published_on`]
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: i64,
    /// Weak references into `courses`
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_course_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl News {
    /// Route key: the slug when set, else the id
    pub fn route_key(&self) -> String {
        self.slug.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Route of the news detail page
    pub fn href(&self) -> String {
        format!("/news/{}", self.route_key())
    }

    /// Publication day, accepting either `YYYY-MM-DD` or an RFC 3339 timestamp
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.published_date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// Long zh-TW date, e.g. `2024年3月5日`; empty when the date is unparsable
    pub fn display_date(&self) -> String {
        self.published_on()
            .map(|d| format!("{}年{}月{}日", d.year(), d.month(), d.day()))
            .unwrap_or_default()
    }
}
