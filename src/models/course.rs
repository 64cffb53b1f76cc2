//! Course model

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{default_true, null_as_default, present};

/// Catalog tab a course belongs to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    #[default]
    Elementary,
    JuniorHigh,
    HighSchool,
}

impl GradeBand {
    pub const ALL: [GradeBand; 3] = [
        GradeBand::Elementary,
        GradeBand::JuniorHigh,
        GradeBand::HighSchool,
    ];

    /// Parse the column value or the URL form (`junior-high`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "elementary" => Some(GradeBand::Elementary),
            "junior_high" => Some(GradeBand::JuniorHigh),
            "high_school" => Some(GradeBand::HighSchool),
            _ => None,
        }
    }

    /// Tab label shown on the site
    pub fn label(self) -> &'static str {
        match self {
            GradeBand::Elementary => "國小",
            GradeBand::JuniorHigh => "國中",
            GradeBand::HighSchool => "高中",
        }
    }

    /// Value used in `?tab=` links
    pub fn slug(self) -> &'static str {
        match self {
            GradeBand::Elementary => "elementary",
            GradeBand::JuniorHigh => "junior-high",
            GradeBand::HighSchool => "high-school",
        }
    }
}

/// Unknown band values are dropped rather than failing the row.
fn lenient_grade_band<'de, D>(deserializer: D) -> Result<Option<GradeBand>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(GradeBand::parse))
}

/// A course offered by the academy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Course {
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card_image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub curriculum: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outcomes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ages: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_days: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_audience: String,
    #[serde(default, deserialize_with = "lenient_grade_band", skip_serializing_if = "Option::is_none")]
    pub grade_band: Option<GradeBand>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_index: i64,
}

impl Course {
    /// Card/modal blurb: the short description, else the full one
    pub fn summary(&self) -> &str {
        present(&self.short_description).unwrap_or(self.description.as_str())
    }

    /// Route of the course detail page
    pub fn href(&self) -> String {
        format!("/courses/{}", self.slug)
    }

    /// Labelled schedule facts that have a value, in display order
    pub fn schedule_facts(&self) -> Vec<(&'static str, &str)> {
        [
            ("適合年級", self.ages.as_str()),
            ("班級人數", self.class_size.as_str()),
            ("課程期間", self.duration.as_str()),
            ("上課日期", self.schedule_days.as_str()),
            ("上課時間", self.schedule_time.as_str()),
            ("上課地點", self.location.as_str()),
        ]
        .into_iter()
        .filter_map(|(label, value)| present(value).map(|v| (label, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nulls_and_missing_columns_default() {
        let course: Course = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "學姊英文小團班",
            "subtitle": null,
            "highlights": null
        }))
        .unwrap();
        assert_eq!(course.title, "學姊英文小團班");
        assert!(course.subtitle.is_empty());
        assert!(course.highlights.is_empty());
        assert!(course.is_active);
        assert_eq!(course.grade_band, None);
    }

    #[test]
    fn test_grade_band_is_lenient() {
        let course: Course = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "grade_band": "junior_high"
        }))
        .unwrap();
        assert_eq!(course.grade_band, Some(GradeBand::JuniorHigh));

        let course: Course = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "grade_band": "university"
        }))
        .unwrap();
        assert_eq!(course.grade_band, None);
    }

    #[test]
    fn test_summary_falls_back_to_description() {
        let mut course = Course {
            description: "Full".to_string(),
            ..Default::default()
        };
        assert_eq!(course.summary(), "Full");
        course.short_description = "Short".to_string();
        assert_eq!(course.summary(), "Short");
    }

    #[test]
    fn test_schedule_facts_skip_blank_values() {
        let course = Course {
            ages: "國小三至六年級".to_string(),
            location: "  ".to_string(),
            schedule_time: "18:30-20:30".to_string(),
            ..Default::default()
        };
        let labels: Vec<_> = course.schedule_facts().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["適合年級", "上課時間"]);
    }

    #[test]
    fn test_grade_band_parse_url_form() {
        assert_eq!(GradeBand::parse("junior-high"), Some(GradeBand::JuniorHigh));
        assert_eq!(GradeBand::parse("High_School"), Some(GradeBand::HighSchool));
        assert_eq!(GradeBand::parse("kindergarten"), None);
    }
}
