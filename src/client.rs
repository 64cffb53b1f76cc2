//! Typed content client
//!
//! Thin accessor over a [`TableStore`]: each method issues the read one part
//! of the site needs (active rows only, ordered, optionally limited) and
//! decodes the rows into models. Rows that fail to decode are skipped with a
//! warning so one malformed record never empties a whole section.

use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Course, Faculty, HeroSlide, News};
use crate::storage::{Query, Row, StorageError, TableStore, patch};

pub const COURSES: &str = "courses";
pub const FACULTY: &str = "faculty";
pub const HERO_SLIDES: &str = "hero_slides";
pub const NEWS: &str = "news";

/// Hero slides shown on the home page
pub const HERO_LIMIT: usize = 5;
/// News rows prefetched for the feed; "load more" only reveals these
pub const NEWS_PREFETCH: usize = 12;

/// Maximum allowed length for route slugs
const MAX_SLUG_LENGTH: usize = 200;

const CATALOG_COLUMNS: &[&str] = &[
    "id", "slug", "title", "subtitle", "category", "level", "description",
    "short_description", "card_image_url", "highlights", "curriculum", "outcomes", "ages",
    "duration", "class_size", "schedule_days", "schedule_time", "location", "prerequisites",
    "target_audience",
];

/// Optional `courses` column, only projected when the deployment has it
const GRADE_BAND_COLUMN: &str = "grade_band";

const COURSE_DETAIL_COLUMNS: &[&str] = &[
    "id", "slug", "title", "subtitle", "level", "description", "image_url", "highlights",
    "curriculum", "outcomes", "ages", "duration", "class_size", "schedule_days",
    "schedule_time", "location", "prerequisites", "target_audience",
];

const RELATED_COURSE_COLUMNS: &[&str] =
    &["id", "slug", "title", "subtitle", "level", "card_image_url"];

const FACULTY_COLUMNS: &[&str] = &[
    "id", "name", "credentials", "role", "subject", "specialization", "experience",
    "image_url", "video_url", "video_thumbnail_url",
];

const HERO_COLUMNS: &[&str] = &["id", "image_url", "alt_text", "title", "description", "news_id"];

const HERO_NEWS_COLUMNS: &[&str] = &["id", "slug", "title", "excerpt", "image_url", "category"];

const NEWS_FEED_COLUMNS: &[&str] =
    &["id", "slug", "title", "excerpt", "image_url", "category", "published_date"];

const NEWS_DETAIL_COLUMNS: &[&str] = &[
    "id", "slug", "title", "excerpt", "content", "image_url", "category", "published_date",
    "author", "author_image_url", "tags", "view_count", "related_course_ids",
];

/// Check a route slug before it reaches the store.
///
/// Only alphanumeric characters (any script), hyphens and underscores are
/// allowed; anything else cannot match a stored slug.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.chars().count() <= MAX_SLUG_LENGTH
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// A hero slide together with the news row its `news_id` resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedSlide {
    pub slide: HeroSlide,
    pub news: Option<News>,
}

/// Typed reads and the view-count write over a table store
pub struct ContentClient<S> {
    store: S,
    grade_band_column: bool,
}

impl<S: TableStore> ContentClient<S> {
    /// Create a new content client
    pub fn new(store: S) -> Self {
        Self {
            store,
            grade_band_column: false,
        }
    }

    /// Also read `courses.grade_band` for the catalog.
    ///
    /// PostgREST rejects a projection naming a missing column, so this must
    /// stay off unless the table has it.
    pub fn with_grade_band_column(mut self, enabled: bool) -> Self {
        self.grade_band_column = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn fetch<T: DeserializeOwned>(&self, query: Query) -> Result<Vec<T>, StorageError> {
        let rows = self.store.select(&query).await?;
        Ok(decode_rows(&query.table, rows))
    }

    /// Active hero slides in display order, each joined to its active news row
    pub async fn hero_slides(&self) -> Result<Vec<JoinedSlide>, StorageError> {
        let slides: Vec<HeroSlide> = self
            .fetch(
                Query::table(HERO_SLIDES)
                    .columns(HERO_COLUMNS)
                    .active()
                    .order_by("order_index", true)
                    .limit(HERO_LIMIT),
            )
            .await?;

        let news_ids: Vec<String> = slides
            .iter()
            .filter_map(|s| s.news_id)
            .map(|id| id.to_string())
            .collect();

        let linked: Vec<News> = if news_ids.is_empty() {
            Vec::new()
        } else {
            let query = Query::table(NEWS)
                .columns(HERO_NEWS_COLUMNS)
                .is_in("id", news_ids)
                .active();
            match self.fetch(query).await {
                Ok(news) => news,
                Err(e) => {
                    // slides still render with their own fields
                    warn!(error = %e, "Failed to resolve hero slide news");
                    Vec::new()
                }
            }
        };

        let joined: Vec<JoinedSlide> = slides
            .into_iter()
            .map(|slide| {
                let news = slide
                    .news_id
                    .and_then(|id| linked.iter().find(|n| n.id == id).cloned());
                JoinedSlide { slide, news }
            })
            .collect();

        info!(
            "Loaded {} hero slides ({} linked to news)",
            joined.len(),
            joined.iter().filter(|j| j.news.is_some()).count()
        );
        Ok(joined)
    }

    /// Active courses for the catalog, by `order_index`
    pub async fn courses(&self) -> Result<Vec<Course>, StorageError> {
        let mut query = Query::table(COURSES)
            .columns(CATALOG_COLUMNS)
            .active()
            .order_by("order_index", true);
        if self.grade_band_column {
            query.columns.push(GRADE_BAND_COLUMN.to_string());
        }
        let courses: Vec<Course> = self.fetch(query).await?;
        info!("Loaded {} courses", courses.len());
        Ok(courses)
    }

    /// Active faculty, by `order_index`
    pub async fn faculty(&self) -> Result<Vec<Faculty>, StorageError> {
        let faculty: Vec<Faculty> = self
            .fetch(
                Query::table(FACULTY)
                    .columns(FACULTY_COLUMNS)
                    .active()
                    .order_by("order_index", true),
            )
            .await?;
        info!("Loaded {} faculty members", faculty.len());
        Ok(faculty)
    }

    /// Newest active news first, capped at [`NEWS_PREFETCH`]
    pub async fn latest_news(&self) -> Result<Vec<News>, StorageError> {
        let news: Vec<News> = self
            .fetch(
                Query::table(NEWS)
                    .columns(NEWS_FEED_COLUMNS)
                    .active()
                    .order_by("published_date", false)
                    .limit(NEWS_PREFETCH),
            )
            .await?;
        info!("Loaded {} news items", news.len());
        Ok(news)
    }

    /// The active course with exactly this slug
    pub async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, StorageError> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }
        let mut courses: Vec<Course> = self
            .fetch(
                Query::table(COURSES)
                    .columns(COURSE_DETAIL_COLUMNS)
                    .eq("slug", slug)
                    .active()
                    .limit(1),
            )
            .await?;
        Ok(courses.pop())
    }

    /// The active article whose slug is `key`, or whose id is `key` for
    /// articles published without a slug
    pub async fn news_by_key(&self, key: &str) -> Result<Option<News>, StorageError> {
        if !is_valid_slug(key) {
            return Ok(None);
        }
        let by_slug = Query::table(NEWS)
            .columns(NEWS_DETAIL_COLUMNS)
            .eq("slug", key)
            .active()
            .limit(1);
        if let Some(news) = self.fetch::<News>(by_slug).await?.pop() {
            return Ok(Some(news));
        }

        let Ok(id) = Uuid::parse_str(key) else {
            return Ok(None);
        };
        let by_id = Query::table(NEWS)
            .columns(NEWS_DETAIL_COLUMNS)
            .eq("id", id.to_string())
            .active()
            .limit(1);
        Ok(self.fetch::<News>(by_id).await?.pop())
    }

    /// Active courses among `ids`; stale or inactive ids are silently absent
    pub async fn courses_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Course>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(
            Query::table(COURSES)
                .columns(RELATED_COURSE_COLUMNS)
                .is_in("id", ids.iter().map(|id| id.to_string()))
                .active()
                .order_by("order_index", true),
        )
        .await
    }

    /// Overwrite `view_count` with the value read plus one.
    ///
    /// Last write wins; concurrent readers can lose increments.
    pub async fn increment_view_count(&self, news: &News) -> Result<(), StorageError> {
        self.store
            .update(
                NEWS,
                &news.id.to_string(),
                patch([("view_count", json!(news.view_count.saturating_add(1)))]),
            )
            .await
    }
}

impl<S: TableStore + Clone + 'static> ContentClient<S> {
    /// Run [`ContentClient::increment_view_count`] in the background.
    ///
    /// The caller never waits on the write; a failure is logged at `debug`.
    pub fn spawn_view_count_increment(&self, news: &News) -> JoinHandle<()> {
        let client = ContentClient {
            store: self.store.clone(),
            grade_band_column: self.grade_band_column,
        };
        let news = news.clone();
        tokio::spawn(async move {
            if let Err(e) = client.increment_view_count(&news).await {
                debug!(id = %news.id, error = %e, "View count not updated");
            }
        })
    }
}

fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned();
            match serde_json::from_value(serde_json::Value::Object(row)) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(table, id = ?id, error = %e, "Skipping malformed row");
                    None
                }
            }
        })
        .collect()
}
