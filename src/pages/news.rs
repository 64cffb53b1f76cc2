//! News detail page

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::client::ContentClient;
use crate::models::{Course, News};
use crate::storage::TableStore;

use super::Detail;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// A run of article text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split article content into lines, with bare URLs marked as links.
///
/// Every line is kept, blank ones included, so paragraph spacing survives.
pub fn linkify(content: &str) -> Vec<Vec<Segment<'_>>> {
    content
        .split('\n')
        .map(|line| {
            let mut segments = Vec::new();
            let mut last = 0;
            for m in URL_PATTERN.find_iter(line) {
                if m.start() > last {
                    segments.push(Segment::Text(&line[last..m.start()]));
                }
                segments.push(Segment::Link(m.as_str()));
                last = m.end();
            }
            if last < line.len() {
                segments.push(Segment::Text(&line[last..]));
            }
            segments
        })
        .collect()
}

/// A found article with its related courses
#[derive(Debug, Clone, PartialEq)]
pub struct NewsPage {
    pub news: News,
    pub related: Vec<Course>,
}

/// Look up an article by slug or id, count the view and load related courses.
///
/// The view count shown is the value read before the increment. The
/// increment runs detached, so a slow or failed write never delays or
/// affects the page; neither does a failed related-course read.
pub async fn load_news_page<S>(client: &ContentClient<S>, key: &str) -> Detail<NewsPage>
where
    S: TableStore + Clone + 'static,
{
    let news = match client.news_by_key(key).await {
        Ok(Some(news)) => news,
        Ok(None) => return Detail::NotFound,
        Err(e) => {
            warn!(key, error = %e, "News lookup failed");
            return Detail::NotFound;
        }
    };

    client.spawn_view_count_increment(&news);

    let related = match client.courses_by_ids(&news.related_course_ids).await {
        Ok(courses) => courses,
        Err(e) => {
            warn!(id = %news.id, error = %e, "Related courses unavailable");
            Vec::new()
        }
    };

    Detail::Found(NewsPage { news, related })
}
