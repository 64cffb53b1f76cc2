//! Course detail page

use tracing::warn;

use crate::client::ContentClient;
use crate::models::Course;
use crate::storage::TableStore;

use super::Detail;

/// Look up an active course by slug; a failed read renders as not found
pub async fn load_course_page<S: TableStore>(client: &ContentClient<S>, slug: &str) -> Detail<Course> {
    match client.course_by_slug(slug).await {
        Ok(Some(course)) => Detail::Found(course),
        Ok(None) => Detail::NotFound,
        Err(e) => {
            warn!(slug, error = %e, "Course lookup failed");
            Detail::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::COURSES;
    use crate::storage::memory::MemoryTableStore;
    use serde_json::json;

    fn client() -> ContentClient<MemoryTableStore> {
        let store = MemoryTableStore::new()
            .with_table(
                COURSES,
                vec![
                    json!({"id": "00000000-0000-0000-0000-000000000001", "slug": "english", "title": "English", "is_active": true}),
                    json!({"id": "00000000-0000-0000-0000-000000000002", "slug": "retired", "title": "Retired", "is_active": false}),
                ],
            )
            .unwrap();
        ContentClient::new(store)
    }

    #[tokio::test]
    async fn test_found_and_not_found() {
        let client = client();
        let page = load_course_page(&client, "english").await;
        assert_eq!(page.found().map(|c| c.title), Some("English".to_string()));
        assert!(!load_course_page(&client, "retired").await.is_found());
        assert!(!load_course_page(&client, "missing").await.is_found());
        assert!(!load_course_page(&client, "../etc").await.is_found());
    }

    #[tokio::test]
    async fn test_store_failure_is_not_found() {
        let store = MemoryTableStore::new();
        store.fail_table(COURSES);
        let client = ContentClient::new(store);
        assert_eq!(load_course_page(&client, "english").await, Detail::NotFound);
    }
}
