//! Home page section behavior over a loaded store

use std::time::Duration;

use academy_site::client::{COURSES, FACULTY, HERO_SLIDES, NEWS};
use academy_site::sections::roster::{FADE_IN, FADE_OUT, SWITCH_SETTLE};
use academy_site::{
    ContentClient, CourseCatalog, GradeBand, HeroCarousel, HomePage, HomeParams,
    LiveHeroCarousel, LiveRoster, MemoryTableStore,
};
use serde_json::{Value, json};

fn id(n: u32) -> String {
    format!("00000000-0000-0000-0000-{:012}", n)
}

fn courses(band: &str, count: u32) -> Vec<Value> {
    (1..=count)
        .map(|n| {
            json!({
                "id": id(n),
                "slug": format!("course-{n}"),
                "title": format!("Course {n}"),
                "grade_band": band,
                "order_index": n,
                "is_active": true
            })
        })
        .collect()
}

fn faculty() -> Vec<Value> {
    vec![
        json!({"id": id(101), "name": "Founder", "subject": "founder", "order_index": 1, "is_active": true}),
        json!({"id": id(102), "name": "Amy", "subject": "english", "order_index": 2, "is_active": true}),
        json!({"id": id(103), "name": "Ben", "subject": "english", "order_index": 3, "is_active": true}),
        json!({"id": id(104), "name": "Cleo", "subject": "math-leopard", "order_index": 4, "is_active": true}),
    ]
}

fn news(count: u32) -> Vec<Value> {
    (1..=count)
        .map(|n| {
            json!({
                "id": id(200 + n),
                "slug": format!("news-{n}"),
                "title": format!("News {n}"),
                "published_date": format!("2024-01-{:02}", n),
                "is_active": true
            })
        })
        .collect()
}

async fn loaded(store: MemoryTableStore) -> HomePage {
    HomePage::load(&ContentClient::new(store).with_grade_band_column(true)).await
}

mod catalog_tests {
    use super::*;

    #[tokio::test]
    async fn test_twelve_courses_paginate() {
        let store = MemoryTableStore::new()
            .with_table(COURSES, courses("elementary", 12))
            .unwrap();
        let mut page = loaded(store).await;
        let catalog = page.catalog.ready_mut().unwrap();

        assert_eq!(catalog.total_pages(), 3);
        assert_eq!(catalog.visible().len(), 5);
        assert!(!catalog.has_prev());

        catalog.go_to_page(3);
        assert_eq!(catalog.visible().len(), 2);
        assert!(!catalog.has_next());

        catalog.select_tab(GradeBand::HighSchool);
        assert_eq!(catalog.current_page(), 1);
        assert_eq!(catalog.total_pages(), 0);
        assert!(!catalog.show_pager());
    }

    #[tokio::test]
    async fn test_modal_locks_document() {
        let store = MemoryTableStore::new()
            .with_table(COURSES, courses("junior_high", 2))
            .unwrap();
        let mut page = loaded(store).await;
        page.apply(&HomeParams {
            tab: Some("junior-high".to_string()),
            course: Some("course-2".to_string()),
            ..Default::default()
        });

        assert!(page.document.is_locked());
        let catalog = page.catalog.ready_mut().unwrap();
        assert_eq!(catalog.selected().map(|c| c.title.as_str()), Some("Course 2"));

        catalog.close_modal();
        assert!(!page.document.is_locked());
    }

    #[test]
    fn test_dropping_catalog_releases_lock() {
        let courses: Vec<_> = courses("elementary", 1)
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect();
        let document = academy_site::ScrollLock::new();
        let mut catalog = CourseCatalog::new(courses);
        assert!(catalog.open_course_by_key("course-1", &document));
        assert!(document.is_locked());
        drop(catalog);
        assert!(!document.is_locked());
    }
}

mod roster_tests {
    use super::*;

    #[tokio::test]
    async fn test_subject_and_member_from_params() {
        let store = MemoryTableStore::new().with_table(FACULTY, faculty()).unwrap();
        let mut page = loaded(store).await;
        page.apply(&HomeParams {
            member: Some("1".to_string()),
            ..Default::default()
        });
        let roster = page.roster.ready().unwrap();
        assert_eq!(roster.selected(), "english");
        assert_eq!(roster.current_member().map(|f| f.name.as_str()), Some("Ben"));

        page.apply(&HomeParams {
            subject: Some("founder".to_string()),
            ..Default::default()
        });
        let roster = page.roster.ready().unwrap();
        assert_eq!(roster.heading(), "創辦人介紹");
        assert_eq!(roster.current_index(), 0);
        assert!(!roster.show_carousel_controls());
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_cross_fade() {
        let store = MemoryTableStore::new().with_table(FACULTY, faculty()).unwrap();
        let page = loaded(store).await;
        let roster = LiveRoster::new(page.roster.ready().unwrap().clone());

        roster.select_subject("math-leopard");
        assert!(roster.with(|r| r.is_transitioning()));
        assert_eq!(roster.with(|r| r.selected()), "english");

        tokio::time::sleep(FADE_OUT + Duration::from_millis(1)).await;
        assert_eq!(roster.with(|r| r.selected()), "math-leopard");

        tokio::time::sleep(SWITCH_SETTLE + FADE_IN + Duration::from_millis(1)).await;
        assert!(!roster.with(|r| r.is_transitioning()));
        assert_eq!(
            roster.with(|r| r.current_team().iter().map(|f| f.name.clone()).collect::<Vec<_>>()),
            vec!["Cleo".to_string()]
        );
    }
}

mod hero_news_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hero_wraps() {
        let slides: Vec<Value> = (1..=3)
            .map(|n| json!({"id": id(300 + n), "title": format!("Slide {n}"), "order_index": n, "is_active": true}))
            .collect();
        let store = MemoryTableStore::new().with_table(HERO_SLIDES, slides).unwrap();
        let page = loaded(store).await;
        let carousel: HeroCarousel = page.hero.ready().unwrap().clone();
        let live = LiveHeroCarousel::start(carousel, Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(15_001)).await;
        assert_eq!(live.current_index(), 0);
        assert_eq!(live.current().map(|s| s.title), Some("Slide 1".to_string()));
    }

    #[tokio::test]
    async fn test_news_reveal() {
        let store = MemoryTableStore::new().with_table(NEWS, news(8)).unwrap();
        let mut page = loaded(store).await;
        let feed = page.news.ready_mut().unwrap();

        assert_eq!(feed.visible().first().map(|n| n.title.as_str()), Some("News 8"));
        assert_eq!(feed.visible().len(), 6);
        assert!(feed.has_more());

        feed.load_more();
        assert_eq!(feed.visible().len(), 8);
        assert!(!feed.has_more());
    }
}
