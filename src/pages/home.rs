//! Home page: hero, about, catalog, roster and news sections

use serde::Deserialize;

use crate::client::ContentClient;
use crate::models::GradeBand;
use crate::scroll_lock::ScrollLock;
use crate::sections::news::NEWS_STEP;
use crate::sections::roster::DEFAULT_SUBJECT;
use crate::sections::{
    CourseCatalog, FacultyRoster, HeroCarousel, NewsFeed, Section, SectionLoader,
};
use crate::storage::TableStore;

/// UI substate carried in home page links.
///
/// Values are kept as text and parsed leniently: a malformed parameter is
/// ignored rather than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HomeParams {
    /// `elementary`, `junior-high` or `high-school`
    pub tab: Option<String>,
    /// 1-based catalog page
    pub page: Option<String>,
    /// Course shown in the modal, by slug or id
    pub course: Option<String>,
    /// Roster subject key
    pub subject: Option<String>,
    /// Roster carousel index
    pub member: Option<String>,
    /// News cards revealed
    pub news: Option<String>,
    /// Hero slide index
    pub slide: Option<String>,
}

fn number(value: &Option<String>) -> Option<usize> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

impl HomeParams {
    pub fn tab(&self) -> Option<GradeBand> {
        self.tab.as_deref().and_then(GradeBand::parse)
    }

    pub fn page(&self) -> Option<usize> {
        number(&self.page)
    }

    pub fn member(&self) -> Option<usize> {
        number(&self.member)
    }

    pub fn news(&self) -> Option<usize> {
        number(&self.news)
    }

    pub fn slide(&self) -> Option<usize> {
        number(&self.slide)
    }

    /// Home URL carrying these parameters, scrolled to `anchor`
    pub fn href(&self, anchor: &str) -> String {
        let pairs: Vec<String> = [
            ("tab", &self.tab),
            ("page", &self.page),
            ("course", &self.course),
            ("subject", &self.subject),
            ("member", &self.member),
            ("news", &self.news),
            ("slide", &self.slide),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(|v| format!("{}={}", name, urlencoding::encode(v)))
        })
        .collect();

        let mut href = String::from("/");
        if !pairs.is_empty() {
            href.push('?');
            href.push_str(&pairs.join("&"));
        }
        if !anchor.is_empty() {
            href.push('#');
            href.push_str(anchor);
        }
        href
    }
}

/// View model of the home page
#[derive(Debug)]
pub struct HomePage {
    pub hero: Section<HeroCarousel>,
    pub catalog: Section<CourseCatalog>,
    pub roster: Section<FacultyRoster>,
    pub news: Section<NewsFeed>,
    /// Scroll-lock of the rendered document, held by the course modal
    pub document: ScrollLock,
}

impl HomePage {
    /// Every section still waiting on its read
    pub fn loading() -> Self {
        Self {
            hero: Section::Loading,
            catalog: Section::Loading,
            roster: Section::Loading,
            news: Section::Loading,
            document: ScrollLock::new(),
        }
    }

    /// Mount all sections, reading concurrently; each issues one read
    pub async fn load<S: TableStore>(client: &ContentClient<S>) -> Self {
        let mut hero = SectionLoader::new("hero");
        let mut courses = SectionLoader::new("courses");
        let mut faculty = SectionLoader::new("faculty");
        let mut news = SectionLoader::new("news");

        tokio::join!(
            hero.mount(|| client.hero_slides()),
            courses.mount(|| client.courses()),
            faculty.mount(|| client.faculty()),
            news.mount(|| client.latest_news()),
        );

        Self {
            hero: hero.into_state().map(|slides| HeroCarousel::new(&slides)),
            catalog: courses.into_state().map(CourseCatalog::new),
            roster: faculty.into_state().map(FacultyRoster::new),
            news: news.into_state().map(NewsFeed::new),
            document: ScrollLock::new(),
        }
    }

    /// Parameters reproducing the current substate; defaults are left out
    pub fn link_state(&self) -> HomeParams {
        let mut params = HomeParams::default();

        if let Some(hero) = self.hero.ready() {
            params.slide = (hero.current_index() > 0).then(|| hero.current_index().to_string());
        }
        if let Some(catalog) = self.catalog.ready() {
            params.tab = (catalog.active_tab() != GradeBand::default())
                .then(|| catalog.active_tab().slug().to_string());
            params.page = (catalog.current_page() > 1).then(|| catalog.current_page().to_string());
            params.course = catalog.selected().map(|c| {
                if c.slug.is_empty() {
                    c.id.to_string()
                } else {
                    c.slug.clone()
                }
            });
        }
        if let Some(roster) = self.roster.ready() {
            params.subject =
                (roster.selected() != DEFAULT_SUBJECT).then(|| roster.selected().to_string());
            params.member =
                (roster.current_index() > 0).then(|| roster.current_index().to_string());
        }
        if let Some(feed) = self.news.ready() {
            params.news =
                (feed.display_count() != NEWS_STEP).then(|| feed.display_count().to_string());
        }
        params
    }

    /// Restore UI substate from link parameters
    pub fn apply(&mut self, params: &HomeParams) {
        if let (Some(hero), Some(slide)) = (self.hero.ready_mut(), params.slide()) {
            hero.go_to(slide);
        }

        if let Some(catalog) = self.catalog.ready_mut() {
            if let Some(tab) = params.tab() {
                catalog.select_tab(tab);
            }
            if let Some(page) = params.page() {
                catalog.go_to_page(page);
            }
            if let Some(course) = params.course.as_deref() {
                catalog.open_course_by_key(course, &self.document);
            }
        }

        if let Some(roster) = self.roster.ready_mut() {
            if let Some(subject) = params.subject.as_deref() {
                roster.select_subject(subject);
            }
            if let Some(member) = params.member() {
                roster.go_to(member);
            }
        }

        if let (Some(feed), Some(count)) = (self.news.ready_mut(), params.news()) {
            feed.reveal(count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{COURSES, FACULTY, HERO_SLIDES, NEWS};
    use crate::storage::memory::MemoryTableStore;
    use serde_json::json;

    fn store() -> MemoryTableStore {
        MemoryTableStore::new()
            .with_table(
                COURSES,
                vec![
                    json!({"id": "00000000-0000-0000-0000-000000000001", "slug": "toefl", "title": "TOEFL/SAT/AP 個人班", "order_index": 1, "is_active": true}),
                    json!({"id": "00000000-0000-0000-0000-000000000002", "slug": "camp", "title": "學姊英文小團班", "order_index": 2, "is_active": true}),
                ],
            )
            .unwrap()
            .with_table(
                FACULTY,
                vec![
                    json!({"id": "00000000-0000-0000-0000-000000000011", "name": "A", "subject": "english", "is_active": true}),
                    json!({"id": "00000000-0000-0000-0000-000000000012", "name": "B", "subject": "english", "is_active": true}),
                ],
            )
            .unwrap()
            .with_table(HERO_SLIDES, Vec::new())
            .unwrap()
            .with_table(NEWS, Vec::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_populates_sections() {
        let client = ContentClient::new(store());
        let page = HomePage::load(&client).await;
        assert_eq!(page.catalog.ready().map(|c| c.courses().len()), Some(2));
        assert_eq!(page.roster.ready().map(|r| r.current_team().len()), Some(2));
        assert!(page.hero.ready().is_some_and(HeroCarousel::is_empty));
        assert!(page.news.ready().is_some_and(NewsFeed::is_empty));
    }

    #[tokio::test]
    async fn test_failed_section_renders_empty() {
        let store = store();
        store.fail_table(FACULTY);
        let page = HomePage::load(&ContentClient::new(store)).await;
        assert!(page.roster.ready().is_some_and(|r| r.faculty().is_empty()));
        assert_eq!(page.catalog.ready().map(|c| c.courses().len()), Some(2));
    }

    #[tokio::test]
    async fn test_apply_params() {
        let client = ContentClient::new(store());
        let mut page = HomePage::load(&client).await;
        page.apply(&HomeParams {
            tab: Some("high-school".to_string()),
            page: Some("9".to_string()),
            course: Some("toefl".to_string()),
            member: Some("1".to_string()),
            news: Some("lots".to_string()),
            ..Default::default()
        });

        let catalog = page.catalog.ready().unwrap();
        assert_eq!(catalog.active_tab(), GradeBand::HighSchool);
        assert_eq!(catalog.current_page(), 1);
        assert_eq!(catalog.selected().map(|c| c.slug.as_str()), Some("toefl"));
        assert!(page.document.is_locked());
        assert_eq!(page.roster.ready().unwrap().current_index(), 1);
        assert_eq!(page.news.ready().unwrap().display_count(), 6);
    }

    #[tokio::test]
    async fn test_link_state_round_trips() {
        let client = ContentClient::new(store());
        let mut page = HomePage::load(&client).await;
        assert_eq!(page.link_state().href("programs"), "/#programs");

        let params = HomeParams {
            tab: Some("high-school".to_string()),
            course: Some("toefl".to_string()),
            subject: Some("founder".to_string()),
            ..Default::default()
        };
        page.apply(&params);
        assert_eq!(page.link_state(), params);
        assert_eq!(
            page.link_state().href("team"),
            "/?tab=high-school&course=toefl&subject=founder#team"
        );
    }

    #[test]
    fn test_href_encodes_values() {
        let params = HomeParams {
            course: Some("英文 班".to_string()),
            ..Default::default()
        };
        assert_eq!(params.href(""), "/?course=%E8%8B%B1%E6%96%87%20%E7%8F%AD");
    }

    #[test]
    fn test_loading_page_has_no_content() {
        let mut page = HomePage::loading();
        page.apply(&HomeParams {
            course: Some("toefl".to_string()),
            ..Default::default()
        });
        assert!(page.catalog.is_loading());
        assert!(!page.document.is_locked());
    }
}
