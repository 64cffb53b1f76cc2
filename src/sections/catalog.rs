//! Course catalog: grade tabs, pagination and the course modal

use uuid::Uuid;

use crate::models::{Course, GradeBand};
use crate::scroll_lock::{ScrollGuard, ScrollLock};

/// Cards per catalog page
pub const COURSES_PER_PAGE: usize = 5;

/// Course titles listed under each tab, for rows without a `grade_band`
pub fn tab_titles(band: GradeBand) -> &'static [&'static str] {
    match band {
        GradeBand::Elementary => &[
            "薇閣國小課輔班",
            "學姊英文小團班",
            "小獵豹（薇閣專班）",
            "薇閣升國七實力班",
            "學姐英文個人班",
        ],
        GradeBand::JuniorHigh => &[
            "獵豹數學（薇閣專班）",
            "學姐英文（薇閣專班）",
            "鎮麟自然（薇閣專班）",
            "易學國文（薇閣專班）",
        ],
        GradeBand::HighSchool => &["TOEFL/SAT/AP 個人班", "海外留學諮詢"],
    }
}

/// Tab a course is listed under; `None` hides it from every tab
pub fn band_of(course: &Course) -> Option<GradeBand> {
    course.grade_band.or_else(|| {
        GradeBand::ALL
            .into_iter()
            .find(|band| tab_titles(*band).contains(&course.title.as_str()))
    })
}

/// Number of pages needed for `count` cards
pub fn page_count(count: usize) -> usize {
    count.div_ceil(COURSES_PER_PAGE)
}

#[derive(Debug)]
struct OpenModal {
    course: usize,
    _scroll: ScrollGuard,
}

/// Catalog view state over the loaded courses
#[derive(Debug)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    active_tab: GradeBand,
    current_page: usize,
    modal: Option<OpenModal>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            active_tab: GradeBand::Elementary,
            current_page: 1,
            modal: None,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn active_tab(&self) -> GradeBand {
        self.active_tab
    }

    /// 1-based page number
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Switch tab; always returns to the first page
    pub fn select_tab(&mut self, tab: GradeBand) {
        self.active_tab = tab;
        self.current_page = 1;
    }

    /// Courses under the active tab, in load order
    pub fn filtered(&self) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| band_of(c) == Some(self.active_tab))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.filtered().len())
    }

    /// Cards on the current page
    pub fn visible(&self) -> Vec<&Course> {
        self.filtered()
            .into_iter()
            .skip((self.current_page - 1) * COURSES_PER_PAGE)
            .take(COURSES_PER_PAGE)
            .collect()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Pager controls are hidden for a single page
    pub fn show_pager(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.current_page -= 1;
        }
    }

    /// Jump to `page`, clamped to the available pages
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    /// Open the modal for the course with `id`, locking page scroll.
    ///
    /// Returns `false` (and leaves any open modal as it was) when the course
    /// is not part of the loaded catalog.
    pub fn open_course(&mut self, id: Uuid, document: &ScrollLock) -> bool {
        match self.courses.iter().position(|c| c.id == id) {
            Some(course) => {
                self.modal = Some(OpenModal {
                    course,
                    _scroll: document.acquire(),
                });
                true
            }
            None => false,
        }
    }

    /// Open the modal by slug or id, as given in a `?course=` link
    pub fn open_course_by_key(&mut self, key: &str, document: &ScrollLock) -> bool {
        let id = self
            .courses
            .iter()
            .find(|c| c.slug == key || c.id.to_string() == key)
            .map(|c| c.id);
        match id {
            Some(id) => self.open_course(id, document),
            None => false,
        }
    }

    /// Close the modal and release its scroll-lock
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn selected(&self) -> Option<&Course> {
        self.modal.as_ref().map(|m| &self.courses[m.course])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(n: u128, title: &str, band: Option<GradeBand>) -> Course {
        Course {
            id: Uuid::from_u128(n),
            slug: format!("course-{n}"),
            title: title.to_string(),
            grade_band: band,
            ..Default::default()
        }
    }

    fn elementary(count: u128) -> Vec<Course> {
        (1..=count)
            .map(|n| course(n, &format!("Course {n}"), Some(GradeBand::Elementary)))
            .collect()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(5), 1);
        assert_eq!(page_count(6), 2);
        assert_eq!(page_count(12), 3);
    }

    #[test]
    fn test_empty_catalog_has_no_pages() {
        let mut catalog = CourseCatalog::new(Vec::new());
        assert_eq!(catalog.total_pages(), 0);
        assert!(!catalog.has_prev());
        assert!(!catalog.has_next());
        assert!(!catalog.show_pager());
        assert!(catalog.visible().is_empty());
        catalog.next_page();
        catalog.go_to_page(4);
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_paging_clamps_at_ends() {
        let mut catalog = CourseCatalog::new(elementary(12));
        assert_eq!(catalog.total_pages(), 3);
        catalog.prev_page();
        assert_eq!(catalog.current_page(), 1);
        catalog.next_page();
        catalog.next_page();
        catalog.next_page();
        assert_eq!(catalog.current_page(), 3);
        assert!(!catalog.has_next());
        assert_eq!(catalog.visible().len(), 2);
        assert_eq!(catalog.visible()[0].title, "Course 11");
    }

    #[test]
    fn test_tab_switch_resets_page() {
        let mut catalog = CourseCatalog::new(elementary(7));
        catalog.next_page();
        assert_eq!(catalog.current_page(), 2);
        catalog.select_tab(GradeBand::HighSchool);
        assert_eq!(catalog.current_page(), 1);
        catalog.go_to_page(2);
        catalog.select_tab(GradeBand::Elementary);
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_grade_band_beats_title_list() {
        let courses = vec![
            course(1, "海外留學諮詢", None),
            course(2, "海外留學諮詢", Some(GradeBand::JuniorHigh)),
            course(3, "Unlisted", None),
        ];
        let mut catalog = CourseCatalog::new(courses);
        assert!(catalog.filtered().is_empty());
        catalog.select_tab(GradeBand::HighSchool);
        assert_eq!(catalog.filtered()[0].id, Uuid::from_u128(1));
        catalog.select_tab(GradeBand::JuniorHigh);
        assert_eq!(catalog.filtered()[0].id, Uuid::from_u128(2));
    }

    #[test]
    fn test_modal_holds_scroll_lock() {
        let document = ScrollLock::new();
        let mut catalog = CourseCatalog::new(elementary(2));
        assert!(catalog.open_course_by_key("course-2", &document));
        assert!(document.is_locked());
        assert_eq!(catalog.selected().map(|c| c.id), Some(Uuid::from_u128(2)));

        catalog.close_modal();
        assert!(!document.is_locked());
        assert!(catalog.selected().is_none());

        assert!(!catalog.open_course(Uuid::from_u128(99), &document));
        assert!(!document.is_locked());
    }

    #[test]
    fn test_dropping_catalog_releases_lock() {
        let document = ScrollLock::new();
        let mut catalog = CourseCatalog::new(elementary(1));
        catalog.open_course(Uuid::from_u128(1), &document);
        drop(catalog);
        assert!(!document.is_locked());
    }
}
