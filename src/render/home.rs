//! Home page sections

use maud::{Markup, PreEscaped, html};

use crate::config::SiteInfo;
use crate::models::{Course, Faculty, GradeBand, present};
use crate::pages::{HomePage, HomeParams};
use crate::sections::hero::AUTO_ADVANCE;
use crate::sections::news::NEWS_STEP;
use crate::sections::roster::{Layout, SUBJECTS};
use crate::sections::{
    CourseCatalog, FacultyRoster, HeroCarousel, NewsFeed, ResolvedSlide, Section,
};

use super::{external_link, layout, section_heading, skeleton_cards};

/// About section values: title and blurb
const VALUES: [(&str, &str); 3] = [
    (
        "國際化教育視野",
        "培養學生具備國際競爭力，接軌世界頂尖學府的教學標準，讓孩子站在更高的起點展望未來。",
    ),
    (
        "頂尖師資陣容",
        "匯集業界最強師資團隊，每位老師都擁有豐富的教學經驗與專業背景，用心陪伴每一位學生成長。",
    ),
    (
        "薇閣專班課程",
        "針對薇閣學生量身打造的專屬課程，完全配合學校進度，讓學生在校內外學習無縫接軌，成績更上一層樓。",
    ),
];

const RESULTS: [(&str, &str); 3] = [
    ("Top", "頂尖海外留學師資團隊"),
    ("95%", "學生成績PR85以上"),
    ("100%", "薇閣專班進度同步"),
];

pub fn home_page(site: &SiteInfo, page: &HomePage) -> Markup {
    let state = page.link_state();
    layout(
        site,
        &site.name,
        page.document.is_locked(),
        html! {
            (hero(&page.hero, &state))
            (about())
            (catalog(site, &page.catalog, &state))
            (team(&page.roster, &state))
            (news(&page.news, &state))
        },
    )
}

fn hero(section: &Section<HeroCarousel>, state: &HomeParams) -> Markup {
    let carousel = match section {
        Section::Ready(carousel) if !carousel.is_empty() => carousel,
        _ => return html! { section.hero.hero-placeholder { div.hero-backdrop {} } },
    };
    let current = carousel.current_index();

    html! {
        section.hero
            data-interval-ms=(AUTO_ADVANCE.as_millis().to_string())
            data-current=(current.to_string()) {
            @for (i, slide) in carousel.slides().iter().enumerate() {
                @match &slide.link {
                    Some(link) => {
                        a.hero-slide href=(link) hidden[i != current] data-slide=(i.to_string()) { (slide_content(slide)) }
                    },
                    None => {
                        div.hero-slide hidden[i != current] data-slide=(i.to_string()) { (slide_content(slide)) }
                    },
                }
            }
            @if carousel.len() > 1 {
                div.hero-dots {
                    @for i in 0..carousel.len() {
                        @let target = HomeParams {
                            slide: (i > 0).then(|| i.to_string()),
                            ..state.clone()
                        };
                        a.dot.active[i == current] href=(target.href("")) aria-label={ "Slide " (i + 1) } {}
                    }
                }
                script { (PreEscaped(HERO_ADVANCE_SCRIPT)) }
            }
        }
    }
}

/// Cycles the rendered slides in the browser every `data-interval-ms`,
/// wrapping to the first after the last. The dot links stay as the
/// no-script fallback.
const HERO_ADVANCE_SCRIPT: &str = "(function () {\
var hero = document.currentScript.parentElement;\
var slides = hero.querySelectorAll('[data-slide]');\
var dots = hero.querySelectorAll('.hero-dots .dot');\
var current = Number(hero.dataset.current) || 0;\
setInterval(function () {\
slides[current].hidden = true;\
if (dots[current]) dots[current].classList.remove('active');\
current = (current + 1) % slides.length;\
slides[current].hidden = false;\
if (dots[current]) dots[current].classList.add('active');\
}, Number(hero.dataset.intervalMs));\
})();";

fn slide_content(slide: &ResolvedSlide) -> Markup {
    html! {
        img.hero-image src=(slide.image_url) alt=(slide.alt);
        div.hero-overlay {}
        div.hero-text {
            @if let Some(category) = &slide.category {
                span.hero-category { (category) }
            }
            h1 { (slide.title) }
            @if let Some(description) = present(&slide.description) {
                p { (description) }
            }
        }
    }
}

fn about() -> Markup {
    html! {
        section #about.about {
            div.section-intro {
                h2 { "About 學姐補習班" }
                p {
                    "專注於培養具國際視野的優秀學子，以最強師資團隊、完善的薇閣專班課程，為每位學生打造通往頂尖學府的成功之路。"
                }
            }
            div.values {
                @for (title, description) in VALUES {
                    div.value {
                        h3 { (title) }
                        p { (description) }
                    }
                }
            }
            div.mission {
                h3 { "我們的使命" }
                p {
                    "學姐補習班專注於提供最高品質的教育服務，我們深知每位家長對孩子教育的重視與期待。"
                    "透過國際化的教學理念、業界最強的師資陣容，以及針對薇閣學生量身打造的專屬課程。"
                }
                p {
                    "我們不只是補習班，更是孩子成長路上最堅實的後盾。從基礎奠定到進階提升，每一步都用心規劃，讓學生在學業與品格上同步成長。"
                }
            }
            div.results {
                h3 { "辦學成果" }
                @for (figure, label) in RESULTS {
                    div.result {
                        div.figure { (figure) }
                        div.label { (label) }
                    }
                }
            }
        }
    }
}

fn catalog(site: &SiteInfo, section: &Section<CourseCatalog>, state: &HomeParams) -> Markup {
    html! {
        section #programs.programs {
            (section_heading("Our Programs", "Academic", "Programs"))
            @match section {
                Section::Loading => {
                    div.course-list { (skeleton_cards(5, 4)) }
                },
                Section::Ready(catalog) => {
                    (catalog_tabs(catalog, state))
                    div.course-list {
                        @for course in catalog.visible() {
                            (course_card(course, state))
                        }
                    }
                    @if catalog.show_pager() {
                        (pager(catalog, state))
                    }
                    @if let Some(course) = catalog.selected() {
                        (course_modal(site, course, state))
                    }
                },
            }
        }
    }
}

fn catalog_tabs(catalog: &CourseCatalog, state: &HomeParams) -> Markup {
    html! {
        div.tabs role="tablist" {
            @for band in GradeBand::ALL {
                @let target = HomeParams {
                    tab: Some(band.slug().to_string()),
                    page: None,
                    course: None,
                    ..state.clone()
                };
                a.tab.active[band == catalog.active_tab()] role="tab" href=(target.href("programs")) {
                    (band.label())
                }
            }
        }
    }
}

fn course_card(course: &Course, state: &HomeParams) -> Markup {
    let target = HomeParams {
        course: Some(if course.slug.is_empty() { course.id.to_string() } else { course.slug.clone() }),
        ..state.clone()
    };
    html! {
        a.course-card href=(target.href("programs")) {
            article {
                div.card-meta {
                    span.category { (course.category) }
                    p.level { (course.level) }
                }
                h3 { (course.title) }
                p.summary { (course.summary()) }
                span.more { "LEARN MORE" }
            }
        }
    }
}

fn pager(catalog: &CourseCatalog, state: &HomeParams) -> Markup {
    let page_link = |page: usize| {
        HomeParams {
            page: (page > 1).then(|| page.to_string()),
            course: None,
            ..state.clone()
        }
        .href("programs")
    };
    let current = catalog.current_page();
    html! {
        nav.pager {
            @if catalog.has_prev() {
                a.prev href=(page_link(current - 1)) aria-label="Previous page" { "‹" }
            } @else {
                span.prev.disabled aria-disabled="true" { "‹" }
            }
            span.page-status { "Page " (current) " of " (catalog.total_pages()) }
            @if catalog.has_next() {
                a.next href=(page_link(current + 1)) aria-label="Next page" { "›" }
            } @else {
                span.next.disabled aria-disabled="true" { "›" }
            }
        }
    }
}

fn course_modal(site: &SiteInfo, course: &Course, state: &HomeParams) -> Markup {
    let close = HomeParams {
        course: None,
        ..state.clone()
    }
    .href("programs");
    let facts = course.schedule_facts();
    html! {
        div.modal-backdrop role="dialog" aria-modal="true" {
            div.modal {
                a.modal-close href=(close) aria-label="Close modal" { "×" }
                div.card-meta {
                    span.category { (course.category) }
                    p.level { (course.level) }
                }
                h2 { (course.title) }
                p.summary { (course.summary()) }
                @if !facts.is_empty() {
                    div.course-info {
                        h3 { "課程資訊" }
                        @for (label, value) in &facts {
                            div.fact {
                                p.fact-label { (label) }
                                p.fact-value { (value) }
                            }
                        }
                    }
                }
                @if let Some(audience) = present(&course.target_audience) {
                    div { h3 { "適合對象" } p { (audience) } }
                }
                @if let Some(prerequisites) = present(&course.prerequisites) {
                    div { h3 { "報名條件" } p { (prerequisites) } }
                }
                div.modal-actions {
                    (external_link(&site.inquiry_url, "cta", "立即諮詢"))
                    @if !course.slug.is_empty() {
                        a.details href=(course.href()) { "課程詳情" }
                    }
                    a.close href=(close) { "關閉" }
                }
            }
        }
    }
}

fn team(section: &Section<FacultyRoster>, state: &HomeParams) -> Markup {
    html! {
        section #team.team {
            (section_heading("Faculty", "Instructors &", "Mentors"))
            @match section {
                Section::Loading => {
                    div.team-grid { (skeleton_cards(3, 3)) }
                },
                Section::Ready(roster) => {
                    div.subject-tabs {
                        @for subject in SUBJECTS {
                            @let target = HomeParams {
                                subject: Some(subject.key.to_string()),
                                member: None,
                                ..state.clone()
                            };
                            a.subject.active[subject.key == roster.selected()] href=(target.href("team")) {
                                span.icon { (subject.icon) }
                                span { (subject.label) }
                            }
                        }
                    }
                    div.team-content.fading[roster.is_transitioning()] {
                        @match roster.layout() {
                            Layout::Founder => {
                                @for member in roster.current_team() {
                                    (member_card(member, "founder-card", true))
                                }
                            },
                            Layout::Grid => {
                                div.team-grid {
                                    @for member in roster.current_team() {
                                        (member_card(member, "member-card", false))
                                    }
                                }
                                (team_carousel(roster, state))
                            },
                        }
                    }
                },
            }
        }
    }
}

fn member_card(member: &Faculty, class: &str, founder: bool) -> Markup {
    html! {
        article class=(class) {
            div.portrait {
                img src=(member.image_url) alt=(member.name);
                @if let Some(video) = &member.video_url {
                    a.video href=(video) target="_blank" rel="noopener noreferrer" {
                        @if let Some(thumbnail) = &member.video_thumbnail_url {
                            img.video-thumbnail src=(thumbnail) alt={ (member.name) " video" };
                        }
                        span.play { "▶" }
                        span { @if founder { "創辦人介紹" } @else { "教師介紹" } }
                    }
                }
            }
            div.member-text {
                h3 { (member.name) }
                @if let Some(credentials) = present(&member.credentials) {
                    p.credentials { (credentials) }
                }
                @if let Some(role) = present(&member.role) {
                    p.role { (role) }
                }
                @if let Some(specialization) = present(&member.specialization) {
                    p.label { "專長" }
                    p { (specialization) }
                }
                @if let Some(experience) = present(&member.experience) {
                    p.label { @if founder { "經歷" } @else { "教學經驗" } }
                    p { (experience) }
                }
            }
        }
    }
}

/// Narrow-viewport carousel over the current team
fn team_carousel(roster: &FacultyRoster, state: &HomeParams) -> Markup {
    let team = roster.current_team();
    let count = team.len();
    let member_link = |index: usize| {
        HomeParams {
            member: (index > 0).then(|| index.to_string()),
            ..state.clone()
        }
        .href("team")
    };
    html! {
        div.team-carousel {
            @if let Some(member) = roster.current_member() {
                (member_card(member, "member-card", false))
            }
            @if roster.show_carousel_controls() {
                @let current = roster.current_index();
                a.prev href=(member_link((current + count - 1) % count)) aria-label="Previous teacher" { "‹" }
                a.next href=(member_link((current + 1) % count)) aria-label="Next teacher" { "›" }
                div.dots {
                    @for i in 0..count {
                        a.dot.active[i == current] href=(member_link(i)) aria-label={ "Teacher " (i + 1) } {}
                    }
                }
            }
        }
    }
}

fn news(section: &Section<NewsFeed>, state: &HomeParams) -> Markup {
    html! {
        section #news.news {
            (section_heading("Insights", "Latest", "News"))
            @match section {
                Section::Loading => {
                    div.news-grid { (skeleton_cards(NEWS_STEP, 4)) }
                },
                Section::Ready(feed) => {
                    div.news-grid {
                        @for item in feed.visible() {
                            a.news-card href=(item.href()) {
                                article {
                                    div.news-image {
                                        img src=(item.image_url) alt=(item.title) loading="lazy";
                                        @if let Some(category) = present(&item.category) {
                                            span.category { (category) }
                                        }
                                    }
                                    p.date { (item.display_date()) }
                                    h3 { (item.title) }
                                    p.excerpt { (item.excerpt) }
                                }
                            }
                        }
                    }
                    @if feed.has_more() {
                        @let target = HomeParams {
                            news: Some((feed.display_count() + NEWS_STEP).to_string()),
                            ..state.clone()
                        };
                        a.load-more href=(target.href("news")) { "LOAD MORE NEWS" }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::JoinedSlide;
    use crate::models::{HeroSlide, News};
    use uuid::Uuid;

    fn course(n: u128, title: &str) -> Course {
        Course {
            id: Uuid::from_u128(n),
            slug: format!("course-{n}"),
            title: title.to_string(),
            grade_band: Some(GradeBand::Elementary),
            ..Default::default()
        }
    }

    fn ready_page() -> HomePage {
        let mut page = HomePage::loading();
        page.hero = Section::Ready(HeroCarousel::new(&[JoinedSlide {
            slide: HeroSlide {
                id: Uuid::from_u128(1),
                title: "Welcome".to_string(),
                ..Default::default()
            },
            news: None,
        }]));
        page.catalog = Section::Ready(CourseCatalog::new((1..=7).map(|n| course(n, &format!("C{n}"))).collect()));
        page.roster = Section::Ready(FacultyRoster::new(Vec::new()));
        page.news = Section::Ready(NewsFeed::new(
            (0..8)
                .map(|n| News {
                    id: Uuid::from_u128(100 + n),
                    title: format!("N{n}"),
                    ..Default::default()
                })
                .collect(),
        ));
        page
    }

    #[test]
    fn test_loading_renders_skeletons() {
        let html = home_page(&SiteInfo::default(), &HomePage::loading()).into_string();
        assert!(html.contains("hero-placeholder"));
        assert!(html.contains("skeleton-card"));
        assert!(!html.contains("LOAD MORE NEWS"));
    }

    #[test]
    fn test_empty_sections_render_neutral() {
        let mut page = HomePage::loading();
        page.hero = Section::Ready(HeroCarousel::default());
        page.catalog = Section::Ready(CourseCatalog::new(Vec::new()));
        page.roster = Section::Ready(FacultyRoster::new(Vec::new()));
        page.news = Section::Ready(NewsFeed::new(Vec::new()));
        let html = home_page(&SiteInfo::default(), &page).into_string();
        assert!(html.contains("hero-placeholder"));
        assert!(!html.contains("skeleton-card"));
        assert!(!html.contains("page-status"));
        assert!(!html.contains("course-card"));
        assert!(!html.contains("news-card"));
        assert!(html.contains("About 學姐補習班"));
    }

    #[test]
    fn test_ready_sections() {
        let html = home_page(&SiteInfo::default(), &ready_page()).into_string();
        assert!(html.contains("Welcome"));
        assert!(html.contains("Page 1 of 2"));
        assert_eq!(html.matches("class=\"course-card\"").count(), 5);
        assert_eq!(html.matches("class=\"news-card\"").count(), 6);
        assert!(html.contains("/?news=12#news"));
        assert!(html.contains("/?page=2#programs"));
        assert!(!html.contains("hero-dots"));
    }

    #[test]
    fn test_hero_renders_every_slide_for_auto_advance() {
        let mut page = ready_page();
        let slides: Vec<JoinedSlide> = (1..=3)
            .map(|n| JoinedSlide {
                slide: HeroSlide {
                    id: Uuid::from_u128(n),
                    title: format!("Slide {n}"),
                    ..Default::default()
                },
                news: None,
            })
            .collect();
        page.hero = Section::Ready(HeroCarousel::new(&slides));
        page.apply(&HomeParams {
            slide: Some("2".to_string()),
            ..Default::default()
        });
        let html = home_page(&SiteInfo::default(), &page).into_string();

        assert!(html.contains(r#"data-interval-ms="5000" data-current="2""#));
        assert!(html.contains(r#"<div class="hero-slide" hidden data-slide="0">"#));
        assert!(html.contains(r#"<div class="hero-slide" hidden data-slide="1">"#));
        assert!(html.contains(r#"<div class="hero-slide" data-slide="2">"#));
        assert!(html.contains("<script>"));
        assert!(html.contains("(current + 1) % slides.length"));
        // the last dot is active; the first dot links back to slide 0
        assert!(html.contains(r#"class="dot active" href="/?slide=2""#));
        assert!(html.contains(r#"class="dot" href="/""#));
    }

    #[test]
    fn test_single_slide_has_no_timer_script() {
        let html = home_page(&SiteInfo::default(), &ready_page()).into_string();
        assert!(html.contains(r#"<div class="hero-slide" data-slide="0">"#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_modal_render() {
        let mut page = ready_page();
        page.apply(&HomeParams {
            course: Some("course-2".to_string()),
            ..Default::default()
        });
        let html = home_page(&SiteInfo::default(), &page).into_string();
        assert!(html.contains("modal-backdrop"));
        assert!(html.contains("scroll-locked"));
        assert!(html.contains("立即諮詢"));
        assert!(html.contains(r#"href="/courses/course-2""#));
    }
}
