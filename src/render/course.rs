//! Course detail page

use maud::{Markup, html};

use crate::config::SiteInfo;
use crate::models::{Course, present};

use super::{external_link, layout, not_found};

pub const NOT_FOUND: &str = "課程未找到";

pub fn course_not_found(site: &SiteInfo) -> Markup {
    not_found(site, NOT_FOUND)
}

fn eyebrow(label: &str) -> Markup {
    html! {
        div.eyebrow-row {
            div.rule {}
            span.eyebrow { (label) }
        }
    }
}

pub fn course_page(site: &SiteInfo, course: &Course) -> Markup {
    let mut info = course.schedule_facts();
    info.extend(
        [
            ("報名條件", course.prerequisites.as_str()),
            ("適合對象", course.target_audience.as_str()),
        ]
        .into_iter()
        .filter_map(|(label, value)| present(value).map(|v| (label, v))),
    );

    layout(
        site,
        &course.title,
        false,
        html! {
            article.course-detail {
                div.detail-hero {
                    @if let Some(image) = present(&course.image_url) {
                        img src=(image) alt=(course.title);
                    }
                    div.detail-hero-overlay {}
                    a.back href="/" { "返回首頁" }
                    @if let Some(level) = present(&course.level) {
                        span.level { (level) }
                    }
                    h1 { (course.title) }
                    @if let Some(subtitle) = present(&course.subtitle) {
                        p.subtitle { (subtitle) }
                    }
                }
                div.detail-body {
                    div.detail-main {
                        @if let Some(description) = present(&course.description) {
                            section {
                                (eyebrow("課程簡介"))
                                p { (description) }
                            }
                        }
                        @if !course.highlights.is_empty() {
                            section {
                                (eyebrow("課程特色"))
                                ul.highlights {
                                    @for highlight in &course.highlights {
                                        li { (highlight) }
                                    }
                                }
                            }
                        }
                        @if !course.curriculum.is_empty() {
                            section {
                                (eyebrow("課程大綱"))
                                ol.curriculum {
                                    @for (i, item) in course.curriculum.iter().enumerate() {
                                        li {
                                            span.step { (format!("{:02}", i + 1)) }
                                            p { (item) }
                                        }
                                    }
                                }
                            }
                        }
                        @if !course.outcomes.is_empty() {
                            section {
                                (eyebrow("學習成果"))
                                ul.outcomes {
                                    @for outcome in &course.outcomes {
                                        li { (outcome) }
                                    }
                                }
                            }
                        }
                    }
                    aside.detail-side {
                        @if !info.is_empty() {
                            div.info-panel {
                                h3 { "課程資訊" }
                                @for (label, value) in &info {
                                    div.fact {
                                        p.fact-label { (label) }
                                        p.fact-value { (value) }
                                    }
                                }
                            }
                        }
                        (external_link(&site.inquiry_url, "cta", "立即諮詢"))
                    }
                }
            }
        },
    )
}
