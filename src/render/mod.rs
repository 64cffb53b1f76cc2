//! HTML rendering
//!
//! Pages are rendered with maud from the view models in [`crate::pages`].
//! Styling is left to class names; nothing here depends on a stylesheet.

pub mod course;
pub mod home;
pub mod news;

use maud::{DOCTYPE, Markup, html};

use crate::config::SiteInfo;

/// Home page anchors shown in the header navigation
const NAV: [(&str, &str); 3] = [("about", "INSIGHTS"), ("programs", "PROGRAMS"), ("team", "FACULTY")];

/// Full document around `body`
pub fn layout(site: &SiteInfo, title: &str, scroll_locked: bool, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-TW" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body.scroll-locked[scroll_locked] {
                (header(site))
                main { (body) }
                (footer(site))
            }
        }
    }
}

fn brand(site: &SiteInfo) -> Markup {
    html! {
        a.brand href="/" {
            span.brand-mark { "É" }
            span.brand-name { (site.name) }
            span.brand-tagline { (site.tagline) }
        }
    }
}

/// Link that opens in a new tab
pub fn external_link(href: &str, class: &str, label: &str) -> Markup {
    html! {
        a class=(class) href=(href) target="_blank" rel="noopener noreferrer" { (label) }
    }
}

fn header(site: &SiteInfo) -> Markup {
    html! {
        header.site-header {
            (brand(site))
            nav {
                @for (anchor, label) in NAV {
                    a href={ "/#" (anchor) } { (label) }
                }
                (external_link(&site.inquiry_url, "nav-inquire", "INQUIRE"))
            }
        }
    }
}

fn footer(site: &SiteInfo) -> Markup {
    html! {
        footer.site-footer {
            (brand(site))
            p.footer-blurb {
                "Dedicated to cultivating intellectual curiosity and academic distinction since 2023. "
                "Where tradition meets innovation in pursuit of excellence."
            }
            div.footer-institution {
                h4 { "Institution" }
                ul { li { a href="/#team" { "Faculty" } } }
            }
            div.footer-connect {
                h4 { "Connect" }
                ul {
                    li { (external_link(&site.map_url, "footer-address", &site.address)) }
                    li { a href={ "tel:" (site.phone) } { (site.phone) } }
                    li { a href={ "mailto:" (site.email) } { (site.email) } }
                }
            }
            p.copyright { "© 2024 Wego Elite Academy. All rights reserved." }
        }
    }
}

/// Not-found view with a link home
pub fn not_found(site: &SiteInfo, message: &str) -> Markup {
    layout(
        site,
        message,
        false,
        html! {
            section.not-found {
                h1 { (message) }
                a href="/" { "返回首頁" }
            }
        },
    )
}

/// Placeholder blocks standing in for `count` cards while a section loads
pub fn skeleton_cards(count: usize, lines: usize) -> Markup {
    html! {
        @for _ in 0..count {
            div.skeleton-card aria-hidden="true" {
                div.skeleton-image {}
                @for _ in 0..lines {
                    div.skeleton-line {}
                }
            }
        }
    }
}

/// Section heading with its small eyebrow label
pub fn section_heading(eyebrow: &str, title: &str, accent: &str) -> Markup {
    html! {
        div.section-heading {
            span.eyebrow { (eyebrow) }
            h2 { (title) " " span.accent { (accent) } }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_navigation_and_contacts() {
        let site = SiteInfo::default();
        let html = layout(&site, "Home", false, html! { p { "body" } }).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r##"href="/#about""##));
        assert!(html.contains(r##"href="/#programs""##));
        assert!(html.contains(r##"href="/#team""##));
        assert!(html.contains("https://lin.ee/XO9mGNt"));
        assert!(html.contains("tel:02-2898-3300"));
        assert!(html.contains("mailto:info@wegoelite.com.tw"));
        assert!(!html.contains("scroll-locked"));
    }

    #[test]
    fn test_text_is_escaped() {
        let site = SiteInfo {
            name: "<b>Academy</b>".to_string(),
            ..Default::default()
        };
        let html = layout(&site, "t", true, html! {}).into_string();
        assert!(html.contains("&lt;b&gt;Academy&lt;/b&gt;"));
        assert!(html.contains("scroll-locked"));
    }

    #[test]
    fn test_not_found_links_home() {
        let html = not_found(&SiteInfo::default(), "課程未找到").into_string();
        assert!(html.contains("課程未找到"));
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains("返回首頁"));
    }
}
