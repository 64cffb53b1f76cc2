//! News detail page

use maud::{Markup, html};

use crate::config::SiteInfo;
use crate::models::present;
use crate::pages::{NewsPage, Segment, linkify};

use super::{external_link, layout, not_found};

pub const NOT_FOUND: &str = "文章未找到";

pub fn news_not_found(site: &SiteInfo) -> Markup {
    not_found(site, NOT_FOUND)
}

fn content(text: &str) -> Markup {
    html! {
        div.article-content {
            @for line in linkify(text) {
                div {
                    @for segment in line {
                        @match segment {
                            Segment::Text(text) => { (text) },
                            Segment::Link(url) => {
                                a href=(url) target="_blank" rel="noopener noreferrer" { (url) }
                            },
                        }
                    }
                }
            }
        }
    }
}

pub fn news_page(site: &SiteInfo, page: &NewsPage) -> Markup {
    let news = &page.news;
    let date = news.display_date();

    layout(
        site,
        &news.title,
        false,
        html! {
            article.news-detail {
                header.article-header {
                    a.back href="/" { "返回首頁" }
                    @if let Some(category) = present(&news.category) {
                        span.category { (category) }
                    }
                    h1 { (news.title) }
                    div.byline {
                        span.date { (date) }
                        @if let Some(author) = present(&news.author) {
                            span.author { (author) }
                        }
                    }
                }
                @if let Some(image) = present(&news.image_url) {
                    img.article-image src=(image) alt=(news.title);
                }
                div.article-body {
                    div.article-main {
                        @if let Some(excerpt) = present(&news.excerpt) {
                            p.excerpt { (excerpt) }
                        }
                        (content(&news.content))
                        @if !news.tags.is_empty() {
                            div.tags {
                                @for tag in &news.tags {
                                    span.tag { (tag) }
                                }
                            }
                        }
                        @if !page.related.is_empty() {
                            section.related {
                                span.eyebrow { "相關課程" }
                                div.related-grid {
                                    @for course in &page.related {
                                        a.related-card href=(course.href()) {
                                            img src=(course.card_image_url) alt=(course.title);
                                            div.level { (course.level) }
                                            h3 { (course.title) }
                                            p { (course.subtitle) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    aside.article-side {
                        @if let Some(author) = present(&news.author) {
                            div.author-panel {
                                h3 { "作者" }
                                @if let Some(portrait) = present(&news.author_image_url) {
                                    img.author-image src=(portrait) alt=(author);
                                }
                                p { (author) }
                            }
                        }
                        div.info-panel {
                            h3 { "資訊" }
                            div { span.fact-label { "發布日期：" } span { (date) } }
                            div { span.fact-label { "瀏覽次數：" } span { (news.view_count) } }
                            div { span.fact-label { "分類：" } span { (news.category) } }
                        }
                        (external_link(&site.inquiry_url, "cta", "聯絡我們"))
                    }
                }
            }
        },
    )
}
