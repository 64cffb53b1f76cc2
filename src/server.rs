//! HTTP server
//!
//! Routes:
//! - `GET /` home page; query parameters restore UI substate (see [`HomeParams`])
//! - `GET /courses/:slug` course detail
//! - `GET /news/:slug` news detail, by slug or id
//! - `GET /health` liveness probe
//!
//! Unknown and inactive slugs answer 404 with the not-found page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use maud::Markup;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::client::ContentClient;
use crate::config::SiteInfo;
use crate::pages::{Detail, HomePage, HomeParams, load_course_page, load_news_page};
use crate::render;
use crate::storage::TableStore;

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    client: Arc<ContentClient<Arc<dyn TableStore>>>,
    site: Arc<SiteInfo>,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, site: SiteInfo) -> Self {
        Self::from_client(ContentClient::new(store), site)
    }

    pub fn from_client(client: ContentClient<Arc<dyn TableStore>>, site: SiteInfo) -> Self {
        Self {
            client: Arc::new(client),
            site: Arc::new(site),
        }
    }
}

/// Build the site router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/courses/:slug", get(course_detail))
        .route("/news/:slug", get(news_detail))
        .route("/health", get(health_check))
        .fallback(page_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn home(State(state): State<AppState>, Query(params): Query<HomeParams>) -> Markup {
    let mut page = HomePage::load(&state.client).await;
    page.apply(&params);
    render::home::home_page(&state.site, &page)
}

async fn course_detail(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match load_course_page(&state.client, &slug).await {
        Detail::Found(course) => render::course::course_page(&state.site, &course).into_response(),
        Detail::NotFound => {
            debug!(slug = %slug, "Course not found");
            (StatusCode::NOT_FOUND, render::course::course_not_found(&state.site)).into_response()
        }
    }
}

async fn news_detail(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    match load_news_page(&state.client, &key).await {
        Detail::Found(page) => render::news::news_page(&state.site, &page).into_response(),
        Detail::NotFound => {
            debug!(key = %key, "News not found");
            (StatusCode::NOT_FOUND, render::news::news_not_found(&state.site)).into_response()
        }
    }
}

async fn health_check() -> &'static str {
    "ok"
}

async fn page_not_found(State(state): State<AppState>) -> Response {
    (StatusCode::NOT_FOUND, render::not_found(&state.site, "頁面未找到")).into_response()
}
