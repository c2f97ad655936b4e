//! Development server: exposes a feed file the way a static site would and
//! renders the widget from the same file.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::AppError;
use crate::config::WidgetConfig;
use crate::document::Document;
use crate::loader::FileSource;
use crate::navigation::LogNavigator;
use crate::widget::DropdownNotifications;

#[derive(Clone)]
pub struct ServeState {
    pub feed_file: PathBuf,
    pub config: Arc<WidgetConfig>,
}

impl ServeState {
    pub fn new(feed_file: PathBuf, config: WidgetConfig) -> Self {
        Self {
            feed_file,
            config: Arc::new(config),
        }
    }
}

const HEALTH_PATH: &str = "/healthz";

/// Route the feed is served at, derived from `endpoint_path`. Rejects paths
/// that collide with the other routes or carry route parameters.
pub fn feed_route(endpoint_path: &str) -> Result<String, AppError> {
    let route = match endpoint_path.trim().trim_start_matches('/') {
        "" => bellpanel_shared::api::NOTIFICATIONS_PATH.to_string(),
        p => format!("/{p}"),
    };
    if route.contains(['{', '}', '*']) {
        return Err(AppError::Config(format!(
            "endpoint_path {endpoint_path:?} must be a literal path"
        )));
    }
    if route.trim_end_matches('/') == HEALTH_PATH {
        return Err(AppError::Config(format!(
            "endpoint_path {endpoint_path:?} is reserved"
        )));
    }
    Ok(route)
}

pub fn router(state: ServeState) -> Result<Router, AppError> {
    let feed_path = feed_route(&state.config.endpoint_path)?;
    Ok(Router::new()
        .route(HEALTH_PATH, get(health))
        .route(&feed_path, get(feed))
        .route("/", get(page))
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

async fn health() -> &'static str {
    "ok"
}

async fn feed(State(state): State<ServeState>) -> Response {
    match tokio::fs::read(&state.feed_file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %state.feed_file.display(), "feed file missing");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            error!(path = %state.feed_file.display(), error = %e, "feed read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    #[serde(default)]
    open: bool,
}

async fn page(State(state): State<ServeState>, Query(q): Query<PageQuery>) -> Response {
    let doc = Document::new();
    let mut widget = DropdownNotifications::new(
        Arc::new(FileSource::new(state.feed_file.clone())),
        Arc::new(LogNavigator),
    )
    .align(state.config.align)
    .empty_message(state.config.empty_message.clone())
    .mount(&doc, None);
    widget.wait_loaded().await;
    if q.open {
        widget.click_trigger();
    }
    match widget.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "widget render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
