use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bellpanel_shared::api::{self, NotificationFeed, rest::RestError};
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    #[error("fetch failed: {0}")]
    Rest(#[from] RestError),
    #[error("read {path} failed: {message}")]
    Io { path: String, message: String },
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Where the widget reads its notification feed from.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
    async fn fetch(&self) -> Result<NotificationFeed, LoadFailure>;
}

/// Feed served over HTTP, e.g. `http://host/notifications.json`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Feed at `path` below `base` (`/notifications.json` by default).
    pub fn at(base: &str, path: Option<&str>) -> Self {
        let url = match path {
            Some(p) => api::endpoints::notifications_at(base, p),
            None => api::endpoints::notifications(base),
        };
        Self { url }
    }
}

#[async_trait]
impl NotificationSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<NotificationFeed, LoadFailure> {
        Ok(api::rest::fetch_notifications_from(&self.url).await?)
    }
}

/// Feed stored in a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl NotificationSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<NotificationFeed, LoadFailure> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadFailure::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        serde_json::from_str(&data).map_err(|e| LoadFailure::Decode(e.to_string()))
    }
}

/// In-memory feed.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: NotificationFeed,
}

impl StaticSource {
    pub fn new(records: NotificationFeed) -> Self {
        Self { records }
    }
}

#[async_trait]
impl NotificationSource for StaticSource {
    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }

    async fn fetch(&self) -> Result<NotificationFeed, LoadFailure> {
        Ok(self.records.clone())
    }
}

/// Pick a source from a CLI/config value: URLs go over HTTP, anything else
/// is treated as a file path.
pub fn source_from_location(location: &str, endpoint_path: Option<&str>) -> Arc<dyn NotificationSource> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        if trimmed.ends_with(".json") {
            Arc::new(HttpSource::new(trimmed))
        } else {
            Arc::new(HttpSource::at(trimmed, endpoint_path))
        }
    } else {
        Arc::new(FileSource::new(trimmed))
    }
}

/// Read the feed once. Failures are logged and yield an empty list; the
/// widget then shows its empty state.
pub async fn load_once(source: &dyn NotificationSource) -> NotificationFeed {
    let location = source.describe();
    debug!(source = %location, "fetching notifications");
    match source.fetch().await {
        Ok(records) => {
            debug!(source = %location, count = records.len(), "notifications loaded");
            records
        }
        Err(e) => {
            error!(source = %location, error = %e, "error fetching notifications");
            Vec::new()
        }
    }
}
