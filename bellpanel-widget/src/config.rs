use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::render::{Align, DEFAULT_EMPTY_MESSAGE};

pub const ENV_CONFIG: &str = "BELLPANEL_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Feed location: an http(s) URL or a path to a local JSON file.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub align: Align,
    /// Feed path appended when `source` is a site root rather than a `.json` URL.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            source: None,
            align: Align::default(),
            endpoint_path: default_endpoint_path(),
            empty_message: default_empty_message(),
        }
    }
}

fn default_endpoint_path() -> String {
    bellpanel_shared::api::NOTIFICATIONS_PATH.to_string()
}

fn default_empty_message() -> String {
    DEFAULT_EMPTY_MESSAGE.to_string()
}

impl WidgetConfig {
    /// Resolve and load the config. An explicit path (CLI or env) must
    /// exist; a missing file at the default location yields defaults.
    pub fn find_and_load(cli_value: Option<PathBuf>) -> Result<(Option<PathBuf>, Self), AppError> {
        let explicit = cli_value.is_some() || std::env::var_os(ENV_CONFIG).is_some();
        let path = match resolve_config_path(cli_value) {
            Ok(p) => p,
            Err(_) if !explicit => return Ok((None, Self::default())),
            Err(e) => return Err(e),
        };
        if !explicit && !path.exists() {
            return Ok((None, Self::default()));
        }
        let cfg = load_config(&path)?;
        Ok((Some(path), cfg))
    }
}

pub fn resolve_config_path(cli_value: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(p) = cli_value {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(ENV_CONFIG) {
        return Ok(PathBuf::from(p));
    }
    default_config_path().ok_or_else(|| AppError::Config("could not determine config dir".into()))
}

pub fn default_config_path() -> Option<PathBuf> {
    let pd = ProjectDirs::from("dev", "bellpanel", "bellpanel")?;
    Some(pd.config_dir().join("widget.yaml"))
}

pub fn load_config(path: &Path) -> Result<WidgetConfig, AppError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read {} failed: {e}", path.display())))?;
    let mut cfg: WidgetConfig = serde_yaml::from_str(&data)
        .map_err(|e| AppError::Config(format!("parse {} failed: {e}", path.display())))?;
    cfg.source = cfg.source.as_deref().map(normalize_source);
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &WidgetConfig) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let data = serde_yaml::to_string(cfg)
        .map_err(|e| AppError::Config(format!("serialize config failed: {e}")))?;
    std::fs::write(path, data)
        .map_err(|e| AppError::Config(format!("write {} failed: {e}", path.display())))
}

/// Trim and strip trailing slashes from URLs; anything that does not look
/// like a URL or a filesystem path (`host:port`) gets an `http://` scheme.
pub fn normalize_source(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.trim_end_matches('/').to_string();
    }
    if looks_like_host(trimmed) {
        return format!("http://{}", trimmed.trim_end_matches('/'));
    }
    trimmed.to_string()
}

fn looks_like_host(s: &str) -> bool {
    let head = s.split('/').next().unwrap_or_default();
    let Some((host, port)) = head.rsplit_once(':') else {
        return false;
    };
    !host.is_empty() && !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
}
