use serde::{Deserialize, Serialize};

/// Anchor used when a notification carries no navigation target.
pub const PLACEHOLDER_LINK: &str = "#0";

/// A single entry of the notification feed.
///
/// Records are displayed as-is; `date` is already formatted for display by
/// whoever produced the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub message: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NotificationRecord {
    pub fn new(message: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            date: date.into(),
            link: None,
            icon: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Navigation target; empty or missing links resolve to [`PLACEHOLDER_LINK`].
    pub fn target(&self) -> &str {
        match self.link.as_deref() {
            Some(l) if !l.is_empty() => l,
            _ => PLACEHOLDER_LINK,
        }
    }
}
