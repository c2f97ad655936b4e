pub mod endpoints;
#[cfg(feature = "rest-client")]
pub mod rest;

pub use crate::domain::NotificationRecord;

/// Default location of the static notification feed, relative to the site root.
pub const NOTIFICATIONS_PATH: &str = "/notifications.json";

/// Body of the notification feed: a plain JSON array.
pub type NotificationFeed = Vec<NotificationRecord>;
