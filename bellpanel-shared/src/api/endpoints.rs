use super::NOTIFICATIONS_PATH;

fn base_join(base: &str, path: &str) -> String {
    let b = base.trim_end_matches('/');
    let p = path.trim_start_matches('/');
    format!("{}/{}", b, p)
}

pub fn notifications(base: &str) -> String {
    base_join(base, NOTIFICATIONS_PATH)
}

/// Feed URL when the resource lives somewhere other than [`NOTIFICATIONS_PATH`].
pub fn notifications_at(base: &str, path: &str) -> String {
    base_join(base, path)
}
