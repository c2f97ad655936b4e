use bellpanel_widget::config::{WidgetConfig, load_config, normalize_source, save_config};
use bellpanel_widget::render::Align;

#[test]
fn load_applies_defaults_and_normalizes_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.yaml");
    std::fs::write(&path, "source: localhost:5173/\nalign: left\n").unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.source.as_deref(), Some("http://localhost:5173"));
    assert_eq!(cfg.align, Align::Left);
    assert_eq!(cfg.endpoint_path, "/notifications.json");
    assert_eq!(cfg.empty_message, "No notifications available");
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = WidgetConfig::find_and_load(Some(dir.path().join("absent.yaml"))).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"), "{err}");
}

#[test]
fn invalid_yaml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.yaml");
    std::fs::write(&path, "align: [sideways\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().starts_with("config error: parse"), "{err}");
}

#[test]
fn save_then_load_keeps_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("widget.yaml");
    let cfg = WidgetConfig {
        source: Some("/srv/site/notifications.json".into()),
        align: Align::Right,
        endpoint_path: "/static/feed.json".into(),
        empty_message: "Nothing new".into(),
    };
    save_config(&path, &cfg).unwrap();
    let (found, loaded) = WidgetConfig::find_and_load(Some(path.clone())).unwrap();
    assert_eq!(found, Some(path));
    assert_eq!(loaded.source.as_deref(), Some("/srv/site/notifications.json"));
    assert_eq!(loaded.endpoint_path, "/static/feed.json");
    assert_eq!(loaded.empty_message, "Nothing new");
}

#[test]
fn normalize_source_variants() {
    assert_eq!(normalize_source(" https://example.com/ "), "https://example.com");
    assert_eq!(normalize_source("127.0.0.1:8080"), "http://127.0.0.1:8080");
    assert_eq!(normalize_source("./notifications.json"), "./notifications.json");
    assert_eq!(normalize_source("/var/feed.json"), "/var/feed.json");
}
