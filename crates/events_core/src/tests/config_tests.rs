use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("absent.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.current_user_id, "currentUser");
    assert!(settings.admin_mode);
    assert!(settings.database_url.starts_with("sqlite://"));
}

#[test]
fn file_values_then_env_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("campus.toml");
    fs::write(
        &path,
        r#"
database_url = "sqlite://./from-file.db"
share_base_url = "https://events.example/"
admin_mode = false
log_filter = "debug"
"#,
    )
    .expect("write config");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings.database_url, "sqlite://./from-file.db");
    assert_eq!(settings.share_base_url, "https://events.example/");
    assert!(!settings.admin_mode);
    assert_eq!(settings.log_filter, "debug");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("APP__DATABASE_URL", "sqlite://./from-env.db"),
            ("APP__ADMIN_MODE", "yes"),
            ("APP__CURRENT_USER_ID", "student-7"),
        ]),
    );
    assert_eq!(settings.database_url, "sqlite://./from-env.db");
    assert!(settings.admin_mode);
    assert_eq!(settings.current_user_id, "student-7");
}

#[test]
fn malformed_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("campus.toml");
    fs::write(&path, "database_url = [unterminated").expect("write config");
    assert_eq!(load_settings_from(&path, env_from(&[])), Settings::default());
}

#[test]
fn share_base_must_be_a_url() {
    let settings = Settings {
        share_base_url: "not a url".into(),
        ..Settings::default()
    };
    assert!(settings.share_base().is_err());
    assert!(Settings::default().share_base().is_ok());
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/campus.db"),
        "sqlite://./data/campus.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\ana\\campus.db"),
        "sqlite://C:/Users/ana/campus.db"
    );
    assert_eq!(
        normalize_database_url("  "),
        Settings::default().database_url
    );
}

#[test]
fn flag_overrides_file_database_url() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("campus.toml");
    fs::write(&path, "database_url = \"./from-file.db\"\n").expect("write config");

    let from_file = resolve_settings(Some(&path), None);
    let flagged = resolve_settings(Some(&path), Some("./from-flag.db".into()));
    assert_eq!(flagged.database_url, "./from-flag.db");
    assert_eq!(flagged.resolved_database_url(), "sqlite://./from-flag.db");
    assert_eq!(flagged.current_user_id, from_file.current_user_id);
}
