//! Settings shared by the `campus` and `tools` binaries, so both open the same
//! store for the same config file and environment.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use url::Url;

use crate::controller::DEFAULT_CURRENT_USER;

pub const DEFAULT_CONFIG_FILE: &str = "campus.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub current_user_id: String,
    pub share_base_url: String,
    pub admin_mode: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            current_user_id: DEFAULT_CURRENT_USER.into(),
            share_base_url: "http://localhost:8080/".into(),
            admin_mode: true,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn share_base(&self) -> anyhow::Result<Url> {
        Url::parse(&self.share_base_url)
            .with_context(|| format!("invalid share base url '{}'", self.share_base_url))
    }

    /// The configured database as a URL `storage::Storage::new` accepts.
    pub fn resolved_database_url(&self) -> String {
        normalize_database_url(&self.database_url)
    }
}

fn default_database_url() -> String {
    let path = dirs::data_local_dir()
        .map(|base| base.join("campus-events").join("campus.db"))
        .unwrap_or_else(|| PathBuf::from("./data/campus.db"));
    format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
}

/// Config file and environment, then an explicit `--database-url` flag.
pub fn resolve_settings(config_path: Option<&Path>, database_url: Option<String>) -> Settings {
    let mut settings = load_settings(config_path);
    if let Some(database_url) = database_url {
        settings.database_url = database_url;
    }
    settings
}

pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    load_settings_from(path, |key| std::env::var(key).ok())
}

/// Defaults, then the optional config file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_overrides(&mut settings, |key| file_cfg.get(key).map(value_text)),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable config file");
            }
        }
    }

    if let Some(v) = env("CAMPUS_DATABASE_URL") {
        settings.database_url = v;
    }
    apply_overrides(&mut settings, |key| {
        env(&format!("APP__{}", key.to_ascii_uppercase()))
    });

    settings
}

fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("database_url") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("current_user_id") {
        settings.current_user_id = v;
    }
    if let Some(v) = lookup("share_base_url") {
        settings.share_base_url = v;
    }
    if let Some(v) = lookup("admin_mode").and_then(|v| parse_flag(&v)) {
        settings.admin_mode = v;
    }
    if let Some(v) = lookup("log_filter") {
        settings.log_filter = v;
    }
}

fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Bare file paths and `sqlite:path` become `sqlite://` URLs with forward
/// slashes. Blank input means the default location; other URLs pass through.
pub fn normalize_database_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return default_database_url();
    }
    if raw.starts_with("sqlite::memory:") || raw.contains("://") {
        return raw.to_string();
    }
    let path = raw.strip_prefix("sqlite:").unwrap_or(raw);
    format!("sqlite://{}", path.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
