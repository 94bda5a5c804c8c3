use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::SettingsError, search::MatchPolicy};

pub const DEFAULT_SETTINGS_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub version: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub match_policy: MatchPolicy,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_base_url: "http://127.0.0.1:8081/api".into(),
            request_timeout_secs: 10,
            match_policy: MatchPolicy::default(),
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    version: Option<String>,
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    match_policy: Option<MatchPolicy>,
    log_level: Option<String>,
}

/// Defaults, then the settings file, then `APP__*` environment variables.
///
/// An explicit `path` must exist. Without one, `console.toml` in the working
/// directory is read if present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let file_cfg = match path {
        Some(path) => Some(read_settings_file(path)?),
        None => match read_settings_file(Path::new(DEFAULT_SETTINGS_FILE)) {
            Ok(cfg) => Some(cfg),
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                None
            }
            Err(err) => return Err(err),
        },
    };
    if let Some(file_cfg) = file_cfg {
        apply_file(&mut settings, file_cfg);
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_settings(&raw).map_err(|source| SettingsError::Parse {
        path: PathBuf::from(path),
        source,
    })?;
    debug!(path = %path.display(), "loaded settings file");
    Ok(parsed)
}

fn parse_settings(raw: &str) -> Result<FileSettings, toml::de::Error> {
    toml::from_str(raw)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.version {
        settings.version = v;
    }
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.match_policy {
        settings.match_policy = v;
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__VERSION") {
        settings.version = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }
    if let Some(v) = lookup("APP__MATCH_POLICY") {
        match v.parse::<MatchPolicy>() {
            Ok(parsed) => settings.match_policy = parsed,
            Err(err) => warn!(%err, "ignoring APP__MATCH_POLICY"),
        }
    }
    if let Some(v) = lookup("APP__LOG_LEVEL") {
        settings.log_level = v;
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
