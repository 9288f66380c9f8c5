//! Shared configuration for the MRS CLI and TUI.
//!
//! TOML profiles merged with `MRS_*` environment variables, translated to
//! `mrs_core::MonitorConfig`. Both binaries depend on this crate. There is
//! no credential handling here -- the backend API carries no authentication
//! in this layer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mrs_core::MonitorConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g. "http://127.0.0.1:5000").
    pub server: String,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Stats poll period in seconds (0 disables the stats poller).
    pub stats_interval: Option<u64>,

    /// Recent-items poll period in seconds (0 disables the item poller).
    pub items_interval: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "mrs", "mrs").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("mrs");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("MRS_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation to MonitorConfig ────────────────────────────────────

/// Build a `MonitorConfig` from a profile.
///
/// Suitable for the TUI and other long-lived consumers: polling defaults
/// to the dashboard cadence (stats every 10 s, items every 30 s) unless
/// the profile overrides it.
pub fn profile_to_monitor_config(profile: &Profile) -> Result<MonitorConfig, ConfigError> {
    let server_url: url::Url = profile
        .server
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", profile.server),
        })?;

    let base = MonitorConfig::default();

    Ok(MonitorConfig {
        server_url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(default_timeout())),
        stats_interval_secs: profile.stats_interval.unwrap_or(base.stats_interval_secs),
        items_interval_secs: profile.items_interval.unwrap_or(base.items_interval_secs),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn profile_translation_applies_overrides() {
        let profile = Profile {
            server: "http://10.0.0.2:5000".into(),
            timeout: Some(5),
            stats_interval: Some(60),
            items_interval: Some(0),
        };

        let cfg = profile_to_monitor_config(&profile).unwrap();
        assert_eq!(cfg.server_url.as_str(), "http://10.0.0.2:5000/");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.stats_interval_secs, 60);
        assert_eq!(cfg.items_interval_secs, 0);
    }

    #[test]
    fn profile_translation_defaults_polling() {
        let profile = Profile {
            server: "http://127.0.0.1:5000".into(),
            timeout: None,
            stats_interval: None,
            items_interval: None,
        };

        let cfg = profile_to_monitor_config(&profile).unwrap();
        assert_eq!(cfg.stats_interval_secs, 10);
        assert_eq!(cfg.items_interval_secs, 30);
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let profile = Profile {
            server: "not a url".into(),
            timeout: None,
            stats_interval: None,
            items_interval: None,
        };

        assert!(matches!(
            profile_to_monitor_config(&profile),
            Err(ConfigError::Validation { .. })
        ));
    }
}
