//! CLI-side config resolution: profile + flag overrides → `MonitorConfig`.

use std::time::Duration;

use mrs_config::Config;
use mrs_core::MonitorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name to use: `--profile` flag, then the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `MonitorConfig` from the config file, profile, and CLI flags.
///
/// Precedence: `--server`/`--timeout` flags > profile > built-in defaults
/// (the backend's development address). A `--profile` that names a missing
/// profile is an error; the implicit default profile silently falls back.
pub fn resolve_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = mrs_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut monitor_config = match cfg.profiles.get(&profile_name) {
        Some(profile) => mrs_config::profile_to_monitor_config(profile)?,
        None => {
            if global.profile.is_some() {
                let mut available: Vec<&str> =
                    cfg.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: available.join(", "),
                });
            }
            MonitorConfig::default()
        }
    };

    if let Some(ref server) = global.server {
        monitor_config.server_url = server.parse().map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {server}"),
        })?;
    }

    if let Some(timeout) = global.timeout {
        monitor_config.timeout = Duration::from_secs(timeout);
    }

    Ok(monitor_config)
}
