use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `BAISE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("BAISE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.initial_volume > 100 {
            return Err("audio.initial_volume must be <= 100".to_string());
        }
        if self.controls.volume_step == 0 || self.controls.volume_step > 100 {
            return Err("controls.volume_step must be within 1..=100".to_string());
        }
        if self.controls.tick_ms == 0 {
            return Err("controls.tick_ms must be >= 1".to_string());
        }
        if !(self.controls.handle_radius > 0.0) {
            return Err("controls.handle_radius must be > 0".to_string());
        }
        if self
            .library
            .extensions
            .iter()
            .all(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err("library.extensions must name at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `BAISE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("BAISE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/baise/config.toml`
/// or `~/.config/baise/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("baise").join("config.toml"))
}

/// Compute the default log directory under `$XDG_STATE_HOME/baise`
/// or `~/.local/state/baise`.
pub fn default_log_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("baise"))
}
