use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/baise/config.toml` or `~/.config/baise/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BAISE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Music directory. A positional command line argument takes precedence.
    pub directory: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, dot optional).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while scanning.
    pub follow_links: bool,
    /// Artist shown for every track.
    pub artist: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            directory: None,
            extensions: vec!["wav".into(), "mp3".into(), "ogg".into()],
            follow_links: true,
            artist: "Unknown Artist".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume percent applied when the player starts.
    pub initial_volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { initial_volume: 25 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change per key press, in percent.
    pub volume_step: u8,
    /// Rewinding within this many seconds of the track start goes to the
    /// previous track; later rewinds restart the current one.
    pub rewind_restart_secs: u64,
    /// Tick period of the main loop (milliseconds).
    pub tick_ms: u64,
    /// Hit radius of the seek and volume handles, in terminal cells.
    pub handle_radius: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step: 5,
            rewind_restart_secs: 5,
            tick_ms: 33,
            handle_radius: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "Baise Media Player".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directory for `baise.log`. Defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `BAISE_LOG`.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "info".to_string(),
        }
    }
}
