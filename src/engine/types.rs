//! Engine state and error types shared by every engine implementation.

use std::path::Path;

use thiserror::Error;

/// Playback state as observed from the engine.
///
/// This is always a snapshot: the transport re-queries it instead of
/// tracking transitions itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Nothing loaded, or playback was stopped.
    #[default]
    Idle,
    Playing,
    Paused,
    /// The loaded track played to its end.
    Ended,
    /// The loaded track could not be played.
    Error,
}

impl EngineState {
    /// Whether elapsed/total time is meaningful in this state.
    pub fn has_progress(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No audio output device: {0}")]
    Output(String),

    #[error("Failed to open {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to play {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Seek failed: {0}")]
    Seek(String),

    #[error("No track loaded")]
    NoMedia,

    #[error("Engine query failed: {0}")]
    Query(String),
}

/// File name used in user-facing engine errors.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
