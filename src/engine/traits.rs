use std::path::Path;
use std::time::Duration;

use super::types::{EngineError, EngineState};

/// The primitives the transport needs from an audio backend.
///
/// Queries are best-effort snapshots: two successive calls within one tick
/// are not guaranteed to agree, and `duration` may be `None` right after a
/// load.
pub trait AudioEngine {
    /// A track opened ahead of time, ready to be handed to [`AudioEngine::load`].
    type Media;

    /// Open and probe `path` without touching current playback.
    fn prepare(&self, path: &Path) -> Result<Self::Media, EngineError>;

    /// Replace the current media. Loading may reset the engine volume.
    fn load(&mut self, media: Self::Media) -> Result<(), EngineError>;

    fn play(&mut self) -> Result<(), EngineError>;

    fn stop(&mut self);

    /// Single pause/resume toggle.
    fn toggle_pause(&mut self);

    fn seek(&mut self, position: Duration) -> Result<(), EngineError>;

    /// Volume percent in `0..=100`.
    fn volume(&self) -> u8;

    fn set_volume(&mut self, volume: u8);

    fn state(&self) -> Result<EngineState, EngineError>;

    fn position(&self) -> Result<Option<Duration>, EngineError>;

    fn duration(&self) -> Result<Option<Duration>, EngineError>;

    /// Stop and free output resources. The engine is unusable afterwards.
    fn release(&mut self);
}
