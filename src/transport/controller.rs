use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::{LibrarySettings, Settings};
use crate::engine::{AudioEngine, EngineError, EngineState};
use crate::library::Track;
use crate::overlay::{Acknowledgement, ErrorEvent, ErrorOverlayQueue, Raised};
use crate::playlist::{Playlist, TrackRef};

use super::guard::BusyFlag;

/// Tunables the controller reads once at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransportSettings {
    /// Rewinds before this point go to the previous track.
    pub rewind_threshold: Duration,
    pub initial_volume: u8,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            rewind_threshold: Duration::from_secs(5),
            initial_volume: 25,
        }
    }
}

impl From<&Settings> for TransportSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            rewind_threshold: Duration::from_secs(settings.controls.rewind_restart_secs),
            initial_volume: settings.audio.initial_volume.min(100),
        }
    }
}

/// Result of issuing a transport command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran to completion.
    Done,
    /// The command ran and raised an error event.
    Failed,
    /// Another command held the guard; nothing happened.
    Busy,
    /// The playlist is empty; nothing happened.
    NoTrack,
}

/// Whether a library load happens at startup or on a user reload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Startup,
    Reload,
}

/// What the UI needs for one frame.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    pub track: Option<&'a Track>,
    pub state: EngineState,
    pub elapsed: Duration,
    pub total: Duration,
    pub volume: u8,
}

/// Owns the engine, the playlist and the error overlay, and serializes
/// transport commands against them.
pub struct TransportController<E: AudioEngine> {
    engine: E,
    playlist: Playlist<E::Media>,
    busy: BusyFlag,
    last_known: EngineState,
    volume: u8,
    overlay: ErrorOverlayQueue,
    rewind_threshold: Duration,
}

impl<E: AudioEngine> TransportController<E> {
    pub fn new(mut engine: E, settings: TransportSettings) -> Self {
        let volume = settings.initial_volume.min(100);
        engine.set_volume(volume);
        Self {
            engine,
            playlist: Playlist::empty(),
            busy: BusyFlag::new(),
            last_known: EngineState::Idle,
            volume,
            overlay: ErrorOverlayQueue::new(),
            rewind_threshold: settings.rewind_threshold,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn playlist(&self) -> &Playlist<E::Media> {
        &self.playlist
    }

    #[cfg(test)]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn overlay(&self) -> &ErrorOverlayQueue {
        &self.overlay
    }

    /// Volume percent the controller re-applies after every load.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Engine state as of the last command or poll.
    #[cfg(test)]
    pub fn last_known_state(&self) -> EngineState {
        self.last_known
    }

    /// Rebuild the playlist from `dir`.
    ///
    /// On success the previous playlist is dropped and nothing plays until
    /// [`Self::play`]. A failure at startup is fatal; on reload it is
    /// recoverable and the previous playlist stays.
    pub fn open_library(
        &mut self,
        dir: &Path,
        settings: &LibrarySettings,
        phase: LoadPhase,
    ) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("open_library ignored: transport busy");
            return Dispatch::Busy;
        };

        match Playlist::load(dir, settings, &self.engine) {
            Ok(playlist) => {
                self.engine.stop();
                info!(dir = %dir.display(), tracks = playlist.len(), ?phase, "playlist loaded");
                self.playlist = playlist;
                self.refresh();
                Dispatch::Done
            }
            Err(e) => {
                let event = match phase {
                    LoadPhase::Startup => ErrorEvent::fatal(e.to_string()),
                    LoadPhase::Reload => ErrorEvent::recoverable(e.to_string()),
                };
                self.raise(event);
                Dispatch::Failed
            }
        }
    }

    /// Play the current track from the start.
    pub fn play(&mut self) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("play ignored: transport busy");
            return Dispatch::Busy;
        };
        if self.playlist.is_empty() {
            return Dispatch::NoTrack;
        }

        self.engine.stop();
        let track = self.playlist.current_ref();
        let result = self.start(track);
        self.finish(result, "Failed to play track")
    }

    /// Stop, move to the next track and play it.
    pub fn skip(&mut self) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("skip ignored: transport busy");
            return Dispatch::Busy;
        };
        self.advance_and_play("Skip track failed")
    }

    /// Go to the previous track, or restart the current one once playback is
    /// past the rewind threshold.
    pub fn rewind(&mut self) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("rewind ignored: transport busy");
            return Dispatch::Busy;
        };
        if self.playlist.is_empty() {
            return Dispatch::NoTrack;
        }

        let elapsed = self.query_position();
        self.engine.stop();

        let track = if elapsed < self.rewind_threshold {
            self.playlist.rewind(&self.engine)
        } else {
            debug!(?elapsed, "restarting current track");
            self.playlist.current_ref()
        };
        let result = self.start(track);
        self.finish(result, "Rewind failed")
    }

    /// Pause or resume. Whether the result is paused is read back from the
    /// engine, never assumed.
    pub fn toggle_pause(&mut self) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("toggle_pause ignored: transport busy");
            return Dispatch::Busy;
        };
        self.engine.toggle_pause();
        self.refresh();
        Dispatch::Done
    }

    pub fn stop(&mut self) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("stop ignored: transport busy");
            return Dispatch::Busy;
        };
        self.engine.stop();
        self.refresh();
        Dispatch::Done
    }

    /// Called every tick. Advances when the engine reports the track ended and
    /// surfaces engine-reported playback failures.
    pub fn poll_end_of_track(&mut self) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            return Dispatch::Busy;
        };

        match self.query_state() {
            EngineState::Ended => {
                info!("track ended; advancing");
                self.advance_and_play("Failed to advance playlist")
            }
            EngineState::Error if self.last_known != EngineState::Error => {
                let name = self
                    .playlist
                    .current_track()
                    .map(|t| t.file_name.clone())
                    .unwrap_or_else(|| "current track".to_string());
                self.engine.stop();
                self.raise(ErrorEvent::recoverable(format!("Playback failed: {name}")));
                // Raised once per transition into Error.
                self.last_known = EngineState::Error;
                Dispatch::Failed
            }
            state => {
                self.last_known = state;
                Dispatch::Done
            }
        }
    }

    /// Change the volume by `delta` percent, clamped to `0..=100`.
    ///
    /// Volume is not transport-exclusive and ignores the guard.
    pub fn adjust_volume(&mut self, delta: i16) -> u8 {
        let volume = (i16::from(self.volume) + delta).clamp(0, 100);
        self.set_volume(volume as u8);
        self.volume
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        self.engine.set_volume(self.volume);
        debug!(volume = self.engine.volume(), "volume set");
    }

    /// Seek to `percent` of the current track's duration.
    pub fn seek_to(&mut self, percent: f64) -> Dispatch {
        let Some(_token) = self.busy.try_acquire() else {
            debug!("seek ignored: transport busy");
            return Dispatch::Busy;
        };

        let percent = percent.clamp(0.0, 1.0);
        let total = self.query_duration();
        if total.is_zero() {
            // Duration not known yet; nothing sensible to seek to.
            debug!("seek ignored: duration unavailable");
            return Dispatch::Done;
        }

        let target = total.mul_f64(percent);
        match self.engine.seek(target) {
            Ok(()) => {
                debug!(?target, "seeked");
                Dispatch::Done
            }
            Err(e) => {
                self.raise(ErrorEvent::recoverable(format!("Seek failed: {e}")));
                Dispatch::Failed
            }
        }
    }

    /// Report an error from outside the transport (startup configuration).
    pub fn raise(&mut self, event: ErrorEvent) {
        error!(severity = ?event.severity, "{}", event.message);
        if self.overlay.raise(event) == Raised::Activated {
            self.engine.stop();
            self.refresh();
        }
    }

    /// Acknowledge the error on screen. A fatal acknowledgment releases the
    /// engine before returning.
    pub fn acknowledge_error(&mut self) -> Acknowledgement {
        let ack = self.overlay.acknowledge();
        match ack {
            Acknowledgement::Terminate { discarded } => {
                info!(discarded, "fatal error acknowledged; releasing engine");
                self.engine.release();
            }
            Acknowledgement::Next => {
                debug!(pending = self.overlay.pending_len(), "showing next queued error");
            }
            Acknowledgement::Resumed | Acknowledgement::Nothing => {}
        }
        ack
    }

    /// Release the engine for a normal exit.
    pub fn shutdown(&mut self) {
        info!("shutting down");
        self.engine.release();
    }

    /// Best-effort view of playback for rendering.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = self.engine.state().unwrap_or_default();
        let (elapsed, total) = if state.has_progress() {
            (
                self.engine.position().ok().flatten().unwrap_or_default(),
                self.engine.duration().ok().flatten().unwrap_or_default(),
            )
        } else {
            (Duration::ZERO, Duration::ZERO)
        };

        Snapshot {
            track: self.playlist.current_track(),
            state,
            elapsed,
            total,
            volume: self.volume,
        }
    }

    fn advance_and_play(&mut self, context: &str) -> Dispatch {
        if self.playlist.is_empty() {
            return Dispatch::NoTrack;
        }
        self.engine.stop();
        let track = self.playlist.advance(&self.engine);
        debug!(
            index = ?track.index(),
            preloaded = matches!(track, TrackRef::Preloaded { .. }),
            lookahead = ?self.playlist.preloaded_index(),
            "advanced"
        );
        let result = self.start(track);
        self.finish(result, context)
    }

    /// Load `track`, start it and re-apply the held volume.
    fn start(&mut self, track: TrackRef<E::Media>) -> Result<(), EngineError> {
        let media = match track {
            TrackRef::Preloaded { media, .. } => media,
            TrackRef::Fresh { path, .. } => self.engine.prepare(&path)?,
            TrackRef::NoTrack => return Err(EngineError::NoMedia),
        };
        self.engine.load(media)?;
        self.engine.play()?;
        self.engine.set_volume(self.volume);
        Ok(())
    }

    fn finish(&mut self, result: Result<(), EngineError>, context: &str) -> Dispatch {
        match result {
            Ok(()) => {
                self.refresh();
                info!(
                    index = self.playlist.current_index(),
                    title = self.playlist.track_title().unwrap_or_default(),
                    artist = self.playlist.track_artist().unwrap_or_default(),
                    "now playing"
                );
                Dispatch::Done
            }
            Err(e) => {
                self.engine.stop();
                self.refresh();
                self.raise(ErrorEvent::recoverable(format!("{context}: {e}")));
                Dispatch::Failed
            }
        }
    }

    fn refresh(&mut self) {
        self.last_known = self.query_state();
    }

    fn query_state(&self) -> EngineState {
        self.engine.state().unwrap_or_else(|e| {
            warn!(error = %e, "state query failed");
            EngineState::default()
        })
    }

    fn query_position(&self) -> Duration {
        match self.engine.position() {
            Ok(position) => position.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "position query failed");
                Duration::ZERO
            }
        }
    }

    fn query_duration(&self) -> Duration {
        match self.engine.duration() {
            Ok(duration) => duration.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "duration query failed");
                Duration::ZERO
            }
        }
    }
}
