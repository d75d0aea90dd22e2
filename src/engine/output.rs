use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info};

use super::sink::{Media, connect_sink, open_media};
use super::traits::AudioEngine;
use super::types::{EngineError, EngineState};

// A drained sink is only reported as a failed track when the track claimed
// at least this much audio but never produced any position.
const SILENT_FAILURE_MIN: Duration = Duration::from_secs(1);

struct Loaded {
    name: String,
    duration: Option<Duration>,
}

/// [`AudioEngine`] backed by the default `rodio` output device.
///
/// One `Sink` per loaded track. A new sink starts at unity gain, so volume
/// does not survive a load.
pub struct RodioEngine {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    loaded: Option<Loaded>,
    volume: u8,
    heard: Cell<bool>,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land on
        // top of the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream: Some(stream),
            sink: None,
            loaded: None,
            volume: 100,
            heard: Cell::new(false),
        })
    }

    fn observe(&self, sink: &Sink) -> Duration {
        let pos = sink.get_pos();
        if !pos.is_zero() {
            self.heard.set(true);
        }
        pos
    }
}

impl AudioEngine for RodioEngine {
    type Media = Media;

    fn prepare(&self, path: &Path) -> Result<Media, EngineError> {
        open_media(path)
    }

    fn load(&mut self, media: Media) -> Result<(), EngineError> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| EngineError::Output("output stream released".to_string()))?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        debug!(track = %media.name, duration = ?media.duration, "loading track");
        let loaded = Loaded {
            name: media.name.clone(),
            duration: media.duration,
        };
        self.sink = Some(connect_sink(stream, media));
        self.loaded = Some(loaded);
        self.volume = 100;
        self.heard.set(false);
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let sink = self.sink.as_ref().ok_or(EngineError::NoMedia)?;
        sink.play();
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        if let Some(loaded) = self.loaded.take() {
            debug!(track = %loaded.name, "playback stopped");
        }
        self.heard.set(false);
    }

    fn toggle_pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            if sink.is_paused() {
                sink.play();
            } else {
                sink.pause();
            }
        }
    }

    fn seek(&mut self, position: Duration) -> Result<(), EngineError> {
        let sink = self.sink.as_ref().ok_or(EngineError::NoMedia)?;
        sink.try_seek(position)
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(f32::from(self.volume) / 100.0);
        }
    }

    fn state(&self) -> Result<EngineState, EngineError> {
        let Some(sink) = self.sink.as_ref() else {
            return Ok(EngineState::Idle);
        };
        self.observe(sink);

        if sink.empty() {
            let expected_audio = self
                .loaded
                .as_ref()
                .and_then(|l| l.duration)
                .is_some_and(|d| d > SILENT_FAILURE_MIN);
            if expected_audio && !self.heard.get() {
                return Ok(EngineState::Error);
            }
            return Ok(EngineState::Ended);
        }

        if sink.is_paused() {
            Ok(EngineState::Paused)
        } else {
            Ok(EngineState::Playing)
        }
    }

    fn position(&self) -> Result<Option<Duration>, EngineError> {
        Ok(self.sink.as_ref().map(|sink| self.observe(sink)))
    }

    fn duration(&self) -> Result<Option<Duration>, EngineError> {
        Ok(self.loaded.as_ref().and_then(|l| l.duration))
    }

    fn release(&mut self) {
        self.stop();
        if self.stream.take().is_some() {
            info!("audio output released");
        }
    }
}
