//! Scripted engine used by transport and app tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use super::traits::AudioEngine;
use super::types::{EngineError, EngineState, display_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Prepare(String),
    Load(String),
    Play,
    Stop,
    TogglePause,
    Seek(Duration),
    SetVolume(u8),
    Release,
}

#[derive(Debug)]
pub struct FakeMedia {
    pub name: String,
}

/// Records every call and plays back whatever state the test sets.
///
/// Loading resets the volume to 100 like a real backend may.
#[derive(Debug, Default)]
pub struct FakeEngine {
    calls: RefCell<Vec<Call>>,
    pub state: EngineState,
    pub position: Option<Duration>,
    pub duration: Option<Duration>,
    pub volume: u8,
    pub loaded: Option<String>,
    pub fail_prepare: HashSet<String>,
    pub fail_queries: bool,
    pub released: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            volume: 100,
            ..Self::default()
        }
    }

    /// Make `prepare` fail for the file called `name`.
    pub fn fail_on(&mut self, name: &str) {
        self.fail_prepare.insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Names passed to `prepare`, in order.
    pub fn prepared(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Prepare(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names passed to `load`, in order.
    pub fn loads(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Load(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn query<T>(&self, value: T) -> Result<T, EngineError> {
        if self.fail_queries {
            Err(EngineError::Query("scripted failure".to_string()))
        } else {
            Ok(value)
        }
    }
}

impl AudioEngine for FakeEngine {
    type Media = FakeMedia;

    fn prepare(&self, path: &Path) -> Result<FakeMedia, EngineError> {
        let name = display_name(path);
        self.record(Call::Prepare(name.clone()));
        if self.fail_prepare.contains(&name) {
            return Err(EngineError::Decode {
                name,
                reason: "scripted decode failure".to_string(),
            });
        }
        Ok(FakeMedia { name })
    }

    fn load(&mut self, media: FakeMedia) -> Result<(), EngineError> {
        self.record(Call::Load(media.name.clone()));
        self.loaded = Some(media.name);
        self.volume = 100;
        self.state = EngineState::Paused;
        self.position = Some(Duration::ZERO);
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.record(Call::Play);
        if self.loaded.is_none() {
            return Err(EngineError::NoMedia);
        }
        self.state = EngineState::Playing;
        Ok(())
    }

    fn stop(&mut self) {
        self.record(Call::Stop);
        self.state = EngineState::Idle;
        self.loaded = None;
        self.position = None;
    }

    fn toggle_pause(&mut self) {
        self.record(Call::TogglePause);
        self.state = match self.state {
            EngineState::Playing => EngineState::Paused,
            EngineState::Paused => EngineState::Playing,
            other => other,
        };
    }

    fn seek(&mut self, position: Duration) -> Result<(), EngineError> {
        self.record(Call::Seek(position));
        if self.loaded.is_none() {
            return Err(EngineError::NoMedia);
        }
        self.position = Some(position);
        Ok(())
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, volume: u8) {
        self.record(Call::SetVolume(volume));
        self.volume = volume;
    }

    fn state(&self) -> Result<EngineState, EngineError> {
        self.query(self.state)
    }

    fn position(&self) -> Result<Option<Duration>, EngineError> {
        self.query(self.position)
    }

    fn duration(&self) -> Result<Option<Duration>, EngineError> {
        self.query(self.duration)
    }

    fn release(&mut self) {
        self.record(Call::Release);
        self.released = true;
        self.state = EngineState::Idle;
        self.loaded = None;
    }
}
