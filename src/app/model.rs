//! Application model: the transport controller plus pointer and layout state.
//!
//! `App` turns user input (commands, pointer events, ticks) into controller
//! calls and holds the drag handles the UI draws.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::{ControlsSettings, LibrarySettings};
use crate::engine::AudioEngine;
use crate::mapper::{DragHandle, HandleConfig, position_to_percent};
use crate::overlay::{Acknowledgement, ErrorEvent};
use crate::transport::{Dispatch, LoadPhase, Snapshot, TransportController};
use crate::ui::{Button, ScreenLayout};

/// User intents that do not carry a pointer position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play,
    TogglePause,
    Skip,
    Rewind,
    Stop,
    VolumeUp,
    VolumeDown,
    Acknowledge,
    Quit,
}

/// What the event loop should do next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Normal exit. The engine has been released.
    Quit,
    /// A fatal error was acknowledged. The engine has been released.
    Terminate,
}

/// The main application model.
pub struct App<E: AudioEngine> {
    controller: TransportController<E>,
    library: LibrarySettings,
    seek: DragHandle,
    volume: DragHandle,
    layout: ScreenLayout,
    volume_step: u8,
}

impl<E: AudioEngine> App<E> {
    pub fn new(
        controller: TransportController<E>,
        library: LibrarySettings,
        controls: &ControlsSettings,
    ) -> Self {
        let handle = HandleConfig {
            radius: controls.handle_radius,
            ..HandleConfig::default()
        };
        let volume = DragHandle::new(HandleConfig {
            percent: f64::from(controller.volume()) / 100.0,
            ..handle
        });

        Self {
            controller,
            library,
            seek: DragHandle::new(handle),
            volume,
            layout: ScreenLayout::default(),
            volume_step: controls.volume_step,
        }
    }

    pub fn controller(&self) -> &TransportController<E> {
        &self.controller
    }

    #[cfg(test)]
    pub fn controller_mut(&mut self) -> &mut TransportController<E> {
        &mut self.controller
    }

    pub fn seek_handle(&self) -> &DragHandle {
        &self.seek
    }

    pub fn volume_handle(&self) -> &DragHandle {
        &self.volume
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    pub fn overlay_active(&self) -> bool {
        self.controller.overlay().is_active()
    }

    /// Load the library at `dir` and start the first track.
    ///
    /// Without a directory, or if the load fails, a fatal error is raised and
    /// nothing plays.
    pub fn start(&mut self, dir: Option<&Path>) {
        let Some(dir) = dir else {
            self.controller.raise(ErrorEvent::fatal(
                "No music directory given. Pass one on the command line or set library.directory in the config file.",
            ));
            return;
        };

        if self.controller.open_library(dir, &self.library, LoadPhase::Startup) == Dispatch::Done {
            self.controller.play();
        }
    }

    /// Rebuild the playlist from freshly loaded settings. Failures are
    /// recoverable and keep the current playlist.
    pub fn reload(&mut self, dir: Option<&Path>, library: LibrarySettings) -> Dispatch {
        if self.overlay_active() {
            return Dispatch::Busy;
        }
        let Some(dir) = dir else {
            self.controller
                .raise(ErrorEvent::recoverable("Reload failed: no music directory configured"));
            return Dispatch::Failed;
        };

        info!(dir = %dir.display(), "reloading library");
        let outcome = self.controller.open_library(dir, &library, LoadPhase::Reload);
        if outcome == Dispatch::Done {
            self.library = library;
            return self.controller.play();
        }
        outcome
    }

    pub fn report(&mut self, event: ErrorEvent) {
        self.controller.raise(event);
    }

    /// Apply a command. While an error is on screen only acknowledgment and
    /// quitting do anything.
    pub fn dispatch(&mut self, command: Command) -> Flow {
        if self.overlay_active() {
            return match command {
                Command::Acknowledge => self.acknowledge(),
                Command::Quit => self.quit_from_overlay(),
                other => {
                    debug!(?other, "ignored while an error is shown");
                    Flow::Continue
                }
            };
        }

        match command {
            Command::Play => {
                self.controller.play();
            }
            Command::TogglePause => {
                self.controller.toggle_pause();
            }
            Command::Skip => {
                self.controller.skip();
            }
            Command::Rewind => {
                self.controller.rewind();
            }
            Command::Stop => {
                self.controller.stop();
            }
            Command::VolumeUp => {
                self.controller.adjust_volume(i16::from(self.volume_step));
            }
            Command::VolumeDown => {
                self.controller.adjust_volume(-i16::from(self.volume_step));
            }
            Command::Acknowledge => {}
            Command::Quit => {
                self.controller.shutdown();
                return Flow::Quit;
            }
        }
        self.sync_handles();
        Flow::Continue
    }

    /// Pointer pressed. Drag handles take precedence over buttons.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> Flow {
        if self.overlay_active() {
            if self.layout.on_popup_button(column, row) {
                return self.acknowledge();
            }
            return Flow::Continue;
        }

        let (x, y) = (f64::from(column), f64::from(row));
        if self.seek.start(x, y) || self.volume.start(x, y) {
            return Flow::Continue;
        }

        match self.layout.button_at(column, row) {
            Some(Button::Pause) => self.dispatch(Command::TogglePause),
            Some(Button::Skip) => self.dispatch(Command::Skip),
            Some(Button::Rewind) => self.dispatch(Command::Rewind),
            Some(Button::Quit) => self.dispatch(Command::Quit),
            None => Flow::Continue,
        }
    }

    /// Pointer moved with the button held. Volume follows live; seeking waits
    /// for release.
    pub fn pointer_drag(&mut self, column: u16) {
        let x = f64::from(column);
        self.seek.drag(x);
        if let Some(percent) = self.volume.drag(x) {
            self.controller.set_volume(percent_to_volume(percent));
        }
    }

    /// Pointer released. Commits whatever handle was being dragged.
    pub fn pointer_up(&mut self) {
        let seek = self.seek.end();
        let volume = self.volume.end();
        if self.overlay_active() {
            return;
        }

        if let Some(percent) = seek {
            self.controller.seek_to(percent);
        }
        if let Some(percent) = volume {
            self.controller.set_volume(percent_to_volume(percent));
        }
        self.sync_handles();
    }

    /// Adopt a new layout after a resize.
    pub fn relayout(&mut self, layout: ScreenLayout) {
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        set_handle_bounds(&mut self.seek, layout.progress_bar);
        set_handle_bounds(&mut self.volume, layout.volume_bar);
    }

    /// Periodic update: watch for end of track and follow engine progress.
    pub fn tick(&mut self) {
        if !self.overlay_active() {
            self.controller.poll_end_of_track();
        }
        self.sync_handles();
    }

    /// Elapsed time to show: the drag target while seeking, else the engine's.
    pub fn display_elapsed(&self, snapshot: &Snapshot<'_>) -> Duration {
        if self.seek.is_dragging() {
            snapshot.total.mul_f64(self.seek.percent())
        } else {
            snapshot.elapsed
        }
    }

    fn acknowledge(&mut self) -> Flow {
        match self.controller.acknowledge_error() {
            Acknowledgement::Terminate { .. } => Flow::Terminate,
            _ => {
                self.sync_handles();
                Flow::Continue
            }
        }
    }

    fn quit_from_overlay(&mut self) -> Flow {
        let fatal = self
            .controller
            .overlay()
            .active()
            .is_some_and(ErrorEvent::is_fatal);
        if fatal {
            return self.acknowledge();
        }
        self.controller.shutdown();
        Flow::Quit
    }

    fn sync_handles(&mut self) {
        let snapshot = self.controller.snapshot();
        let progress = position_to_percent(
            snapshot.elapsed.as_secs_f64(),
            0.0,
            snapshot.total.as_secs_f64(),
        );
        let volume = f64::from(snapshot.volume) / 100.0;
        self.seek.sync(progress);
        self.volume.sync(volume);
    }
}

fn percent_to_volume(percent: f64) -> u8 {
    (percent.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn set_handle_bounds(handle: &mut DragHandle, bar: ratatui::layout::Rect) {
    let min = f64::from(bar.x);
    let max = f64::from(bar.x + bar.width.saturating_sub(1));
    handle.set_bounds(min, max, f64::from(bar.y));
}
