use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, warn};

use crate::app::{App, Command, Flow};
use crate::config;
use crate::engine::AudioEngine;
use crate::overlay::ErrorEvent;
use crate::runtime::{settings, startup};
use crate::ui;

/// What a key press asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Action {
    Command(Command),
    Reload,
}

/// Main terminal loop: draw, drain input until the next tick, then tick.
///
/// Returns how the session ended.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    cli_dir: Option<&Path>,
    app: &mut App<E>,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.controls.tick_ms.max(1));

    loop {
        // Resizes are picked up here, once per frame.
        let size = terminal.size()?;
        app.relayout(ui::layout(Rect::new(0, 0, size.width, size.height)));
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        let deadline = Instant::now() + tick;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                break;
            }

            let flow = match event::read()? {
                Event::Key(key) => handle_key_event(key, cli_dir, app),
                Event::Mouse(mouse) => handle_mouse_event(mouse, app),
                _ => Flow::Continue,
            };
            if flow != Flow::Continue {
                return Ok(flow);
            }
        }

        app.tick();
    }
}

fn handle_key_event<E: AudioEngine>(key: KeyEvent, cli_dir: Option<&Path>, app: &mut App<E>) -> Flow {
    match key_action(key, app.overlay_active()) {
        Some(Action::Command(command)) => app.dispatch(command),
        Some(Action::Reload) => {
            reload(cli_dir, app);
            Flow::Continue
        }
        None => Flow::Continue,
    }
}

fn handle_mouse_event<E: AudioEngine>(mouse: MouseEvent, app: &mut App<E>) -> Flow {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => {
            app.pointer_drag(mouse.column);
            Flow::Continue
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.pointer_up();
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn reload<E: AudioEngine>(cli_dir: Option<&Path>, app: &mut App<E>) {
    let (fresh, problem) = settings::load_settings();
    if let Some(problem) = problem {
        warn!("reload aborted: {problem}");
        app.report(ErrorEvent::recoverable(format!("Reload failed: {problem}")));
        return;
    }
    let dir = startup::resolve_directory(cli_dir, &fresh);
    let outcome = app.reload(dir.as_deref(), fresh.library);
    debug!(?outcome, "reload finished");
}

fn key_action(key: KeyEvent, overlay_active: bool) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Command(Command::Quit)),
            _ => None,
        };
    }

    if overlay_active {
        return match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Command(Command::Acknowledge)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Command(Command::Quit)),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Command::TogglePause,
        KeyCode::Enter => Command::Play,
        KeyCode::Right | KeyCode::Char('l') => Command::Skip,
        KeyCode::Left | KeyCode::Char('h') => Command::Rewind,
        KeyCode::Up | KeyCode::Char('k') => Command::VolumeUp,
        KeyCode::Down | KeyCode::Char('j') => Command::VolumeDown,
        KeyCode::Char('s') => Command::Stop,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('r') => return Some(Action::Reload),
        _ => return None,
    };
    Some(Action::Command(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys() {
        let cases = [
            (KeyCode::Char(' '), Command::TogglePause),
            (KeyCode::Char('p'), Command::TogglePause),
            (KeyCode::Enter, Command::Play),
            (KeyCode::Char('l'), Command::Skip),
            (KeyCode::Right, Command::Skip),
            (KeyCode::Char('h'), Command::Rewind),
            (KeyCode::Char('k'), Command::VolumeUp),
            (KeyCode::Down, Command::VolumeDown),
            (KeyCode::Char('s'), Command::Stop),
            (KeyCode::Esc, Command::Quit),
        ];
        for (code, command) in cases {
            assert_eq!(
                key_action(press(code), false),
                Some(Action::Command(command)),
                "{code:?}"
            );
        }
        assert_eq!(key_action(press(KeyCode::Char('r')), false), Some(Action::Reload));
        assert_eq!(key_action(press(KeyCode::Char('x')), false), None);
    }

    #[test]
    fn overlay_keys_only_acknowledge_or_quit() {
        assert_eq!(
            key_action(press(KeyCode::Char(' ')), true),
            Some(Action::Command(Command::Acknowledge))
        );
        assert_eq!(
            key_action(press(KeyCode::Enter), true),
            Some(Action::Command(Command::Acknowledge))
        );
        assert_eq!(
            key_action(press(KeyCode::Char('q')), true),
            Some(Action::Command(Command::Quit))
        );
        assert_eq!(key_action(press(KeyCode::Char('l')), true), None);
        assert_eq!(key_action(press(KeyCode::Char('r')), true), None);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(key, false), Some(Action::Command(Command::Quit)));
        assert_eq!(key_action(key, true), Some(Action::Command(Command::Quit)));
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char('l'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_action(key, false), None);
    }
}
