//! UI rendering helpers for the terminal user interface.
//!
//! This module contains the screen layout and the functions that render it
//! with `ratatui`.

mod screen;

pub use screen::*;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::UiSettings;
use crate::engine::{AudioEngine, EngineState};
use crate::mapper::DragHandle;
use crate::overlay::ErrorEvent;
use crate::transport::Snapshot;


const CONTROLS: [(&str, &str); 8] = [
    ("space/p", "play/pause"),
    ("enter", "play"),
    ("h/l", "rewind/skip"),
    ("j/k", "volume -/+"),
    ("s", "stop"),
    ("r", "reload"),
    ("q", "quit"),
    ("mouse", "drag bars, click buttons"),
];

/// Format a `Duration` as `M:SS`.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total`, e.g. `1:05 / 2:05`.
pub fn format_progress(elapsed: Duration, total: Duration) -> String {
    format!("{} / {}", format_clock(elapsed), format_clock(total))
}

/// Status word for the now-playing panel.
pub fn status_text(state: EngineState) -> &'static str {
    match state {
        EngineState::Playing => "Playing",
        EngineState::Paused => "Paused",
        EngineState::Idle | EngineState::Ended | EngineState::Error => "Stopped",
    }
}

/// Lines of the now-playing panel.
pub fn now_playing_lines(snapshot: &Snapshot<'_>) -> Vec<String> {
    let Some(track) = snapshot.track else {
        return vec!["No song selected.".to_string()];
    };

    let mut title = track.title.clone();
    if snapshot.state == EngineState::Paused {
        title.push_str(" (Paused)");
    }
    vec![
        format!("{}: {}", status_text(snapshot.state), title),
        track.artist.clone(),
        format!("Volume: {}%", snapshot.volume),
    ]
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Render the entire UI into `frame` from `app` state and settings.
///
/// Uses the layout last handed to [`App::relayout`].
pub fn draw<E: AudioEngine>(frame: &mut Frame, app: &App<E>, ui: &UiSettings) {
    let layout = app.layout();
    let snapshot = app.controller().snapshot();

    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" baise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, layout.header);

    let now_playing = Paragraph::new(
        now_playing_lines(&snapshot)
            .into_iter()
            .map(Line::from)
            .collect::<Vec<Line>>(),
    )
    .block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" now playing "),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, layout.now_playing);

    frame.render_widget(Block::bordered().title(" progress "), layout.progress);
    render_bar(frame, app.seek_handle(), layout.progress_bar);
    let time = format_progress(app.display_elapsed(&snapshot), snapshot.total);
    frame.render_widget(
        Paragraph::new(time).alignment(Alignment::Right),
        layout.progress_label,
    );

    frame.render_widget(Block::bordered().title(" volume "), layout.volume);
    render_bar(frame, app.volume_handle(), layout.volume_bar);
    frame.render_widget(
        Paragraph::new(format!("{}%", snapshot.volume)).alignment(Alignment::Right),
        layout.volume_label,
    );

    for (button, area) in Button::ALL.iter().zip(layout.buttons.iter()) {
        let widget = Paragraph::new(button.label())
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(widget, *area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, layout.footer);

    if let Some(event) = app.controller().overlay().active() {
        render_overlay(frame, event, layout);
    }
}

fn render_bar(frame: &mut Frame, handle: &DragHandle, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let handle_col = (handle.x().round() as u16).clamp(area.x, area.right().saturating_sub(1));
    let before = usize::from(handle_col - area.x);
    let after = usize::from(area.right() - handle_col - 1);

    let knob = if handle.is_dragging() {
        Span::styled("●", Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw("●")
    };
    let line = Line::from(vec![
        Span::raw("━".repeat(before)),
        knob,
        Span::raw("─".repeat(after)).dim(),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_overlay(frame: &mut Frame, event: &ErrorEvent, layout: &ScreenLayout) {
    frame.render_widget(Clear, layout.popup);

    let title = if event.is_fatal() { " error " } else { " warning " };
    let message = Paragraph::new(event.message.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding {
                    left: 1,
                    right: 1,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(message, layout.popup);

    let label = if event.is_fatal() { "[ Exit ]" } else { "[ Recover ]" };
    frame.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::REVERSED)),
        layout.popup_button,
    );
}
