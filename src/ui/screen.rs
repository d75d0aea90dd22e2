use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// On-screen transport buttons, left to right.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Pause,
    Skip,
    Rewind,
    Quit,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Pause, Button::Skip, Button::Rewind, Button::Quit];

    pub fn label(self) -> &'static str {
        match self {
            Button::Pause => "Pause",
            Button::Skip => "Skip",
            Button::Rewind => "Rewind",
            Button::Quit => "Quit",
        }
    }
}

/// Where everything sits for the current terminal size.
///
/// Recomputed every frame, so hit testing always matches what was drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub now_playing: Rect,
    pub progress: Rect,
    /// Row the seek handle travels along.
    pub progress_bar: Rect,
    pub progress_label: Rect,
    pub volume: Rect,
    /// Row the volume handle travels along.
    pub volume_bar: Rect,
    pub volume_label: Rect,
    /// Indexed like [`Button::ALL`].
    pub buttons: [Rect; 4],
    pub footer: Rect,
    pub popup: Rect,
    pub popup_button: Rect,
}

impl ScreenLayout {
    pub fn button_at(&self, column: u16, row: u16) -> Option<Button> {
        Button::ALL
            .iter()
            .zip(self.buttons.iter())
            .find(|(_, rect)| contains(**rect, column, row))
            .map(|(button, _)| *button)
    }

    pub fn on_popup_button(&self, column: u16, row: u16) -> bool {
        contains(self.popup_button, column, row)
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Compute the layout for a terminal of `area`.
pub fn layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let (progress_bar, progress_label) = bar_with_label(chunks[2], 15);
    let (volume_bar, volume_label) = bar_with_label(chunks[3], 6);

    let button_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[4]);
    let buttons = [button_row[0], button_row[1], button_row[2], button_row[3]];

    let popup = centered_rect_sized(60, 9, area);
    let popup_button = {
        let width = 14.min(popup.width);
        Rect {
            x: popup.x + (popup.width - width) / 2,
            y: popup.bottom().saturating_sub(2),
            width,
            height: 1,
        }
    };

    ScreenLayout {
        header: chunks[0],
        now_playing: chunks[1],
        progress: chunks[2],
        progress_bar,
        progress_label,
        volume: chunks[3],
        volume_bar,
        volume_label,
        buttons,
        footer: chunks[6],
        popup,
        popup_button,
    }
}

// Inside a bordered box: the bar on the left, a fixed-width label on the right.
fn bar_with_label(outer: Rect, label_width: u16) -> (Rect, Rect) {
    let inner = Rect {
        x: outer.x.saturating_add(1),
        y: outer.y.saturating_add(1),
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2).min(1),
    };
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(label_width)])
        .split(inner);
    (parts[0], parts[1])
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    height = height.min(r.height.saturating_sub(2)).max(5).min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}
