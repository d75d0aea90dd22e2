//! Mapping between a draggable handle's column and a `[0, 1]` fraction.
//!
//! The same handle type drives both the progress bar (seek) and the volume
//! bar.

/// `clamp((x - min) / (max - min), 0, 1)`. A zero-width range maps to 0.
pub fn position_to_percent(x: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }
    ((x - min) / span).clamp(0.0, 1.0)
}

/// `min + p * (max - min)`.
pub fn percent_to_position(p: f64, min: f64, max: f64) -> f64 {
    min + p * (max - min)
}

/// Construction options for a [`DragHandle`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandleConfig {
    /// Leftmost column of the track.
    pub min: f64,
    /// Rightmost column of the track.
    pub max: f64,
    /// Row the handle sits on.
    pub row: f64,
    /// Pointer distance (in cells) that still grabs the handle.
    pub radius: f64,
    /// Initial fraction along the track.
    pub percent: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            row: 0.0,
            radius: 1.0,
            percent: 0.0,
        }
    }
}

/// A handle on a horizontal track.
///
/// While dragged, the pointer owns the position: [`DragHandle::sync`] is
/// ignored until the drag ends.
#[derive(Clone, Debug, PartialEq)]
pub struct DragHandle {
    x: f64,
    row: f64,
    min: f64,
    max: f64,
    radius: f64,
    dragging: bool,
}

impl DragHandle {
    pub fn new(config: HandleConfig) -> Self {
        let percent = config.percent.clamp(0.0, 1.0);
        Self {
            x: percent_to_position(percent, config.min, config.max),
            row: config.row,
            min: config.min,
            max: config.max,
            radius: config.radius,
            dragging: false,
        }
    }

    pub fn percent(&self) -> f64 {
        position_to_percent(self.x, self.min, self.max)
    }

    /// Current column of the handle.
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Move the track (after a resize) keeping the same fraction.
    pub fn set_bounds(&mut self, min: f64, max: f64, row: f64) {
        let percent = self.percent();
        self.min = min;
        self.max = max.max(min);
        self.row = row;
        self.x = percent_to_position(percent, self.min, self.max);
    }

    /// Follow an engine-driven value. No effect while dragged.
    pub fn sync(&mut self, percent: f64) {
        if self.dragging {
            return;
        }
        self.x = percent_to_position(percent.clamp(0.0, 1.0), self.min, self.max);
    }

    pub fn hit(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.row;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Capture the pointer if it lands on the handle.
    pub fn start(&mut self, x: f64, y: f64) -> bool {
        if self.hit(x, y) {
            self.dragging = true;
        }
        self.dragging
    }

    /// Follow the pointer and return the live fraction, if captured.
    pub fn drag(&mut self, x: f64) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.x = x.clamp(self.min, self.max);
        Some(self.percent())
    }

    /// Release the pointer and return the fraction to commit, if captured.
    pub fn end(&mut self) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(self.percent())
    }
}
