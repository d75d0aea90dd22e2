use std::collections::VecDeque;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Normal operation resumes after acknowledgment.
    Recoverable,
    /// The process exits after acknowledgment.
    Fatal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEvent {
    pub message: String,
    pub severity: Severity,
}

impl ErrorEvent {
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Recoverable,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of [`ErrorOverlayQueue::raise`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Raised {
    /// Nothing was on screen; the event took focus.
    Activated,
    /// Another event is on screen; this one waits its turn.
    Queued,
}

/// Outcome of [`ErrorOverlayQueue::acknowledge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acknowledgement {
    /// No overlay was active.
    Nothing,
    /// A recoverable overlay closed and nothing else is pending.
    Resumed,
    /// A recoverable overlay closed and the next pending event took its place.
    Next,
    /// A fatal overlay was acknowledged. Pending events were dropped.
    Terminate { discarded: usize },
}

/// One active error plus the events waiting behind it.
#[derive(Debug, Default)]
pub struct ErrorOverlayQueue {
    active: Option<ErrorEvent>,
    pending: VecDeque<ErrorEvent>,
}

impl ErrorOverlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, event: ErrorEvent) -> Raised {
        if self.active.is_some() {
            self.pending.push_back(event);
            return Raised::Queued;
        }
        self.active = Some(event);
        Raised::Activated
    }

    /// Close the active overlay.
    ///
    /// A recoverable overlay hands focus to the oldest pending event, if any,
    /// regardless of that event's severity. A fatal overlay ends the session
    /// and the queue is never drained.
    pub fn acknowledge(&mut self) -> Acknowledgement {
        let Some(active) = self.active.take() else {
            return Acknowledgement::Nothing;
        };

        match active.severity {
            Severity::Fatal => {
                let discarded = self.pending.len();
                self.pending.clear();
                Acknowledgement::Terminate { discarded }
            }
            Severity::Recoverable => match self.pending.pop_front() {
                Some(next) => {
                    self.active = Some(next);
                    Acknowledgement::Next
                }
                None => Acknowledgement::Resumed,
            },
        }
    }

    pub fn active(&self) -> Option<&ErrorEvent> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
