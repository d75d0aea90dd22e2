use std::cell::Cell;
use std::rc::Rc;

/// Single-owner busy flag for transport commands.
///
/// Not a lock: a second acquisition while the flag is held simply fails, and
/// the caller drops its command instead of waiting.
#[derive(Clone, Debug, Default)]
pub struct BusyFlag(Rc<Cell<bool>>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<BusyToken> {
        if self.0.get() {
            return None;
        }
        self.0.set(true);
        Some(BusyToken(Rc::clone(&self.0)))
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.0.get()
    }
}

/// Held for the duration of one command; releases the flag on drop, on every
/// exit path.
#[derive(Debug)]
pub struct BusyToken(Rc<Cell<bool>>);

impl Drop for BusyToken {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
