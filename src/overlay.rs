//! Modal error overlay.
//!
//! Errors are shown one at a time. Anything raised while an error is on
//! screen waits in FIFO order behind it.

mod queue;

pub use queue::*;

#[cfg(test)]
mod tests;
