//! Audio engine boundary.
//!
//! The transport never decodes or mixes audio itself. It drives an
//! [`AudioEngine`] and re-reads its state on every tick; [`RodioEngine`] is the
//! production implementation.

mod output;
mod sink;
mod traits;
mod types;

pub use output::RodioEngine;
pub use traits::AudioEngine;
pub use types::{EngineError, EngineState};

#[cfg(test)]
pub mod fake;
