//! Playlist position and next-track preloading.
//!
//! The playlist wraps around in both directions and keeps at most one
//! prepared track: the one after the current index.

mod state;

pub use state::*;
