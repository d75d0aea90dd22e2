//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the transport controller
//! together with the seek and volume handles and the current screen layout.

mod model;

pub use model::*;
