//! Transport commands and their reconciliation with engine state.
//!
//! Commands run one at a time under a [`BusyFlag`]. Every failure inside a
//! command becomes an [`ErrorEvent`](crate::overlay::ErrorEvent) on the
//! controller's overlay queue.

mod controller;
mod guard;

pub use controller::*;
pub use guard::{BusyFlag, BusyToken};
