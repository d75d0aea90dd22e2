//! Music directory scanning.
//!
//! A scan lists the supported audio files of one directory, derives a display
//! title for each, and returns them in case-insensitive filename order.

mod error;
mod model;
mod scan;
mod title;

pub use error::LoadError;
pub use model::Track;
pub use scan::scan;
pub use title::title_from_file_name;
