use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a playlist from a directory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Directory missing or not readable: {} ({reason})", .path.display())]
    DirectoryUnavailable { path: PathBuf, reason: String },

    #[error(
        "No supported tracks found in the specified directory. Supported file types are {extensions}. Directory: {}",
        .path.display()
    )]
    EmptyDirectory { path: PathBuf, extensions: String },
}
