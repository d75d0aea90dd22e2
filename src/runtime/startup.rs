use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::App;
use crate::config::Settings;
use crate::engine::AudioEngine;
use crate::transport::{TransportController, TransportSettings};

/// The command line directory wins over `library.directory`.
pub fn resolve_directory(cli: Option<&Path>, settings: &Settings) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or_else(|| settings.library.directory.clone())
}

/// Build the app around `engine` and start playing the library.
///
/// Startup failures end up on the error overlay, not in the return value, so
/// the user sees them in the TUI.
pub fn build_app<E: AudioEngine>(engine: E, settings: &Settings, cli_dir: Option<&Path>) -> App<E> {
    let controller = TransportController::new(engine, TransportSettings::from(settings));
    let mut app = App::new(controller, settings.library.clone(), &settings.controls);

    let dir = resolve_directory(cli_dir, settings);
    info!(dir = ?dir, "opening library");
    app.start(dir.as_deref());
    app
}
