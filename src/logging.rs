//! File logging.
//!
//! The terminal belongs to the TUI, so everything goes to `baise.log` in the
//! configured log directory. `BAISE_LOG` overrides the configured filter.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_dir};

pub const LOG_FILE: &str = "baise.log";
pub const LOG_ENV: &str = "BAISE_LOG";

/// Install the global subscriber.
///
/// Returns the writer guard, which must live until exit so buffered lines are
/// flushed. Returns `None` when no log directory can be used; the player runs
/// without logs in that case.
pub fn init(settings: &LogSettings) -> Option<WorkerGuard> {
    let dir = log_dir(settings)?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("baise: cannot create log directory {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter(settings))
        .try_init();

    match installed {
        Ok(()) => Some(guard),
        Err(e) => {
            eprintln!("baise: logging disabled: {e}");
            None
        }
    }
}

fn log_dir(settings: &LogSettings) -> Option<PathBuf> {
    settings.directory.clone().or_else(default_log_dir)
}

fn filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
