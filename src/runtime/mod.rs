use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::Flow;
use crate::engine::RodioEngine;
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    let _log_guard = logging::init(&settings.log);
    if let Some(problem) = problem {
        eprintln!("baise: {problem}");
        warn!("{problem}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let cli_dir = env::args_os().nth(1).map(PathBuf::from);

    let engine = match RodioEngine::open_default() {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "cannot open audio output");
            eprintln!("baise: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let mut app = startup::build_app(engine, &settings, cli_dir.as_deref());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, cli_dir.as_deref(), &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let flow = run_result?;
    info!(?flow, "exiting");
    Ok(match flow {
        Flow::Terminate => ExitCode::FAILURE,
        Flow::Quit | Flow::Continue => ExitCode::SUCCESS,
    })
}
