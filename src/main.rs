use std::process::ExitCode;

mod app;
mod config;
mod engine;
mod library;
mod logging;
mod mapper;
mod overlay;
mod playlist;
mod runtime;
mod transport;
mod ui;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("baise: {e}");
            ExitCode::FAILURE
        }
    }
}
