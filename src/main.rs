//! main.rs
//! Entry point for dirpilot

pub(crate) mod app;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod errors;
pub(crate) mod ui;
pub(crate) mod utils;

use crate::config::Config;
use crate::core::terminal;
use crate::utils::cli::{CliAction, handle_args};
use crate::utils::logging::init_logging;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        tracing::error!(%info, "panic");
        eprintln!("\n[dirpilot] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    match handle_args() {
        CliAction::RunApp => {}
        CliAction::Exit => return Ok(()),
        CliAction::Fail => std::process::exit(1),
    }

    init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting dirpilot");

    let config = Config::load();
    let mut app = app::AppState::new(&config)?;
    terminal::run_terminal(&mut app)
}
