//! pick-users binary entry point.
//!
//! Parses options, starts the one-shot user load, initializes the terminal in
//! raw mode, runs the TUI event loop, and restores the terminal on exit.
//!
use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use pick_users::app::{self, AppState, ConfigPaths};
use pick_users::cli::{self, Args};
use pick_users::source::{self, HttpUserSource};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logging(&args).map_err(|e| anyhow::anyhow!("init logging: {e}"))?;
    tracing::info!(endpoint = %args.endpoint, "starting");

    let rx = source::spawn_load(HttpUserSource::new(args.endpoint.clone()));
    let mut state = AppState::new(&ConfigPaths::new(&args.config_dir), Some(rx));

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
