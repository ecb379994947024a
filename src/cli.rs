//! Command-line options and log setup.
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::error::{Context, Result};
use crate::source::DEFAULT_ENDPOINT;

#[derive(Debug, Parser)]
#[command(name = "pick-users", version, about = "Search a remote user list and pick users")]
pub struct Args {
    /// User listing endpoint returning `{ "users": [...] }`.
    #[arg(long, env = "PICK_USERS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory holding `theme.conf` and `keybinds.conf`.
    #[arg(long, env = "PICK_USERS_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Append logs to this file. Without it nothing is logged, since the terminal belongs to the UI.
    #[arg(long, env = "PICK_USERS_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Install a `tracing` subscriber writing to `args.log_file`, if one was given.
pub fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()?;
    Ok(())
}
