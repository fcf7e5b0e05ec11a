//! File logging. The terminal belongs to the TUI, so nothing goes to stderr.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Route the `log` facade to `<state dir>/stagediff.log`.
///
/// `RUST_LOG` still applies on top of the base level.
pub fn init_logging(debug: bool) -> Result<PathBuf> {
    let log_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_dir = default_log_dir();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = log_dir.join("stagediff.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("failed to open {}", log_file.display()))?;

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] - {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .context("logger already initialized")?;

    log::info!("Logging initialized with level: {log_level}");
    Ok(log_file)
}

fn default_log_dir() -> PathBuf {
    if let Some(state) = env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(state).join("stagediff");
    }
    match dirs::home_dir() {
        Some(home) => home.join(".local/state/stagediff"),
        None => env::temp_dir().join("stagediff"),
    }
}
