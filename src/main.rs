//! stagediff - review staged and unstaged git changes in the terminal.

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use stagediff::core::{
    discovery_channel, spawn_discovery_worker, GitRepoFinder, GitStatusProvider, StateStore,
};
use stagediff::ui::{handle_input, render, App, AppOptions};

/// Review staged and unstaged changes across local git repositories.
#[derive(Parser, Debug)]
#[command(name = "stagediff", version, about)]
struct Cli {
    /// Directories inside the repositories to open (defaults to the current directory)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Color theme for this session (dark, light)
    #[arg(short = 't', long = "theme", value_name = "THEME")]
    theme: Option<String>,

    /// State file holding known repositories and the saved theme
    #[arg(long = "state-file", value_name = "FILE")]
    state_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

/// RAII guard for terminal state. Restores terminal on drop (including panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    // Mouse capture goes first, while still in raw mode.
    let _ = execute!(io::stdout(), DisableMouseCapture);
    let _ = io::stdout().flush();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = io::stdout().flush();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_tui(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run_tui(cli: Cli) -> Result<()> {
    let log_file = stagediff::logging::init_logging(cli.debug)?;
    stagediff::metrics::init();
    log::info!("stagediff {} starting", env!("CARGO_PKG_VERSION"));
    log::debug!("logging to {}", log_file.display());

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let roots = if cli.paths.is_empty() {
        vec![std::env::current_dir().context("Failed to get current directory")?]
    } else {
        cli.paths
    };

    let (tx, inbox) = discovery_channel();
    let worker = spawn_discovery_worker(GitRepoFinder::new(roots), tx);

    let options = AppOptions {
        state_path: cli.state_file.unwrap_or_else(StateStore::default_path),
        theme: cli.theme,
        watch: true,
    };
    let mut app = App::new(
        options,
        Box::new(GitStatusProvider::new()),
        inbox,
        Some(worker),
    )?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    if let Err(e) = app.save_state() {
        log::warn!("failed to save state on exit: {:#}", e);
    }
    log::info!("stagediff exiting");

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_discovery();
        app.poll_watcher();
        app.run_frame();

        if app.ui.dirty {
            terminal.draw(|frame| render(frame, app))?;
            app.clear_dirty();
        }

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            if matches!(event, Event::Resize(_, _)) {
                app.mark_dirty();
            }
            handle_input(app, event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
