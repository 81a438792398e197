//! usrapi-manager binary entry point.
//!
//! Parses the command line, initializes logging and the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod error;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "usrapi-manager", version, about)]
struct Cli {
    /// Base URL of the user backend.
    #[arg(long, env = "USRAPI_BASE_URL", default_value = api::DEFAULT_BASE_URL)]
    base_url: String,

    /// Theme configuration file (created with defaults if missing).
    #[arg(long, default_value = "theme.conf")]
    theme: String,

    /// Keybinding configuration file (created with defaults if missing).
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,

    /// Append logs to this file; without it nothing is logged.
    /// Verbosity is controlled via RUST_LOG.
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

/// Route tracing output to a file; stdout belongs to the TUI.
fn init_tracing(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

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
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let client = api::ApiClient::new(&cli.base_url)?;
    let mut app = app::AppState::new(
        app::Theme::load_or_init(&cli.theme),
        app::keymap::Keymap::load_or_init(&cli.keybinds),
    );
    app.backend = client.base_url().to_string();

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &client, app);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
