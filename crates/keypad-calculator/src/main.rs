//! Keypad calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc                                  # defaults
//! keypad-calc --config calc.yaml               # YAML config
//! keypad-calc --log-file calc.log -l debug     # trace every action
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keypad_calculator::config::{CalculatorConfig, ConfigError};
use keypad_calculator::tui::{render, CalculatorApp};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Input poll interval; also the granularity of the timers
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Browser-style keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the error auto-clear delay
    #[arg(long, value_name = "MS")]
    recovery_delay_ms: Option<u64>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to initialize logging: {0}")]
    Log(String),
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }
    let config = load_config(&args)?;
    info!(?config, "starting keypad calculator");

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = CalculatorApp::with_config(config);
    let result = run_app(&mut terminal, &mut app);

    drop(terminal);
    drop(guard);
    info!("keypad calculator exited");
    result.map_err(AppError::from)
}

/// Raw mode plus alternate screen, undone on drop whichever way `run` exits
#[derive(Debug)]
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = restore_screen(&mut io::stdout()) {
            warn!(error = %e, "failed to restore the screen");
        }
    }
}

fn restore_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
}

fn load_config(args: &Args) -> Result<CalculatorConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => CalculatorConfig::from_path(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(ms) = args.recovery_delay_ms {
        config = config.with_recovery_delay_ms(ms);
        config.validate()?;
    }
    Ok(config)
}

fn init_logging(path: &Path, level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Log(e.to_string()))?;
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Log(e.to_string()))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> io::Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| render(app, frame))?;
            dirty = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key_event(key);
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let screen = Rect::new(0, 0, size.width, size.height);
                    dirty |= app.handle_mouse_event(mouse, screen).is_some();
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        dirty |= app.tick();
        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_screen_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn test_load_config_rejects_zero_delay() {
        let args = Args::parse_from(["keypad-calc", "--recovery-delay-ms", "0"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_load_config_defaults() {
        let args = Args::parse_from(["keypad-calc"]);
        assert_eq!(load_config(&args).unwrap(), CalculatorConfig::default());
    }
}
