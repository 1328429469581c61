// treetrace: step-by-step binary tree and BST visualizer

use std::fs::File;
use std::io;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use treetrace::config::Config;
use treetrace::headless::write_snapshots;
use treetrace::ui::App;

/// Logs go to stderr in headless mode, to `--log-file` under the TUI, and
/// nowhere otherwise since the TUI owns the terminal.
fn init_logging(config: &Config) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if config.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&config)?;

    let actions = match config.initial_actions() {
        Ok(actions) => actions,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(count = actions.len(), "startup actions loaded");

    if config.headless {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let written = write_snapshots(actions, &mut out)?;
        tracing::info!(snapshots = written, "headless replay finished");
        return Ok(());
    }

    let mut app = App::new(
        config.history_limit_bytes(),
        config.tree_type,
        config.play_interval(),
    );
    if let Err(e) = app.load(actions) {
        eprintln!("Warning: startup script stopped early: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
