use std::io;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use termhub::app::App;
use termhub::config::Config;
use termhub::event_loop::run_app;
use termhub::logging;

fn main() -> Result<()> {
    // Check if we're in a proper terminal
    if !io::stdin().is_terminal() {
        anyhow::bail!("termhub must be run in an interactive terminal");
    }

    // Diagnostics go to a file; the terminal owns stdout/stderr while the
    // UI is up. The guard must outlive the run or buffered lines are lost.
    let _log_guard = dirs::data_dir().and_then(|dir| logging::init(&dir.join("termhub")));

    let config = Config::load().context("Failed to load configuration")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Create app, restoring persisted sessions
    let result = App::new(&config)
        .context("Failed to initialize application")
        .and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal (always try to restore even on error)
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    result
}
