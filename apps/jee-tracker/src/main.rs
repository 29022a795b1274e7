//! JEE Tracker - Study dashboard for JEE Mains and Advanced preparation.

mod analytics;
mod app;
mod calendar;
mod config;
mod dashboard;
mod error;
mod export;
mod fixtures;
mod flashcards;
mod gamification;
mod logging;
mod models;
mod syllabus;
mod timer;
mod timetable;
mod tracker;
mod ui;

use app::App;
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let _log_guard = logging::init_tracing(&config.logging, config.log_dir().as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), "jee-tracker starting");

    // Write a default config on first run so it can be edited.
    if Config::config_path().is_some_and(|p| !p.exists()) {
        if let Err(e) = config.save() {
            warn!(error = %e, "could not write default config");
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(config));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "jee-tracker exited with an error");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    info!("jee-tracker stopped");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        // Poll with timeout so the timer and quotes keep moving
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') && key.modifiers.is_empty() && app.can_quit() {
                    break;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
                app.handle_key(key);
            }
        }

        app.tick();
    }

    // Log any running study session before leaving
    app.stop_timer();

    Ok(())
}
