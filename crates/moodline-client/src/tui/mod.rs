mod actions;
mod app;
mod event;
mod surface;
mod theme;
mod ui;
pub mod widgets;

use std::io;
use std::time::Instant;

use chrono::NaiveDate;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::Config;
use crate::error::{MoodlineError, Result};
pub use app::App;

/// Options the host screen starts with
#[derive(Debug, Clone, Copy)]
pub struct LaunchOptions {
    pub anchor: NaiveDate,
    pub selected: NaiveDate,
    pub suppress: bool,
}

/// Run the TUI application
pub fn run(config: Config, options: LaunchOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| MoodlineError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| MoodlineError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| MoodlineError::Tui(e.to_string()))?;

    // Create app and run
    let res = App::new(
        config,
        options.anchor,
        options.selected,
        options.suppress,
        Instant::now(),
    )
    .and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode().map_err(|e| MoodlineError::Tui(e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| MoodlineError::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| MoodlineError::Tui(e.to_string()))?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let events = event::EventHandler::new(app.config.tick_rate);

    let size = terminal
        .size()
        .map_err(|e| MoodlineError::Tui(e.to_string()))?;
    app.resize(size.width, size.height);
    info!(
        anchor = %app.timeline().anchor(),
        selected = %app.selected,
        width = size.width,
        "timeline started"
    );

    while app.running {
        let now = Instant::now();
        app.tick(now);
        terminal
            .draw(|f| ui::render(f, app, now))
            .map_err(|e| MoodlineError::Tui(e.to_string()))?;
        app.after_draw(now);

        // Wake up in time for the controller's next timer
        match events.next(app.poll_timeout(Instant::now()))? {
            event::Event::Key(key) => actions::handle_key_event(app, key, Instant::now()),
            event::Event::Mouse(mouse) => actions::handle_mouse_event(app, mouse, Instant::now()),
            event::Event::Resize(width, height) => app.resize(width, height),
            event::Event::Tick => {}
        }
    }

    Ok(())
}
