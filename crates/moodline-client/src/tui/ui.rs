use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, PopupState};
use super::widgets::{
    date_strip::render_date_strip, help_popup::render_help_popup,
    status_bar::render_status_bar,
};

/// Rows of the strip: weekday, day of month, mood marker
pub const STRIP_HEIGHT: u16 = 3;

/// Screen regions, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub strip: Rect,
    pub detail: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // Header
            Constraint::Length(STRIP_HEIGHT + 2), // Strip with borders
            Constraint::Min(1),                   // Detail
            Constraint::Length(2),                // Status + keybindings
        ])
        .split(area);

    let strip_block = Block::default().borders(Borders::TOP | Borders::BOTTOM);

    AppLayout {
        header: chunks[0],
        strip: strip_block.inner(chunks[1]),
        detail: chunks[2],
        status: chunks[3],
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let regions = layout(frame.area());

    render_header(frame, app, regions.header);

    let strip_frame = Rect {
        y: regions.strip.y.saturating_sub(1),
        height: regions.strip.height + 2,
        ..regions.strip
    };
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(app.theme.border);
    frame.render_widget(block, strip_frame);
    render_date_strip(frame, app, regions.strip);

    render_detail(frame, app, regions.detail);
    render_status_bar(frame, app, regions.status, now);

    if let Some(popup) = app.popup {
        render_popup(frame, app, popup);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let timeline = app.timeline();
    let spans = vec![
        Span::styled("  moodline", app.theme.title),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} → {}",
                timeline.first().format("%b %d"),
                timeline.last().format("%b %d")
            ),
            app.theme.muted,
        ),
        Span::raw("  "),
        Span::styled(
            format!("today {}", timeline.anchor().format("%a %b %d")),
            app.theme.today,
        ),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let date = app.selected;
    let mut heading = vec![Span::styled(
        date.format("%A, %B %d %Y").to_string(),
        app.theme.title,
    )];
    if app.timeline().is_anchor(&date) {
        heading.push(Span::styled(" [Today]", app.theme.today));
    } else if !app.timeline().contains(&date) {
        heading.push(Span::styled(" (outside window)", app.theme.warning));
    }

    let mood = match app.current_mood {
        Some(mood) => Line::from(vec![
            Span::styled("mood: ", app.theme.muted),
            Span::styled(
                format!("{} ({}/5)", mood.label(), mood.rating()),
                app.theme.success,
            ),
        ]),
        None => Line::from(Span::styled(
            "No mood recorded. Press 1-5 to rate this day.",
            app.theme.muted,
        )),
    };

    let text = vec![Line::from(""), Line::from(heading), Line::from(""), mood];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn render_popup(frame: &mut Frame, app: &App, popup: PopupState) {
    match popup {
        PopupState::Help => render_help_popup(frame, app),
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
