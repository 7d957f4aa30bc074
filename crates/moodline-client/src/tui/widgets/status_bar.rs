use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use moodline_common::Phase;

use crate::tui::app::{App, StatusKind};

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Controller state or status message
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Success => app.theme.success,
            StatusKind::Info => app.theme.info,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(&msg.text, style)]);
        frame.render_widget(Paragraph::new(line), chunks[0]);
    } else {
        let phase_style = match app.phase() {
            Phase::Idle => app.theme.muted,
            Phase::Dragging | Phase::Settling => app.theme.info,
        };
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(app.phase().label(), phase_style),
        ];
        if app.controller.is_interacting() {
            spans.push(Span::styled(" · ", app.theme.muted));
            spans.push(Span::styled("interacting", app.theme.info));
        }
        if app.suppressed() {
            spans.push(Span::styled(" · ", app.theme.muted));
            spans.push(Span::styled("auto-return off", app.theme.muted));
        }
        if let Some(remaining) = app.auto_return_in(now) {
            spans.push(Span::styled(" · ", app.theme.muted));
            spans.push(Span::styled(
                format!("back to today in {:.1}s", remaining.as_secs_f32()),
                app.theme.warning,
            ));
        }
        spans.push(Span::styled(" | ", app.theme.muted));
        spans.push(Span::styled(
            format!("{}", app.moods.len()),
            app.theme.success,
        ));
        spans.push(Span::styled(" moods", app.theme.muted));
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    }

    // Keybindings line
    let keybindings = [
        ("?", "Help"),
        ("←/→", "Day"),
        ("[/]", "Week"),
        ("t", "Today"),
        ("s", "Suppress"),
        ("1-5", "Mood"),
        ("q", "Quit"),
    ];

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for (i, (key, desc)) in keybindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
