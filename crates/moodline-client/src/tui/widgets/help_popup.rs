use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(52, 22, frame.area());

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = app.theme.muted;
    let section_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {:<8}", key), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("  Browsing", section_style)),
        entry("h/←", "Select previous day"),
        entry("l/→", "Select next day"),
        entry("drag", "Scroll the strip"),
        entry("click", "Select a day"),
        entry("wheel", "Nudge the strip"),
        Line::from(""),
        Line::from(Span::styled("  Navigation", section_style)),
        entry("[ / ]", "Jump a week back / forward"),
        entry("t", "Go to today"),
        entry("s", "Toggle auto-return suppression"),
        Line::from(""),
        Line::from(Span::styled("  Mood", section_style)),
        entry("1-5", "Rate the selected day"),
        Line::from(""),
        entry("q/Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled("        Press any key to close", desc_style)),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text), inner);
}
