use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use moodline_common::Phase;

use crate::tui::app::App;

pub fn render_date_strip(frame: &mut Frame, app: &App, area: Rect) {
    let timeline = app.timeline();
    let item_width = app.config.geometry.item_width.round() as u16;
    if item_width == 0 {
        return;
    }
    let selected_index = app.controller.selected_index();

    for (index, date) in timeline.iter().enumerate() {
        let x = app.surface.item_x(index).round();
        // Skip partially visible items
        if x < 0.0 || x + f32::from(item_width) > f32::from(area.width) {
            continue;
        }

        let style = if selected_index == Some(index) {
            if app.phase() == Phase::Dragging {
                app.theme.dragging
            } else {
                app.theme.selected
            }
        } else if timeline.is_anchor(&date) {
            app.theme.today
        } else {
            app.theme.day
        };

        let mood_marker = match app.moods.get(date) {
            Some(mood) => Line::styled(mood.rating().to_string(), app.theme.success),
            None => Line::styled("·", app.theme.muted),
        };

        let lines = vec![
            Line::from(date.format("%a").to_string()),
            Line::from(date.format("%d").to_string()),
            mood_marker,
        ];

        let cell = Rect {
            x: area.x + x as u16,
            y: area.y,
            width: item_width,
            height: area.height,
        };
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(paragraph, cell);
    }
}
