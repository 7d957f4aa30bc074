use ratatui::style::{Color, Modifier, Style};

use crate::config::{Rgb, ThemeColors};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// TUI theme with ratatui styles
#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub muted: Style,
    pub today: Style,
    pub selected: Style,
    pub dragging: Style,
    pub info: Style,
    pub warning: Style,
    pub success: Style,
    pub day: Style,
    pub border: Style,
    pub title: Style,
}

impl From<&ThemeColors> for TuiTheme {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            muted: Style::default().fg(color(colors.muted)),
            today: Style::default()
                .fg(color(colors.today))
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .bg(color(colors.selected))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            // Selected item while the strip is being dragged
            dragging: Style::default()
                .fg(color(colors.dragging))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            info: Style::default().fg(color(colors.info)),
            warning: Style::default().fg(color(colors.warning)),
            success: Style::default().fg(color(colors.success)),
            day: Style::default().fg(Color::Rgb(200, 200, 215)),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}
