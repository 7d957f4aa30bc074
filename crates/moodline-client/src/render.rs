use chrono::NaiveDate;
use colored::Colorize;

use moodline_common::{Geometry, Timeline};

/// Plain-terminal rendering of the date strip (`--print`)
pub struct Render {
    geometry: Geometry,
}

impl Render {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    fn cell_width(&self) -> usize {
        (self.geometry.item_width.round() as usize).max(2)
    }

    fn margin(&self) -> String {
        " ".repeat(self.geometry.item_margin.round() as usize)
    }

    fn cell(&self, text: &str, date: NaiveDate, timeline: &Timeline, selected: NaiveDate) -> String {
        let width = self.cell_width();
        let padded = format!("{:^width$}", text, width = width);
        let styled = if date == selected {
            padded.reversed().bold().to_string()
        } else if timeline.is_anchor(&date) {
            padded.yellow().bold().to_string()
        } else {
            padded.dimmed().to_string()
        };
        format!("{}{}{}", self.margin(), styled, self.margin())
    }

    /// Weekday row and day-of-month row, one cell per day in the window
    pub fn strip(&self, timeline: &Timeline, selected: NaiveDate) -> String {
        let mut weekdays = String::new();
        let mut days = String::new();
        for date in timeline.iter() {
            let weekday = date.format("%a").to_string();
            let day = date.format("%d").to_string();
            weekdays.push_str(&self.cell(&weekday, date, timeline, selected));
            days.push_str(&self.cell(&day, date, timeline, selected));
        }
        format!("{}\n{}", weekdays, days)
    }

    /// One-line summary under the strip
    pub fn summary(&self, timeline: &Timeline, selected: NaiveDate) -> String {
        let range = format!(
            "{} → {}",
            timeline.first().format("%b %d"),
            timeline.last().format("%b %d")
        );
        let selection = match timeline.index_of(&selected) {
            Some(_) if timeline.is_anchor(&selected) => "today".to_string(),
            Some(_) => selected.format("%a %b %d %Y").to_string(),
            None => format!("{} (outside window)", selected.format("%Y-%m-%d")),
        };
        format!(
            "  {}  {}",
            range.dimmed(),
            format!("selected: {}", selection).bold()
        )
    }

    pub fn print(&self, timeline: &Timeline, selected: NaiveDate) {
        println!();
        println!("{}", self.strip(timeline, selected));
        println!();
        println!("{}", self.summary(timeline, selected));
        println!();
    }
}
