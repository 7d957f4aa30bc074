use chrono::{Local, NaiveDate};

/// Source of the anchor date
pub trait TodaySource {
    fn today(&self) -> NaiveDate;
}

/// The device's local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalToday;

impl TodaySource for LocalToday {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A pinned date, for tests and the `--anchor` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedToday(pub NaiveDate);

impl TodaySource for FixedToday {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
