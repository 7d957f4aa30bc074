use std::collections::HashMap;

use chrono::NaiveDate;

/// A one-to-five rating for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mood {
    Awful = 1,
    Bad = 2,
    Okay = 3,
    Good = 4,
    Great = 5,
}

impl Mood {
    pub fn from_rating(rating: u8) -> Option<Self> {
        match rating {
            1 => Some(Mood::Awful),
            2 => Some(Mood::Bad),
            3 => Some(Mood::Okay),
            4 => Some(Mood::Good),
            5 => Some(Mood::Great),
            _ => None,
        }
    }

    pub fn rating(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Awful => "awful",
            Mood::Bad => "bad",
            Mood::Okay => "okay",
            Mood::Good => "good",
            Mood::Great => "great",
        }
    }
}

/// Session-only record of moods, looked up whenever the selection changes
#[derive(Debug, Default)]
pub struct MoodLog {
    entries: HashMap<NaiveDate, Mood>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mood it replaced, if any
    pub fn record(&mut self, date: NaiveDate, mood: Mood) -> Option<Mood> {
        self.entries.insert(date, mood)
    }

    pub fn get(&self, date: NaiveDate) -> Option<Mood> {
        self.entries.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
