use thiserror::Error;

use moodline_common::CommonError;

#[derive(Error, Debug)]
pub enum MoodlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Could not find home directory")]
    NoHomeDirectory,

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

pub type Result<T> = std::result::Result<T, MoodlineError>;
