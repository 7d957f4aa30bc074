use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid geometry: item width {item_width}, margin {item_margin}")]
    InvalidGeometry { item_width: f32, item_margin: f32 },

    #[error("Window of {half_width} days around {anchor} is outside the calendar range")]
    WindowOutOfRange { anchor: NaiveDate, half_width: u16 },

    #[error("Invalid timings: {0}")]
    InvalidTimings(String),
}

pub type CommonResult<T> = std::result::Result<T, CommonError>;
