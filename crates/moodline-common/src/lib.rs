pub mod controller;
pub mod error;
pub mod scheduler;
pub mod timeline;
pub mod timings;
pub mod today;

pub use controller::{Context, Controller, Event, Output, Phase, ScrollCommand, State};
pub use error::{CommonError, CommonResult};
pub use scheduler::{Scheduler, TimerKey};
pub use timeline::{build_window, index_of, pixel_offset, CalendarDay, Geometry, Timeline};
pub use timings::Timings;
pub use today::{FixedToday, LocalToday, TodaySource};
