use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// Days shown on each side of the anchor
pub const DEFAULT_HALF_WIDTH: u16 = 7;

/// Anything that can be reduced to a calendar day, ignoring time-of-day
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Build the ordered run of `2 * half_width + 1` days centered on `anchor`.
///
/// Only fails when the window would leave chrono's representable range.
pub fn build_window(anchor: NaiveDate, half_width: u16) -> CommonResult<Vec<NaiveDate>> {
    let span = Days::new(u64::from(half_width));
    let out_of_range = || CommonError::WindowOutOfRange { anchor, half_width };

    let start = anchor.checked_sub_days(span).ok_or_else(out_of_range)?;
    anchor.checked_add_days(span).ok_or_else(out_of_range)?;

    Ok(start
        .iter_days()
        .take(2 * usize::from(half_width) + 1)
        .collect())
}

/// Position of `date` in `dates`, compared by calendar day
pub fn index_of<D: CalendarDay + ?Sized>(dates: &[NaiveDate], date: &D) -> Option<usize> {
    let day = date.calendar_day();
    dates.iter().position(|d| *d == day)
}

/// Scroll offset that centers the item at `index`.
///
/// The surface is expected to carry leading padding of half its width minus
/// half an item, so index 0 at offset 0 is already centered.
pub fn pixel_offset(index: usize, item_width: f32, item_margin: f32) -> f32 {
    index as f32 * (item_width + 2.0 * item_margin)
}

/// Item sizing used for offset math
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    #[serde(default = "default_item_width")]
    pub item_width: f32,

    #[serde(default = "default_item_margin")]
    pub item_margin: f32,
}

fn default_item_width() -> f32 {
    5.0
}

fn default_item_margin() -> f32 {
    1.0
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            item_width: default_item_width(),
            item_margin: default_item_margin(),
        }
    }
}

impl Geometry {
    pub fn new(item_width: f32, item_margin: f32) -> CommonResult<Self> {
        let geometry = Self {
            item_width,
            item_margin,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Reject negative, NaN or infinite sizes
    pub fn validate(&self) -> CommonResult<()> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        if ok(self.item_width) && ok(self.item_margin) {
            Ok(())
        } else {
            Err(CommonError::InvalidGeometry {
                item_width: self.item_width,
                item_margin: self.item_margin,
            })
        }
    }

    /// Center-to-center spacing of two neighbouring items
    pub fn pitch(&self) -> f32 {
        self.item_width + 2.0 * self.item_margin
    }

    pub fn offset_for(&self, index: usize) -> f32 {
        pixel_offset(index, self.item_width, self.item_margin)
    }

    /// Leading content padding that makes offset 0 center the first item
    pub fn leading_padding(&self, surface_width: f32) -> f32 {
        ((surface_width - self.item_width) / 2.0).max(0.0)
    }

    /// Largest meaningful offset for a window of `len` items
    pub fn max_offset(&self, len: usize) -> f32 {
        self.offset_for(len.saturating_sub(1))
    }

    /// Index of the item nearest to the surface center at `offset`
    pub fn index_at_offset(&self, offset: f32, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let pitch = self.pitch();
        if pitch <= 0.0 || !offset.is_finite() {
            return Some(0);
        }
        let raw = (offset / pitch).round().max(0.0) as usize;
        Some(raw.min(len - 1))
    }
}

/// The fixed window of selectable days around an anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    anchor: NaiveDate,
    half_width: u16,
    dates: Vec<NaiveDate>,
}

impl Timeline {
    pub fn new(anchor: NaiveDate, half_width: u16) -> CommonResult<Self> {
        let dates = build_window(anchor, half_width)?;
        Ok(Self {
            anchor,
            half_width,
            dates,
        })
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Always `half_width`
    pub fn anchor_index(&self) -> usize {
        usize::from(self.half_width)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Constant-time lookup; the window is contiguous
    pub fn index_of<D: CalendarDay + ?Sized>(&self, date: &D) -> Option<usize> {
        let delta = date
            .calendar_day()
            .signed_duration_since(self.first())
            .num_days();
        usize::try_from(delta).ok().filter(|i| *i < self.len())
    }

    pub fn contains<D: CalendarDay + ?Sized>(&self, date: &D) -> bool {
        self.index_of(date).is_some()
    }

    pub fn is_anchor<D: CalendarDay + ?Sized>(&self, date: &D) -> bool {
        date.calendar_day() == self.anchor
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_has_anchor_in_the_middle() {
        for half_width in [0u16, 1, 7, 30] {
            let anchor = day(2024, 3, 1);
            let dates = build_window(anchor, half_width).unwrap();
            assert_eq!(dates.len(), 2 * half_width as usize + 1);
            assert_eq!(dates[half_width as usize], anchor);
        }
    }

    #[test]
    fn window_advances_one_day_at_a_time() {
        // Crosses the leap day and the month boundary
        let dates = build_window(day(2024, 3, 1), 7).unwrap();
        for pair in dates.windows(2) {
            assert_eq!(pair[1].signed_duration_since(pair[0]).num_days(), 1);
        }
        assert_eq!(dates[0], day(2024, 2, 23));
        assert_eq!(dates[14], day(2024, 3, 8));
        assert!(dates.contains(&day(2024, 2, 29)));
    }

    #[test]
    fn window_at_calendar_edge_is_rejected() {
        let err = build_window(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, CommonError::WindowOutOfRange { .. }));
        assert!(Timeline::new(NaiveDate::MIN, 3).is_err());
    }

    #[test]
    fn index_of_inverts_construction() {
        let timeline = Timeline::new(day(2023, 12, 30), 7).unwrap();
        for (i, date) in timeline.iter().enumerate() {
            assert_eq!(timeline.index_of(&date), Some(i));
            assert_eq!(index_of(timeline.dates(), &date), Some(i));
        }
        assert_eq!(timeline.index_of(&day(2023, 12, 22)), None);
        assert_eq!(timeline.index_of(&day(2024, 1, 7)), None);
        assert_eq!(index_of(timeline.dates(), &day(2024, 1, 7)), None);
    }

    #[test]
    fn index_of_ignores_time_of_day() {
        let timeline = Timeline::new(day(2024, 6, 15), 7).unwrap();
        let late = day(2024, 6, 16).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(timeline.index_of(&late), Some(8));

        let utc = Utc.from_utc_datetime(&day(2024, 6, 15).and_hms_opt(0, 0, 1).unwrap());
        assert_eq!(timeline.index_of(&utc), Some(7));
        assert!(timeline.is_anchor(&utc));
    }

    #[test]
    fn pixel_offset_uses_pitch() {
        assert_eq!(pixel_offset(0, 60.0, 5.0), 0.0);
        assert_eq!(pixel_offset(3, 60.0, 5.0), 210.0);

        let geometry = Geometry::new(5.0, 1.0).unwrap();
        assert_eq!(geometry.pitch(), 7.0);
        assert_eq!(geometry.offset_for(7), 49.0);
        assert_eq!(geometry.max_offset(15), 98.0);
    }

    #[test]
    fn leading_padding_centers_first_item() {
        let geometry = Geometry::new(5.0, 1.0).unwrap();
        assert_eq!(geometry.leading_padding(81.0), 38.0);
        assert_eq!(geometry.leading_padding(3.0), 0.0);
    }

    #[test]
    fn index_at_offset_snaps_and_clamps() {
        let geometry = Geometry::default();
        assert_eq!(geometry.index_at_offset(0.0, 15), Some(0));
        assert_eq!(geometry.index_at_offset(10.0, 15), Some(1));
        assert_eq!(geometry.index_at_offset(11.0, 15), Some(2));
        assert_eq!(geometry.index_at_offset(-30.0, 15), Some(0));
        assert_eq!(geometry.index_at_offset(1000.0, 15), Some(14));
        assert_eq!(geometry.index_at_offset(10.0, 0), None);
    }

    #[test]
    fn geometry_rejects_bad_sizes() {
        assert!(Geometry::new(-1.0, 0.0).is_err());
        assert!(Geometry::new(4.0, f32::NAN).is_err());
        assert!(Geometry::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn geometry_deserializes_with_defaults() {
        let geometry: Geometry = serde_json::from_str(r#"{ "itemWidth": 9 }"#).unwrap();
        assert_eq!(geometry.item_width, 9.0);
        assert_eq!(geometry.item_margin, 1.0);
    }
}
