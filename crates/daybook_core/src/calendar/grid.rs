//! Month grid generation and day-level predicates.

use crate::calendar::schedule::bin_events_for_day;
use crate::model::event::Event;
use chrono::{Datelike, NaiveDate};

/// Column headers of the month grid, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS_PER_WEEK: usize = 7;

/// Number of days in the 0-based `month` of `year`, or `None` when the
/// month is out of range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = first_of_month(year, month)?;
    let next = shift_month(first, 1)?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Flat 7-column month grid.
///
/// Starts with one `None` per weekday before the 1st (Sunday = 0), then one
/// date per day in ascending order. Rows are positional: index / 7. An
/// out-of-range month yields an empty grid.
pub fn build_month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };
    let Some(day_count) = days_in_month(year, month) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut grid = Vec::with_capacity(leading + day_count as usize);
    grid.extend(std::iter::repeat(None).take(leading));
    grid.extend(first.iter_days().take(day_count as usize).map(Some));
    grid
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)
}

/// Slices a flat grid into week rows. The last row may be short.
pub fn month_weeks(grid: &[Option<NaiveDate>]) -> Vec<&[Option<NaiveDate>]> {
    grid.chunks(DAYS_PER_WEEK).collect()
}

/// Moves `delta` months from the month containing `date`.
///
/// The day-of-month is pinned to the 1st before shifting, so Jan 31 + 1 is
/// Feb 1 and no month is ever skipped. `None` only outside chrono's range.
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let total = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(delta)?;
    let year = total.div_euclid(12);
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

/// Whether `a` and `b` fall on the same year, month and day-of-month.
/// Time-of-day, when the inputs carry one, is ignored.
pub fn is_same_calendar_day(a: &impl Datelike, b: &impl Datelike) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

pub fn is_today(date: &impl Datelike, today: &impl Datelike) -> bool {
    is_same_calendar_day(date, today)
}

pub fn is_selected(date: &impl Datelike, selected: &impl Datelike) -> bool {
    is_same_calendar_day(date, selected)
}

/// `"January 2024"`-style header for the month containing `date`.
pub fn month_title(date: &impl Datelike) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// Renderable state of one month-grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub event_count: usize,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

/// Month grid decorated with per-day event counts and highlight flags.
pub fn month_cells(
    year: i32,
    month: u32,
    events: &[Event],
    selected: NaiveDate,
    today: NaiveDate,
) -> Vec<Option<DayCell>> {
    build_month_grid(year, month)
        .into_iter()
        .map(|slot| {
            slot.map(|date| DayCell {
                date,
                event_count: bin_events_for_day(events, date).len(),
                is_today: is_today(&date, &today),
                is_selected: is_selected(&date, &selected),
            })
        })
        .collect()
}
