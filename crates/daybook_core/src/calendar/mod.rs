//! Calendar grid engine.
//!
//! # Responsibility
//! - Compute month grids and hour-bucketed day schedules from an event set.
//! - Provide day-level comparison and month navigation helpers.
//!
//! # Invariants
//! - Pure and deterministic: no I/O, no clock reads. "Today" is always
//!   supplied by the caller.
//! - Months are 0-based in the public API (0 = January).

pub mod grid;
pub mod schedule;

pub use grid::{
    build_month_grid, days_in_month, is_same_calendar_day, is_selected, is_today, month_cells,
    month_title, month_weeks, shift_month, DayCell, MONTH_NAMES, WEEKDAY_LABELS,
};
pub use schedule::{
    bin_events_by_date, bin_events_by_hour, bin_events_for_day, date_key, hour_label,
    parse_start_hour, HOURS_PER_DAY,
};
