//! Event binning by date and by start hour.

use crate::model::event::Event;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Number of hour buckets in a day schedule.
pub const HOURS_PER_DAY: u32 = 24;

/// Formats `date` as the `YYYY-MM-DD` key stored on events.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `"09:00"`-style row label for an hour bucket.
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Events whose `date` equals `date` exactly.
pub fn bin_events_by_date<'a>(events: &'a [Event], date: &str) -> Vec<&'a Event> {
    events.iter().filter(|event| event.date == date).collect()
}

/// Events falling on the calendar day `date`.
pub fn bin_events_for_day(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    bin_events_by_date(events, &date_key(date))
}

/// Hour component of an `HH:MM` start time.
///
/// Minutes are truncated, so `"10:59"` is hour 10. Returns `None` for
/// anything that is not a valid 0..=23 hour.
pub fn parse_start_hour(start_time: &str) -> Option<u32> {
    let hour_text = start_time.split(':').next()?;
    if hour_text.is_empty() || hour_text.len() > 2 || !hour_text.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hour: u32 = hour_text.parse().ok()?;
    (hour < HOURS_PER_DAY).then_some(hour)
}

/// Buckets the events on `date` by start hour.
///
/// Every hour 0..=23 is present in the result, empty or not. An event lands
/// only in its start hour's bucket even when it runs longer than an hour;
/// events with an unreadable start time are left out.
pub fn bin_events_by_hour<'a>(events: &'a [Event], date: &str) -> BTreeMap<u32, Vec<&'a Event>> {
    let mut buckets: BTreeMap<u32, Vec<&Event>> =
        (0..HOURS_PER_DAY).map(|hour| (hour, Vec::new())).collect();

    for event in bin_events_by_date(events, date) {
        if let Some(hour) = parse_start_hour(&event.start_time) {
            buckets.entry(hour).or_default().push(event);
        }
    }

    buckets
}
