//! Event domain model.
//!
//! # Responsibility
//! - Define the persisted event record and its create/update input shapes.
//! - Provide caller-side validation for user-assembled event fields.
//!
//! # Invariants
//! - `id` is globally unique and assigned by the repository only.
//! - `date` is a `YYYY-MM-DD` wall-clock date, times are `HH:MM`.
//! - `end_time` is strictly after `start_time` on the same `date`; the
//!   repository does not enforce this, `EventDraft::validate` does.

use crate::model::user::UserId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid clock regex"));

/// Stable event identifier.
pub type EventId = String;

/// Persisted calendar event owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    /// Weak reference to the owning user; not checked by the store.
    pub user_id: UserId,
}

impl Event {
    /// Attaches a freshly allocated id to create-input fields.
    pub fn from_new(id: EventId, fields: NewEvent) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            user_id: fields.user_id,
        }
    }

    /// Merges every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
    }
}

/// Event fields without an id, as accepted by `create_event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub user_id: UserId,
}

/// Partial update. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub user_id: Option<UserId>,
}

impl EventPatch {
    /// Returns whether this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// User-entered event fields, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventDraft {
    /// Checks the draft and returns it with title/description trimmed.
    ///
    /// # Errors
    /// - `MissingTitle` when the title is blank.
    /// - `InvalidDate` unless `date` is a real `YYYY-MM-DD` calendar date.
    /// - `InvalidTime` unless both times are `HH:MM`.
    /// - `EndNotAfterStart` when `end_time <= start_time`.
    pub fn validate(&self) -> Result<EventDraft, EventValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(EventValidationError::MissingTitle);
        }

        parse_event_date(&self.date)
            .ok_or_else(|| EventValidationError::InvalidDate(self.date.clone()))?;
        let start = clock_minutes(&self.start_time)
            .ok_or_else(|| EventValidationError::InvalidTime(self.start_time.clone()))?;
        let end = clock_minutes(&self.end_time)
            .ok_or_else(|| EventValidationError::InvalidTime(self.end_time.clone()))?;
        if end <= start {
            return Err(EventValidationError::EndNotAfterStart);
        }

        Ok(EventDraft {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        })
    }

    /// Builds create-input fields owned by `user_id`. Does not validate.
    pub fn into_new_event(self, user_id: impl Into<UserId>) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            user_id: user_id.into(),
        }
    }

    /// Builds a patch replacing every user-editable field. Owner stays unchanged.
    pub fn into_patch(self) -> EventPatch {
        EventPatch {
            title: Some(self.title),
            description: Some(self.description),
            date: Some(self.date),
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            user_id: None,
        }
    }
}

/// Caller-correctable problems with user-entered event fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    MissingTitle,
    InvalidDate(String),
    InvalidTime(String),
    EndNotAfterStart,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Please enter a title"),
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::EndNotAfterStart => write!(f, "End time must be after start time"),
        }
    }
}

impl Error for EventValidationError {}

/// Parses a strict `YYYY-MM-DD` date string.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Converts a strict `HH:MM` string into minutes since midnight.
pub fn clock_minutes(value: &str) -> Option<u32> {
    let captures = CLOCK_RE.captures(value)?;
    let hours: u32 = captures.get(1)?.as_str().parse().ok()?;
    let minutes: u32 = captures.get(2)?.as_str().parse().ok()?;
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::{clock_minutes, parse_event_date, EventDraft, EventValidationError};

    fn draft(start: &str, end: &str) -> EventDraft {
        EventDraft {
            title: "  Standup  ".to_string(),
            description: " daily ".to_string(),
            date: "2024-03-05".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn clock_minutes_accepts_only_strict_clock_values() {
        assert_eq!(clock_minutes("00:00"), Some(0));
        assert_eq!(clock_minutes("23:59"), Some(23 * 60 + 59));
        assert_eq!(clock_minutes("9:00"), None);
        assert_eq!(clock_minutes("24:00"), None);
        assert_eq!(clock_minutes("12:60"), None);
    }

    #[test]
    fn parse_event_date_rejects_impossible_dates() {
        assert!(parse_event_date("2024-02-29").is_some());
        assert!(parse_event_date("2023-02-29").is_none());
        assert!(parse_event_date("2024-3-5").is_none());
    }

    #[test]
    fn validate_trims_text_fields() {
        let valid = draft("09:00", "10:00").validate().unwrap();
        assert_eq!(valid.title, "Standup");
        assert_eq!(valid.description, "daily");
    }

    #[test]
    fn validate_requires_end_after_start() {
        assert_eq!(
            draft("10:00", "10:00").validate().unwrap_err(),
            EventValidationError::EndNotAfterStart
        );
        assert_eq!(
            draft("10:30", "09:45").validate().unwrap_err(),
            EventValidationError::EndNotAfterStart
        );
        assert_eq!(
            draft("10:00", "10:00").validate().unwrap_err().to_string(),
            "End time must be after start time"
        );
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut blank = draft("09:00", "10:00");
        blank.title = "   ".to_string();
        assert_eq!(
            blank.validate().unwrap_err(),
            EventValidationError::MissingTitle
        );
    }
}
