//! Event repository contract and key-value implementation.
//!
//! # Responsibility
//! - Provide per-user CRUD over the `@events` collection.
//! - Keep serialization of the collection inside the persistence boundary.
//!
//! # Invariants
//! - Every mutation is a read-modify-write of the whole collection; concurrent
//!   writers are not defended against (last write wins).
//! - `delete_event` is idempotent and writes nothing for a missing id.
//! - `update_event` on a missing id is `NotFound`; an empty patch writes nothing.
//! - Time ordering and date format are not checked here.

use crate::error::ErrorKind;
use crate::model::event::{Event, EventId, EventPatch, NewEvent};
use crate::model::new_record_id;
use crate::store::keys::EVENTS_KEY;
use crate::store::{get_json, set_json, KeyValueStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    NotFound(EventId),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(_) => ErrorKind::Storage,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(_) => write!(f, "Event not found"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for event CRUD operations.
pub trait EventRepository {
    /// All events owned by `user_id`, in insertion order.
    fn get_all_events(&self, user_id: &str) -> RepoResult<Vec<Event>>;
    /// Events owned by `user_id` whose `date` equals `date` exactly.
    fn get_events_by_date(&self, user_id: &str, date: &str) -> RepoResult<Vec<Event>>;
    /// Stores `fields` under a freshly allocated id and returns the stored record.
    fn create_event(&self, fields: NewEvent) -> RepoResult<Event>;
    /// Merges `patch` into the event `id` and returns the merged record.
    fn update_event(&self, id: &str, patch: EventPatch) -> RepoResult<Event>;
    /// Removes the event `id` when present.
    fn delete_event(&self, id: &str) -> RepoResult<()>;
    /// Looks up one event regardless of owner.
    fn get_event_by_id(&self, id: &str) -> RepoResult<Option<Event>>;
}

/// Event repository persisting the whole collection under `@events`.
#[derive(Debug, Clone)]
pub struct KvEventRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvEventRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> RepoResult<Vec<Event>> {
        Ok(get_json::<Vec<Event>, S>(&self.store, EVENTS_KEY)?.unwrap_or_default())
    }

    fn save(&self, events: &[Event]) -> RepoResult<()> {
        set_json(&self.store, EVENTS_KEY, events)?;
        Ok(())
    }
}

impl<S: KeyValueStore> EventRepository for KvEventRepository<S> {
    fn get_all_events(&self, user_id: &str) -> RepoResult<Vec<Event>> {
        let mut events = self.load()?;
        events.retain(|event| event.user_id == user_id);
        Ok(events)
    }

    fn get_events_by_date(&self, user_id: &str, date: &str) -> RepoResult<Vec<Event>> {
        let mut events = self.get_all_events(user_id)?;
        events.retain(|event| event.date == date);
        Ok(events)
    }

    fn create_event(&self, fields: NewEvent) -> RepoResult<Event> {
        let mut events = self.load()?;
        let event = Event::from_new(new_record_id(), fields);
        events.push(event.clone());
        self.save(&events)?;

        info!(
            "event=event_create module=repo status=ok event_id={} user_id={} total={}",
            event.id,
            event.user_id,
            events.len()
        );
        Ok(event)
    }

    fn update_event(&self, id: &str, patch: EventPatch) -> RepoResult<Event> {
        let mut events = self.load()?;
        let Some(event) = events.iter_mut().find(|event| event.id == id) else {
            return Err(RepoError::NotFound(id.to_string()));
        };

        if patch.is_empty() {
            return Ok(event.clone());
        }
        event.apply(patch);
        let merged = event.clone();
        self.save(&events)?;

        info!("event=event_update module=repo status=ok event_id={id}");
        Ok(merged)
    }

    fn delete_event(&self, id: &str) -> RepoResult<()> {
        let mut events = self.load()?;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            info!("event=event_delete module=repo status=skipped event_id={id} removed=0");
            return Ok(());
        }
        self.save(&events)?;

        info!(
            "event=event_delete module=repo status=ok event_id={} removed={}",
            id,
            before - events.len()
        );
        Ok(())
    }

    fn get_event_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        Ok(self.load()?.into_iter().find(|event| event.id == id))
    }
}
