//! Event use-case service.
//!
//! # Responsibility
//! - Validate user-assembled event fields before they reach the repository.
//! - Resolve event ownership through the identity service at write time.
//!
//! # Invariants
//! - Every write through `*_from_draft` / `create_for_*` passes
//!   `EventDraft::validate()` first.
//! - Service layer remains storage-agnostic.

use crate::error::ErrorKind;
use crate::model::event::{Event, EventDraft, EventId, EventPatch, EventValidationError, NewEvent};
use crate::repo::event_repo::{EventRepository, RepoError, RepoResult};
use crate::service::identity_service::{AuthError, IdentityService};
use crate::store::KeyValueStore;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for event use-cases.
#[derive(Debug)]
pub enum EventServiceError {
    Invalid(EventValidationError),
    /// No signed-in user to own the event.
    UserNotFound,
    /// Target event does not exist.
    EventNotFound(EventId),
    Repo(RepoError),
    Identity(AuthError),
}

impl EventServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(_) => ErrorKind::Validation,
            Self::UserNotFound | Self::EventNotFound(_) => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Storage,
            Self::Identity(err) => err.kind(),
        }
    }
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::UserNotFound => write!(f, "User not found"),
            Self::EventNotFound(_) => write!(f, "Event not found"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Identity(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Identity(err) => Some(err),
            Self::UserNotFound | Self::EventNotFound(_) => None,
        }
    }
}

impl From<EventValidationError> for EventServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EventNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<AuthError> for EventServiceError {
    fn from(value: AuthError) -> Self {
        Self::Identity(value)
    }
}

/// Event service facade over repository implementations.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates `draft` and stores it as a new event owned by `user_id`.
    pub fn create_for_user(
        &self,
        user_id: &str,
        draft: &EventDraft,
    ) -> Result<Event, EventServiceError> {
        let valid = checked(draft)?;
        Ok(self.repo.create_event(valid.into_new_event(user_id))?)
    }

    /// Validates `draft` and stores it for whoever is currently signed in.
    ///
    /// # Errors
    /// - `UserNotFound` when there is no session or its user no longer exists.
    pub fn create_for_current_user<S: KeyValueStore>(
        &self,
        identity: &IdentityService<S>,
        draft: &EventDraft,
    ) -> Result<Event, EventServiceError> {
        let valid = checked(draft)?;
        let user = identity
            .get_current_user()?
            .ok_or(EventServiceError::UserNotFound)?;
        Ok(self.repo.create_event(valid.into_new_event(user.id))?)
    }

    /// Validates `draft` and replaces every editable field of event `id`.
    pub fn update_from_draft(
        &self,
        id: &str,
        draft: &EventDraft,
    ) -> Result<Event, EventServiceError> {
        let valid = checked(draft)?;
        Ok(self.repo.update_event(id, valid.into_patch())?)
    }

    /// Stores pre-assembled fields without domain validation.
    pub fn create_event(&self, fields: NewEvent) -> RepoResult<Event> {
        self.repo.create_event(fields)
    }

    /// Merges pre-assembled fields without domain validation.
    pub fn update_event(&self, id: &str, patch: EventPatch) -> RepoResult<Event> {
        self.repo.update_event(id, patch)
    }

    pub fn delete_event(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_event(id)
    }

    pub fn get_event_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        self.repo.get_event_by_id(id)
    }

    pub fn get_all_events(&self, user_id: &str) -> RepoResult<Vec<Event>> {
        self.repo.get_all_events(user_id)
    }

    pub fn get_events_by_date(&self, user_id: &str, date: &str) -> RepoResult<Vec<Event>> {
        self.repo.get_events_by_date(user_id, date)
    }
}

fn checked(draft: &EventDraft) -> Result<EventDraft, EventValidationError> {
    draft.validate().inspect_err(|err| {
        warn!("event=event_validate module=event_service status=error error={err}");
    })
}
