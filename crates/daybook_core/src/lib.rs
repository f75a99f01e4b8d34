//! Core domain logic for Daybook, a personal calendar.
//! This crate is the single source of truth for identity, event storage and
//! calendar layout invariants.

pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use error::ErrorKind;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::event::{Event, EventDraft, EventId, EventPatch, EventValidationError, NewEvent};
pub use model::session::{AuthOutcome, Session};
pub use model::user::{User, UserId};
pub use repo::event_repo::{EventRepository, KvEventRepository, RepoError, RepoResult};
pub use service::biometric_service::{BiometricSensor, BiometricService, SensorError};
pub use service::event_service::{EventService, EventServiceError};
pub use service::identity_service::{AuthError, AuthResult, IdentityService};
pub use store::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
