//! Domain records shared by the identity, event and calendar layers.
//!
//! # Responsibility
//! - Define the persisted shapes of users and events.
//! - Own the field-level validation a caller runs before writing an event.
//!
//! # Invariants
//! - Ids are opaque strings, stable for the life of the record.
//! - Records serialize with camelCase field names.

pub mod event;
pub mod session;
pub mod user;

use uuid::Uuid;

/// Allocates a fresh record id.
///
/// UUIDv7 ids are time-ordered, so ids allocated later sort later, and the
/// random tail keeps same-millisecond allocations distinct.
pub fn new_record_id() -> String {
    Uuid::now_v7().to_string()
}
