//! Session and authentication result shapes.

use crate::model::user::{User, UserId};

/// The persisted token + current-user-id pair representing who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token. Unique per sign-in, not a security boundary.
    pub token: String,
    pub user_id: UserId,
}

/// Result of a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub user: User,
    pub token: String,
}
