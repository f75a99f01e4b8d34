//! User record.

use serde::{Deserialize, Serialize};

/// Stable user identifier, allocated at sign-up and never reused.
pub type UserId = String;

/// Registered account.
///
/// `email` is unique across all users (case-sensitive exact match).
/// Records are never mutated after sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
}
