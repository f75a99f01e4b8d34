//! Persisted key layout.

/// JSON array of every registered user.
pub const USERS_KEY: &str = "@user";
/// Opaque bearer token of the active session.
pub const AUTH_TOKEN_KEY: &str = "@auth_token";
/// Id of the user owning the active session.
pub const CURRENT_USER_ID_KEY: &str = "@current_user_id";
/// `"true"` when the biometric unlock path is enabled; absent otherwise.
pub const BIOMETRIC_ENABLED_KEY: &str = "@biometric_enabled";
/// JSON array of every event, across all users.
pub const EVENTS_KEY: &str = "@events";
