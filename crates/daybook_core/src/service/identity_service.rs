//! Identity use-case service.
//!
//! # Responsibility
//! - Own user registration, credential checks and the single active session.
//! - Own the biometric unlock flag.
//!
//! # Invariants
//! - `email` is unique across users (case-sensitive exact match).
//! - At most one session exists; token and current-user-id are written and
//!   cleared together.
//! - The biometric flag is independent of session state.
//! - Credentials and tokens never reach the log.

use crate::error::ErrorKind;
use crate::model::new_record_id;
use crate::model::session::{AuthOutcome, Session};
use crate::model::user::User;
use crate::store::keys::{
    AUTH_TOKEN_KEY, BIOMETRIC_ENABLED_KEY, CURRENT_USER_ID_KEY, USERS_KEY,
};
use crate::store::{get_json, set_json, KeyValueStore, StoreError};
use chrono::Utc;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Minimum accepted password length, in UTF-16 code units.
pub const MIN_PASSWORD_CHARS: usize = 6;

const BIOMETRIC_ENABLED_VALUE: &str = "true";

pub type AuthResult<T> = Result<T, AuthError>;

/// Identity service failures.
#[derive(Debug)]
pub enum AuthError {
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// Password shorter than `MIN_PASSWORD_CHARS`.
    PasswordTooShort,
    /// Another user already registered this email.
    EmailTaken,
    /// No user matches the email + password pair. Deliberately uninformative.
    InvalidCredentials,
    Store(StoreError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEmail | Self::PasswordTooShort => ErrorKind::Validation,
            Self::EmailTaken => ErrorKind::Conflict,
            Self::InvalidCredentials => ErrorKind::Auth,
            Self::Store(_) => ErrorKind::Storage,
        }
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Invalid email format"),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            ),
            Self::EmailTaken => write!(f, "User with this email already exists"),
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Identity service bound to one key-value store.
///
/// Session state lives in the store, not in the process, so independent
/// stores give independent sessions.
#[derive(Debug, Clone)]
pub struct IdentityService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> IdentityService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new user and opens a session for it.
    ///
    /// Overwrites any prior session.
    ///
    /// # Errors
    /// - `InvalidEmail` / `PasswordTooShort` for malformed input.
    /// - `EmailTaken` when the email is already registered.
    pub fn sign_up(&self, email: &str, password: &str) -> AuthResult<AuthOutcome> {
        if !EMAIL_RE.is_match(email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.encode_utf16().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::PasswordTooShort);
        }

        let mut users = self.get_all_users()?;
        if users.iter().any(|user| user.email == email) {
            warn!("event=auth_sign_up module=identity status=error error_code=email_taken");
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: new_record_id(),
            email: email.to_string(),
            password: password.to_string(),
        };
        users.push(user.clone());
        set_json(&self.store, USERS_KEY, &users)?;

        let token = self.open_session(&user)?;
        info!(
            "event=auth_sign_up module=identity status=ok user_id={} user_count={}",
            user.id,
            users.len()
        );
        Ok(AuthOutcome { user, token })
    }

    /// Opens a session for the user matching both `email` and `password`.
    ///
    /// # Errors
    /// - `InvalidCredentials` for an unknown email and for a wrong password alike.
    pub fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthOutcome> {
        let users = self.get_all_users()?;
        let Some(user) = users
            .into_iter()
            .find(|user| user.email == email && user.password == password)
        else {
            warn!("event=auth_sign_in module=identity status=error error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let token = self.open_session(&user)?;
        info!(
            "event=auth_sign_in module=identity status=ok user_id={}",
            user.id
        );
        Ok(AuthOutcome { user, token })
    }

    /// Clears the session. No-op when nobody is signed in.
    pub fn sign_out(&self) -> AuthResult<()> {
        self.store
            .remove_many(&[AUTH_TOKEN_KEY, CURRENT_USER_ID_KEY])?;
        info!("event=auth_sign_out module=identity status=ok");
        Ok(())
    }

    /// Resolves the signed-in user.
    ///
    /// Returns `None` without a session, or when the stored id no longer
    /// matches any user.
    pub fn get_current_user(&self) -> AuthResult<Option<User>> {
        let Some(user_id) = self.non_empty(CURRENT_USER_ID_KEY)? else {
            return Ok(None);
        };
        let users = self.get_all_users()?;
        Ok(users.into_iter().find(|user| user.id == user_id))
    }

    /// True iff a non-empty token is stored.
    pub fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.non_empty(AUTH_TOKEN_KEY)?.is_some())
    }

    /// Returns the active token + user id pair, if both are present.
    pub fn current_session(&self) -> AuthResult<Option<Session>> {
        let token = self.non_empty(AUTH_TOKEN_KEY)?;
        let user_id = self.non_empty(CURRENT_USER_ID_KEY)?;
        Ok(token
            .zip(user_id)
            .map(|(token, user_id)| Session { token, user_id }))
    }

    /// Every registered user; empty when none were stored yet.
    pub fn get_all_users(&self) -> AuthResult<Vec<User>> {
        Ok(get_json::<Vec<User>, S>(&self.store, USERS_KEY)?.unwrap_or_default())
    }

    pub fn enable_biometric(&self) -> AuthResult<()> {
        self.store
            .set(BIOMETRIC_ENABLED_KEY, BIOMETRIC_ENABLED_VALUE)?;
        info!("event=biometric_toggle module=identity status=ok enabled=true");
        Ok(())
    }

    pub fn disable_biometric(&self) -> AuthResult<()> {
        self.store.remove(BIOMETRIC_ENABLED_KEY)?;
        info!("event=biometric_toggle module=identity status=ok enabled=false");
        Ok(())
    }

    pub fn is_biometric_enabled(&self) -> AuthResult<bool> {
        Ok(self.store.get(BIOMETRIC_ENABLED_KEY)?.as_deref() == Some(BIOMETRIC_ENABLED_VALUE))
    }

    fn open_session(&self, user: &User) -> AuthResult<String> {
        let token = mint_token();
        self.store.set_many(&[
            (AUTH_TOKEN_KEY, token.as_str()),
            (CURRENT_USER_ID_KEY, user.id.as_str()),
        ])?;
        Ok(token)
    }

    fn non_empty(&self, key: &str) -> AuthResult<Option<String>> {
        Ok(self.store.get(key)?.filter(|value| !value.is_empty()))
    }
}

/// Mints an opaque session token, unique per call.
fn mint_token() -> String {
    format!(
        "token_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::{mint_token, EMAIL_RE};

    #[test]
    fn email_pattern_requires_local_domain_and_tld() {
        assert!(EMAIL_RE.is_match("test@example.com"));
        assert!(EMAIL_RE.is_match("a@b.c"));
        assert!(!EMAIL_RE.is_match("invalid-email"));
        assert!(!EMAIL_RE.is_match("test@"));
        assert!(!EMAIL_RE.is_match("@example.com"));
        assert!(!EMAIL_RE.is_match("test@example"));
        assert!(!EMAIL_RE.is_match("te st@example.com"));
    }

    #[test]
    fn minted_tokens_are_unique() {
        let first = mint_token();
        let second = mint_token();
        assert!(first.starts_with("token_"));
        assert_ne!(first, second);
    }
}
