use daybook_core::db::open_db_in_memory;
use daybook_core::store::keys::{AUTH_TOKEN_KEY, CURRENT_USER_ID_KEY, USERS_KEY};
use daybook_core::{AuthError, ErrorKind, IdentityService, KeyValueStore, SqliteKeyValueStore};
use std::collections::HashSet;

#[test]
fn sign_up_then_current_user_returns_that_email() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));

    let outcome = identity.sign_up("test@example.com", "password123").unwrap();
    assert!(!outcome.user.id.is_empty());
    assert!(!outcome.token.is_empty());

    let current = identity.get_current_user().unwrap().unwrap();
    assert_eq!(current.email, "test@example.com");
    assert_eq!(current, outcome.user);
    assert!(identity.is_authenticated().unwrap());

    let session = identity.current_session().unwrap().unwrap();
    assert_eq!(session.token, outcome.token);
    assert_eq!(session.user_id, outcome.user.id);
}

#[test]
fn sign_up_rejects_malformed_input() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));

    for email in ["invalid-email", "test@", "@example.com", "test@example"] {
        let err = identity.sign_up(email, "password123").unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail), "{email}");
        assert_eq!(err.to_string(), "Invalid email format");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    for password in ["", "12345"] {
        let err = identity.sign_up("test@example.com", password).unwrap_err();
        assert!(matches!(err, AuthError::PasswordTooShort));
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    assert!(identity.get_all_users().unwrap().is_empty());
    assert!(!identity.is_authenticated().unwrap());
}

#[test]
fn password_length_counts_utf16_units() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));

    // Three astral-plane emoji are six UTF-16 units.
    let outcome = identity.sign_up("emoji@example.com", "😀😀😀").unwrap();
    assert_eq!(outcome.user.password, "😀😀😀");

    let err = identity.sign_up("short@example.com", "😀😀").unwrap_err();
    assert!(matches!(err, AuthError::PasswordTooShort));
}

#[test]
fn duplicate_email_conflicts_regardless_of_password() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));

    identity.sign_up("test@example.com", "password123").unwrap();
    let err = identity
        .sign_up("test@example.com", "another-password")
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "User with this email already exists");

    // Exact match only: case differences register a separate user.
    identity.sign_up("Test@example.com", "password123").unwrap();
    assert_eq!(identity.get_all_users().unwrap().len(), 2);
}

#[test]
fn wrong_password_and_unknown_email_fail_identically() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));
    identity.sign_up("test@example.com", "password123").unwrap();
    identity.sign_out().unwrap();

    let wrong_password = identity.sign_in("test@example.com", "nope-nope").unwrap_err();
    let unknown_email = identity
        .sign_in("ghost@example.com", "password123")
        .unwrap_err();

    assert_eq!(wrong_password.to_string(), "Invalid email or password");
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.kind(), ErrorKind::Auth);
    assert_eq!(unknown_email.kind(), ErrorKind::Auth);
    assert!(!identity.is_authenticated().unwrap());
}

#[test]
fn sign_in_mints_a_fresh_token_each_time() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));
    let signed_up = identity.sign_up("test@example.com", "password123").unwrap();

    let mut tokens = HashSet::from([signed_up.token.clone()]);
    for _ in 0..3 {
        let outcome = identity.sign_in("test@example.com", "password123").unwrap();
        assert_eq!(outcome.user, signed_up.user);
        assert!(tokens.insert(outcome.token));
    }
}

#[test]
fn sign_out_clears_both_session_keys_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let identity = IdentityService::new(store);

    identity.sign_out().unwrap();

    identity.sign_up("test@example.com", "password123").unwrap();
    identity.sign_out().unwrap();
    identity.sign_out().unwrap();

    assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(CURRENT_USER_ID_KEY).unwrap(), None);
    assert!(!identity.is_authenticated().unwrap());
    assert!(identity.get_current_user().unwrap().is_none());
    assert!(identity.current_session().unwrap().is_none());
    // Users survive sign-out.
    assert_eq!(identity.get_all_users().unwrap().len(), 1);
}

#[test]
fn sign_up_overwrites_prior_session() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));

    identity.sign_up("first@example.com", "password123").unwrap();
    let second = identity.sign_up("second@example.com", "password123").unwrap();

    let current = identity.get_current_user().unwrap().unwrap();
    assert_eq!(current.id, second.user.id);
    assert_ne!(
        identity.get_all_users().unwrap()[0].id,
        identity.get_all_users().unwrap()[1].id
    );
}

#[test]
fn stale_current_user_id_resolves_to_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let identity = IdentityService::new(store);
    identity.sign_up("test@example.com", "password123").unwrap();

    store.set(USERS_KEY, "[]").unwrap();

    assert!(identity.get_current_user().unwrap().is_none());
    assert!(identity.is_authenticated().unwrap());
}

#[test]
fn empty_token_is_not_authenticated() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let identity = IdentityService::new(store);

    store.set(AUTH_TOKEN_KEY, "").unwrap();
    assert!(!identity.is_authenticated().unwrap());
}

#[test]
fn separate_stores_keep_separate_sessions() {
    let conn_a = open_db_in_memory().unwrap();
    let conn_b = open_db_in_memory().unwrap();
    let identity_a = IdentityService::new(SqliteKeyValueStore::new(&conn_a));
    let identity_b = IdentityService::new(SqliteKeyValueStore::new(&conn_b));

    identity_a.sign_up("a@example.com", "password123").unwrap();

    assert!(identity_a.is_authenticated().unwrap());
    assert!(!identity_b.is_authenticated().unwrap());
}

#[test]
fn biometric_flag_is_independent_of_session() {
    let conn = open_db_in_memory().unwrap();
    let identity = IdentityService::new(SqliteKeyValueStore::new(&conn));

    assert!(!identity.is_biometric_enabled().unwrap());
    identity.enable_biometric().unwrap();
    assert!(identity.is_biometric_enabled().unwrap());
    assert!(!identity.is_authenticated().unwrap());

    identity.sign_up("test@example.com", "password123").unwrap();
    identity.sign_out().unwrap();
    assert!(identity.is_biometric_enabled().unwrap());

    identity.disable_biometric().unwrap();
    identity.disable_biometric().unwrap();
    assert!(!identity.is_biometric_enabled().unwrap());
}

#[test]
fn users_persist_with_expected_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let identity = IdentityService::new(store);
    let outcome = identity.sign_up("test@example.com", "password123").unwrap();

    let raw = store.get(USERS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], outcome.user.id);
    assert_eq!(json[0]["email"], "test@example.com");
    assert_eq!(json[0]["password"], "password123");
}

#[test]
fn corrupt_user_list_surfaces_store_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let identity = IdentityService::new(store);
    store.set(USERS_KEY, "not-json").unwrap();

    let err = identity.sign_in("test@example.com", "password123").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}
