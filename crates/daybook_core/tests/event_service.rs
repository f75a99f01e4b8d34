use daybook_core::db::open_db_in_memory;
use daybook_core::{
    ErrorKind, EventDraft, EventService, EventServiceError, EventValidationError, IdentityService,
    KvEventRepository, SqliteKeyValueStore,
};

fn draft(title: &str, start: &str, end: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: "  notes  ".to_string(),
        date: "2024-01-15".to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

#[test]
fn create_for_user_trims_and_stores() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(KvEventRepository::new(SqliteKeyValueStore::new(&conn)));

    let created = service
        .create_for_user("u1", &draft("  Dentist ", "09:00", "09:30"))
        .unwrap();
    assert_eq!(created.title, "Dentist");
    assert_eq!(created.description, "notes");
    assert_eq!(created.user_id, "u1");
    assert_eq!(service.get_all_events("u1").unwrap(), vec![created]);
}

#[test]
fn invalid_drafts_never_reach_the_store() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(KvEventRepository::new(SqliteKeyValueStore::new(&conn)));

    let reversed = service
        .create_for_user("u1", &draft("Dentist", "10:00", "09:00"))
        .unwrap_err();
    assert!(matches!(
        reversed,
        EventServiceError::Invalid(EventValidationError::EndNotAfterStart)
    ));
    assert_eq!(reversed.kind(), ErrorKind::Validation);

    let untitled = service
        .create_for_user("u1", &draft("   ", "09:00", "10:00"))
        .unwrap_err();
    assert_eq!(untitled.to_string(), "Please enter a title");

    let mut bad_date = draft("Dentist", "09:00", "10:00");
    bad_date.date = "2024-02-30".to_string();
    assert!(matches!(
        service.create_for_user("u1", &bad_date).unwrap_err(),
        EventServiceError::Invalid(EventValidationError::InvalidDate(_))
    ));

    assert!(service.get_all_events("u1").unwrap().is_empty());
}

#[test]
fn create_for_current_user_requires_a_session() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let identity = IdentityService::new(store);
    let service = EventService::new(KvEventRepository::new(store));

    let err = service
        .create_for_current_user(&identity, &draft("Dentist", "09:00", "10:00"))
        .unwrap_err();
    assert!(matches!(err, EventServiceError::UserNotFound));
    assert_eq!(err.to_string(), "User not found");

    let outcome = identity.sign_up("test@example.com", "password123").unwrap();
    let created = service
        .create_for_current_user(&identity, &draft("Dentist", "09:00", "10:00"))
        .unwrap();
    assert_eq!(created.user_id, outcome.user.id);
}

#[test]
fn update_from_draft_keeps_owner_and_reports_missing_event() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(KvEventRepository::new(SqliteKeyValueStore::new(&conn)));
    let created = service
        .create_for_user("u1", &draft("Dentist", "09:00", "10:00"))
        .unwrap();

    let mut edit = draft("Dentist (moved)", "14:00", "15:00");
    edit.date = "2024-01-16".to_string();
    let updated = service.update_from_draft(&created.id, &edit).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, "u1");
    assert_eq!(updated.date, "2024-01-16");
    assert_eq!(updated.start_time, "14:00");

    let missing = service.update_from_draft("missing", &edit).unwrap_err();
    assert!(matches!(missing, EventServiceError::EventNotFound(ref id) if id == "missing"));
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let reversed = service
        .update_from_draft(&created.id, &draft("Dentist", "15:00", "14:00"))
        .unwrap_err();
    assert_eq!(reversed.kind(), ErrorKind::Validation);
    assert_eq!(
        service.get_event_by_id(&created.id).unwrap().unwrap(),
        updated
    );
}

#[test]
fn delete_and_by_date_pass_through() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(KvEventRepository::new(SqliteKeyValueStore::new(&conn)));
    let created = service
        .create_for_user("u1", &draft("Dentist", "09:00", "10:00"))
        .unwrap();

    assert_eq!(
        service.get_events_by_date("u1", "2024-01-15").unwrap().len(),
        1
    );
    service.delete_event(&created.id).unwrap();
    service.delete_event(&created.id).unwrap();
    assert!(service
        .get_events_by_date("u1", "2024-01-15")
        .unwrap()
        .is_empty());
}
