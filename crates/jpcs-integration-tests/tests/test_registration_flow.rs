//! The full student journey: sign-in bootstrap, profile completion,
//! event registration, then check-in, all against one shared store.

use std::sync::Arc;

use jpcs_checkin::{CheckinEngine, CheckinOutcome, CheckinSession};
use jpcs_core::{Identity, ProviderUid, StudentId};
use jpcs_ledger::{
    EventCatalog, LedgerError, NewEvent, ProfileUpdate, RegistrationLedger, StudentDirectory,
};
use jpcs_store::{DocumentStore, MemoryStore};

fn identity(uid: &str, name: &str) -> Identity {
    Identity {
        uid: ProviderUid::new(uid).unwrap(),
        display_name: name.to_string(),
        email: format!("{uid}@example.com"),
        photo_url: String::new(),
    }
}

#[tokio::test]
async fn sign_in_to_checked_in() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let directory = StudentDirectory::new(Arc::clone(&store));
    let catalog = EventCatalog::new(Arc::clone(&store));
    let registrations = RegistrationLedger::new(Arc::clone(&store));

    // First sign-in, then the profile form.
    let who = identity("uid-1", "Alyssa Cruz");
    directory.bootstrap_identity(&who).await.unwrap();
    directory
        .complete_profile(
            &who.uid,
            ProfileUpdate {
                student_id: StudentId::new("2023-00123").unwrap(),
                full_name: "Alyssa D. Cruz".to_string(),
                department: "CCS".to_string(),
                program: "BSCS".to_string(),
            },
        )
        .await
        .unwrap();

    let event_id = catalog
        .create(NewEvent {
            name: "Orientation".to_string(),
            description: String::new(),
            date: "2026-09-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: None,
            location: "Hall A".to_string(),
            days: None,
        })
        .await
        .unwrap();

    // Registration is immediately visible.
    let sid = StudentId::new("2023-00123").unwrap();
    registrations
        .register(&event_id, &sid, "Alyssa D. Cruz")
        .await
        .unwrap();
    assert!(registrations.is_registered(&event_id, &sid).await.unwrap());
    assert_eq!(
        registrations.list_registrants(&event_id).await.unwrap().len(),
        1
    );

    // The strict engine now accepts the scan.
    let engine = CheckinEngine::new(Arc::clone(&store));
    let session = CheckinSession::new(event_id, "Orientation");
    let outcome = engine.process_scan(&session, "2023-00123").await.unwrap();
    match outcome {
        CheckinOutcome::Accepted(checked) => {
            assert_eq!(checked.student_id, "2023-00123");
            assert_eq!(checked.student_name, "Alyssa Cruz");
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_registration_is_idempotent() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let catalog = EventCatalog::new(Arc::clone(&store));
    let registrations = RegistrationLedger::new(Arc::clone(&store));

    let event_id = catalog
        .create(NewEvent {
            name: "Workshop".to_string(),
            description: String::new(),
            date: "2026-09-02".to_string(),
            start_time: "13:00".to_string(),
            end_time: None,
            location: "Lab 2".to_string(),
            days: None,
        })
        .await
        .unwrap();

    let sid = StudentId::new("S1").unwrap();
    let first = registrations.register(&event_id, &sid, "Alyssa").await.unwrap();
    let second = registrations.register(&event_id, &sid, "Alyssa").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        registrations.list_registrants(&event_id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn student_id_uniqueness_spans_users() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let directory = StudentDirectory::new(Arc::clone(&store));

    let a = identity("uid-1", "Alyssa");
    let b = identity("uid-2", "Ben");
    directory.bootstrap_identity(&a).await.unwrap();
    directory.bootstrap_identity(&b).await.unwrap();

    let profile = |full_name: &str| ProfileUpdate {
        student_id: StudentId::new("2023-00123").unwrap(),
        full_name: full_name.to_string(),
        department: "CCS".to_string(),
        program: "BSIT".to_string(),
    };
    directory.complete_profile(&a.uid, profile("Alyssa Cruz")).await.unwrap();

    let err = directory
        .complete_profile(&b.uid, profile("Ben Reyes"))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateStudentId { .. }));
}
