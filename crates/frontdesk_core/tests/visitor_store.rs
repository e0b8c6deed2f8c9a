use chrono::NaiveDate;
use frontdesk_core::{ManualClock, ReceptionStore, VisitorDraft};
use uuid::Uuid;

fn draft(name: &str) -> VisitorDraft {
    VisitorDraft {
        id: None,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone_number: "9800000001".to_string(),
        visit_reason: "Vendor meeting".to_string(),
        visit_date: NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(11, 15, 0)
            .unwrap(),
        appointment_with: "Finance".to_string(),
    }
}

#[test]
fn add_grows_collection_by_one_and_record_is_retrievable() {
    let mut store = ReceptionStore::new(ManualClock::new(1_000));

    for (index, name) in ["Meera", "John", "Karan"].into_iter().enumerate() {
        let id = store.add_visitor(draft(name));
        assert_eq!(store.visitor_total(), index + 1);
        assert!(!id.is_nil());

        let loaded = store.visitor(id).unwrap();
        assert_eq!(loaded.name, name);
        assert_eq!(loaded.appointment_with, "Finance");
    }
}

#[test]
fn add_sets_latest_visitor_name() {
    let mut store = ReceptionStore::new(ManualClock::new(1_000));
    store.add_visitor(draft("Meera"));
    assert_eq!(store.latest_visitor_name(), "Meera");
}

#[test]
fn later_timestamp_wins_latest_visitor() {
    let clock = ManualClock::new(1_000);
    let mut store = ReceptionStore::new(clock.clone());

    store.add_visitor(draft("First"));
    clock.advance(60_000);
    store.add_visitor(draft("Second"));

    assert_eq!(store.latest_visitor_name(), "Second");
}

#[test]
fn editing_an_older_visitor_makes_it_latest() {
    let clock = ManualClock::new(1_000);
    let mut store = ReceptionStore::new(clock.clone());

    let first = store.add_visitor(draft("First"));
    clock.advance(10);
    store.add_visitor(draft("Second"));
    clock.advance(10);

    let mut record = store.visitor(first).unwrap().clone();
    record.visit_reason = "Follow-up".to_string();
    assert!(store.edit_visitor(record));

    assert_eq!(store.latest_visitor_name(), "First");
    assert_eq!(store.visitor(first).unwrap().visit_reason, "Follow-up");
    assert_eq!(store.visitor_total(), 2);
}

#[test]
fn edit_replaces_the_whole_record() {
    let mut store = ReceptionStore::new(ManualClock::new(1_000));
    let id = store.add_visitor(draft("Meera"));

    let mut replacement = draft("Meera K").into_visitor(id, 0);
    replacement.email = "meera.k@example.com".to_string();
    replacement.appointment_with = "HR".to_string();
    assert!(store.edit_visitor(replacement));

    let stored = store.visitor(id).unwrap();
    assert_eq!(stored.name, "Meera K");
    assert_eq!(stored.email, "meera.k@example.com");
    assert_eq!(stored.appointment_with, "HR");
    assert!(stored.updated_at > 0);
}

#[test]
fn edit_and_delete_of_unknown_id_are_no_ops() {
    let mut store = ReceptionStore::new(ManualClock::new(1_000));
    store.add_visitor(draft("Meera"));
    let before = store.state().clone();

    let stranger = draft("Ghost").into_visitor(Uuid::now_v7(), 5);
    assert!(!store.edit_visitor(stranger.clone()));
    assert!(!store.delete_visitor(stranger.id));
    assert!(!store.delete_visitor(stranger.id));

    assert_eq!(store.state(), &before);
}

#[test]
fn deleting_latest_visitor_recomputes_from_remaining() {
    let clock = ManualClock::new(1_000);
    let mut store = ReceptionStore::new(clock.clone());

    store.add_visitor(draft("First"));
    clock.advance(10);
    let second = store.add_visitor(draft("Second"));

    assert!(store.delete_visitor(second));
    assert_eq!(store.latest_visitor_name(), "First");
}

#[test]
fn deleting_sole_visitor_resets_latest_name() {
    let mut store = ReceptionStore::new(ManualClock::new(1_000));
    let id = store.add_visitor(draft("Only"));

    assert!(store.delete_visitor(id));
    assert_eq!(store.visitor_total(), 0);
    assert_eq!(store.latest_visitor_name(), "");
}
