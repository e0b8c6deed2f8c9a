use chrono::NaiveDate;
use frontdesk_core::{
    AppointmentDraft, AppointmentNotice, AppointmentNotifier, Department, EmployeeDraft,
    EmployeePatch, LogNotifier, ManualClock, MemorySnapshotStore, NotificationStatus,
    NotifyError, PersistentStore, ReceptionService, StoreOptions,
};
use std::cell::RefCell;
use std::rc::Rc;

fn service() -> ReceptionService<MemorySnapshotStore> {
    ReceptionService::new(PersistentStore::open(
        MemorySnapshotStore::default(),
        ManualClock::new(1_000),
        StoreOptions::default(),
    ))
}

fn appointment(employee: &str) -> AppointmentDraft {
    AppointmentDraft {
        id: None,
        visitor_name: "Ravi".to_string(),
        phone_number: "9811111111".to_string(),
        reason: "Interview".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap(),
        appointment_with: employee.to_string(),
        employee_id: None,
        department: None,
    }
}

fn asha() -> EmployeeDraft {
    EmployeeDraft {
        name: "Asha".to_string(),
        mobile_number: "9800000000".to_string(),
        email: "a@x.com".to_string(),
        department: Some(Department::It),
        ..EmployeeDraft::default()
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Rc<RefCell<Vec<AppointmentNotice>>>,
}

impl AppointmentNotifier for RecordingNotifier {
    fn notify(&self, notice: &AppointmentNotice) -> Result<(), NotifyError> {
        self.sent.borrow_mut().push(notice.clone());
        Ok(())
    }
}

struct RejectingNotifier;

impl AppointmentNotifier for RejectingNotifier {
    fn notify(&self, _notice: &AppointmentNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("mail relay refused".to_string()))
    }
}

#[test]
fn schedule_without_notifier_skips_notification() {
    let mut service = service();
    let outcome = service.schedule_appointment(appointment("Asha")).unwrap();

    assert_eq!(outcome.notification, NotificationStatus::Skipped);
    assert!(service.store().appointment(outcome.appointment_id).is_some());
}

#[test]
fn schedule_sends_notice_with_formatted_fields() {
    let notifier = RecordingNotifier::default();
    let mut service = service().with_notifier(notifier.clone());
    service.add_employee(asha()).unwrap();

    let outcome = service.schedule_appointment(appointment("Asha")).unwrap();
    assert_eq!(outcome.notification, NotificationStatus::Sent);

    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].visitor_name, "Ravi");
    assert_eq!(sent[0].recipient_name, "Asha");
    assert_eq!(sent[0].recipient_address, "a@x.com");
    assert_eq!(sent[0].date, "October 18, 2026");
    assert_eq!(sent[0].time, "02:30 PM");
    assert_eq!(sent[0].department, "IT");
    assert_eq!(sent[0].contact_phone, "9811111111");
}

#[test]
fn notification_failure_keeps_appointment_saved() {
    let mut service = service().with_notifier(RejectingNotifier);
    service.add_employee(asha()).unwrap();

    let outcome = service.schedule_appointment(appointment("Asha")).unwrap();

    assert!(matches!(
        outcome.notification,
        NotificationStatus::Failed(NotifyError::Delivery(_))
    ));
    assert_eq!(service.store().appointment_total(), 1);
    let saved = service
        .persistent_store()
        .snapshots()
        .get(frontdesk_core::ROOT_KEY)
        .unwrap();
    assert!(saved.contains(&outcome.appointment_id.to_string()));
}

#[test]
fn unknown_recipient_is_reported_as_failed_notice() {
    let mut service = service().with_notifier(LogNotifier);
    let outcome = service.schedule_appointment(appointment("Nobody")).unwrap();

    assert_eq!(
        outcome.notification,
        NotificationStatus::Failed(NotifyError::MissingRecipient)
    );
    assert_eq!(service.store().appointment_total(), 1);
}

#[test]
fn service_misses_return_false_instead_of_errors() {
    let mut service = service();
    let stranger = uuid::Uuid::now_v7();

    assert!(!service.delete_visitor(stranger).unwrap());
    assert!(!service.delete_appointment(stranger).unwrap());
    assert!(!service.complete_appointment(stranger).unwrap());
    assert!(!service.delete_employee(stranger).unwrap());
    assert!(!service.edit_employee(EmployeePatch::new(stranger)).unwrap());
    assert!(!service.update_employee_image(stranger, "data:,").unwrap());
    assert!(!service.remove_employee_image(stranger).unwrap());
}

#[test]
fn complete_then_sweep_removes_after_grace() {
    let clock = ManualClock::new(1_000);
    let mut service = ReceptionService::new(PersistentStore::open(
        MemorySnapshotStore::default(),
        clock.clone(),
        StoreOptions::default(),
    ));
    let id = service
        .schedule_appointment(appointment("Asha"))
        .unwrap()
        .appointment_id;

    assert!(service.complete_appointment(id).unwrap());
    assert_eq!(service.sweep_completed_appointments().unwrap(), 0);

    clock.advance(500);
    assert_eq!(service.sweep_completed_appointments().unwrap(), 1);
    assert_eq!(service.store().appointment_total(), 0);
}

#[test]
fn toggle_panel_is_persisted() {
    let mut service = service();
    assert!(service.toggle_employee_panel().unwrap());

    let saved = service
        .persistent_store()
        .snapshots()
        .get(frontdesk_core::ROOT_KEY)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(value["employees"]["is_employee_panel_open"], true);
}
