//! Reception use-case service.
//!
//! # Responsibility
//! - Provide named entry points for every store operation.
//! - Persist each applied mutation through `PersistentStore`.
//! - Dispatch appointment notices after the appointment is saved.
//!
//! # Invariants
//! - Notification failures are reported in the outcome and never undo the
//!   saved appointment.
//! - Misses (unknown ids) return `Ok(false)`, not errors.

use crate::model::appointment::{Appointment, AppointmentDraft};
use crate::model::employee::{EmployeeDraft, EmployeePatch};
use crate::model::visitor::{Visitor, VisitorDraft};
use crate::model::RecordId;
use crate::notify::{AppointmentNotice, AppointmentNotifier, NotifyError};
use crate::persist::persistent_store::PersistentStore;
use crate::persist::{PersistError, SnapshotStore};
use crate::store::reception_store::ReceptionStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// The mutation could not be made durable and was rolled back.
    Persist(PersistError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "change was not saved: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<PersistError> for ServiceError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// What happened to the notice for a newly scheduled appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// No notifier is configured.
    Skipped,
    Sent,
    /// Reported to the user as a warning; the appointment stays saved.
    Failed(NotifyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub appointment_id: RecordId,
    pub notification: NotificationStatus,
}

/// Service facade over a persisted reception store.
pub struct ReceptionService<S: SnapshotStore> {
    store: PersistentStore<S>,
    notifier: Option<Box<dyn AppointmentNotifier>>,
}

impl<S: SnapshotStore> ReceptionService<S> {
    pub fn new(store: PersistentStore<S>) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    /// Attaches the appointment notice dispatcher.
    pub fn with_notifier(mut self, notifier: impl AppointmentNotifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Read access for list and detail views.
    pub fn store(&self) -> &ReceptionStore {
        self.store.store()
    }

    pub fn persistent_store(&self) -> &PersistentStore<S> {
        &self.store
    }

    // ---- visitors ----

    pub fn add_visitor(&mut self, draft: VisitorDraft) -> ServiceResult<RecordId> {
        let id = self
            .store
            .apply("visitor_add", |store| store.add_visitor(draft))?;
        info!("event=visitor_add module=service status=ok visitor_id={id}");
        Ok(id)
    }

    pub fn edit_visitor(&mut self, record: Visitor) -> ServiceResult<bool> {
        let id = record.id;
        let applied = self
            .store
            .apply("visitor_edit", |store| store.edit_visitor(record))?;
        log_outcome("visitor_edit", "visitor_id", id, applied);
        Ok(applied)
    }

    pub fn delete_visitor(&mut self, id: RecordId) -> ServiceResult<bool> {
        let applied = self
            .store
            .apply("visitor_delete", |store| store.delete_visitor(id))?;
        log_outcome("visitor_delete", "visitor_id", id, applied);
        Ok(applied)
    }

    // ---- appointments ----

    /// Saves a new appointment, then sends its notice when a notifier is set.
    pub fn schedule_appointment(
        &mut self,
        draft: AppointmentDraft,
    ) -> ServiceResult<ScheduleOutcome> {
        let appointment_id = self
            .store
            .apply("appointment_add", |store| store.add_appointment(draft))?;
        info!("event=appointment_add module=service status=ok appointment_id={appointment_id}");

        let notification = self.dispatch_notice(appointment_id);
        Ok(ScheduleOutcome {
            appointment_id,
            notification,
        })
    }

    fn dispatch_notice(&self, appointment_id: RecordId) -> NotificationStatus {
        let Some(notifier) = self.notifier.as_deref() else {
            return NotificationStatus::Skipped;
        };
        let store = self.store.store();
        let Some(appointment) = store.appointment(appointment_id) else {
            return NotificationStatus::Skipped;
        };

        let result = AppointmentNotice::build(appointment, store.linked_employee(appointment))
            .and_then(|notice| notifier.notify(&notice));
        match result {
            Ok(()) => {
                info!("event=appointment_notify module=service status=ok appointment_id={appointment_id}");
                NotificationStatus::Sent
            }
            Err(err) => {
                warn!(
                    "event=appointment_notify module=service status=error appointment_id={appointment_id} error={err}"
                );
                NotificationStatus::Failed(err)
            }
        }
    }

    pub fn edit_appointment(&mut self, record: Appointment) -> ServiceResult<bool> {
        let id = record.id;
        let applied = self
            .store
            .apply("appointment_edit", |store| store.edit_appointment(record))?;
        log_outcome("appointment_edit", "appointment_id", id, applied);
        Ok(applied)
    }

    pub fn delete_appointment(&mut self, id: RecordId) -> ServiceResult<bool> {
        let applied = self
            .store
            .apply("appointment_delete", |store| store.delete_appointment(id))?;
        log_outcome("appointment_delete", "appointment_id", id, applied);
        Ok(applied)
    }

    /// Marks an appointment completed; removal follows on a later sweep.
    pub fn complete_appointment(&mut self, id: RecordId) -> ServiceResult<bool> {
        let applied = self
            .store
            .apply("appointment_complete", |store| store.complete_appointment(id))?;
        log_outcome("appointment_complete", "appointment_id", id, applied);
        Ok(applied)
    }

    /// Removes completed appointments past their grace period.
    pub fn sweep_completed_appointments(&mut self) -> ServiceResult<usize> {
        let removed = self.store.apply("appointment_sweep", |store| {
            store.sweep_completed_appointments()
        })?;
        if removed > 0 {
            info!("event=appointment_sweep module=service status=ok removed={removed}");
        }
        Ok(removed)
    }

    // ---- employees ----

    pub fn add_employee(&mut self, draft: EmployeeDraft) -> ServiceResult<RecordId> {
        let id = self
            .store
            .apply("employee_add", |store| store.add_employee(draft))?;
        info!("event=employee_add module=service status=ok employee_id={id}");
        Ok(id)
    }

    pub fn edit_employee(&mut self, patch: EmployeePatch) -> ServiceResult<bool> {
        let id = patch.id;
        let applied = self
            .store
            .apply("employee_edit", |store| store.edit_employee(patch))?;
        log_outcome("employee_edit", "employee_id", id, applied);
        Ok(applied)
    }

    pub fn delete_employee(&mut self, id: RecordId) -> ServiceResult<bool> {
        let applied = self
            .store
            .apply("employee_delete", |store| store.delete_employee(id))?;
        log_outcome("employee_delete", "employee_id", id, applied);
        Ok(applied)
    }

    pub fn update_employee_image(
        &mut self,
        id: RecordId,
        image: impl Into<String>,
    ) -> ServiceResult<bool> {
        let image = image.into();
        let applied = self.store.apply("employee_image_update", |store| {
            store.update_employee_image(id, image)
        })?;
        log_outcome("employee_image_update", "employee_id", id, applied);
        Ok(applied)
    }

    pub fn remove_employee_image(&mut self, id: RecordId) -> ServiceResult<bool> {
        let applied = self.store.apply("employee_image_remove", |store| {
            store.remove_employee_image(id)
        })?;
        log_outcome("employee_image_remove", "employee_id", id, applied);
        Ok(applied)
    }

    /// Flips the employee panel flag and returns the new value.
    pub fn toggle_employee_panel(&mut self) -> ServiceResult<bool> {
        let open = self
            .store
            .apply("employee_panel_toggle", ReceptionStore::toggle_employee_panel)?;
        info!("event=employee_panel_toggle module=service status=ok open={open}");
        Ok(open)
    }
}

fn log_outcome(event: &str, id_key: &str, id: RecordId, applied: bool) {
    if applied {
        info!("event={event} module=service status=ok {id_key}={id}");
    } else {
        info!("event={event} module=service status=skip reason=not_found {id_key}={id}");
    }
}
