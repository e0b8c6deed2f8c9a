//! In-memory reception store and its mutation rules.
//!
//! # Responsibility
//! - Own the visitor, appointment and employee collections plus view flags.
//! - Assign ids and stamps, and keep `latest_visitor_name` consistent.
//!
//! # Invariants
//! - Ids are unique within each collection.
//! - Stamps handed out by one store are strictly increasing.
//! - Unknown ids on edit/delete/image operations are silent no-ops.

use crate::clock::Clock;
use crate::model::appointment::{Appointment, AppointmentDraft};
use crate::model::department::Department;
use crate::model::employee::{Employee, EmployeeDraft, EmployeePatch};
use crate::model::visitor::{Visitor, VisitorDraft};
use crate::model::{new_record_id, RecordId};
use crate::store::link::{employee_for, find_by_name, resolve_employee, EmployeeLinkMode};
use crate::store::state::ReceptionState;
use log::debug;

/// Grace period between completing an appointment and removing it.
pub const DEFAULT_COMPLETION_GRACE_MS: u64 = 500;

/// Behavior switches for a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub link_mode: EmployeeLinkMode,
    pub completion_grace_ms: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            link_mode: EmployeeLinkMode::ByName,
            completion_grace_ms: DEFAULT_COMPLETION_GRACE_MS,
        }
    }
}

/// Home-page feed derived from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySummary<'a> {
    pub latest_visitor_name: &'a str,
    /// Last active appointment in list order.
    pub latest_appointment: Option<&'a Appointment>,
    /// Last employee in list order.
    pub latest_employee: Option<&'a Employee>,
}

/// Single source of truth for reception data.
pub struct ReceptionStore {
    state: ReceptionState,
    clock: Box<dyn Clock>,
    options: StoreOptions,
    last_stamp: i64,
}

impl ReceptionStore {
    /// Creates an empty store with default options.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_state(ReceptionState::default(), clock, StoreOptions::default())
    }

    /// Creates a store over rehydrated state.
    ///
    /// `latest_visitor_name` is re-derived so a stale cached value cannot
    /// survive a reload.
    pub fn with_state(
        mut state: ReceptionState,
        clock: impl Clock + 'static,
        options: StoreOptions,
    ) -> Self {
        state.refresh_latest_visitor();
        let last_stamp = state.max_stamp();
        Self {
            state,
            clock: Box::new(clock),
            options,
            last_stamp,
        }
    }

    pub fn state(&self) -> &ReceptionState {
        &self.state
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Current clock reading.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Swaps in a previously captured state. Used to undo a mutation whose
    /// snapshot could not be written.
    pub(crate) fn restore_state(&mut self, state: ReceptionState) {
        self.state = state;
    }

    fn next_stamp(&mut self) -> i64 {
        let now = self.clock.now_ms();
        let stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp.saturating_add(1)
        };
        self.last_stamp = stamp;
        stamp
    }

    // ---- visitors ----

    /// Appends a visitor and makes it the latest visitor.
    ///
    /// A caller-supplied id that already exists is replaced by a fresh one.
    pub fn add_visitor(&mut self, draft: VisitorDraft) -> RecordId {
        let id = assign_id(
            draft.id,
            self.state.visitors.list.iter().map(|visitor| visitor.id),
        );
        let stamp = self.next_stamp();
        let visitor = draft.into_visitor(id, stamp);
        self.state.visitors.latest_visitor_name = visitor.name.clone();
        self.state.visitors.list.push(visitor);
        id
    }

    /// Replaces the visitor with `record.id`. Returns `false` on a miss.
    pub fn edit_visitor(&mut self, mut record: Visitor) -> bool {
        let Some(index) = self.visitor_index(record.id) else {
            debug!(
                "event=visitor_edit module=store status=skip reason=not_found visitor_id={}",
                record.id
            );
            return false;
        };
        record.updated_at = self.next_stamp();
        self.state.visitors.list[index] = record;
        self.state.refresh_latest_visitor();
        true
    }

    /// Removes every visitor with `id`. Returns `false` on a miss.
    pub fn delete_visitor(&mut self, id: RecordId) -> bool {
        let before = self.state.visitors.list.len();
        self.state.visitors.list.retain(|visitor| visitor.id != id);
        if self.state.visitors.list.len() == before {
            debug!("event=visitor_delete module=store status=skip reason=not_found visitor_id={id}");
            return false;
        }
        self.state.refresh_latest_visitor();
        true
    }

    pub fn visitor(&self, id: RecordId) -> Option<&Visitor> {
        self.state.visitors.list.iter().find(|visitor| visitor.id == id)
    }

    pub fn visitors(&self) -> &[Visitor] {
        self.state.visitors()
    }

    pub fn visitor_total(&self) -> usize {
        self.state.visitors.list.len()
    }

    pub fn latest_visitor_name(&self) -> &str {
        self.state.latest_visitor_name()
    }

    fn visitor_index(&self, id: RecordId) -> Option<usize> {
        self.state
            .visitors
            .list
            .iter()
            .position(|visitor| visitor.id == id)
    }

    // ---- appointments ----

    /// Appends an appointment.
    ///
    /// When the draft names no department, it is copied from the linked
    /// employee if one resolves.
    pub fn add_appointment(&mut self, mut draft: AppointmentDraft) -> RecordId {
        if draft.department.is_none() {
            draft.department = resolve_employee(
                &self.state.employees.list,
                &draft.appointment_with,
                draft.employee_id,
                self.options.link_mode,
            )
            .and_then(|employee| employee.department);
        }
        let id = assign_id(
            draft.id,
            self.state.appointments.list.iter().map(|appointment| appointment.id),
        );
        let stamp = self.next_stamp();
        self.state
            .appointments
            .list
            .push(draft.into_appointment(id, stamp));
        id
    }

    /// Replaces the appointment with `record.id`. Returns `false` on a miss.
    ///
    /// The stored completion mark is kept. When the edit moves the
    /// appointment to another employee and leaves the department as it was,
    /// the department is taken from the newly linked employee.
    pub fn edit_appointment(&mut self, mut record: Appointment) -> bool {
        let Some(index) = self.appointment_index(record.id) else {
            debug!(
                "event=appointment_edit module=store status=skip reason=not_found appointment_id={}",
                record.id
            );
            return false;
        };
        let stored = &self.state.appointments.list[index];
        record.completed_at = stored.completed_at;
        let relinked = record.appointment_with != stored.appointment_with
            || record.employee_id != stored.employee_id;
        if relinked && record.department == stored.department {
            record.department =
                employee_for(&self.state.employees.list, &record, self.options.link_mode)
                    .and_then(|employee| employee.department);
        }
        record.updated_at = self.next_stamp();
        self.state.appointments.list[index] = record;
        true
    }

    /// Removes every appointment with `id`. Returns `false` on a miss.
    pub fn delete_appointment(&mut self, id: RecordId) -> bool {
        let before = self.state.appointments.list.len();
        self.state
            .appointments
            .list
            .retain(|appointment| appointment.id != id);
        let removed = self.state.appointments.list.len() != before;
        if !removed {
            debug!(
                "event=appointment_delete module=store status=skip reason=not_found appointment_id={id}"
            );
        }
        removed
    }

    /// Marks an appointment completed; it is removed by a later sweep once
    /// the grace period elapses. Returns `false` on a miss or when the
    /// appointment was already completed.
    pub fn complete_appointment(&mut self, id: RecordId) -> bool {
        let now = self.clock.now_ms();
        let Some(index) = self.appointment_index(id) else {
            debug!(
                "event=appointment_complete module=store status=skip reason=not_found appointment_id={id}"
            );
            return false;
        };
        self.state.appointments.list[index].mark_completed(now)
    }

    /// Removes completed appointments whose grace period has elapsed.
    /// Returns the number removed.
    pub fn sweep_completed_appointments(&mut self) -> usize {
        let now = self.clock.now_ms();
        let grace_ms = self.options.completion_grace_ms;
        let before = self.state.appointments.list.len();
        self.state
            .appointments
            .list
            .retain(|appointment| !appointment.is_due_for_removal(now, grace_ms));
        before - self.state.appointments.list.len()
    }

    pub fn appointment(&self, id: RecordId) -> Option<&Appointment> {
        self.state
            .appointments
            .list
            .iter()
            .find(|appointment| appointment.id == id)
    }

    /// All appointments, including ones completed but not yet swept.
    pub fn appointments(&self) -> &[Appointment] {
        self.state.appointments()
    }

    /// Appointments that have not been marked completed.
    pub fn active_appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.state
            .appointments
            .list
            .iter()
            .filter(|appointment| !appointment.is_completed())
    }

    pub fn appointment_total(&self) -> usize {
        self.state.appointments.list.len()
    }

    /// Employee an appointment is linked to under the configured mode.
    pub fn linked_employee(&self, appointment: &Appointment) -> Option<&Employee> {
        employee_for(&self.state.employees.list, appointment, self.options.link_mode)
    }

    fn appointment_index(&self, id: RecordId) -> Option<usize> {
        self.state
            .appointments
            .list
            .iter()
            .position(|appointment| appointment.id == id)
    }

    // ---- employees ----

    /// Appends an employee under a store-assigned id.
    pub fn add_employee(&mut self, draft: EmployeeDraft) -> RecordId {
        let id = assign_id(
            None,
            self.state.employees.list.iter().map(|employee| employee.id),
        );
        let stamp = self.next_stamp();
        self.state
            .employees
            .list
            .push(draft.into_employee(id, stamp));
        id
    }

    /// Shallow-merges `patch` into the employee with `patch.id`.
    /// Returns `false` on a miss.
    pub fn edit_employee(&mut self, patch: EmployeePatch) -> bool {
        let Some(index) = self.employee_index(patch.id) else {
            debug!(
                "event=employee_edit module=store status=skip reason=not_found employee_id={}",
                patch.id
            );
            return false;
        };
        let stamp = self.next_stamp();
        let employee = &mut self.state.employees.list[index];
        employee.apply_patch(patch);
        employee.updated_at = stamp;
        true
    }

    /// Removes every employee with `id`. Appointments naming the employee
    /// are left untouched. Returns `false` on a miss.
    pub fn delete_employee(&mut self, id: RecordId) -> bool {
        let before = self.state.employees.list.len();
        self.state.employees.list.retain(|employee| employee.id != id);
        let removed = self.state.employees.list.len() != before;
        if !removed {
            debug!("event=employee_delete module=store status=skip reason=not_found employee_id={id}");
        }
        removed
    }

    /// Sets the employee's image. Returns `false` on a miss.
    pub fn update_employee_image(&mut self, id: RecordId, image: impl Into<String>) -> bool {
        self.set_employee_image(id, Some(image.into()))
    }

    /// Clears the employee's image. Returns `false` on a miss.
    pub fn remove_employee_image(&mut self, id: RecordId) -> bool {
        self.set_employee_image(id, None)
    }

    fn set_employee_image(&mut self, id: RecordId, image: Option<String>) -> bool {
        let Some(index) = self.employee_index(id) else {
            debug!("event=employee_image module=store status=skip reason=not_found employee_id={id}");
            return false;
        };
        let stamp = self.next_stamp();
        let employee = &mut self.state.employees.list[index];
        employee.image = image;
        employee.updated_at = stamp;
        true
    }

    /// Flips the employee panel flag and returns the new value.
    pub fn toggle_employee_panel(&mut self) -> bool {
        let open = !self.state.employees.is_employee_panel_open;
        self.state.employees.is_employee_panel_open = open;
        open
    }

    pub fn is_employee_panel_open(&self) -> bool {
        self.state.is_employee_panel_open()
    }

    pub fn employee(&self, id: RecordId) -> Option<&Employee> {
        self.state.employees.list.iter().find(|employee| employee.id == id)
    }

    pub fn employees(&self) -> &[Employee] {
        self.state.employees()
    }

    pub fn employee_total(&self) -> usize {
        self.state.employees.list.len()
    }

    /// Department of the first employee named `name`.
    pub fn department_for_employee(&self, name: &str) -> Option<Department> {
        find_by_name(&self.state.employees.list, name).and_then(|employee| employee.department)
    }

    fn employee_index(&self, id: RecordId) -> Option<usize> {
        self.state
            .employees
            .list
            .iter()
            .position(|employee| employee.id == id)
    }

    // ---- derived ----

    pub fn activity_summary(&self) -> ActivitySummary<'_> {
        ActivitySummary {
            latest_visitor_name: self.latest_visitor_name(),
            latest_appointment: self.active_appointments().last(),
            latest_employee: self.state.employees.list.last(),
        }
    }
}

fn assign_id(requested: Option<RecordId>, mut existing: impl Iterator<Item = RecordId>) -> RecordId {
    match requested {
        Some(id) if !id.is_nil() && !existing.any(|taken| taken == id) => id,
        Some(id) => {
            debug!("event=assign_id module=store status=ok reason=requested_id_taken requested_id={id}");
            new_record_id()
        }
        None => new_record_id(),
    }
}
