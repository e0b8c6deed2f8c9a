//! Appointment to employee linkage.
//!
//! Appointments reference employees by display name. Two employees sharing a
//! name are indistinguishable and renaming an employee orphans its
//! appointments. `EmployeeLinkMode::ById` resolves through
//! `Appointment::employee_id` instead and falls back to the name when the
//! appointment carries no id.

use crate::model::appointment::Appointment;
use crate::model::employee::Employee;
use serde::{Deserialize, Serialize};

/// How an appointment finds its employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeLinkMode {
    /// First employee whose name equals `appointment_with`.
    #[default]
    ByName,
    /// Employee whose id equals `employee_id`.
    ById,
}

/// Returns the first employee with exactly this display name.
pub fn find_by_name<'a>(employees: &'a [Employee], name: &str) -> Option<&'a Employee> {
    employees.iter().find(|employee| employee.name == name)
}

/// Resolves the employee an appointment points at under `mode`.
pub fn resolve_employee<'a>(
    employees: &'a [Employee],
    appointment_with: &str,
    employee_id: Option<crate::model::RecordId>,
    mode: EmployeeLinkMode,
) -> Option<&'a Employee> {
    match (mode, employee_id) {
        (EmployeeLinkMode::ById, Some(id)) => employees.iter().find(|employee| employee.id == id),
        _ => find_by_name(employees, appointment_with),
    }
}

/// Convenience wrapper over [`resolve_employee`] for a stored appointment.
pub fn employee_for<'a>(
    employees: &'a [Employee],
    appointment: &Appointment,
    mode: EmployeeLinkMode,
) -> Option<&'a Employee> {
    resolve_employee(
        employees,
        &appointment.appointment_with,
        appointment.employee_id,
        mode,
    )
}
