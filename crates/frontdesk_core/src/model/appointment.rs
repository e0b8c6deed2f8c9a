//! Appointment records.
//!
//! # Responsibility
//! - Define the scheduled appointment record and its form draft.
//! - Provide the completion lifecycle (soft delete before removal).
//!
//! # Invariants
//! - `appointment_with` holds the employee display name, not an id.
//! - `completed_at` is set once; a completed appointment is never reopened.

use super::department::Department;
use super::RecordId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A scheduled meeting between a visitor and an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    pub visitor_name: String,
    pub phone_number: String,
    pub reason: String,
    pub date: NaiveDateTime,
    /// Employee display name.
    pub appointment_with: String,
    /// Only consulted when linking by id is enabled.
    #[serde(default)]
    pub employee_id: Option<RecordId>,
    /// Denormalized from the linked employee when scheduled or reassigned.
    #[serde(default)]
    pub department: Option<Department>,
    /// Epoch milliseconds when the appointment was marked completed.
    #[serde(default)]
    pub completed_at: Option<i64>,
    pub updated_at: i64,
}

impl Appointment {
    /// Marks this appointment completed. Returns `false` if it already was.
    pub fn mark_completed(&mut self, now_ms: i64) -> bool {
        if self.completed_at.is_some() {
            return false;
        }
        self.completed_at = Some(now_ms);
        true
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether the completion grace period has fully elapsed at `now_ms`.
    pub fn is_due_for_removal(&self, now_ms: i64, grace_ms: u64) -> bool {
        match self.completed_at {
            Some(completed_at) => {
                now_ms.saturating_sub(completed_at) >= i64::try_from(grace_ms).unwrap_or(i64::MAX)
            }
            None => false,
        }
    }
}

/// Appointment form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub id: Option<RecordId>,
    pub visitor_name: String,
    pub phone_number: String,
    pub reason: String,
    pub date: NaiveDateTime,
    pub appointment_with: String,
    pub employee_id: Option<RecordId>,
    pub department: Option<Department>,
}

impl AppointmentDraft {
    pub fn into_appointment(self, id: RecordId, updated_at: i64) -> Appointment {
        Appointment {
            id,
            visitor_name: self.visitor_name,
            phone_number: self.phone_number,
            reason: self.reason,
            date: self.date,
            appointment_with: self.appointment_with,
            employee_id: self.employee_id,
            department: self.department,
            completed_at: None,
            updated_at,
        }
    }
}
