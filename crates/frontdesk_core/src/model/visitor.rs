//! Visitor records.
//!
//! # Responsibility
//! - Define the visitor record and the draft submitted by the visitor form.
//!
//! # Invariants
//! - `updated_at` is owned by the store; values supplied by callers on edit
//!   are overwritten with a fresh stamp.

use super::RecordId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person who checked in at the desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub visit_reason: String,
    pub visit_date: NaiveDateTime,
    /// Department or employee the visitor came to see.
    pub appointment_with: String,
    /// Epoch milliseconds of the last add or edit.
    pub updated_at: i64,
}

/// Visitor form submission.
///
/// `id` is normally `None`; import paths may carry an existing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorDraft {
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub visit_reason: String,
    pub visit_date: NaiveDateTime,
    pub appointment_with: String,
}

impl VisitorDraft {
    /// Builds the stored record with the assigned id and stamp.
    pub fn into_visitor(self, id: RecordId, updated_at: i64) -> Visitor {
        Visitor {
            id,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            visit_reason: self.visit_reason,
            visit_date: self.visit_date,
            appointment_with: self.appointment_with,
            updated_at,
        }
    }
}
