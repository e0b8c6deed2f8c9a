//! Reception-desk domain model.
//!
//! # Responsibility
//! - Define the visitor, appointment and employee records held by the store.
//! - Define the draft/patch shapes the view layer submits.
//!
//! # Invariants
//! - Every record is identified by a `RecordId` unique within its collection.
//! - Records carry an `updated_at` stamp (epoch milliseconds) set by the store.

pub mod appointment;
pub mod department;
pub mod employee;
pub mod visitor;

use uuid::Uuid;

/// Stable identifier for visitor, appointment and employee records.
///
/// Uses time-ordered UUIDv7 values so ids assigned later sort later.
pub type RecordId = Uuid;

/// Generates a fresh time-ordered record id.
pub fn new_record_id() -> RecordId {
    Uuid::now_v7()
}
