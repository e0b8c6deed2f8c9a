//! Core domain logic for the Frontdesk reception app.
//! This crate is the single source of truth for reception data and its
//! update rules; front ends only read from and write through it.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod persist;
pub mod service;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::appointment::{Appointment, AppointmentDraft};
pub use model::department::{Department, UnknownDepartment};
pub use model::employee::{Employee, EmployeeDraft, EmployeePatch, DEFAULT_OFFICE_TIME};
pub use model::visitor::{Visitor, VisitorDraft};
pub use model::RecordId;
pub use notify::{AppointmentNotice, AppointmentNotifier, LogNotifier, NotifyError};
pub use persist::memory_snapshot::MemorySnapshotStore;
pub use persist::persistent_store::PersistentStore;
pub use persist::sqlite_snapshot::SqliteSnapshotStore;
pub use persist::{PersistError, PersistResult, SnapshotStore, ROOT_KEY};
pub use service::reception_service::{
    NotificationStatus, ReceptionService, ScheduleOutcome, ServiceError, ServiceResult,
};
pub use store::link::EmployeeLinkMode;
pub use store::reception_store::{ActivitySummary, ReceptionStore, StoreOptions};
pub use store::state::ReceptionState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
