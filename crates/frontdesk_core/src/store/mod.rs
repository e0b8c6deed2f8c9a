//! Application state store.
//!
//! # Responsibility
//! - Hold the three entity collections and view flags in one value.
//! - Expose the only mutation paths for that value.
//!
//! # Invariants
//! - Store instances are explicitly constructed; there is no global store.
//! - Not-found conditions never raise errors.

pub mod link;
pub mod reception_store;
pub mod state;
