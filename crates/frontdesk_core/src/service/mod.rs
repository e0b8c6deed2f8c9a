//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations, persistence and notifications.
//! - Keep the CLI decoupled from snapshot and logging details.

pub mod reception_service;
