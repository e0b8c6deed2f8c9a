//! Appointment notification side channel.
//!
//! # Responsibility
//! - Build the fixed notice payload sent when an appointment is scheduled.
//! - Define the notifier seam the service calls after the store commits.
//!
//! # Invariants
//! - Notifier outcomes never change store state.
//! - Notice payloads contain personal data and are never logged verbatim.

use crate::model::appointment::Appointment;
use crate::model::employee::Employee;
use chrono::NaiveDateTime;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shown when no department can be derived.
pub const UNKNOWN_DEPARTMENT: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No employee resolves for the appointment.
    MissingRecipient,
    /// The resolved employee has no email address.
    MissingRecipientAddress,
    /// The dispatch backend rejected or failed the delivery.
    Delivery(String),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRecipient => write!(f, "no employee matches this appointment"),
            Self::MissingRecipientAddress => write!(f, "employee has no email address"),
            Self::Delivery(message) => write!(f, "notification delivery failed: {message}"),
        }
    }
}

impl Error for NotifyError {}

/// Payload handed to the dispatch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentNotice {
    pub visitor_name: String,
    pub recipient_name: String,
    /// e.g. `October 18, 2026`.
    pub date: String,
    /// e.g. `02:30 PM`.
    pub time: String,
    pub department: String,
    pub contact_phone: String,
    pub recipient_address: String,
}

impl AppointmentNotice {
    /// Builds the notice for `appointment` addressed to `recipient`.
    ///
    /// # Errors
    /// - `MissingRecipient` when `recipient` is `None`.
    /// - `MissingRecipientAddress` when the recipient email is blank.
    pub fn build(
        appointment: &Appointment,
        recipient: Option<&Employee>,
    ) -> Result<Self, NotifyError> {
        let recipient = recipient.ok_or(NotifyError::MissingRecipient)?;
        if recipient.email.trim().is_empty() {
            return Err(NotifyError::MissingRecipientAddress);
        }

        let department = appointment
            .department
            .or(recipient.department)
            .map_or_else(|| UNKNOWN_DEPARTMENT.to_string(), |dept| dept.to_string());

        Ok(Self {
            visitor_name: appointment.visitor_name.clone(),
            recipient_name: recipient.name.clone(),
            date: format_notice_date(appointment.date),
            time: format_notice_time(appointment.date),
            department,
            contact_phone: appointment.phone_number.clone(),
            recipient_address: recipient.email.clone(),
        })
    }
}

/// Long-form date, e.g. `October 18, 2026`.
pub fn format_notice_date(value: NaiveDateTime) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Twelve-hour time, e.g. `02:30 PM`.
pub fn format_notice_time(value: NaiveDateTime) -> String {
    value.format("%I:%M %p").to_string()
}

/// Dispatch collaborator for appointment notices.
pub trait AppointmentNotifier {
    fn notify(&self, notice: &AppointmentNotice) -> Result<(), NotifyError>;
}

/// Notifier that records a metadata-only dispatch event in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl AppointmentNotifier for LogNotifier {
    fn notify(&self, notice: &AppointmentNotice) -> Result<(), NotifyError> {
        info!(
            "event=appointment_notice module=notify status=ok department={} date_len={}",
            notice.department,
            notice.date.len()
        );
        Ok(())
    }
}
