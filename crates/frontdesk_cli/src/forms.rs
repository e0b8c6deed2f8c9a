//! Form validation for CLI input.
//!
//! The store accepts whatever it is given; required-field and shape checks
//! happen here, before any store operation runs.

use chrono::NaiveDateTime;
use frontdesk_core::{
    Appointment, AppointmentDraft, EmployeeDraft, EmployeePatch, Visitor, VisitorDraft,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").expect("valid phone regex"));

const DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Field-level validation failures, in form order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    fn email(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !EMAIL_RE.is_match(value.trim()) {
            self.push(field, "Email is not valid.");
        }
    }

    fn phone(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !PHONE_RE.is_match(value.trim()) {
            self.push(field, "Phone number is not valid.");
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    #[cfg(test)]
    fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|(field, _)| *field).collect()
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (field, message)) in self.errors.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Parses `datetime-local` style input such as `2026-10-18T14:30`.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

pub fn check_visitor_draft(draft: &VisitorDraft) -> Result<(), FormErrors> {
    check_visitor_fields(
        &draft.name,
        &draft.email,
        &draft.phone_number,
        &draft.visit_reason,
        &draft.appointment_with,
    )
}

pub fn check_visitor(record: &Visitor) -> Result<(), FormErrors> {
    check_visitor_fields(
        &record.name,
        &record.email,
        &record.phone_number,
        &record.visit_reason,
        &record.appointment_with,
    )
}

fn check_visitor_fields(
    name: &str,
    email: &str,
    phone_number: &str,
    visit_reason: &str,
    appointment_with: &str,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("name", name, "Name is required.");
    errors.require("email", email, "Email is required.");
    errors.email("email", email);
    errors.require("phone", phone_number, "Phone number is required.");
    errors.phone("phone", phone_number);
    errors.require("reason", visit_reason, "Reason is required.");
    errors.require("with", appointment_with, "Appointment is required.");
    errors.into_result()
}

pub fn check_appointment_draft(draft: &AppointmentDraft) -> Result<(), FormErrors> {
    check_appointment_fields(
        &draft.visitor_name,
        &draft.phone_number,
        &draft.reason,
        &draft.appointment_with,
    )
}

pub fn check_appointment(record: &Appointment) -> Result<(), FormErrors> {
    check_appointment_fields(
        &record.visitor_name,
        &record.phone_number,
        &record.reason,
        &record.appointment_with,
    )
}

fn check_appointment_fields(
    visitor_name: &str,
    phone_number: &str,
    reason: &str,
    appointment_with: &str,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("visitor", visitor_name, "Name is required.");
    errors.require("phone", phone_number, "Phone number is required.");
    errors.phone("phone", phone_number);
    errors.require("reason", reason, "Reason is required.");
    errors.require("with", appointment_with, "Please select an employee.");
    errors.into_result()
}

pub fn check_employee_draft(draft: &EmployeeDraft) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.require("name", &draft.name, "Name is required.");
    errors.require("mobile", &draft.mobile_number, "Mobile number is required.");
    errors.phone("mobile", &draft.mobile_number);
    errors.require("email", &draft.email, "Email is required.");
    errors.email("email", &draft.email);
    errors.into_result()
}

/// Patch fields that are present must still satisfy the add-form rules.
pub fn check_employee_patch(patch: &EmployeePatch) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    if let Some(name) = &patch.name {
        errors.require("name", name, "Name is required.");
    }
    if let Some(mobile) = &patch.mobile_number {
        errors.require("mobile", mobile, "Mobile number is required.");
        errors.phone("mobile", mobile);
    }
    if let Some(email) = &patch.email {
        errors.require("email", email, "Email is required.");
        errors.email("email", email);
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::{check_employee_draft, check_employee_patch, parse_date_time, FormErrors};
    use frontdesk_core::model::new_record_id;
    use frontdesk_core::{EmployeeDraft, EmployeePatch};

    #[test]
    fn parses_datetime_local_input() {
        let parsed = parse_date_time("2026-10-18T14:30").unwrap();
        assert_eq!(parsed.to_string(), "2026-10-18 14:30:00");
        assert!(parse_date_time("18/10/2026").is_none());
    }

    #[test]
    fn employee_form_requires_name_mobile_and_email() {
        let errors = check_employee_draft(&EmployeeDraft::default()).unwrap_err();
        assert_eq!(errors.fields(), vec!["name", "mobile", "email"]);
    }

    #[test]
    fn employee_form_rejects_malformed_email() {
        let draft = EmployeeDraft {
            name: "Asha".to_string(),
            mobile_number: "9800000000".to_string(),
            email: "not-an-email".to_string(),
            ..EmployeeDraft::default()
        };
        let errors: FormErrors = check_employee_draft(&draft).unwrap_err();
        assert!(errors.to_string().contains("Email is not valid."));
    }

    #[test]
    fn patch_allows_absent_fields_but_not_blank_ones() {
        let id = new_record_id();
        assert!(check_employee_patch(&EmployeePatch::new(id)).is_ok());

        let blank = EmployeePatch {
            name: Some("  ".to_string()),
            ..EmployeePatch::new(id)
        };
        assert_eq!(check_employee_patch(&blank).unwrap_err().fields(), vec!["name"]);
    }
}
