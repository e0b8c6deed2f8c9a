//! Employee directory records.
//!
//! # Responsibility
//! - Define the employee record, its creation draft and its edit patch.
//! - Apply shallow-merge edits that keep unspecified fields.
//!
//! # Invariants
//! - Employee ids are always assigned by the store.
//! - `image` is only changed by a patch that carries one, or by the
//!   dedicated image operations.

use super::department::Department;
use super::RecordId;
use serde::{Deserialize, Serialize};

/// Office time shown when the form leaves it untouched.
pub const DEFAULT_OFFICE_TIME: &str = "10:00 A.M";

/// An employee visitors can be booked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub mobile_number: String,
    pub email: String,
    pub department: Option<Department>,
    pub office_time: String,
    /// Base64 data URL of the profile picture.
    #[serde(default)]
    pub image: Option<String>,
    pub updated_at: i64,
}

impl Employee {
    /// Shallow-merges `patch` into this record. Returns whether any field changed.
    pub fn apply_patch(&mut self, patch: EmployeePatch) -> bool {
        let before = self.clone();
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(mobile_number) = patch.mobile_number {
            self.mobile_number = mobile_number;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(department) = patch.department {
            self.department = Some(department);
        }
        if let Some(office_time) = patch.office_time {
            self.office_time = office_time;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        *self != before
    }
}

/// Employee form submission for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub address: String,
    pub mobile_number: String,
    pub email: String,
    pub department: Option<Department>,
    pub office_time: String,
    pub image: Option<String>,
}

impl Default for EmployeeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            mobile_number: String::new(),
            email: String::new(),
            department: None,
            office_time: DEFAULT_OFFICE_TIME.to_string(),
            image: None,
        }
    }
}

impl EmployeeDraft {
    pub fn into_employee(self, id: RecordId, updated_at: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            address: self.address,
            mobile_number: self.mobile_number,
            email: self.email,
            department: self.department,
            office_time: self.office_time,
            image: self.image,
            updated_at,
        }
    }
}

/// Partial employee edit; `None` fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePatch {
    pub id: RecordId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub department: Option<Department>,
    pub office_time: Option<String>,
    pub image: Option<String>,
}

impl EmployeePatch {
    /// Creates an empty patch targeting `id`.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            name: None,
            address: None,
            mobile_number: None,
            email: None,
            department: None,
            office_time: None,
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Department, EmployeeDraft, EmployeePatch, DEFAULT_OFFICE_TIME};
    use uuid::Uuid;

    #[test]
    fn draft_defaults_office_time() {
        assert_eq!(EmployeeDraft::default().office_time, DEFAULT_OFFICE_TIME);
    }

    #[test]
    fn patch_keeps_unspecified_fields_including_image() {
        let id = Uuid::now_v7();
        let mut employee = EmployeeDraft {
            name: "Asha".to_string(),
            email: "a@x.com".to_string(),
            department: Some(Department::It),
            image: Some("data:image/png;base64,AAAA".to_string()),
            ..EmployeeDraft::default()
        }
        .into_employee(id, 1);

        let patch = EmployeePatch {
            department: Some(Department::Finance),
            ..EmployeePatch::new(id)
        };
        assert!(employee.apply_patch(patch));

        assert_eq!(employee.department, Some(Department::Finance));
        assert_eq!(employee.name, "Asha");
        assert_eq!(employee.image.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn empty_patch_reports_no_change() {
        let id = Uuid::now_v7();
        let mut employee = EmployeeDraft::default().into_employee(id, 1);
        assert!(!employee.apply_patch(EmployeePatch::new(id)));
    }
}
