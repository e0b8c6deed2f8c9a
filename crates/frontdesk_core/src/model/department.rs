//! Fixed department set used by employees and appointments.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Department an employee belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "IT")]
    It,
    Finance,
    #[serde(rename = "HR")]
    Hr,
    Admin,
    Sales,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 5] = [
        Department::It,
        Department::Finance,
        Department::Hr,
        Department::Admin,
        Department::Sales,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Finance => "Finance",
            Self::Hr => "HR",
            Self::Admin => "Admin",
            Self::Sales => "Sales",
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a department name is not part of the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDepartment(pub String);

impl Display for UnknownDepartment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown department `{}`; expected IT|Finance|HR|Admin|Sales",
            self.0
        )
    }
}

impl Error for UnknownDepartment {}

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Department::ALL
            .into_iter()
            .find(|department| department.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDepartment(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Department;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("it".parse::<Department>().unwrap(), Department::It);
        assert_eq!(" finance ".parse::<Department>().unwrap(), Department::Finance);
        assert_eq!("HR".parse::<Department>().unwrap(), Department::Hr);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "Legal".parse::<Department>().unwrap_err();
        assert!(err.to_string().contains("Legal"));
    }

    #[test]
    fn serializes_with_display_names() {
        assert_eq!(serde_json::to_value(Department::It).unwrap(), "IT");
        assert_eq!(serde_json::to_value(Department::Sales).unwrap(), "Sales");
    }
}
