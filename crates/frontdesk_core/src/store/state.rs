//! Serializable application state.
//!
//! # Invariants
//! - `latest_visitor_name` always equals the name of the visitor with the
//!   greatest `updated_at`, or `""` when there are no visitors.
//! - Fields are only mutated through `ReceptionStore`.

use crate::model::appointment::Appointment;
use crate::model::employee::Employee;
use crate::model::visitor::Visitor;
use serde::{Deserialize, Serialize};

/// Whole-application state persisted under the root key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceptionState {
    pub(crate) visitors: VisitorSlice,
    pub(crate) appointments: AppointmentSlice,
    pub(crate) employees: EmployeeSlice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct VisitorSlice {
    pub(crate) list: Vec<Visitor>,
    pub(crate) latest_visitor_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppointmentSlice {
    pub(crate) list: Vec<Appointment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EmployeeSlice {
    pub(crate) list: Vec<Employee>,
    pub(crate) is_employee_panel_open: bool,
}

impl ReceptionState {
    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors.list
    }

    pub fn latest_visitor_name(&self) -> &str {
        &self.visitors.latest_visitor_name
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments.list
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees.list
    }

    pub fn is_employee_panel_open(&self) -> bool {
        self.employees.is_employee_panel_open
    }

    /// Greatest stamp recorded anywhere in the state.
    pub(crate) fn max_stamp(&self) -> i64 {
        let visitors = self.visitors.list.iter().map(|visitor| visitor.updated_at);
        let appointments = self.appointments.list.iter().flat_map(|appointment| {
            [Some(appointment.updated_at), appointment.completed_at]
                .into_iter()
                .flatten()
        });
        let employees = self.employees.list.iter().map(|employee| employee.updated_at);
        visitors
            .chain(appointments)
            .chain(employees)
            .max()
            .unwrap_or(i64::MIN)
    }

    /// Re-derives `latest_visitor_name` from the visitor list.
    pub(crate) fn refresh_latest_visitor(&mut self) {
        self.visitors.latest_visitor_name = latest_visitor_name(&self.visitors.list);
    }
}

/// Name of the visitor with the greatest stamp.
///
/// Equal stamps resolve to the record positioned last in the list.
pub(crate) fn latest_visitor_name(visitors: &[Visitor]) -> String {
    visitors
        .iter()
        .max_by_key(|visitor| visitor.updated_at)
        .map(|visitor| visitor.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{latest_visitor_name, ReceptionState};
    use crate::model::visitor::VisitorDraft;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn visitor(name: &str, stamp: i64) -> crate::model::visitor::Visitor {
        VisitorDraft {
            id: None,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone_number: "9800000000".to_string(),
            visit_reason: "Meeting".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            appointment_with: "IT".to_string(),
        }
        .into_visitor(Uuid::now_v7(), stamp)
    }

    #[test]
    fn latest_visitor_is_empty_for_empty_list() {
        assert_eq!(latest_visitor_name(&[]), "");
    }

    #[test]
    fn latest_visitor_picks_greatest_stamp_regardless_of_position() {
        let list = vec![visitor("Late", 30), visitor("Early", 10), visitor("Mid", 20)];
        assert_eq!(latest_visitor_name(&list), "Late");
    }

    #[test]
    fn latest_visitor_ties_resolve_to_last_position() {
        let list = vec![visitor("First", 10), visitor("Second", 10)];
        assert_eq!(latest_visitor_name(&list), "Second");
    }

    #[test]
    fn missing_sections_deserialize_to_defaults() {
        let state: ReceptionState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ReceptionState::default());
        assert!(!state.is_employee_panel_open());
    }

    #[test]
    fn max_stamp_of_empty_state_is_min() {
        let state = ReceptionState::default();
        assert_eq!(state.max_stamp(), i64::MIN);
    }
}
