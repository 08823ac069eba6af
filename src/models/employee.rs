//! Employee model.
//!
//! An [`Employee`] is a snapshot of a salesperson's performance figures as
//! supplied by the employee source. The calculation core reads it and never
//! mutates it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{CareerPath, TierId};

/// Largest monetary figure or count accepted on input: one quadrillion.
///
/// Products and sums of figures below this bound stay well inside the range
/// of [`Decimal`].
pub const MAX_FIGURE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Represents a salesperson subject to compensation calculation.
///
/// Optional numeric fields left unset (or set to zero) contribute nothing to
/// the compensation; they are never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// The career tier the employee holds.
    pub role: TierId,
    /// The career track, which decides bonus eligibility.
    pub path: CareerPath,
    /// Realized production for the month, the primary performance metric.
    #[serde(default)]
    pub implantados_atual: Option<Decimal>,
    /// Legacy monthly demand figure, used when no realized production exists.
    #[serde(default)]
    pub current_demand: Option<Decimal>,
    /// Revenue over the last quarter, used for the performance status.
    #[serde(default)]
    pub quarterly_revenue: Option<Decimal>,
    /// Years in the company.
    #[serde(default)]
    pub tenure: Option<Decimal>,
    /// Number of people reporting to the employee.
    #[serde(default)]
    pub team_size: Option<u32>,
    /// Number of team members promoted during the period.
    #[serde(default)]
    pub promoted_members: Option<u32>,
    /// Revenue of the whole business unit.
    #[serde(default)]
    pub unit_revenue: Option<Decimal>,
}

impl Employee {
    /// Returns the realized production when it is present and non-zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use commission_engine::models::{CareerPath, Employee, TierId};
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee::new("emp_001", TierId::SpecialistEntry, CareerPath::Specialist);
    /// assert_eq!(employee.realized_production(), None);
    ///
    /// employee.implantados_atual = Some(Decimal::ZERO);
    /// assert_eq!(employee.realized_production(), None);
    ///
    /// employee.implantados_atual = Some(Decimal::new(12000, 0));
    /// assert_eq!(employee.realized_production(), Some(Decimal::new(12000, 0)));
    /// ```
    pub fn realized_production(&self) -> Option<Decimal> {
        self.implantados_atual.filter(|value| !value.is_zero())
    }

    /// Returns the team size when it is set and non-zero.
    pub fn active_team_size(&self) -> Option<u32> {
        self.team_size.filter(|size| *size > 0)
    }

    /// Returns the promoted member count when it is set and non-zero.
    pub fn active_promoted_members(&self) -> Option<u32> {
        self.promoted_members.filter(|count| *count > 0)
    }

    /// Returns the unit revenue when it is set and non-zero.
    pub fn active_unit_revenue(&self) -> Option<Decimal> {
        self.unit_revenue.filter(|revenue| !revenue.is_zero())
    }

    /// Creates an employee with no performance figures set.
    pub fn new(id: impl Into<String>, role: TierId, path: CareerPath) -> Self {
        Self {
            id: id.into(),
            name: None,
            role,
            path,
            implantados_atual: None,
            current_demand: None,
            quarterly_revenue: None,
            tenure: None,
            team_size: None,
            promoted_members: None,
            unit_revenue: None,
        }
    }

    /// Checks that no monetary or performance figure is negative.
    ///
    /// The calculation core accepts any snapshot; this check is applied at the
    /// service boundary so that a corrupted record is reported instead of
    /// producing a compensation below the base salary.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let figures = [
            ("implantados_atual", self.implantados_atual),
            ("current_demand", self.current_demand),
            ("quarterly_revenue", self.quarterly_revenue),
            ("tenure", self.tenure),
            ("unit_revenue", self.unit_revenue),
        ];

        for (field, value) in figures {
            if value.is_some_and(|v| v.is_sign_negative() && !v.is_zero()) {
                return Err(EngineError::InvalidEmployee {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            if value.is_some_and(|v| v > MAX_FIGURE) {
                return Err(EngineError::InvalidEmployee {
                    field: field.to_string(),
                    message: format!("must not exceed {}", MAX_FIGURE),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_max_figure_is_one_quadrillion() {
        assert_eq!(MAX_FIGURE, dec("1000000000000000"));
    }

    #[test]
    fn test_validate_rejects_overflow_scale_figures() {
        let mut employee = Employee::new("emp_001", TierId::SpecialistIntermediate, CareerPath::Specialist);
        employee.implantados_atual = Some(Decimal::MAX);

        let err = employee.validate().unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidEmployee { ref field, .. } if field == "implantados_atual"
        ));

        employee.implantados_atual = Some(MAX_FIGURE);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn test_deserialize_specialist_employee() {
        let json = r#"{
            "id": "emp_001",
            "role": "specialist_intermediate",
            "path": "specialist",
            "implantados_atual": "12000",
            "quarterly_revenue": 30000
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.role, TierId::SpecialistIntermediate);
        assert_eq!(employee.path, CareerPath::Specialist);
        assert_eq!(employee.implantados_atual, Some(dec("12000")));
        assert_eq!(employee.quarterly_revenue, Some(dec("30000")));
        assert_eq!(employee.current_demand, None);
        assert_eq!(employee.team_size, None);
    }

    #[test]
    fn test_deserialize_leadership_employee() {
        let json = r#"{
            "id": "emp_010",
            "name": "Marina",
            "role": "unit_manager",
            "path": "leadership",
            "team_size": 12,
            "promoted_members": 2,
            "unit_revenue": "400000.00",
            "tenure": "6.5"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.name.as_deref(), Some("Marina"));
        assert_eq!(employee.role, TierId::UnitManager);
        assert_eq!(employee.active_team_size(), Some(12));
        assert_eq!(employee.active_promoted_members(), Some(2));
        assert_eq!(employee.active_unit_revenue(), Some(dec("400000.00")));
        assert_eq!(employee.tenure, Some(dec("6.5")));
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let json = r#"{ "id": "emp_001", "path": "specialist" }"#;
        let result: Result<Employee, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_counts_are_treated_as_unset() {
        let mut employee = Employee::new("emp_001", TierId::TechLeader1, CareerPath::Leadership);
        employee.team_size = Some(0);
        employee.promoted_members = Some(0);
        employee.unit_revenue = Some(Decimal::ZERO);

        assert_eq!(employee.active_team_size(), None);
        assert_eq!(employee.active_promoted_members(), None);
        assert_eq!(employee.active_unit_revenue(), None);
    }

    #[test]
    fn test_validate_accepts_empty_snapshot() {
        let employee = Employee::new("emp_001", TierId::SpecialistEntry, CareerPath::Specialist);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_figure() {
        let mut employee = Employee::new("emp_001", TierId::SpecialistEntry, CareerPath::Specialist);
        employee.current_demand = Some(dec("-10"));

        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "current_demand"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let employee = Employee::new("  ", TierId::SpecialistEntry, CareerPath::Specialist);
        assert!(matches!(
            employee.validate(),
            Err(EngineError::InvalidEmployee { .. })
        ));
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let mut employee = Employee::new("emp_001", TierId::TechLeader2, CareerPath::Leadership);
        employee.implantados_atual = Some(dec("55000.50"));

        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
