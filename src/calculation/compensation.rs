//! Compensation calculation.
//!
//! Orchestrates the per-component rules into a [`Compensation`] breakdown.
//! Leadership bonuses are dispatched on the employee's [`CareerPath`]: a
//! specialist never earns one, a leader earns those the role's
//! [`BonusEligibility`](crate::config::BonusEligibility) allows and whose
//! input figure is set on the snapshot.

use rust_decimal::Decimal;

use crate::config::{BonusRules, RoleConfig};
use crate::models::{AuditStep, CareerPath, Compensation, Employee, PerformanceStatus};

use super::performance_status::role_performance_status;
use super::variable_pay::{VariablePayMode, calculate_variable_pay};
use super::{compute_promotion_add_on, compute_team_bonus, compute_unit_add_on};

/// The result of a compensation calculation, including the audit steps.
#[derive(Debug, Clone)]
pub struct CompensationCalculation {
    /// The monetary breakdown.
    pub compensation: Compensation,
    /// Quarterly standing of the employee against the role's goals.
    pub performance_status: PerformanceStatus,
    /// The variable pay algorithm that was used.
    pub variable_pay_mode: VariablePayMode,
    /// Audit steps in the order the rules were applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Leadership bonus amounts for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LeadershipBonuses {
    team_bonus: Decimal,
    promotion_add_on: Decimal,
    unit_add_on: Decimal,
}

impl LeadershipBonuses {
    const NONE: Self = Self {
        team_bonus: Decimal::ZERO,
        promotion_add_on: Decimal::ZERO,
        unit_add_on: Decimal::ZERO,
    };
}

/// Computes the compensation of `employee` under `role`.
///
/// Uses the rules' assumed average team performance for the team bonus.
/// Never fails: missing figures contribute zero.
///
/// # Examples
///
/// ```no_run
/// use commission_engine::calculation::compute_compensation;
/// use commission_engine::config::ConfigLoader;
/// use commission_engine::models::{CareerPath, Employee, TierId};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/compensation").unwrap();
/// let role = loader.get_role(TierId::SpecialistIntermediate).unwrap();
///
/// let mut employee = Employee::new("emp_001", TierId::SpecialistIntermediate, CareerPath::Specialist);
/// employee.implantados_atual = Some(Decimal::new(16_000, 0));
///
/// let compensation = compute_compensation(&employee, role, loader.bonuses());
/// assert_eq!(compensation.total, Decimal::new(3_800, 0));
/// ```
pub fn compute_compensation(
    employee: &Employee,
    role: &RoleConfig,
    rules: &BonusRules,
) -> Compensation {
    calculate_compensation(employee, role, rules, None, 1).compensation
}

/// Calculates the compensation of `employee` under `role`, recording each
/// rule application.
///
/// # Arguments
///
/// * `employee` - The performance snapshot
/// * `role` - The rules of the employee's tier
/// * `rules` - The leadership bonus rules
/// * `average_team_performance` - Average team performance percentage for the
///   team bonus; `None` uses the rules' assumed average
/// * `step_number_start` - The starting step number for audit trail sequencing
pub fn calculate_compensation(
    employee: &Employee,
    role: &RoleConfig,
    rules: &BonusRules,
    average_team_performance: Option<Decimal>,
    step_number_start: u32,
) -> CompensationCalculation {
    let mut step_number = step_number_start;
    let mut audit_steps = Vec::with_capacity(4);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary".to_string(),
        input: serde_json::json!({
            "role": role.id,
            "role_name": role.name
        }),
        output: serde_json::json!({
            "amount": role.base_salary.to_string()
        }),
        reasoning: format!("Base salary of '{}' is ${}", role.id, role.base_salary),
    });
    step_number += 1;

    let variable = calculate_variable_pay(employee, role, step_number);
    audit_steps.push(variable.audit_step);
    step_number += 1;

    let average_performance =
        average_team_performance.unwrap_or(rules.team_bonus.assumed_average_performance);
    let bonuses = leadership_bonuses(employee, role, rules, average_performance);
    audit_steps.push(leadership_bonus_step(
        employee,
        role,
        average_performance,
        bonuses,
        step_number,
    ));
    step_number += 1;

    let revenue = employee.quarterly_revenue.unwrap_or(Decimal::ZERO);
    let performance_status = role_performance_status(role, revenue);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "performance_status".to_string(),
        rule_name: "Quarterly Performance Status".to_string(),
        input: serde_json::json!({
            "quarterly_revenue": revenue.to_string(),
            "quarterly_stay": role.quarterly_stay.map(|v| v.to_string()),
            "quarterly_promotion": role.quarterly_promotion.map(|v| v.to_string())
        }),
        output: serde_json::json!({ "status": performance_status }),
        reasoning: format!(
            "Quarterly revenue ${} classifies as {:?}",
            revenue, performance_status
        ),
    });

    let compensation = Compensation::from_components(
        role.base_salary,
        variable.amount,
        bonuses.team_bonus,
        bonuses.promotion_add_on,
        bonuses.unit_add_on,
    );

    CompensationCalculation {
        compensation,
        performance_status,
        variable_pay_mode: variable.mode,
        audit_steps,
    }
}

fn leadership_bonuses(
    employee: &Employee,
    role: &RoleConfig,
    rules: &BonusRules,
    average_performance: Decimal,
) -> LeadershipBonuses {
    let eligibility = match employee.path {
        CareerPath::Specialist => return LeadershipBonuses::NONE,
        CareerPath::Leadership => role.bonuses,
    };

    let team_bonus = employee
        .active_team_size()
        .filter(|_| eligibility.team_bonus)
        .map(|size| compute_team_bonus(size, average_performance, &rules.team_bonus))
        .unwrap_or(Decimal::ZERO);

    let promotion_add_on = employee
        .active_promoted_members()
        .filter(|_| eligibility.promotion_add_on)
        .map(|count| compute_promotion_add_on(count, &rules.promotion))
        .unwrap_or(Decimal::ZERO);

    let unit_add_on = employee
        .active_unit_revenue()
        .filter(|_| eligibility.unit_add_on)
        .map(|revenue| compute_unit_add_on(revenue, &rules.unit_add_on))
        .unwrap_or(Decimal::ZERO);

    LeadershipBonuses {
        team_bonus,
        promotion_add_on,
        unit_add_on,
    }
}

fn leadership_bonus_step(
    employee: &Employee,
    role: &RoleConfig,
    average_performance: Decimal,
    bonuses: LeadershipBonuses,
    step_number: u32,
) -> AuditStep {
    let reasoning = match employee.path {
        CareerPath::Specialist => {
            "Specialist path - not eligible for leadership bonuses".to_string()
        }
        CareerPath::Leadership => format!(
            "Team bonus ${} + promotion add-on ${} + unit add-on ${}",
            bonuses.team_bonus, bonuses.promotion_add_on, bonuses.unit_add_on
        ),
    };

    AuditStep {
        step_number,
        rule_id: "leadership_bonuses".to_string(),
        rule_name: "Leadership Bonuses".to_string(),
        input: serde_json::json!({
            "path": employee.path,
            "eligibility": role.bonuses,
            "team_size": employee.team_size,
            "average_team_performance": average_performance.to_string(),
            "promoted_members": employee.promoted_members,
            "unit_revenue": employee.unit_revenue.map(|v| v.to_string())
        }),
        output: serde_json::json!({
            "team_bonus": bonuses.team_bonus.to_string(),
            "promotion_add_on": bonuses.promotion_add_on.to_string(),
            "unit_add_on": bonuses.unit_add_on.to_string()
        }),
        reasoning,
    }
}
