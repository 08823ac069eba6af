//! Variable pay calculation functionality.
//!
//! This module turns a role's demand bounds and variable percentage range
//! into the commission on a monthly performance metric.
//!
//! ## Modes
//!
//! - **Tiered threshold** (primary): used when the employee has realized
//!   production. The percentage is `variable_max` once the metric reaches
//!   `demand_max` and `variable_min` below it. Never interpolated.
//! - **Linear interpolation** (fallback): used with the legacy
//!   `current_demand` figure. The percentage slides from `variable_min` at
//!   `demand_min` to `variable_max` at `demand_max`.
//!
//! In both modes the percentage is applied to the raw metric, not to the
//! value clamped into the demand bounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RoleConfig;
use crate::models::{AuditStep, Employee};

use super::round_currency;

/// The algorithm used to pick the variable percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariablePayMode {
    /// Percentage interpolated between the demand bounds.
    LinearInterpolation,
    /// Percentage fixed at one of the two range ends.
    TieredThreshold,
}

/// The result of a variable pay calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct VariablePayResult {
    /// The mode selected for the employee.
    pub mode: VariablePayMode,
    /// The metric the percentage was applied to.
    pub metric: Decimal,
    /// The applied percentage, or `None` when the role has no demand bounds.
    pub percentage: Option<Decimal>,
    /// The variable pay amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Picks the mode and metric for an employee.
///
/// Non-zero realized production selects the tiered mode on that figure;
/// otherwise the linear mode runs on `current_demand` (zero when absent).
pub fn select_variable_pay_mode(employee: &Employee) -> (VariablePayMode, Decimal) {
    match employee.realized_production() {
        Some(production) => (VariablePayMode::TieredThreshold, production),
        None => (
            VariablePayMode::LinearInterpolation,
            employee.current_demand.unwrap_or(Decimal::ZERO),
        ),
    }
}

/// Returns the variable percentage (0-100) for `metric`, or `None` when the
/// role has no demand bounds.
///
/// When `demand_min == demand_max` the linear mode has no slope to follow and
/// saturates to `variable_max`.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{VariablePayMode, variable_percentage};
/// use commission_engine::config::{BonusEligibility, RoleConfig};
/// use commission_engine::models::{CareerPath, TierId};
/// use rust_decimal::Decimal;
///
/// let role = RoleConfig {
///     id: TierId::SpecialistIntermediate,
///     name: "Intermediate Specialist".to_string(),
///     path: CareerPath::Specialist,
///     base_salary: Decimal::new(3000, 0),
///     variable_min: Decimal::new(3, 0),
///     variable_max: Decimal::new(5, 0),
///     demand_min: Some(Decimal::new(7000, 0)),
///     demand_max: Some(Decimal::new(15000, 0)),
///     quarterly_stay: None,
///     quarterly_promotion: None,
///     bonuses: BonusEligibility::default(),
/// };
///
/// let halfway = Decimal::new(11000, 0);
/// assert_eq!(
///     variable_percentage(&role, halfway, VariablePayMode::LinearInterpolation),
///     Some(Decimal::new(4, 0))
/// );
/// assert_eq!(
///     variable_percentage(&role, halfway, VariablePayMode::TieredThreshold),
///     Some(Decimal::new(3, 0))
/// );
/// ```
pub fn variable_percentage(
    role: &RoleConfig,
    metric: Decimal,
    mode: VariablePayMode,
) -> Option<Decimal> {
    let (demand_min, demand_max) = role.demand_bounds()?;

    let percentage = match mode {
        VariablePayMode::TieredThreshold => {
            if metric >= demand_max {
                role.variable_max
            } else {
                role.variable_min
            }
        }
        VariablePayMode::LinearInterpolation => {
            let span = demand_max - demand_min;
            if span <= Decimal::ZERO {
                role.variable_max
            } else {
                let clamped = metric.clamp(demand_min, demand_max);
                let progress = (clamped - demand_min) / span;
                role.variable_min + (role.variable_max - role.variable_min) * progress
            }
        }
    };

    Some(percentage)
}

/// Computes the variable pay for `metric` under `mode`.
///
/// Returns zero when the role has no demand bounds or when the amount cannot
/// be represented. The amount is rounded to cents and never negative.
pub fn compute_variable_pay(role: &RoleConfig, metric: Decimal, mode: VariablePayMode) -> Decimal {
    let Some(percentage) = variable_percentage(role, metric, mode) else {
        return Decimal::ZERO;
    };

    let amount = metric
        .checked_mul(percentage)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .or_else(|| (percentage / Decimal::ONE_HUNDRED).checked_mul(metric));

    match amount {
        Some(amount) => round_currency(amount).max(Decimal::ZERO),
        None => {
            warn!(%metric, %percentage, "Variable pay overflows, paying zero");
            Decimal::ZERO
        }
    }
}

/// Calculates the variable pay of an employee, selecting the mode from the
/// figures present on the snapshot.
pub fn calculate_variable_pay(
    employee: &Employee,
    role: &RoleConfig,
    step_number: u32,
) -> VariablePayResult {
    let (mode, metric) = select_variable_pay_mode(employee);
    let percentage = variable_percentage(role, metric, mode);
    let amount = compute_variable_pay(role, metric, mode);

    let reasoning = match percentage {
        Some(percentage) => format!(
            "{:?} mode: {}% of {} = ${}",
            mode,
            percentage.normalize(),
            metric.normalize(),
            amount
        ),
        None => format!(
            "Role '{}' has no demand bounds - no variable pay",
            role.id
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "variable_pay".to_string(),
        rule_name: "Variable Pay".to_string(),
        input: serde_json::json!({
            "role": role.id,
            "mode": mode,
            "metric": metric.normalize().to_string(),
            "demand_min": role.demand_min.map(|d| d.normalize().to_string()),
            "demand_max": role.demand_max.map(|d| d.normalize().to_string()),
            "variable_min": role.variable_min.normalize().to_string(),
            "variable_max": role.variable_max.normalize().to_string()
        }),
        output: serde_json::json!({
            "percentage": percentage.map(|p| p.normalize().to_string()),
            "amount": amount.to_string()
        }),
        reasoning,
    };

    VariablePayResult {
        mode,
        metric,
        percentage,
        amount,
        audit_step,
    }
}
