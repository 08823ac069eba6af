//! Calculation result models for the Commission Engine.
//!
//! This module contains the [`Compensation`] breakdown, the discount summary
//! for a reporting period, and the [`CompensationResult`] returned by the
//! calculation service together with its audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Installment, ReportingPeriod, TierId};

/// Retention/promotion standing derived from quarterly revenue.
///
/// # Example
///
/// ```
/// use commission_engine::models::PerformanceStatus;
///
/// let json = serde_json::to_string(&PerformanceStatus::EligiblePromotion).unwrap();
/// assert_eq!(json, "\"eligible_promotion\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    /// Revenue reached the promotion threshold.
    EligiblePromotion,
    /// Revenue fell below the retention threshold.
    AtRisk,
    /// Neither of the above.
    Safe,
}

/// Monetary breakdown of an employee's pay for one calculation.
///
/// `total` always equals the sum of the five components; build values with
/// [`Compensation::from_components`] to keep it that way.
///
/// # Example
///
/// ```
/// use commission_engine::models::Compensation;
/// use rust_decimal::Decimal;
///
/// let compensation = Compensation::from_components(
///     Decimal::new(3000, 0),
///     Decimal::new(600, 0),
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::ZERO,
/// );
/// assert_eq!(compensation.total, Decimal::new(3600, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compensation {
    /// Fixed monthly salary of the role.
    pub base_salary: Decimal,
    /// Commission on the month's performance metric.
    pub variable_pay: Decimal,
    /// Leadership bonus scaled by the team's average performance.
    pub team_bonus: Decimal,
    /// Leadership add-on per promoted team member.
    pub promotion_add_on: Decimal,
    /// Add-on for the unit's revenue bracket.
    pub unit_add_on: Decimal,
    /// Sum of all components.
    pub total: Decimal,
}

impl Compensation {
    /// Builds a breakdown from its components, deriving the total.
    pub fn from_components(
        base_salary: Decimal,
        variable_pay: Decimal,
        team_bonus: Decimal,
        promotion_add_on: Decimal,
        unit_add_on: Decimal,
    ) -> Self {
        Self {
            base_salary,
            variable_pay,
            team_bonus,
            promotion_add_on,
            unit_add_on,
            total: [variable_pay, team_bonus, promotion_add_on, unit_add_on]
                .into_iter()
                .fold(base_salary, Decimal::saturating_add),
        }
    }

    /// Sum of the three leadership bonuses.
    pub fn bonuses(&self) -> Decimal {
        self.team_bonus
            .saturating_add(self.promotion_add_on)
            .saturating_add(self.unit_add_on)
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data that was degraded rather than rejected, such as a
/// discount whose creation date could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The installments of one discount that fall inside a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedDiscount {
    /// Identifier of the source discount, when it had one.
    pub discount_id: Option<String>,
    /// Description of the source discount.
    pub description: Option<String>,
    /// Installments due in the period.
    pub installments: Vec<Installment>,
    /// Sum of the installments' values.
    pub amount: Decimal,
}

/// Discounts deducted for a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSummary {
    /// The period the installments were selected for, if any.
    pub period: Option<ReportingPeriod>,
    /// One entry per discount with at least one installment in the period.
    pub discounts: Vec<AllocatedDiscount>,
    /// Sum of every allocated amount.
    pub total: Decimal,
}

impl DiscountSummary {
    /// A summary with nothing deducted.
    pub fn empty(period: Option<ReportingPeriod>) -> Self {
        Self {
            period,
            discounts: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

/// The complete result of a compensation calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Code of the career plan the rules came from.
    pub plan_code: String,
    /// Version of the career plan the rules came from.
    pub plan_version: String,
    /// Currency all amounts are denominated in.
    pub currency: String,
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The tier the compensation was computed for.
    pub role: TierId,
    /// The reporting period used to select discounts.
    pub period: Option<ReportingPeriod>,
    /// Gross compensation breakdown.
    pub compensation: Compensation,
    /// Retention/promotion standing from quarterly revenue.
    pub performance_status: PerformanceStatus,
    /// Discounts deducted in the period.
    pub discounts: DiscountSummary,
    /// `compensation.total` minus `discounts.total`.
    pub net_pay: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
