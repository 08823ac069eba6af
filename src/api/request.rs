//! Request types for the Commission Engine API.
//!
//! This module defines the JSON request structures for the `/compensation`
//! and `/discounts/allocate` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::NoFilterMode;
use crate::error::{EngineError, EngineResult};
use crate::models::{Discount, Employee, MAX_FIGURE, MAX_INSTALLMENTS, ReportingPeriod};

/// Request body for the `/compensation` endpoint.
///
/// The reporting period selects which discount installments are deducted.
/// When it is absent the calendar month of `today` is used; with neither
/// field nothing is deducted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationRequest {
    /// The employee snapshot.
    pub employee: Employee,
    /// Discounts recorded against the employee.
    #[serde(default)]
    pub discounts: Vec<Discount>,
    /// Explicit reporting period.
    #[serde(default)]
    pub period: Option<ReportingPeriod>,
    /// The caller's current date, used to default the period to its month.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Average team performance percentage for the team bonus.
    #[serde(default)]
    pub average_team_performance: Option<Decimal>,
}

impl CompensationRequest {
    /// Returns the period discounts are selected for.
    pub fn reporting_period(&self) -> Option<ReportingPeriod> {
        self.period
            .or_else(|| self.today.map(ReportingPeriod::month_of))
    }

    /// Checks the request against the rules serde cannot express.
    pub fn validate(&self) -> EngineResult<()> {
        self.employee.validate()?;
        validate_period(self.period.as_ref())?;
        for (index, discount) in self.discounts.iter().enumerate() {
            validate_discount(&format!("discounts[{}]", index), discount)?;
        }

        if self
            .average_team_performance
            .is_some_and(|value| value.is_sign_negative() && !value.is_zero())
        {
            return Err(EngineError::InvalidRequest {
                field: "average_team_performance".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        Ok(())
    }
}

/// Request body for the `/discounts/allocate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// The discount to split into installments.
    pub discount: Discount,
    /// Period the installments are selected for.
    #[serde(default)]
    pub period: Option<ReportingPeriod>,
    /// Without a period, return every installment instead of none.
    #[serde(default)]
    pub include_all_without_period: bool,
}

impl AllocationRequest {
    /// Returns how a missing period is handled.
    pub fn no_filter_mode(&self) -> NoFilterMode {
        if self.include_all_without_period {
            NoFilterMode::IncludeAll
        } else {
            NoFilterMode::RequireFilter
        }
    }

    /// Checks the request against the rules serde cannot express.
    pub fn validate(&self) -> EngineResult<()> {
        validate_period(self.period.as_ref())?;
        validate_discount("discount", &self.discount)
    }
}

/// Rejects installment plans and totals too large to allocate.
///
/// A negative total is accepted here; allocation deducts it as zero and
/// reports it.
fn validate_discount(field: &str, discount: &Discount) -> EngineResult<()> {
    if discount.has_excessive_installments() {
        return Err(EngineError::InvalidRequest {
            field: format!("{}.installments_count", field),
            message: format!("must not exceed {}", MAX_INSTALLMENTS),
        });
    }

    if discount.total_amount.is_some_and(|total| total.abs() > MAX_FIGURE) {
        return Err(EngineError::InvalidRequest {
            field: format!("{}.total_amount", field),
            message: format!("must not exceed {} in magnitude", MAX_FIGURE),
        });
    }

    Ok(())
}

fn validate_period(period: Option<&ReportingPeriod>) -> EngineResult<()> {
    match period {
        Some(period) if period.is_inverted() => Err(EngineError::InvalidRequest {
            field: "period".to_string(),
            message: format!(
                "start_date {} is after end_date {}",
                period.start_date, period.end_date
            ),
        }),
        _ => Ok(()),
    }
}
