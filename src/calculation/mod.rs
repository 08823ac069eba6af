//! Calculation logic for the Commission Engine.
//!
//! This module contains the pure calculation functions: variable pay in its
//! tiered and linear modes, the leadership bonuses (team bonus, promotion
//! add-on, unit add-on), the quarterly performance status, the compensation
//! orchestration, and discount installment allocation.

mod compensation;
mod installments;
mod performance_status;
mod promotion_add_on;
mod team_bonus;
mod unit_add_on;
mod variable_pay;

use rust_decimal::{Decimal, RoundingStrategy};

pub use compensation::{CompensationCalculation, calculate_compensation, compute_compensation};
pub use installments::{
    NoFilterMode, allocate_installments, discount_warnings, sum_discounts, summarize_discounts,
};
pub use performance_status::{get_performance_status, role_performance_status};
pub use promotion_add_on::compute_promotion_add_on;
pub use team_bonus::compute_team_bonus;
pub use unit_add_on::compute_unit_add_on;
pub use variable_pay::{
    VariablePayMode, VariablePayResult, calculate_variable_pay, compute_variable_pay,
    select_variable_pay_mode, variable_percentage,
};

/// Rounds a monetary amount to cents, half away from zero, keeping two
/// decimal places in its representation.
pub(crate) fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
