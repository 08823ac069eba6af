//! Team bonus calculation functionality.
//!
//! Team leaders earn a bonus that grows linearly with the average
//! performance of their team, from the rule's floor at 0% to its ceiling at
//! 100% or above.

use rust_decimal::Decimal;

use crate::config::TeamBonusRule;

use super::round_currency;

/// Computes the team bonus for a team of `team_size` people whose average
/// performance is `average_performance` percent.
///
/// An empty team earns nothing. The performance is clamped into 0..=100.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::compute_team_bonus;
/// use commission_engine::config::TeamBonusRule;
/// use rust_decimal::Decimal;
///
/// let rule = TeamBonusRule {
///     floor: Decimal::new(1000, 0),
///     ceiling: Decimal::new(3000, 0),
///     assumed_average_performance: Decimal::new(80, 0),
/// };
///
/// assert_eq!(compute_team_bonus(5, Decimal::new(50, 0), &rule), Decimal::new(2000, 0));
/// assert_eq!(compute_team_bonus(5, Decimal::new(140, 0), &rule), Decimal::new(3000, 0));
/// assert_eq!(compute_team_bonus(0, Decimal::new(50, 0), &rule), Decimal::ZERO);
/// ```
pub fn compute_team_bonus(
    team_size: u32,
    average_performance: Decimal,
    rule: &TeamBonusRule,
) -> Decimal {
    if team_size == 0 {
        return Decimal::ZERO;
    }

    let performance = average_performance.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let bonus = rule.floor + (rule.ceiling - rule.floor) * performance / Decimal::ONE_HUNDRED;
    round_currency(bonus)
}
