//! Promotion add-on calculation functionality.

use rust_decimal::Decimal;

use crate::config::PromotionRule;

/// Computes the add-on for `promoted_count` team members promoted in the
/// period: a fixed amount per member.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::compute_promotion_add_on;
/// use commission_engine::config::PromotionRule;
/// use rust_decimal::Decimal;
///
/// let rule = PromotionRule { per_member: Decimal::new(500, 0) };
/// assert_eq!(compute_promotion_add_on(3, &rule), Decimal::new(1500, 0));
/// ```
pub fn compute_promotion_add_on(promoted_count: u32, rule: &PromotionRule) -> Decimal {
    Decimal::from(promoted_count).saturating_mul(rule.per_member)
}
