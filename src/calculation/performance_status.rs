//! Quarterly performance status.
//!
//! Classifies quarterly revenue against a role's retention and promotion
//! goals. The promotion check runs first, so it wins if a misconfigured role
//! has a stay goal above its promotion goal.

use rust_decimal::Decimal;

use crate::config::RoleConfig;
use crate::models::PerformanceStatus;

/// Classifies `revenue` against optional stay and promotion thresholds.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::get_performance_status;
/// use commission_engine::models::PerformanceStatus;
/// use rust_decimal::Decimal;
///
/// let stay = Some(Decimal::new(21_000, 0));
/// let promotion = Some(Decimal::new(45_000, 0));
///
/// assert_eq!(
///     get_performance_status(Decimal::new(50_000, 0), stay, promotion),
///     PerformanceStatus::EligiblePromotion
/// );
/// assert_eq!(
///     get_performance_status(Decimal::new(15_000, 0), stay, promotion),
///     PerformanceStatus::AtRisk
/// );
/// ```
pub fn get_performance_status(
    revenue: Decimal,
    stay_threshold: Option<Decimal>,
    promotion_threshold: Option<Decimal>,
) -> PerformanceStatus {
    if promotion_threshold.is_some_and(|threshold| revenue >= threshold) {
        PerformanceStatus::EligiblePromotion
    } else if stay_threshold.is_some_and(|threshold| revenue < threshold) {
        PerformanceStatus::AtRisk
    } else {
        PerformanceStatus::Safe
    }
}

/// Classifies `revenue` against the quarterly goals of `role`.
pub fn role_performance_status(role: &RoleConfig, revenue: Decimal) -> PerformanceStatus {
    get_performance_status(revenue, role.quarterly_stay, role.quarterly_promotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn status(revenue: &str) -> PerformanceStatus {
        get_performance_status(dec(revenue), Some(dec("21000")), Some(dec("45000")))
    }

    /// PS-001: the three documented cases
    #[test]
    fn test_status_for_documented_cases() {
        assert_eq!(status("50000"), PerformanceStatus::EligiblePromotion);
        assert_eq!(status("15000"), PerformanceStatus::AtRisk);
        assert_eq!(status("30000"), PerformanceStatus::Safe);
    }

    #[test]
    fn test_status_on_thresholds() {
        assert_eq!(status("45000"), PerformanceStatus::EligiblePromotion);
        assert_eq!(status("21000"), PerformanceStatus::Safe);
        assert_eq!(status("20999.99"), PerformanceStatus::AtRisk);
    }

    #[test]
    fn test_no_thresholds_is_safe() {
        assert_eq!(
            get_performance_status(Decimal::ZERO, None, None),
            PerformanceStatus::Safe
        );
    }

    #[test]
    fn test_only_stay_threshold() {
        assert_eq!(
            get_performance_status(dec("1000000"), Some(dec("21000")), None),
            PerformanceStatus::Safe
        );
        assert_eq!(
            get_performance_status(dec("100"), Some(dec("21000")), None),
            PerformanceStatus::AtRisk
        );
    }

    #[test]
    fn test_promotion_wins_over_inverted_stay_threshold() {
        // stay above promotion cannot come from a validated catalog
        assert_eq!(
            get_performance_status(dec("30000"), Some(dec("40000")), Some(dec("25000"))),
            PerformanceStatus::EligiblePromotion
        );
    }
}
