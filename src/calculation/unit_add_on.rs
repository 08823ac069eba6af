//! Unit add-on calculation functionality.
//!
//! The top leadership tier earns a step add-on on the revenue of the whole
//! business unit. Brackets are scanned from the highest threshold down and
//! the first one the revenue reaches wins.

use rust_decimal::Decimal;

use crate::config::UnitAddOnTable;

/// Returns the add-on of the highest bracket whose threshold does not exceed
/// `unit_revenue`, or zero below the lowest bracket.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::compute_unit_add_on;
/// use commission_engine::config::{UnitAddOnTable, UnitAddOnTier};
/// use rust_decimal::Decimal;
///
/// let table = UnitAddOnTable::new(vec![
///     UnitAddOnTier { threshold: Decimal::new(200_000, 0), amount: Decimal::new(10_000, 0) },
///     UnitAddOnTier { threshold: Decimal::new(350_000, 0), amount: Decimal::new(21_000, 0) },
///     UnitAddOnTier { threshold: Decimal::new(500_000, 0), amount: Decimal::new(30_000, 0) },
/// ]);
///
/// assert_eq!(compute_unit_add_on(Decimal::new(400_000, 0), &table), Decimal::new(21_000, 0));
/// assert_eq!(compute_unit_add_on(Decimal::new(100_000, 0), &table), Decimal::ZERO);
/// ```
pub fn compute_unit_add_on(unit_revenue: Decimal, table: &UnitAddOnTable) -> Decimal {
    table
        .tiers()
        .iter()
        .rev()
        .find(|tier| tier.threshold <= unit_revenue)
        .map(|tier| tier.amount)
        .unwrap_or(Decimal::ZERO)
}
