//! Discount installment allocation.
//!
//! A discount is split into equal monthly installments. The first one is due
//! in the month of the discount's creation date and each following one a
//! month later. An installment belongs to a reporting period when its due
//! month shares at least one day with the period.
//!
//! Installment values are kept unrounded so that the installments of a
//! discount always sum back to its total.

use std::ops::Range;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{
    AllocatedDiscount, AuditWarning, Discount, DiscountSummary, Installment, MAX_INSTALLMENTS,
    ReportingPeriod, first_day_of_month, last_day_of_month,
};

/// What to return when no reporting period is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFilterMode {
    /// Every installment of the discount is returned.
    IncludeAll,
    /// Nothing is returned; a period is required to select installments.
    RequireFilter,
}

/// Splits `discount` into installments and keeps those due within `period`.
///
/// A missing or unparseable `created_at` yields no installments. A zero or
/// missing installment count is treated as one and a missing total as zero.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{NoFilterMode, allocate_installments};
/// use commission_engine::models::{Discount, ReportingPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let discount = Discount::new("2024-01-15", 3, Decimal::new(300, 0));
/// let february = ReportingPeriod::month_of(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
///
/// let installments = allocate_installments(&discount, Some(&february), NoFilterMode::RequireFilter);
/// assert_eq!(installments.len(), 1);
/// assert_eq!(installments[0].index, 2);
/// assert_eq!(installments[0].value, Decimal::new(100, 0));
/// ```
pub fn allocate_installments(
    discount: &Discount,
    period: Option<&ReportingPeriod>,
    mode: NoFilterMode,
) -> Vec<Installment> {
    if period.is_none() && mode == NoFilterMode::RequireFilter {
        return Vec::new();
    }

    let Some(anchor) = discount.anchor_date() else {
        warn!(
            discount_id = ?discount.id,
            created_at = ?discount.created_at,
            "Discount has no usable creation date, skipping"
        );
        return Vec::new();
    };

    if discount.has_excessive_installments() {
        warn!(
            discount_id = ?discount.id,
            installments_count = ?discount.installments_count,
            max = MAX_INSTALLMENTS,
            "Discount exceeds the installment limit, skipping"
        );
        return Vec::new();
    }

    let total_installments = discount.effective_installments();
    let total_value = discount.effective_total();
    let value = total_value / Decimal::from(total_installments);
    let first_month = first_day_of_month(anchor);

    let installments: Vec<Installment> = offset_window(first_month, total_installments, period)
        .filter_map(|offset| {
            let due_month = first_month.checked_add_months(Months::new(offset))?;
            let in_period = period.is_none_or(|period| {
                period.overlaps(due_month, last_day_of_month(due_month))
            });

            in_period.then(|| Installment {
                index: offset + 1,
                total_installments,
                value,
                total_value,
                due_month,
            })
        })
        .collect();

    debug!(
        discount_id = ?discount.id,
        total_installments,
        selected = installments.len(),
        "Allocated discount installments"
    );

    installments
}

/// Offsets of the installments that can fall within `period`.
///
/// Without a period every offset is returned. With one, only the months from
/// the period's start month through its end month are visited, clamped to
/// the plan length.
fn offset_window(
    first_month: NaiveDate,
    total_installments: u32,
    period: Option<&ReportingPeriod>,
) -> Range<u32> {
    let Some(period) = period else {
        return 0..total_installments;
    };

    let base = month_index(first_month);
    let first = (month_index(period.start_date) - base).max(0);
    let last = (month_index(period.end_date) - base).min(i64::from(total_installments) - 1);
    if first > last {
        return 0..0;
    }

    match (u32::try_from(first), u32::try_from(last)) {
        (Ok(first), Ok(last)) => first..last.saturating_add(1),
        _ => 0..0,
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Sums the installments of every discount that fall within `period`.
///
/// Without a period nothing is deducted. A malformed discount only drops its
/// own installments.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::sum_discounts;
/// use commission_engine::models::{Discount, ReportingPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let discounts = vec![
///     Discount::new("2024-01-15", 3, Decimal::new(300, 0)),
///     Discount::new("2024-02-03", 1, Decimal::new(50, 0)),
/// ];
/// let february = ReportingPeriod::month_of(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
///
/// assert_eq!(sum_discounts(&discounts, Some(&february)), Decimal::new(150, 0));
/// assert_eq!(sum_discounts(&discounts, None), Decimal::ZERO);
/// ```
pub fn sum_discounts(discounts: &[Discount], period: Option<&ReportingPeriod>) -> Decimal {
    discounts
        .iter()
        .flat_map(|discount| allocate_installments(discount, period, NoFilterMode::RequireFilter))
        .map(|installment| installment.value)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Groups the installments due within `period` by discount.
///
/// Discounts with no installment in the period are left out. The summary
/// total equals [`sum_discounts`] for the same inputs.
pub fn summarize_discounts(
    discounts: &[Discount],
    period: Option<&ReportingPeriod>,
) -> DiscountSummary {
    let allocated: Vec<AllocatedDiscount> = discounts
        .iter()
        .filter_map(|discount| {
            let installments =
                allocate_installments(discount, period, NoFilterMode::RequireFilter);
            if installments.is_empty() {
                return None;
            }

            let amount = installments
                .iter()
                .map(|i| i.value)
                .fold(Decimal::ZERO, Decimal::saturating_add);
            Some(AllocatedDiscount {
                discount_id: discount.id.clone(),
                description: discount.description.clone(),
                installments,
                amount,
            })
        })
        .collect();

    let total = allocated
        .iter()
        .map(|d| d.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    DiscountSummary {
        period: period.copied(),
        discounts: allocated,
        total,
    }
}

/// Reports discounts that were dropped or degraded during allocation.
///
/// Covers an unreadable creation date, an installment count above
/// [`MAX_INSTALLMENTS`] and a negative total, which is deducted as zero.
pub fn discount_warnings(discounts: &[Discount]) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    for discount in discounts {
        let name = discount.id.as_deref().unwrap_or("<unnamed>");

        if discount.anchor_date().is_none() {
            warnings.push(AuditWarning {
                code: "UNPARSEABLE_DISCOUNT_DATE".to_string(),
                message: format!(
                    "Discount {} has no usable created_at ({:?}); no installments deducted",
                    name,
                    discount.created_at.as_deref().unwrap_or("")
                ),
                severity: "warning".to_string(),
            });
        } else if discount.has_excessive_installments() {
            warnings.push(AuditWarning {
                code: "EXCESSIVE_INSTALLMENTS".to_string(),
                message: format!(
                    "Discount {} has {} installments, above the limit of {}; no installments deducted",
                    name,
                    discount.effective_installments(),
                    MAX_INSTALLMENTS
                ),
                severity: "warning".to_string(),
            });
        }

        if discount.has_negative_total() {
            warnings.push(AuditWarning {
                code: "NEGATIVE_DISCOUNT_TOTAL".to_string(),
                message: format!("Discount {} has a negative total; deducted as zero", name),
                severity: "warning".to_string(),
            });
        }
    }

    warnings
}
