//! Discount and installment models.
//!
//! A [`Discount`] is a lump-sum advance or deduction as supplied by the
//! discount source. Raw records are accepted leniently: a bad field only
//! degrades that record, it never rejects a whole batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Largest installment plan accepted: fifty years of monthly installments.
pub const MAX_INSTALLMENTS: u32 = 600;

/// Timestamp layouts accepted for `created_at` besides plain dates and RFC 3339.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A lump-sum discount repaid in monthly installments.
///
/// # Example
///
/// ```
/// use commission_engine::models::Discount;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let discount: Discount = serde_json::from_str(r#"{
///     "created_at": "2024-01-15T10:30:00Z",
///     "installments_count": "3",
///     "total_amount": 300
/// }"#).unwrap();
///
/// assert_eq!(discount.anchor_date(), NaiveDate::from_ymd_opt(2024, 1, 15));
/// assert_eq!(discount.effective_installments(), 3);
/// assert_eq!(discount.effective_total(), Decimal::new(300, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Identifier of the discount record.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee the discount belongs to.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Free-text reason for the discount.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw creation timestamp; the first installment falls in its month.
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    /// Number of monthly installments.
    #[serde(default, deserialize_with = "lenient_count")]
    pub installments_count: Option<u32>,
    /// Total amount to be repaid.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_amount: Option<Decimal>,
}

impl Discount {
    /// Creates a discount anchored on `created_at`.
    pub fn new(created_at: impl Into<String>, installments_count: u32, total_amount: Decimal) -> Self {
        Self {
            created_at: Some(created_at.into()),
            installments_count: Some(installments_count),
            total_amount: Some(total_amount),
            ..Self::default()
        }
    }

    /// Parses `created_at` into the anchor date.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date is taken in the
    /// timestamp's own offset) and naive `YYYY-MM-DDTHH:MM:SS` timestamps.
    /// Returns `None` when the field is missing or unparseable.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.date_naive());
        }

        NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|timestamp| timestamp.date())
    }

    /// Number of installments, with zero or missing treated as one.
    pub fn effective_installments(&self) -> u32 {
        match self.installments_count {
            Some(count) if count > 0 => count,
            _ => 1,
        }
    }

    /// Returns true when the installment count exceeds [`MAX_INSTALLMENTS`].
    pub fn has_excessive_installments(&self) -> bool {
        self.effective_installments() > MAX_INSTALLMENTS
    }

    /// Total amount, with a missing, non-numeric or negative value treated
    /// as zero.
    pub fn effective_total(&self) -> Decimal {
        self.total_amount
            .filter(|total| !total.is_sign_negative())
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true when a negative total was supplied.
    pub fn has_negative_total(&self) -> bool {
        self.total_amount
            .is_some_and(|total| total.is_sign_negative() && !total.is_zero())
    }
}

/// One monthly slice of a [`Discount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Position of the installment, starting at 1.
    pub index: u32,
    /// Number of installments the discount is split into.
    pub total_installments: u32,
    /// Amount due for this installment.
    pub value: Decimal,
    /// Total amount of the discount.
    pub total_value: Decimal,
    /// First day of the month the installment is due in.
    pub due_month: NaiveDate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(Decimal),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Other(IgnoredAny),
}

/// Reads a number or numeric string; anything else becomes `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(value) => Some(value),
        LenientNumber::Other(_) => None,
    })
}

/// Reads a non-negative whole count; fractions are truncated, anything
/// unrepresentable becomes `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_decimal(deserializer)?.and_then(|value| value.trunc().to_u32()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientText::deserialize(deserializer)? {
        LenientText::Text(value) => Some(value),
        LenientText::Other(_) => None,
    })
}
