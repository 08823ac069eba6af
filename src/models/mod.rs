//! Core data models for the Commission Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod discount;
mod employee;
mod period;
mod tier;

pub use calculation_result::{
    AllocatedDiscount, AuditStep, AuditTrace, AuditWarning, Compensation, CompensationResult,
    DiscountSummary, PerformanceStatus,
};
pub use discount::{Discount, Installment, MAX_INSTALLMENTS};
pub use employee::{Employee, MAX_FIGURE};
pub use period::{ReportingPeriod, first_day_of_month, last_day_of_month};
pub use tier::{CareerPath, TierId};
