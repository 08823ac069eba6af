//! Commission Engine for sales career plans
//!
//! This crate computes the monthly compensation of salespeople on a tiered
//! career plan (base salary, variable pay and leadership bonuses), classifies
//! their quarterly performance, and spreads lump-sum discounts into monthly
//! installments that are deducted from the pay of a reporting period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
