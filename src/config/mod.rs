//! Configuration loading and management for the Commission Engine.
//!
//! This module provides functionality to load the career plan from YAML
//! files: plan metadata, the role catalog and the leadership bonus rules.
//!
//! # Example
//!
//! ```no_run
//! use commission_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/compensation").unwrap();
//! println!("Loaded plan: {}", config.plan().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BonusEligibility, BonusRules, CompensationConfig, PlanMetadata, PromotionRule, RoleCatalog,
    RoleConfig, RolesConfig, TeamBonusRule, UnitAddOnTable, UnitAddOnTier,
};
