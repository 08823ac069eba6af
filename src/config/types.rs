//! Configuration types for the career plan.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CareerPath, TierId};

/// Metadata about the career plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanMetadata {
    /// Short code of the plan (e.g., "SALES-2024").
    pub code: String,
    /// The human-readable name of the plan.
    pub name: String,
    /// The version or effective date of the plan.
    pub version: String,
    /// ISO currency code all amounts are denominated in.
    pub currency: String,
}

/// Which leadership bonuses a role can earn.
///
/// Only consulted for employees on the leadership path; a specialist never
/// earns a bonus whatever these flags say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEligibility {
    /// Team bonus scaled by average team performance.
    #[serde(default)]
    pub team_bonus: bool,
    /// Fixed add-on per promoted team member.
    #[serde(default)]
    pub promotion_add_on: bool,
    /// Step add-on on the unit's revenue.
    #[serde(default)]
    pub unit_add_on: bool,
}

/// Compensation rules of one career tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// The tier these rules belong to.
    pub id: TierId,
    /// The human-readable name of the tier.
    pub name: String,
    /// The career track of the tier.
    pub path: CareerPath,
    /// Fixed monthly salary.
    pub base_salary: Decimal,
    /// Variable percentage paid at or below the lower demand bound.
    pub variable_min: Decimal,
    /// Variable percentage paid at or above the upper demand bound.
    pub variable_max: Decimal,
    /// Lower monthly demand bound. Absent means no variable pay.
    #[serde(default)]
    pub demand_min: Option<Decimal>,
    /// Upper monthly demand bound. Absent means no variable pay.
    #[serde(default)]
    pub demand_max: Option<Decimal>,
    /// Quarterly revenue below which the employee is at risk.
    #[serde(default)]
    pub quarterly_stay: Option<Decimal>,
    /// Quarterly revenue at which the employee becomes eligible for promotion.
    #[serde(default)]
    pub quarterly_promotion: Option<Decimal>,
    /// Leadership bonuses the tier can earn.
    #[serde(default)]
    pub bonuses: BonusEligibility,
}

impl RoleConfig {
    /// Returns `(demand_min, demand_max)` when both bounds are configured.
    pub fn demand_bounds(&self) -> Option<(Decimal, Decimal)> {
        self.demand_min.zip(self.demand_max)
    }

    /// Checks the role invariants.
    ///
    /// - `base_salary` is not negative
    /// - both variable percentages lie in 0..=100 and `variable_min <= variable_max`
    /// - `demand_min <= demand_max` when both are present
    /// - `quarterly_stay <= quarterly_promotion` when both are present
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidRole {
            role: self.id.to_string(),
            message: message.to_string(),
        };
        let hundred = Decimal::ONE_HUNDRED;

        if self.base_salary < Decimal::ZERO {
            return Err(invalid("base_salary must not be negative"));
        }
        for percent in [self.variable_min, self.variable_max] {
            if percent < Decimal::ZERO || percent > hundred {
                return Err(invalid("variable percentages must lie between 0 and 100"));
            }
        }
        if self.variable_min > self.variable_max {
            return Err(invalid("variable_min must not exceed variable_max"));
        }
        if let Some((min, max)) = self.demand_bounds() {
            if min > max {
                return Err(invalid("demand_min must not exceed demand_max"));
            }
        }
        if let (Some(stay), Some(promotion)) = (self.quarterly_stay, self.quarterly_promotion) {
            if stay > promotion {
                return Err(invalid(
                    "quarterly_stay must not exceed quarterly_promotion",
                ));
            }
        }

        Ok(())
    }
}

/// Roles configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Every tier of the plan.
    pub roles: Vec<RoleConfig>,
}

/// Lookup of role rules by tier.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: BTreeMap<TierId, RoleConfig>,
}

impl RoleCatalog {
    /// Builds a catalog, rejecting duplicate tiers and invalid roles.
    pub fn from_roles(roles: Vec<RoleConfig>) -> EngineResult<Self> {
        let mut catalog = BTreeMap::new();
        for role in roles {
            role.validate()?;
            let id = role.id;
            if catalog.insert(id, role).is_some() {
                return Err(EngineError::InvalidRole {
                    role: id.to_string(),
                    message: "tier is defined more than once".to_string(),
                });
            }
        }
        Ok(Self { roles: catalog })
    }

    /// Looks up the rules of a tier.
    pub fn get(&self, id: TierId) -> Option<&RoleConfig> {
        self.roles.get(&id)
    }

    /// Iterates over the roles ordered by tier.
    pub fn iter(&self) -> impl Iterator<Item = &RoleConfig> {
        self.roles.values()
    }

    /// Number of tiers in the catalog.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true when the catalog holds no tier.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Team bonus: interpolates between `floor` (0% average team performance)
/// and `ceiling` (100% or more).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBonusRule {
    /// Bonus paid at 0% team performance.
    pub floor: Decimal,
    /// Bonus paid at 100% team performance or above.
    pub ceiling: Decimal,
    /// Average performance percentage assumed when the caller supplies none.
    pub assumed_average_performance: Decimal,
}

/// Promotion add-on paid per promoted team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRule {
    /// Amount per promoted member.
    pub per_member: Decimal,
}

/// One bracket of the unit add-on table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAddOnTier {
    /// Minimum unit revenue for the bracket.
    pub threshold: Decimal,
    /// Add-on paid in the bracket.
    pub amount: Decimal,
}

/// Unit add-on brackets, kept sorted by ascending threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<UnitAddOnTier>", into = "Vec<UnitAddOnTier>")]
pub struct UnitAddOnTable {
    tiers: Vec<UnitAddOnTier>,
}

impl UnitAddOnTable {
    /// Builds a table from brackets in any order.
    pub fn new(mut tiers: Vec<UnitAddOnTier>) -> Self {
        tiers.sort_by(|a, b| a.threshold.cmp(&b.threshold));
        Self { tiers }
    }

    /// Brackets in ascending threshold order.
    pub fn tiers(&self) -> &[UnitAddOnTier] {
        &self.tiers
    }

    /// Checks that thresholds are distinct and no value is negative.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: "unit_add_on".to_string(),
            message,
        };

        for tier in &self.tiers {
            if tier.threshold < Decimal::ZERO || tier.amount < Decimal::ZERO {
                return Err(invalid(format!(
                    "bracket {} has a negative value",
                    tier.threshold
                )));
            }
        }
        for pair in self.tiers.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(invalid(format!(
                    "threshold {} appears more than once",
                    pair[0].threshold
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<UnitAddOnTier>> for UnitAddOnTable {
    fn from(tiers: Vec<UnitAddOnTier>) -> Self {
        Self::new(tiers)
    }
}

impl From<UnitAddOnTable> for Vec<UnitAddOnTier> {
    fn from(table: UnitAddOnTable) -> Self {
        table.tiers
    }
}

/// Leadership bonus rules from bonuses.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRules {
    /// Team bonus rule.
    pub team_bonus: TeamBonusRule,
    /// Promotion add-on rule.
    pub promotion: PromotionRule,
    /// Unit add-on brackets.
    pub unit_add_on: UnitAddOnTable,
}

/// The complete career plan configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CompensationConfig {
    /// Plan metadata.
    metadata: PlanMetadata,
    /// Role rules by tier.
    catalog: RoleCatalog,
    /// Leadership bonus rules.
    bonuses: BonusRules,
}

impl CompensationConfig {
    /// Creates a new CompensationConfig from its component parts.
    pub fn new(metadata: PlanMetadata, catalog: RoleCatalog, bonuses: BonusRules) -> Self {
        Self {
            metadata,
            catalog,
            bonuses,
        }
    }

    /// Returns the plan metadata.
    pub fn plan(&self) -> &PlanMetadata {
        &self.metadata
    }

    /// Returns the role catalog.
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Returns the leadership bonus rules.
    pub fn bonuses(&self) -> &BonusRules {
        &self.bonuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn role(id: TierId) -> RoleConfig {
        RoleConfig {
            id,
            name: "Intermediate Specialist".to_string(),
            path: CareerPath::Specialist,
            base_salary: dec("3000"),
            variable_min: dec("3"),
            variable_max: dec("5"),
            demand_min: Some(dec("7000")),
            demand_max: Some(dec("15000")),
            quarterly_stay: Some(dec("21000")),
            quarterly_promotion: Some(dec("45000")),
            bonuses: BonusEligibility::default(),
        }
    }

    #[test]
    fn test_valid_role_passes_validation() {
        assert!(role(TierId::SpecialistIntermediate).validate().is_ok());
    }

    #[test]
    fn test_inverted_variable_range_is_rejected() {
        let mut r = role(TierId::SpecialistIntermediate);
        r.variable_min = dec("6");

        match r.validate() {
            Err(EngineError::InvalidRole { role, message }) => {
                assert_eq!(role, "specialist_intermediate");
                assert!(message.contains("variable_min"));
            }
            other => panic!("Expected InvalidRole, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_above_hundred_is_rejected() {
        let mut r = role(TierId::SpecialistIntermediate);
        r.variable_max = dec("101");
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_inverted_demand_bounds_are_rejected() {
        let mut r = role(TierId::SpecialistIntermediate);
        r.demand_min = Some(dec("20000"));
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_inverted_quarterly_goals_are_rejected() {
        let mut r = role(TierId::SpecialistIntermediate);
        r.quarterly_stay = Some(dec("50000"));
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_single_demand_bound_is_valid_but_unbounded() {
        let mut r = role(TierId::SpecialistIntermediate);
        r.demand_max = None;
        assert!(r.validate().is_ok());
        assert_eq!(r.demand_bounds(), None);
    }

    #[test]
    fn test_catalog_rejects_duplicate_tier() {
        let result = RoleCatalog::from_roles(vec![
            role(TierId::SpecialistEntry),
            role(TierId::SpecialistEntry),
        ]);
        assert!(matches!(result, Err(EngineError::InvalidRole { .. })));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = RoleCatalog::from_roles(vec![role(TierId::SpecialistSenior)]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(TierId::SpecialistSenior).is_some());
        assert!(catalog.get(TierId::UnitManager).is_none());
    }

    #[test]
    fn test_unit_table_is_sorted_on_deserialize() {
        let yaml = r#"
- threshold: 500000
  amount: 30000
- threshold: 200000
  amount: 10000
- threshold: 350000
  amount: 21000
"#;
        let table: UnitAddOnTable = serde_yaml::from_str(yaml).unwrap();
        let thresholds: Vec<Decimal> = table.tiers().iter().map(|t| t.threshold).collect();
        assert_eq!(thresholds, vec![dec("200000"), dec("350000"), dec("500000")]);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_unit_table_rejects_duplicate_threshold() {
        let table = UnitAddOnTable::new(vec![
            UnitAddOnTier {
                threshold: dec("200000"),
                amount: dec("10000"),
            },
            UnitAddOnTier {
                threshold: dec("200000"),
                amount: dec("12000"),
            },
        ]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_bonus_eligibility_defaults_to_none() {
        let yaml = "team_bonus: true";
        let eligibility: BonusEligibility = serde_yaml::from_str(yaml).unwrap();
        assert!(eligibility.team_bonus);
        assert!(!eligibility.promotion_add_on);
        assert!(!eligibility.unit_add_on);
    }
}
