//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the career plan
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::TierId;

use super::types::{
    BonusRules, CompensationConfig, PlanMetadata, RoleCatalog, RoleConfig, RolesConfig,
};

/// Loads and provides access to the career plan configuration.
///
/// # Directory Structure
///
/// ```text
/// config/compensation/
/// ├── plan.yaml      # Plan metadata
/// ├── roles.yaml     # One entry per career tier
/// └── bonuses.yaml   # Team, promotion and unit add-on rules
/// ```
///
/// # Example
///
/// ```no_run
/// use commission_engine::config::ConfigLoader;
/// use commission_engine::models::TierId;
///
/// let loader = ConfigLoader::load("./config/compensation").unwrap();
/// let role = loader.get_role(TierId::SpecialistIntermediate).unwrap();
/// println!("Base salary: ${}", role.base_salary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CompensationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A role breaks one of the role invariants, or a tier is defined twice
    /// - The unit add-on table has duplicate thresholds
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PlanMetadata>(&path.join("plan.yaml"))?;
        let roles = Self::load_yaml::<RolesConfig>(&path.join("roles.yaml"))?;
        let bonuses = Self::load_yaml::<BonusRules>(&path.join("bonuses.yaml"))?;

        let catalog = RoleCatalog::from_roles(roles.roles)?;
        bonuses.unit_add_on.validate()?;

        debug!(
            plan = %metadata.code,
            version = %metadata.version,
            roles = catalog.len(),
            unit_brackets = bonuses.unit_add_on.tiers().len(),
            "Loaded compensation configuration"
        );

        Ok(Self {
            config: CompensationConfig::new(metadata, catalog, bonuses),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: CompensationConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &CompensationConfig {
        &self.config
    }

    /// Returns the plan metadata.
    pub fn plan(&self) -> &PlanMetadata {
        self.config.plan()
    }

    /// Returns the leadership bonus rules.
    pub fn bonuses(&self) -> &BonusRules {
        self.config.bonuses()
    }

    /// Gets the rules of a tier.
    ///
    /// Returns `RoleNotFound` when the catalog has no entry for the tier.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use commission_engine::config::ConfigLoader;
    /// use commission_engine::models::TierId;
    ///
    /// let loader = ConfigLoader::load("./config/compensation")?;
    /// let role = loader.get_role(TierId::UnitManager)?;
    /// println!("{}", role.name);
    /// # Ok::<(), commission_engine::error::EngineError>(())
    /// ```
    pub fn get_role(&self, id: TierId) -> EngineResult<&RoleConfig> {
        self.config
            .catalog()
            .get(id)
            .ok_or_else(|| EngineError::RoleNotFound {
                role: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CareerPath;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/compensation"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Copies the shipped configuration into a scratch directory so single
    /// files can be broken.
    fn scratch_copy(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "commission_engine_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        for file in ["plan.yaml", "roles.yaml", "bonuses.yaml"] {
            fs::copy(Path::new(config_path()).join(file), dir.join(file)).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.plan().code, "SALES-CAREER");
        assert_eq!(loader.plan().currency, "BRL");
        assert_eq!(loader.config().catalog().len(), TierId::ALL.len());
    }

    #[test]
    fn test_every_tier_is_configured() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        for tier in TierId::ALL {
            let role = loader.get_role(tier).unwrap();
            assert_eq!(role.id, tier);
        }
    }

    #[test]
    fn test_intermediate_specialist_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let role = loader.get_role(TierId::SpecialistIntermediate).unwrap();

        assert_eq!(role.path, CareerPath::Specialist);
        assert_eq!(role.base_salary, dec("3000"));
        assert_eq!(role.demand_bounds(), Some((dec("7000"), dec("15000"))));
        assert_eq!(role.quarterly_stay, Some(dec("21000")));
        assert_eq!(role.quarterly_promotion, Some(dec("45000")));
        assert!(!role.bonuses.team_bonus);
    }

    #[test]
    fn test_leadership_bonus_eligibility() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let leader = loader.get_role(TierId::TechLeader1).unwrap();
        assert!(leader.bonuses.team_bonus);
        assert!(leader.bonuses.promotion_add_on);
        assert!(!leader.bonuses.unit_add_on);

        let unit_manager = loader.get_role(TierId::UnitManager).unwrap();
        assert!(!unit_manager.bonuses.team_bonus);
        assert!(unit_manager.bonuses.unit_add_on);
        assert_eq!(unit_manager.demand_bounds(), None);
    }

    #[test]
    fn test_bonus_rules_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let bonuses = loader.bonuses();

        assert_eq!(bonuses.team_bonus.floor, dec("1000"));
        assert_eq!(bonuses.team_bonus.ceiling, dec("3000"));
        assert_eq!(bonuses.team_bonus.assumed_average_performance, dec("80"));
        assert_eq!(bonuses.promotion.per_member, dec("500"));
        assert_eq!(bonuses.unit_add_on.tiers().len(), 3);
        assert_eq!(bonuses.unit_add_on.tiers()[0].threshold, dec("200000"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("plan.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = scratch_copy("malformed");
        fs::write(dir.join("bonuses.yaml"), "team_bonus: [unclosed").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("bonuses.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_role_is_rejected_on_load() {
        let dir = scratch_copy("invalid_role");
        fs::write(
            dir.join("roles.yaml"),
            r#"
roles:
  - id: specialist_entry
    name: Entry Specialist
    path: specialist
    base_salary: 2000
    variable_min: 5
    variable_max: 2
"#,
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::InvalidRole { role, .. }) => assert_eq!(role, "specialist_entry"),
            other => panic!("Expected InvalidRole, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_get_role_missing_from_catalog() {
        let dir = scratch_copy("partial_catalog");
        fs::write(
            dir.join("roles.yaml"),
            r#"
roles:
  - id: specialist_entry
    name: Entry Specialist
    path: specialist
    base_salary: 2000
    variable_min: 2
    variable_max: 4
"#,
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        match loader.get_role(TierId::UnitManager) {
            Err(EngineError::RoleNotFound { role }) => assert_eq!(role, "unit_manager"),
            other => panic!("Expected RoleNotFound, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }
}
