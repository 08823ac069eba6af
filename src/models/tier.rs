//! Career tier identifiers and career paths.
//!
//! A tier is a level in the sales career plan; its path decides which
//! bonus rules can ever apply to the people holding it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The career track an employee or role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerPath {
    /// Individual-contributor track. Never earns leadership bonuses.
    Specialist,
    /// People-management track. Eligible for team, promotion and unit bonuses
    /// subject to the role's bonus eligibility.
    Leadership,
}

impl CareerPath {
    /// Returns true for the leadership track.
    pub fn is_leadership(self) -> bool {
        self == CareerPath::Leadership
    }
}

/// Identifier of a career tier in the role catalog.
///
/// # Example
///
/// ```
/// use commission_engine::models::TierId;
///
/// let tier: TierId = serde_json::from_str("\"tech_leader_1\"").unwrap();
/// assert_eq!(tier, TierId::TechLeader1);
/// assert_eq!(tier.to_string(), "tech_leader_1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierId {
    /// Entry-level specialist.
    SpecialistEntry,
    /// Intermediate specialist.
    SpecialistIntermediate,
    /// Senior specialist.
    SpecialistSenior,
    /// First team-lead tier.
    #[serde(rename = "tech_leader_1")]
    TechLeader1,
    /// Second team-lead tier.
    #[serde(rename = "tech_leader_2")]
    TechLeader2,
    /// Contract manager.
    ContractManager,
    /// Unit manager, the top leadership tier.
    UnitManager,
}

impl TierId {
    /// Every tier, ordered from entry level to the top of the leadership track.
    pub const ALL: [TierId; 7] = [
        TierId::SpecialistEntry,
        TierId::SpecialistIntermediate,
        TierId::SpecialistSenior,
        TierId::TechLeader1,
        TierId::TechLeader2,
        TierId::ContractManager,
        TierId::UnitManager,
    ];

    /// Returns the identifier as it appears in configuration and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            TierId::SpecialistEntry => "specialist_entry",
            TierId::SpecialistIntermediate => "specialist_intermediate",
            TierId::SpecialistSenior => "specialist_senior",
            TierId::TechLeader1 => "tech_leader_1",
            TierId::TechLeader2 => "tech_leader_2",
            TierId::ContractManager => "contract_manager",
            TierId::UnitManager => "unit_manager",
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
