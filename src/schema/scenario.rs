/// Scenario templates — roles, difficulty, and RON catalog loading.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Difficulty rating of a scenario template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// One participant slot in a scenario. Belongs to exactly one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub objectives: Vec<String>,
}

/// An immutable role-play exercise template. Read-only during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub roles: Vec<Role>,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
}

impl Scenario {
    /// Look up a role by id.
    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    /// Returns true if this scenario defines the given role id.
    pub fn has_role(&self, role_id: &str) -> bool {
        self.role(role_id).is_some()
    }

    /// All roles other than the given one, in declaration order.
    pub fn counterpart_roles(&self, role_id: &str) -> Vec<&Role> {
        self.roles.iter().filter(|r| r.id != role_id).collect()
    }
}

/// A set of scenario templates keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioCatalog {
    pub scenarios: FxHashMap<String, Scenario>,
}

impl ScenarioCatalog {
    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ScenarioCatalog, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string (a list of scenarios).
    pub fn parse_ron(input: &str) -> Result<ScenarioCatalog, ScenarioError> {
        let entries: Vec<Scenario> = ron::from_str(input)?;
        let mut scenarios = FxHashMap::default();
        for scenario in entries {
            scenarios.insert(scenario.id.clone(), scenario);
        }
        Ok(ScenarioCatalog { scenarios })
    }

    /// Merge another catalog into this one. Scenarios from `other`
    /// override scenarios in `self` with the same id.
    pub fn merge(&mut self, other: ScenarioCatalog) {
        for (id, scenario) in other.scenarios {
            self.scenarios.insert(id, scenario);
        }
    }

    pub fn insert(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.id.clone(), scenario);
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }
}
