//! Team rules and store configuration structures.

use serde::{Deserialize, Serialize};

use crate::core::model::RoleTable;

/// Store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// In-memory store for development/testing.
    InMemory,
    /// Postgres-backed store.
    Postgres,
}

/// Default team-formation rules. Every field can be overridden per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRules {
    /// Guaranteed juniors per team.
    pub min_juniors_per_team: u32,
    /// Hard cap on juniors per team.
    pub max_juniors_per_team: u32,
    /// Leader headcount per role; the sum is the number of teams.
    pub leader_targets: RoleTable,
    /// Junior percentage split per role; must total 100.
    pub junior_targets_pct: RoleTable,
}

impl Default for TeamRules {
    fn default() -> Self {
        Self {
            min_juniors_per_team: 3,
            max_juniors_per_team: 4,
            leader_targets: RoleTable::new(3, 3, 3, 2),
            junior_targets_pct: RoleTable::new(25, 25, 25, 25),
        }
    }
}

impl TeamRules {
    /// Validate rule values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_juniors_per_team == 0 {
            return Err("max_juniors_per_team must be greater than 0".into());
        }
        if self.min_juniors_per_team > self.max_juniors_per_team {
            return Err("min_juniors_per_team cannot exceed max_juniors_per_team".into());
        }
        if self.junior_targets_pct.total() != 100 {
            return Err(format!(
                "junior_targets_pct must total 100, got {}",
                self.junior_targets_pct.total()
            ));
        }
        Ok(())
    }
}

/// Root rotation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Default team-formation rules.
    #[serde(default)]
    pub rules: TeamRules,
    /// Store backend selection.
    pub store: StoreBackendConfig,
}

impl RotationConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.rules.validate().map_err(|e| format!("team rules invalid: {e}"))
    }

    /// Parse rotation configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment. A `.env` file is honored when
    /// present. `ROTATION_STORE` selects the backend (`in_memory` or
    /// `postgres`); `ROTATION_MIN_JUNIORS` and `ROTATION_MAX_JUNIORS`
    /// override the fill bounds.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let mut cfg = Self { rules: TeamRules::default(), store: StoreBackendConfig::InMemory };
        if let Ok(store) = std::env::var("ROTATION_STORE") {
            cfg.store = match store.as_str() {
                "in_memory" => StoreBackendConfig::InMemory,
                "postgres" => StoreBackendConfig::Postgres,
                other => return Err(format!("unknown ROTATION_STORE `{other}`")),
            };
        }
        if let Ok(min) = std::env::var("ROTATION_MIN_JUNIORS") {
            cfg.rules.min_juniors_per_team =
                min.parse().map_err(|e| format!("ROTATION_MIN_JUNIORS invalid: {e}"))?;
        }
        if let Ok(max) = std::env::var("ROTATION_MAX_JUNIORS") {
            cfg.rules.max_juniors_per_team =
                max.parse().map_err(|e| format!("ROTATION_MAX_JUNIORS invalid: {e}"))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
