//! Tests for configuration validation

use kraken_rotation::config::{RotationConfig, StoreBackendConfig, TeamRules};
use kraken_rotation::core::RoleTable;

#[test]
fn test_default_rules_are_valid() {
    let rules = TeamRules::default();
    assert!(rules.validate().is_ok());
    assert_eq!(rules.min_juniors_per_team, 3);
    assert_eq!(rules.max_juniors_per_team, 4);
    assert_eq!(rules.leader_targets, RoleTable::new(3, 3, 3, 2));
    assert_eq!(rules.junior_targets_pct, RoleTable::new(25, 25, 25, 25));
}

#[test]
fn test_rules_invalid_zero_max() {
    let rules = TeamRules {
        min_juniors_per_team: 0,
        max_juniors_per_team: 0,
        ..TeamRules::default()
    };
    assert!(rules.validate().is_err());
}

#[test]
fn test_rules_invalid_min_above_max() {
    let rules = TeamRules {
        min_juniors_per_team: 5,
        max_juniors_per_team: 4,
        ..TeamRules::default()
    };
    assert!(rules.validate().is_err());
}

#[test]
fn test_rules_invalid_percentage_split() {
    let rules = TeamRules {
        junior_targets_pct: RoleTable::new(40, 40, 40, 40),
        ..TeamRules::default()
    };
    assert!(rules.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "rules": {
            "min_juniors_per_team": 2,
            "max_juniors_per_team": 5,
            "leader_targets": { "QA": 3, "FRONTEND": 3, "BACKEND": 3, "DEVOPS": 2 },
            "junior_targets_pct": { "QA": 40, "FRONTEND": 30, "BACKEND": 20, "DEVOPS": 10 }
        },
        "store": "in_memory"
    }"#;

    let cfg = RotationConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.rules.min_juniors_per_team, 2);
    assert_eq!(cfg.rules.junior_targets_pct, RoleTable::new(40, 30, 20, 10));
    assert!(matches!(cfg.store, StoreBackendConfig::InMemory));
}

#[test]
fn test_config_from_json_defaults_the_rules() {
    let json = r#"{ "store": "postgres" }"#;
    let cfg = RotationConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.rules, TeamRules::default());
    assert!(matches!(cfg.store, StoreBackendConfig::Postgres));
}

#[test]
fn test_config_from_json_rejects_bad_rules() {
    let json = r#"{
        "rules": {
            "min_juniors_per_team": 9,
            "max_juniors_per_team": 4,
            "leader_targets": { "QA": 3, "FRONTEND": 3, "BACKEND": 3, "DEVOPS": 2 },
            "junior_targets_pct": { "QA": 25, "FRONTEND": 25, "BACKEND": 25, "DEVOPS": 25 }
        },
        "store": "in_memory"
    }"#;
    assert!(RotationConfig::from_json_str(json).is_err());
}

#[test]
fn test_config_from_json_rejects_garbage() {
    assert!(RotationConfig::from_json_str("not json").is_err());
}
