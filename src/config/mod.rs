//! Configuration models for team rules and store backends.

pub mod rules;

pub use rules::{RotationConfig, StoreBackendConfig, TeamRules};
