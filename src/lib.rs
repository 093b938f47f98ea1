//! # Kraken Rotation
//!
//! A scheduling and team-formation engine for academic rotation programs.
//!
//! This library manages the lifecycle of a cohort-wide rotation program: it
//! derives the program's fixed block calendar from an anchor start date,
//! apportions participants to job roles under configurable quotas, forms
//! leader-led teams with a guaranteed-minimum fill, and plans a deterministic
//! role rotation for junior participants across the program's junior blocks.
//!
//! ## Core Problem Solved
//!
//! Rotation programs pair two cohorts that move on different timelines:
//!
//! - **Leaders** (advanced-practica students) run three back-to-back
//!   three-month blocks, closed by a one-month documentation block
//! - **Juniors** (induction students) run four back-to-back two-month blocks
//!   on their own concurrent timeline, visiting every job role exactly once
//! - **Quotas** keep each role's headcount near its target without manual
//!   balancing, even when cohort sizes don't divide evenly
//! - **Re-runs must be safe**: activating a program twice, or regenerating
//!   teams for a block, must never duplicate or corrupt persisted state
//!
//! ## Key Features
//!
//! - **Calendar Math**: month arithmetic that clamps the day-of-month, so
//!   blocks anchored on Jan 31 end on Feb 28, never Mar 3
//! - **Idempotent Activation**: the block calendar is generated exactly once,
//!   with a fallback chain for resolving the start date from linked terms
//! - **Role Quota Engine**: largest-remainder apportionment and greedy
//!   deficit-driven assignment over a closed set of four job roles
//! - **Two-Phase Team Fill**: every team gets its guaranteed minimum of
//!   juniors before any team is topped up toward the maximum
//! - **Cyclic Junior Rotation**: a pure offset formula gives every junior all
//!   four roles and keeps per-block role counts even to within one
//! - **Swappable Storage**: engines run inside a transactional unit of work;
//!   an in-memory store ships for development and testing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kraken_rotation::config::RotationConfig;
//! use kraken_rotation::infra::memory::InMemoryStore;
//! use kraken_rotation::service::{CreateProgram, RotationService, StartProgram};
//!
//! let cfg = RotationConfig::from_env()?;
//! let service = RotationService::new(InMemoryStore::new(), cfg.rules);
//!
//! let program = service.create_program(CreateProgram {
//!     academic_year: 2026,
//!     name: "Rotation 2026".into(),
//!     starts_at: starts,
//!     ends_at: ends,
//! })?;
//!
//! let activation = service.activate_program(&program.id, &StartProgram::default())?;
//! let summary = service.generate_teams(&program.id, &activation.blocks[0].id, &Default::default())?;
//! ```
//!
//! For complete examples, see:
//! - `tests/team_formation_test.rs` - Full integration tests
//! - `README.md` - Comprehensive documentation

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core domain logic: calendar math, block planning, quotas, team formation,
/// rotation planning, and the store contract.
pub mod core;
/// Configuration models for team rules and store backends.
pub mod config;
/// Builders to construct the rotation service from configuration.
pub mod builders;
/// Infrastructure adapters implementing the store contract.
pub mod infra;
/// API-facing operations and request/response models.
pub mod service;
/// Shared utilities.
pub mod util;
