//! Collaborator ports: the store contract, unit of work, clock, and id
//! source.
//!
//! The engines never talk to a database directly. They run inside a
//! transaction obtained from a [`ProgramStore`] and read wall-clock time and
//! fresh identifiers through injected ports, which keeps every decision
//! reproducible in tests.

use chrono::{DateTime, Utc};

use crate::core::error::RotationError;
use crate::core::model::{Enrollment, LinkedOffering, Program, ProgramBlock, Team, TeamMembership, Track};

/// Read/write contract the engines execute inside one transaction.
///
/// Every read that feeds a decision and every write that follows must go
/// through the same `StoreTx`, so the backend can give the whole sequence
/// all-or-nothing semantics.
pub trait StoreTx {
    /// Fetch a program by id.
    fn program(&self, id: &str) -> Result<Option<Program>, RotationError>;

    /// Insert a new program row.
    fn insert_program(&mut self, program: &Program) -> Result<(), RotationError>;

    /// Overwrite an existing program row.
    fn update_program(&mut self, program: &Program) -> Result<(), RotationError>;

    /// All blocks of a program, in no particular order.
    fn blocks(&self, program_id: &str) -> Result<Vec<ProgramBlock>, RotationError>;

    /// Fetch a block by id.
    fn block(&self, id: &str) -> Result<Option<ProgramBlock>, RotationError>;

    /// Insert a batch of block rows.
    fn insert_blocks(&mut self, blocks: &[ProgramBlock]) -> Result<(), RotationError>;

    /// Offering links of a program, joined with teacher and term data.
    fn offering_links(&self, program_id: &str) -> Result<Vec<LinkedOffering>, RotationError>;

    /// Approved enrollments on an offering for a track, ordered by creation
    /// time.
    fn approved_enrollments(
        &self,
        offering_id: &str,
        track: Track,
    ) -> Result<Vec<Enrollment>, RotationError>;

    /// Fetch an enrollment by id.
    fn enrollment(&self, id: &str) -> Result<Option<Enrollment>, RotationError>;

    /// Persist the role fields of an enrollment.
    fn update_enrollment_roles(&mut self, enrollment: &Enrollment) -> Result<(), RotationError>;

    /// Number of membership rows recorded for a block.
    fn membership_count(&self, block_id: &str) -> Result<usize, RotationError>;

    /// Delete every team and membership generated for a block.
    fn delete_block_assignments(&mut self, block_id: &str) -> Result<(), RotationError>;

    /// Insert a batch of team rows.
    fn insert_teams(&mut self, teams: &[Team]) -> Result<(), RotationError>;

    /// Insert a batch of membership rows.
    fn insert_memberships(&mut self, rows: &[TeamMembership]) -> Result<(), RotationError>;
}

/// Transactional unit of work over program state.
pub trait ProgramStore {
    /// Run `f` inside one transaction. When `f` returns `Err`, every write it
    /// performed is discarded; when it returns `Ok`, the writes commit
    /// together.
    fn with_tx<T, F>(&self, f: F) -> Result<T, RotationError>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, RotationError>;
}

/// Time source injected into the engines so rules that depend on "now" stay
/// testable.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Source of unique identifiers for rows created ahead of insertion.
pub trait IdSource: Send + Sync {
    /// Mint a fresh identifier.
    fn next_id(&self) -> String;
}
