//! Postgres-backed store adapter (schema and interface stubs).

use crate::core::error::RotationError;
use crate::core::store::{ProgramStore, StoreTx};

/// Postgres store adapter placeholder.
pub struct PostgresStore {
    _private: (),
}

impl PostgresStore {
    /// Create a new adapter.
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Migration statements for the rotation schema.
    pub fn migrations() -> &'static [&'static str] {
        &[
            r#"
CREATE TABLE IF NOT EXISTS kr_rotation_programs (
    id TEXT PRIMARY KEY,
    academic_year INT NOT NULL,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'DRAFT',
    starts_at TIMESTAMPTZ NOT NULL,
    ends_at TIMESTAMPTZ NOT NULL,
    started_at TIMESTAMPTZ
);
"#,
            r#"
CREATE TABLE IF NOT EXISTS kr_program_blocks (
    id TEXT PRIMARY KEY,
    program_id TEXT NOT NULL REFERENCES kr_rotation_programs (id),
    kind TEXT NOT NULL,
    block_order INT NOT NULL,
    label TEXT NOT NULL,
    starts_at TIMESTAMPTZ NOT NULL,
    ends_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_kr_program_blocks_program ON kr_program_blocks (program_id, starts_at);
"#,
            r#"
CREATE TABLE IF NOT EXISTS kr_program_offerings (
    program_id TEXT NOT NULL REFERENCES kr_rotation_programs (id),
    offering_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    teacher_id TEXT NOT NULL,
    term_starts_at TIMESTAMPTZ,
    term_ends_at TIMESTAMPTZ,
    PRIMARY KEY (program_id, offering_id)
);
"#,
            r#"
CREATE TABLE IF NOT EXISTS kr_enrollments (
    id TEXT PRIMARY KEY,
    offering_id TEXT NOT NULL,
    student_id TEXT NOT NULL,
    track TEXT NOT NULL,
    status TEXT NOT NULL,
    primary_role TEXT,
    pref_role1 TEXT,
    pref_role2 TEXT,
    pref_role3 TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_kr_enrollments_cohort ON kr_enrollments (offering_id, track, status, created_at);
"#,
            r#"
CREATE TABLE IF NOT EXISTS kr_teams (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    offering_id TEXT NOT NULL,
    program_id TEXT NOT NULL REFERENCES kr_rotation_programs (id),
    leader_block_id TEXT NOT NULL REFERENCES kr_program_blocks (id),
    created_by TEXT NOT NULL
);
"#,
            r#"
CREATE TABLE IF NOT EXISTS kr_team_memberships (
    team_id TEXT NOT NULL REFERENCES kr_teams (id) ON DELETE CASCADE,
    user_id TEXT NOT NULL,
    enrollment_id TEXT NOT NULL REFERENCES kr_enrollments (id),
    block_id TEXT NOT NULL REFERENCES kr_program_blocks (id),
    team_role TEXT NOT NULL,
    job_role TEXT NOT NULL,
    PRIMARY KEY (enrollment_id, block_id)
);
CREATE INDEX IF NOT EXISTS idx_kr_team_memberships_block ON kr_team_memberships (block_id);
"#,
        ]
    }
}

impl Default for PostgresStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramStore for PostgresStore {
    fn with_tx<T, F>(&self, _f: F) -> Result<T, RotationError>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, RotationError>,
    {
        Err(RotationError::Store(
            "postgres store not wired to database client".into(),
        ))
    }
}
