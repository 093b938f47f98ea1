//! In-memory store with snapshot-commit transactions.

use parking_lot::Mutex;

use crate::core::error::RotationError;
use crate::core::model::{
    Enrollment, EnrollmentStatus, LinkedOffering, OfferingId, Program, ProgramBlock, ProgramId,
    Team, TeamMembership, TermWindow, Track, UserId,
};
use crate::core::store::{ProgramStore, StoreTx};

/// Program-to-offering link row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingLinkRow {
    /// Program the link belongs to.
    pub program_id: ProgramId,
    /// Which side of the program the link serves.
    pub kind: Track,
    /// Linked course offering.
    pub offering_id: OfferingId,
    /// Teacher owning the offering.
    pub teacher_id: UserId,
    /// Term window of the offering, when one is attached.
    pub term: Option<TermWindow>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    programs: Vec<Program>,
    blocks: Vec<ProgramBlock>,
    links: Vec<OfferingLinkRow>,
    enrollments: Vec<Enrollment>,
    teams: Vec<Team>,
    memberships: Vec<TeamMembership>,
}

/// In-memory implementation of the full store contract, for development and
/// testing.
///
/// A transaction runs against a copy of the tables; the copy replaces the
/// live tables only when the closure succeeds. That gives the engines the
/// same all-or-nothing semantics a database transaction would. The table
/// lock is held for the whole transaction, so writers serialize.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a program row directly, outside any transaction.
    pub fn seed_program(&self, program: Program) {
        self.tables.lock().programs.push(program);
    }

    /// Link an offering to a program directly.
    pub fn seed_link(&self, link: OfferingLinkRow) {
        self.tables.lock().links.push(link);
    }

    /// Insert an enrollment row directly.
    pub fn seed_enrollment(&self, enrollment: Enrollment) {
        self.tables.lock().enrollments.push(enrollment);
    }

    /// Snapshot of all teams, in insertion order.
    pub fn teams(&self) -> Vec<Team> {
        self.tables.lock().teams.clone()
    }

    /// Snapshot of all memberships, in insertion order.
    pub fn memberships(&self) -> Vec<TeamMembership> {
        self.tables.lock().memberships.clone()
    }

    /// Snapshot of all blocks, in insertion order.
    pub fn all_blocks(&self) -> Vec<ProgramBlock> {
        self.tables.lock().blocks.clone()
    }
}

struct MemoryTx {
    tables: Tables,
}

impl StoreTx for MemoryTx {
    fn program(&self, id: &str) -> Result<Option<Program>, RotationError> {
        Ok(self.tables.programs.iter().find(|p| p.id == id).cloned())
    }

    fn insert_program(&mut self, program: &Program) -> Result<(), RotationError> {
        if self.tables.programs.iter().any(|p| p.id == program.id) {
            return Err(RotationError::Store(format!(
                "duplicate program id {}",
                program.id
            )));
        }
        self.tables.programs.push(program.clone());
        Ok(())
    }

    fn update_program(&mut self, program: &Program) -> Result<(), RotationError> {
        let slot = self
            .tables
            .programs
            .iter_mut()
            .find(|p| p.id == program.id)
            .ok_or_else(|| {
                RotationError::Store(format!("program {} missing on update", program.id))
            })?;
        *slot = program.clone();
        Ok(())
    }

    fn blocks(&self, program_id: &str) -> Result<Vec<ProgramBlock>, RotationError> {
        Ok(self
            .tables
            .blocks
            .iter()
            .filter(|b| b.program_id == program_id)
            .cloned()
            .collect())
    }

    fn block(&self, id: &str) -> Result<Option<ProgramBlock>, RotationError> {
        Ok(self.tables.blocks.iter().find(|b| b.id == id).cloned())
    }

    fn insert_blocks(&mut self, blocks: &[ProgramBlock]) -> Result<(), RotationError> {
        self.tables.blocks.extend_from_slice(blocks);
        Ok(())
    }

    fn offering_links(&self, program_id: &str) -> Result<Vec<LinkedOffering>, RotationError> {
        Ok(self
            .tables
            .links
            .iter()
            .filter(|l| l.program_id == program_id)
            .map(|l| LinkedOffering {
                kind: l.kind,
                offering_id: l.offering_id.clone(),
                teacher_id: l.teacher_id.clone(),
                term: l.term,
            })
            .collect())
    }

    fn approved_enrollments(
        &self,
        offering_id: &str,
        track: Track,
    ) -> Result<Vec<Enrollment>, RotationError> {
        let mut rows: Vec<Enrollment> = self
            .tables
            .enrollments
            .iter()
            .filter(|e| {
                e.offering_id == offering_id
                    && e.track == track
                    && e.status == EnrollmentStatus::Approved
            })
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.created_at);
        Ok(rows)
    }

    fn enrollment(&self, id: &str) -> Result<Option<Enrollment>, RotationError> {
        Ok(self.tables.enrollments.iter().find(|e| e.id == id).cloned())
    }

    fn update_enrollment_roles(&mut self, enrollment: &Enrollment) -> Result<(), RotationError> {
        let slot = self
            .tables
            .enrollments
            .iter_mut()
            .find(|e| e.id == enrollment.id)
            .ok_or_else(|| {
                RotationError::Store(format!("enrollment {} missing on update", enrollment.id))
            })?;
        slot.primary_role = enrollment.primary_role;
        slot.pref_role1 = enrollment.pref_role1;
        slot.pref_role2 = enrollment.pref_role2;
        slot.pref_role3 = enrollment.pref_role3;
        Ok(())
    }

    fn membership_count(&self, block_id: &str) -> Result<usize, RotationError> {
        Ok(self
            .tables
            .memberships
            .iter()
            .filter(|m| m.block_id == block_id)
            .count())
    }

    fn delete_block_assignments(&mut self, block_id: &str) -> Result<(), RotationError> {
        self.tables.memberships.retain(|m| m.block_id != block_id);
        self.tables.teams.retain(|t| t.leader_block_id != block_id);
        Ok(())
    }

    fn insert_teams(&mut self, teams: &[Team]) -> Result<(), RotationError> {
        self.tables.teams.extend_from_slice(teams);
        Ok(())
    }

    fn insert_memberships(&mut self, rows: &[TeamMembership]) -> Result<(), RotationError> {
        self.tables.memberships.extend_from_slice(rows);
        Ok(())
    }
}

impl ProgramStore for InMemoryStore {
    fn with_tx<T, F>(&self, f: F) -> Result<T, RotationError>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, RotationError>,
    {
        let mut guard = self.tables.lock();
        let mut tx = MemoryTx { tables: guard.clone() };
        let out = f(&mut tx)?;
        *guard = tx.tables;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    use crate::core::model::ProgramStatus;

    fn make_program(id: &str) -> Program {
        Program {
            id: id.into(),
            academic_year: 2026,
            name: format!("program {id}"),
            status: ProgramStatus::Draft,
            starts_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap(),
            started_at: None,
        }
    }

    #[test]
    fn test_commit_on_success() {
        let store = InMemoryStore::new();
        store
            .with_tx(|tx| tx.insert_program(&make_program("p1")))
            .unwrap();
        let found = store
            .with_tx(|tx| tx.program("p1"))
            .unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn test_rollback_on_error() {
        let store = InMemoryStore::new();
        let result: Result<(), RotationError> = store.with_tx(|tx| {
            tx.insert_program(&make_program("p1"))?;
            Err(RotationError::InvalidState("boom".into()))
        });
        assert!(result.is_err());
        let found = store.with_tx(|tx| tx.program("p1")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_duplicate_program_id_rejected() {
        let store = InMemoryStore::new();
        store.seed_program(make_program("p1"));
        let result = store.with_tx(|tx| tx.insert_program(&make_program("p1")));
        assert!(matches!(result, Err(RotationError::Store(_))));
    }

    #[test]
    fn test_approved_enrollments_filter_and_order() {
        use crate::core::model::JobRole;

        let store = InMemoryStore::new();
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let make = |id: &str, minutes: i64, status: EnrollmentStatus| Enrollment {
            id: id.into(),
            offering_id: "off-1".into(),
            student_id: format!("student-{id}"),
            track: Track::Induccion,
            status,
            primary_role: Some(JobRole::Qa),
            pref_role1: None,
            pref_role2: None,
            pref_role3: None,
            created_at: base + chrono::Duration::minutes(minutes),
        };
        store.seed_enrollment(make("late", 30, EnrollmentStatus::Approved));
        store.seed_enrollment(make("early", 5, EnrollmentStatus::Approved));
        store.seed_enrollment(make("pending", 1, EnrollmentStatus::Applied));

        let rows = store
            .with_tx(|tx| tx.approved_enrollments("off-1", Track::Induccion))
            .unwrap();
        let ids: Vec<&str> = rows.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_delete_block_assignments_scopes_to_block() {
        use crate::core::model::{JobRole, TeamRole};

        let store = InMemoryStore::new();
        let team = |id: &str, block: &str| Team {
            id: id.into(),
            name: format!("QA-Team-{id}"),
            offering_id: "off-1".into(),
            program_id: "p1".into(),
            leader_block_id: block.into(),
            created_by: "teacher-1".into(),
        };
        let membership = |team_id: &str, block: &str| TeamMembership {
            team_id: team_id.into(),
            user_id: "student-1".into(),
            enrollment_id: format!("enr-{team_id}"),
            block_id: block.into(),
            team_role: TeamRole::Member,
            job_role: JobRole::Qa,
        };
        store
            .with_tx(|tx| {
                tx.insert_teams(&[team("t1", "b1"), team("t2", "b2")])?;
                tx.insert_memberships(&[membership("t1", "b1"), membership("t2", "b2")])
            })
            .unwrap();

        store.with_tx(|tx| tx.delete_block_assignments("b1")).unwrap();

        assert_eq!(store.teams().len(), 1);
        assert_eq!(store.teams()[0].id, "t2");
        assert_eq!(store.memberships().len(), 1);
        assert_eq!(
            store.with_tx(|tx| tx.membership_count("b1")).unwrap(),
            0
        );
    }
}
