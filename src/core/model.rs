//! Domain records and role-indexed tables for rotation programs.

use std::fmt;
use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Program identifier.
pub type ProgramId = String;
/// Program block identifier.
pub type BlockId = String;
/// Course offering identifier.
pub type OfferingId = String;
/// Enrollment identifier.
pub type EnrollmentId = String;
/// Team identifier.
pub type TeamId = String;
/// User identifier (student or teacher).
pub type UserId = String;

/// Lifecycle status of a rotation program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStatus {
    /// Created but not yet activated; has no block calendar.
    Draft,
    /// Activated; the block calendar exists and is immutable.
    Active,
}

/// Kind of a program block.
///
/// Declaration order doubles as the tie-break order when listing blocks that
/// share a start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKind {
    /// Three-month block led by practica students.
    LeaderBlock,
    /// One-month documentation block closing the program.
    DocsBlock,
    /// Two-month block on the junior rotation timeline.
    JuniorBlock,
}

/// Track an enrollment or offering link belongs to.
///
/// The advanced track supplies team leaders; the induction track supplies the
/// juniors who rotate through roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Track {
    /// Advanced internal-practica track.
    PracticaInterna,
    /// Induction track for junior participants.
    Induccion,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PracticaInterna => "PRACTICA_INTERNA",
            Self::Induccion => "INDUCCION",
        })
    }
}

/// Lifecycle status of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    /// Submitted, awaiting review.
    Applied,
    /// Accepted into the cohort; visible to the engines.
    Approved,
    /// Turned down.
    Rejected,
}

/// Role of a membership row within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    /// The team's leader.
    Lead,
    /// A regular member.
    Member,
}

/// Job role a participant holds within a block. Closed set; the unit of all
/// quota math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobRole {
    /// Quality assurance.
    Qa,
    /// Frontend development.
    Frontend,
    /// Backend development.
    Backend,
    /// Infrastructure and operations.
    Devops,
}

impl JobRole {
    /// Canonical role order used for tie-breaking, bucketing, and the junior
    /// rotation offset.
    pub const ORDER: [Self; 4] = [Self::Qa, Self::Frontend, Self::Backend, Self::Devops];

    /// Position of the role within [`Self::ORDER`].
    pub const fn index(self) -> usize {
        match self {
            Self::Qa => 0,
            Self::Frontend => 1,
            Self::Backend => 2,
            Self::Devops => 3,
        }
    }
}

impl fmt::Display for JobRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Qa => "QA",
            Self::Frontend => "FRONTEND",
            Self::Backend => "BACKEND",
            Self::Devops => "DEVOPS",
        })
    }
}

/// Dense per-role table of counts, targets, or percentages.
///
/// Every role is always present and zero-initialized, so quota math is total
/// and never hits a missing key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RoleTable {
    /// QA entry.
    pub qa: u32,
    /// Frontend entry.
    pub frontend: u32,
    /// Backend entry.
    pub backend: u32,
    /// DevOps entry.
    pub devops: u32,
}

impl RoleTable {
    /// Build a table from per-role values in canonical order.
    pub const fn new(qa: u32, frontend: u32, backend: u32, devops: u32) -> Self {
        Self { qa, frontend, backend, devops }
    }

    /// Sum across all roles.
    pub const fn total(&self) -> u32 {
        self.qa + self.frontend + self.backend + self.devops
    }

    /// Entries in canonical role order.
    pub const fn entries(&self) -> [(JobRole, u32); 4] {
        [
            (JobRole::Qa, self.qa),
            (JobRole::Frontend, self.frontend),
            (JobRole::Backend, self.backend),
            (JobRole::Devops, self.devops),
        ]
    }
}

impl Index<JobRole> for RoleTable {
    type Output = u32;

    fn index(&self, role: JobRole) -> &Self::Output {
        match role {
            JobRole::Qa => &self.qa,
            JobRole::Frontend => &self.frontend,
            JobRole::Backend => &self.backend,
            JobRole::Devops => &self.devops,
        }
    }
}

impl IndexMut<JobRole> for RoleTable {
    fn index_mut(&mut self, role: JobRole) -> &mut Self::Output {
        match role {
            JobRole::Qa => &mut self.qa,
            JobRole::Frontend => &mut self.frontend,
            JobRole::Backend => &mut self.backend,
            JobRole::Devops => &mut self.devops,
        }
    }
}

/// A cohort-wide rotation cycle with a fixed block calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique identifier.
    pub id: ProgramId,
    /// Academic year the cohort belongs to.
    pub academic_year: i32,
    /// Human-readable name.
    pub name: String,
    /// Lifecycle status.
    pub status: ProgramStatus,
    /// Scheduled start; rewritten to the resolved anchor on activation.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end; rewritten to the latest block end on activation.
    pub ends_at: DateTime<Utc>,
    /// Instant the program was activated, if it has been.
    pub started_at: Option<DateTime<Utc>>,
}

/// A named, dated phase of a program's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramBlock {
    /// Unique identifier.
    pub id: BlockId,
    /// Owning program.
    pub program_id: ProgramId,
    /// Block kind.
    pub kind: BlockKind,
    /// 1-based position among blocks of the same kind.
    pub order: u32,
    /// Display label.
    pub label: String,
    /// Start instant (UTC midnight of the start day).
    pub starts_at: DateTime<Utc>,
    /// End instant (UTC midnight of the end day, exclusive).
    pub ends_at: DateTime<Utc>,
}

/// Order blocks the way callers list them: by start, then kind, then order.
pub fn sort_blocks(blocks: &mut [ProgramBlock]) {
    blocks.sort_by(|a, b| {
        a.starts_at
            .cmp(&b.starts_at)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.order.cmp(&b.order))
    });
}

/// Term window attached to a course offering. Either bound may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermWindow {
    /// Term start.
    pub starts_at: Option<DateTime<Utc>>,
    /// Term end.
    pub ends_at: Option<DateTime<Utc>>,
}

/// Projection of a program-to-offering link carrying the fields the engines
/// read: the link kind, the offering, its owning teacher, and its term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedOffering {
    /// Which side of the program the link serves.
    pub kind: Track,
    /// Linked course offering.
    pub offering_id: OfferingId,
    /// Teacher owning the linked offering.
    pub teacher_id: UserId,
    /// Term window of the offering, when one is attached.
    pub term: Option<TermWindow>,
}

/// A participant's application to a course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identifier.
    pub id: EnrollmentId,
    /// Offering applied to.
    pub offering_id: OfferingId,
    /// Applying student.
    pub student_id: UserId,
    /// Track of the offering.
    pub track: Track,
    /// Review status.
    pub status: EnrollmentStatus,
    /// Assigned primary role, once the role-choice flow has run.
    pub primary_role: Option<JobRole>,
    /// First role preference.
    pub pref_role1: Option<JobRole>,
    /// Second role preference.
    pub pref_role2: Option<JobRole>,
    /// Third role preference.
    pub pref_role3: Option<JobRole>,
    /// Submission instant; drives deterministic ordering.
    pub created_at: DateTime<Utc>,
}

/// A leader-led team formed inside a leader block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: TeamId,
    /// Name in the form `{role}-Team-{seq}`.
    pub name: String,
    /// Offering the team's leader belongs to.
    pub offering_id: OfferingId,
    /// Owning program.
    pub program_id: ProgramId,
    /// Leader block the team was generated for.
    pub leader_block_id: BlockId,
    /// Teacher recorded as the creator.
    pub created_by: UserId,
}

/// One participant's membership in a team for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    /// Team joined.
    pub team_id: TeamId,
    /// Participating user.
    pub user_id: UserId,
    /// Enrollment the participation stems from; unique per block.
    pub enrollment_id: EnrollmentId,
    /// Block the membership applies to.
    pub block_id: BlockId,
    /// Lead or regular member.
    pub team_role: TeamRole,
    /// Job role held for the block.
    pub job_role: JobRole,
}
