//! Core domain logic and collaborator contracts.

pub mod activation;
pub mod calendar;
pub mod error;
pub mod model;
pub mod plan;
pub mod quota;
pub mod rotation;
pub mod store;
pub mod teams;
pub mod terms;

pub use activation::{activate_program, ProgramCalendar};
pub use error::{AppResult, RotationError};
pub use model::{
    sort_blocks, BlockKind, Enrollment, EnrollmentStatus, JobRole, LinkedOffering, Program,
    ProgramBlock, ProgramStatus, RoleTable, Team, TeamMembership, TeamRole, TermWindow, Track,
};
pub use quota::{
    assign_junior_roles, percentage_targets, pick_role_options, primary_role_counts,
    rank_deficits, split_targets, RoleDeficit, RoleOptions,
};
pub use rotation::{preview_rotation, role_for, RotationPreview};
pub use store::{Clock, IdSource, ProgramStore, StoreTx};
pub use teams::{generate_teams, TeamGeneration, TeamPlanRules};
