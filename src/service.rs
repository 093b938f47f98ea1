//! API-facing operations and request/response models.
//!
//! [`RotationService`] is the single entry point callers use. Each operation
//! opens one transaction on the injected store and runs the relevant engine
//! inside it; clock and id generation go through swappable ports so every
//! operation is reproducible under test.

use serde::{Deserialize, Serialize};

use crate::config::TeamRules;
use crate::core::activation::{self, ProgramCalendar};
use crate::core::error::RotationError;
use crate::core::model::{
    sort_blocks, Enrollment, EnrollmentId, EnrollmentStatus, JobRole, Program, ProgramBlock,
    ProgramStatus, RoleTable, Track,
};
use crate::core::quota::{pick_role_options, primary_role_counts, split_targets, RoleOptions};
use crate::core::rotation::{self, RotationPreview};
use crate::core::store::{Clock, IdSource, ProgramStore, StoreTx};
use crate::core::teams::{self, TeamGeneration, TeamPlanRules};
use crate::util::clock::SystemClock;
use crate::util::ids::UuidSource;

/// Request to create a draft program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProgram {
    /// Academic year of the cohort.
    pub academic_year: i32,
    /// Program name.
    pub name: String,
    /// Provisional start, replaced by the resolved anchor on activation.
    pub starts_at: chrono::DateTime<chrono::Utc>,
    /// Provisional end, replaced by the latest block end on activation.
    pub ends_at: chrono::DateTime<chrono::Utc>,
}

/// Request to activate a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartProgram {
    /// Optional `YYYY-MM-DD` start override. Malformed values are ignored
    /// and the start falls back to the linked terms.
    pub start_date: Option<String>,
}

/// Per-role override set; roles left out keep their configured default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RoleOverrides {
    /// QA override.
    pub qa: Option<u32>,
    /// Frontend override.
    pub frontend: Option<u32>,
    /// Backend override.
    pub backend: Option<u32>,
    /// DevOps override.
    pub devops: Option<u32>,
}

impl RoleOverrides {
    /// Merge onto `base`, taking every role that carries an override.
    pub fn apply(&self, base: RoleTable) -> RoleTable {
        RoleTable::new(
            self.qa.unwrap_or(base.qa),
            self.frontend.unwrap_or(base.frontend),
            self.backend.unwrap_or(base.backend),
            self.devops.unwrap_or(base.devops),
        )
    }
}

/// Request to generate teams for a leader block. Every field is optional;
/// absent fields fall back to the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateTeams {
    /// Guaranteed juniors per team.
    pub min_juniors_per_team: Option<u32>,
    /// Hard cap on juniors per team.
    pub max_juniors_per_team: Option<u32>,
    /// Leader headcount overrides per role.
    pub leader_targets: Option<RoleOverrides>,
    /// Junior percentage overrides per role.
    pub junior_targets_pct: Option<RoleOverrides>,
    /// Delete and regenerate when teams already exist for the block.
    #[serde(default)]
    pub force: bool,
}

/// Roles already persisted on an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChosenRoles {
    /// Assigned primary role.
    pub primary_role: Option<JobRole>,
    /// First preference.
    pub pref_role1: Option<JobRole>,
    /// Second preference.
    pub pref_role2: Option<JobRole>,
    /// Third preference.
    pub pref_role3: Option<JobRole>,
}

impl ChosenRoles {
    fn of(enrollment: &Enrollment) -> Self {
        Self {
            primary_role: enrollment.primary_role,
            pref_role1: enrollment.pref_role1,
            pref_role2: enrollment.pref_role2,
            pref_role3: enrollment.pref_role3,
        }
    }
}

/// Role-choice options for one practica enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleOptionsView {
    /// Enrollment the options apply to.
    pub enrollment_id: EnrollmentId,
    /// Ranked options computed from the cohort's current deficits.
    #[serde(flatten)]
    pub options: RoleOptions,
    /// Roles already persisted on the enrollment.
    pub already_chosen: ChosenRoles,
}

/// Entry point for all rotation program operations.
pub struct RotationService<S> {
    store: S,
    rules: TeamRules,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl<S: ProgramStore> RotationService<S> {
    /// Create a service over `store` with the given default team rules, a
    /// system clock, and random UUID ids.
    pub fn new(store: S, rules: TeamRules) -> Self {
        Self {
            store,
            rules,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidSource),
        }
    }

    /// Replace the clock (tests inject a fixed instant).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the id source (tests inject deterministic ids).
    pub fn with_ids(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Access the underlying store, e.g. for seeding or diagnostics.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a draft program. The block calendar is not generated here.
    pub fn create_program(&self, req: CreateProgram) -> Result<Program, RotationError> {
        let program = Program {
            id: self.ids.next_id(),
            academic_year: req.academic_year,
            name: req.name,
            status: ProgramStatus::Draft,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            started_at: None,
        };
        self.store.with_tx(|tx| tx.insert_program(&program))?;
        tracing::info!("created draft program {} ({})", program.id, program.name);
        Ok(program)
    }

    /// Fetch a program with its ordered block calendar.
    pub fn get_program(&self, program_id: &str) -> Result<ProgramCalendar, RotationError> {
        self.store.with_tx(|tx| {
            let program = tx.program(program_id)?.ok_or_else(|| {
                RotationError::NotFound(format!("rotation program {program_id}"))
            })?;
            let mut blocks = tx.blocks(program_id)?;
            sort_blocks(&mut blocks);
            Ok(ProgramCalendar { program, blocks })
        })
    }

    /// List a program's blocks in calendar order. An unknown program yields
    /// an empty list.
    pub fn list_blocks(&self, program_id: &str) -> Result<Vec<ProgramBlock>, RotationError> {
        self.store.with_tx(|tx| {
            let mut blocks = tx.blocks(program_id)?;
            sort_blocks(&mut blocks);
            Ok(blocks)
        })
    }

    /// Activate a program, generating its block calendar exactly once.
    pub fn activate_program(
        &self,
        program_id: &str,
        req: &StartProgram,
    ) -> Result<ProgramCalendar, RotationError> {
        let now = self.clock.now();
        self.store.with_tx(|tx| {
            activation::activate_program(
                tx,
                self.ids.as_ref(),
                program_id,
                req.start_date.as_deref(),
                now,
            )
        })
    }

    /// Generate teams for a leader block, merging request overrides onto the
    /// configured default rules.
    pub fn generate_teams(
        &self,
        program_id: &str,
        block_id: &str,
        req: &GenerateTeams,
    ) -> Result<TeamGeneration, RotationError> {
        let rules = self.effective_rules(req);
        let now = self.clock.now();
        self.store.with_tx(|tx| {
            teams::generate_teams(tx, self.ids.as_ref(), program_id, block_id, &rules, req.force, now)
        })
    }

    /// Compute the junior rotation preview for an active program.
    pub fn preview_junior_rotation(
        &self,
        program_id: &str,
    ) -> Result<RotationPreview, RotationError> {
        self.store.with_tx(|tx| rotation::preview_rotation(&*tx, program_id))
    }

    /// Compute the role-choice options for a practica enrollment: the most
    /// under-quota role is mandatory and the next two are selectable.
    pub fn role_options(&self, enrollment_id: &str) -> Result<RoleOptionsView, RotationError> {
        self.store.with_tx(|tx| {
            let (enrollment, options) = options_for(&*tx, enrollment_id)?;
            Ok(RoleOptionsView {
                enrollment_id: enrollment.id.clone(),
                options,
                already_chosen: ChosenRoles::of(&enrollment),
            })
        })
    }

    /// Persist a practica role choice: two distinct selectable roles become
    /// the first two preferences, and the mandatory role becomes both the
    /// third preference and the primary role.
    ///
    /// Options are recomputed inside the same transaction, so a choice made
    /// against stale options is rejected rather than persisted.
    pub fn set_practica_roles(
        &self,
        enrollment_id: &str,
        role1: JobRole,
        role2: JobRole,
    ) -> Result<Enrollment, RotationError> {
        if role1 == role2 {
            return Err(RotationError::InvalidState(
                "the two chosen roles must differ".into(),
            ));
        }
        self.store.with_tx(|tx| {
            let (mut enrollment, options) = options_for(&*tx, enrollment_id)?;
            for role in [role1, role2] {
                if !options.selectable_roles.contains(&role) {
                    return Err(RotationError::InvalidState(format!(
                        "role {} is not selectable; choose two of {} and {}",
                        role, options.selectable_roles[0], options.selectable_roles[1]
                    )));
                }
            }
            enrollment.pref_role1 = Some(role1);
            enrollment.pref_role2 = Some(role2);
            enrollment.pref_role3 = Some(options.mandatory_role);
            enrollment.primary_role = Some(options.mandatory_role);
            tx.update_enrollment_roles(&enrollment)?;
            tracing::info!(
                "enrollment {} chose roles {} and {}, primary {}",
                enrollment_id,
                role1,
                role2,
                options.mandatory_role
            );
            Ok(enrollment)
        })
    }

    fn effective_rules(&self, req: &GenerateTeams) -> TeamPlanRules {
        TeamPlanRules {
            min_juniors_per_team: req
                .min_juniors_per_team
                .unwrap_or(self.rules.min_juniors_per_team),
            max_juniors_per_team: req
                .max_juniors_per_team
                .unwrap_or(self.rules.max_juniors_per_team),
            leader_targets: req
                .leader_targets
                .map_or(self.rules.leader_targets, |o| o.apply(self.rules.leader_targets)),
            junior_targets_pct: req
                .junior_targets_pct
                .map_or(self.rules.junior_targets_pct, |o| {
                    o.apply(self.rules.junior_targets_pct)
                }),
        }
    }
}

/// Load a practica enrollment and compute its role options from the cohort's
/// current primary-role deficits.
fn options_for(
    tx: &dyn StoreTx,
    enrollment_id: &str,
) -> Result<(Enrollment, RoleOptions), RotationError> {
    let enrollment = tx
        .enrollment(enrollment_id)?
        .ok_or_else(|| RotationError::NotFound(format!("enrollment {enrollment_id}")))?;
    if enrollment.track != Track::PracticaInterna {
        return Err(RotationError::InvalidState(format!(
            "enrollment {enrollment_id} is not on the practica track"
        )));
    }
    if enrollment.status != EnrollmentStatus::Approved {
        return Err(RotationError::InvalidState(format!(
            "enrollment {enrollment_id} is not approved"
        )));
    }

    let cohort = tx.approved_enrollments(&enrollment.offering_id, Track::PracticaInterna)?;
    #[allow(clippy::cast_possible_truncation)]
    let targets = split_targets(cohort.len() as u32);
    let counts = primary_role_counts(&cohort);
    Ok((enrollment, pick_role_options(&targets, &counts)))
}
