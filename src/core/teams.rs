//! Team formation for a leader block: leader selection per role quota, team
//! creation, and the two-phase junior fill.
//!
//! Phase A deals every team its guaranteed minimum of juniors round-robin;
//! phase B keeps dealing round-robin until every team sits at the maximum or
//! the juniors run out. A run either commits every row it creates or commits
//! nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::RotationError;
use crate::core::model::{
    BlockId, BlockKind, Enrollment, JobRole, LinkedOffering, OfferingId, ProgramId,
    ProgramStatus, RoleTable, Team, TeamMembership, TeamRole, Track,
};
use crate::core::quota::{assign_junior_roles, percentage_targets};
use crate::core::store::{IdSource, StoreTx};
use crate::core::terms::pick_active;

/// Effective team-formation rules after merging request overrides onto the
/// configured defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPlanRules {
    /// Guaranteed juniors per team (phase A rounds).
    pub min_juniors_per_team: u32,
    /// Hard cap on juniors per team (phase B stops here).
    pub max_juniors_per_team: u32,
    /// Leader headcount to select per role.
    pub leader_targets: RoleTable,
    /// Junior percentage split per role; must total 100.
    pub junior_targets_pct: RoleTable,
}

impl TeamPlanRules {
    /// Check internal consistency before any store work happens.
    pub fn validate(&self) -> Result<(), RotationError> {
        if self.min_juniors_per_team > self.max_juniors_per_team {
            return Err(RotationError::InvalidState(
                "min juniors per team cannot exceed max juniors per team".into(),
            ));
        }
        if self.junior_targets_pct.total() != 100 {
            return Err(RotationError::InvalidState(format!(
                "junior percentage split must total 100, got {}",
                self.junior_targets_pct.total()
            )));
        }
        Ok(())
    }
}

/// Summary of one team-generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGeneration {
    /// Program the run belongs to.
    pub program_id: ProgramId,
    /// Leader block the teams were generated for.
    pub block_id: BlockId,
    /// Teams created.
    pub teams_created: usize,
    /// Leaders selected per role.
    pub leaders_used: RoleTable,
    /// Juniors placed on teams.
    pub juniors_assigned: usize,
    /// Junior placements per role.
    pub juniors_by_role: RoleTable,
    /// Non-fatal shortfalls observed during the fill.
    pub warnings: Vec<String>,
    /// Practica offering the leaders came from.
    pub practica_offering_id: OfferingId,
    /// Induction offering the juniors came from.
    pub induccion_offering_id: OfferingId,
}

/// Generate teams for a leader block inside the supplied transaction.
///
/// The block must belong to an active program and must not already have
/// memberships unless `force` is set, in which case the previous generation
/// is deleted first.
pub fn generate_teams(
    tx: &mut dyn StoreTx,
    ids: &dyn IdSource,
    program_id: &str,
    block_id: &str,
    rules: &TeamPlanRules,
    force: bool,
    now: DateTime<Utc>,
) -> Result<TeamGeneration, RotationError> {
    rules.validate()?;

    let program = tx
        .program(program_id)?
        .ok_or_else(|| RotationError::NotFound(format!("rotation program {program_id}")))?;
    if program.status != ProgramStatus::Active {
        return Err(RotationError::InvalidState(format!(
            "rotation program {program_id} is not active"
        )));
    }

    let block = tx
        .block(block_id)?
        .filter(|block| block.program_id == program_id)
        .ok_or_else(|| {
            RotationError::NotFound(format!("block {block_id} in program {program_id}"))
        })?;
    if block.kind != BlockKind::LeaderBlock {
        return Err(RotationError::InvalidState(format!(
            "block {block_id} is not a leader block"
        )));
    }

    let existing = tx.membership_count(block_id)?;
    if existing > 0 {
        if !force {
            return Err(RotationError::Conflict(format!(
                "teams already generated for block {block_id}"
            )));
        }
        tracing::warn!(
            "force regeneration: dropping {} memberships for block {}",
            existing,
            block_id
        );
        tx.delete_block_assignments(block_id)?;
    }

    let links = tx.offering_links(program_id)?;
    let practica = active_offering(&links, Track::PracticaInterna, now)?;
    let induccion = active_offering(&links, Track::Induccion, now)?;

    let leader_pool = tx.approved_enrollments(&practica.offering_id, Track::PracticaInterna)?;
    let junior_pool = tx.approved_enrollments(&induccion.offering_id, Track::Induccion)?;
    let leaders = select_leaders(&leader_pool, &rules.leader_targets)?;

    let mut leaders_used = RoleTable::default();
    let teams: Vec<Team> = leaders
        .iter()
        .map(|(_, role)| {
            leaders_used[*role] += 1;
            Team {
                id: ids.next_id(),
                name: format!("{}-Team-{}", role, leaders_used[*role]),
                offering_id: practica.offering_id.clone(),
                program_id: program_id.to_owned(),
                leader_block_id: block_id.to_owned(),
                created_by: practica.teacher_id.clone(),
            }
        })
        .collect();
    tx.insert_teams(&teams)?;

    #[allow(clippy::cast_possible_truncation)]
    let junior_targets = percentage_targets(junior_pool.len() as u32, &rules.junior_targets_pct);
    let junior_roles = assign_junior_roles(junior_pool.len(), &junior_targets);

    let (assignments, assigned, warnings) = fill_teams(
        teams.len(),
        junior_pool.len(),
        rules.min_juniors_per_team as usize,
        rules.max_juniors_per_team as usize,
    );

    let mut memberships: Vec<TeamMembership> = Vec::with_capacity(leaders.len() + assigned);
    for ((enrollment, role), team) in leaders.iter().zip(&teams) {
        memberships.push(TeamMembership {
            team_id: team.id.clone(),
            user_id: enrollment.student_id.clone(),
            enrollment_id: enrollment.id.clone(),
            block_id: block_id.to_owned(),
            team_role: TeamRole::Lead,
            job_role: *role,
        });
    }

    let mut juniors_by_role = RoleTable::default();
    for (team, slots) in teams.iter().zip(&assignments) {
        for &junior_idx in slots {
            let junior = &junior_pool[junior_idx];
            let role = junior_roles[junior_idx];
            juniors_by_role[role] += 1;
            memberships.push(TeamMembership {
                team_id: team.id.clone(),
                user_id: junior.student_id.clone(),
                enrollment_id: junior.id.clone(),
                block_id: block_id.to_owned(),
                team_role: TeamRole::Member,
                job_role: role,
            });
        }
    }
    tx.insert_memberships(&memberships)?;

    tracing::info!(
        "generated {} teams for block {}: {} leaders, {} of {} juniors placed",
        teams.len(),
        block_id,
        leaders.len(),
        assigned,
        junior_pool.len()
    );

    Ok(TeamGeneration {
        program_id: program_id.to_owned(),
        block_id: block_id.to_owned(),
        teams_created: teams.len(),
        leaders_used,
        juniors_assigned: assigned,
        juniors_by_role,
        warnings,
        practica_offering_id: practica.offering_id.clone(),
        induccion_offering_id: induccion.offering_id.clone(),
    })
}

/// Resolve the single usable offering link of `kind`: the unique link whose
/// term contains `now`, else the sole link of that kind.
fn active_offering(
    links: &[LinkedOffering],
    kind: Track,
    now: DateTime<Utc>,
) -> Result<&LinkedOffering, RotationError> {
    let candidates: Vec<&LinkedOffering> =
        links.iter().filter(|link| link.kind == kind).collect();
    let scope = format!("{kind} program offerings");
    if let Some(active) = pick_active(now, &candidates, &scope, |link| link.term)? {
        return Ok(active);
    }
    match candidates.as_slice() {
        [only] => Ok(only),
        _ => Err(RotationError::InvalidState(format!(
            "no active {kind} program offering found"
        ))),
    }
}

/// Bucket approved practica enrollments by role and take each role's quota
/// from the front, in canonical role order.
///
/// The role of a leader is their assigned primary role, falling back to their
/// first preference; an enrollment with neither is broken data.
fn select_leaders<'a>(
    pool: &'a [Enrollment],
    targets: &RoleTable,
) -> Result<Vec<(&'a Enrollment, JobRole)>, RotationError> {
    let mut buckets: [Vec<&Enrollment>; 4] = Default::default();
    for enrollment in pool {
        let role = enrollment.primary_role.or(enrollment.pref_role1).ok_or_else(|| {
            RotationError::DataIntegrity(format!(
                "approved practica enrollment {} has no resolvable role",
                enrollment.id
            ))
        })?;
        buckets[role.index()].push(enrollment);
    }

    let mut selected = Vec::with_capacity(targets.total() as usize);
    for role in JobRole::ORDER {
        let needed = targets[role] as usize;
        let bucket = &buckets[role.index()];
        if bucket.len() < needed {
            return Err(RotationError::InvalidState(format!(
                "not enough approved leaders for {}: need {}, have {}",
                role,
                needed,
                bucket.len()
            )));
        }
        selected.extend(bucket.iter().take(needed).map(|enrollment| (*enrollment, role)));
    }
    Ok(selected)
}

/// Deal `juniors` into `teams` slots: phase A gives every team `min` seats
/// round-robin, phase B keeps dealing up to `max`. Returns the junior indices
/// per team, the number placed, and any shortfall warnings.
fn fill_teams(
    teams: usize,
    juniors: usize,
    min: usize,
    max: usize,
) -> (Vec<Vec<usize>>, usize, Vec<String>) {
    let mut assignments: Vec<Vec<usize>> = vec![Vec::new(); teams];
    let mut warnings = Vec::new();
    let mut next = 0;

    'rounds: for _ in 0..min {
        for slots in &mut assignments {
            if next >= juniors {
                warnings.push("not enough juniors to fill the minimum per team".into());
                break 'rounds;
            }
            slots.push(next);
            next += 1;
        }
    }

    let mut progressed = true;
    while next < juniors && progressed {
        progressed = false;
        for slots in &mut assignments {
            if next >= juniors {
                break;
            }
            if slots.len() >= max {
                continue;
            }
            slots.push(next);
            next += 1;
            progressed = true;
        }
    }
    if next < juniors {
        warnings.push("not enough team slots to assign all juniors".into());
        tracing::warn!("{} juniors left without a team seat", juniors - next);
    }

    (assignments, next, warnings)
}
