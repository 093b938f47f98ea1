//! Role quota math: targets, deficits, and greedy assignment.
//!
//! Everything here is pure. Ties always resolve to the earliest role in
//! [`JobRole::ORDER`], which keeps every apportionment deterministic.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::core::model::{Enrollment, JobRole, RoleTable};

/// Share of the cohort each of QA, frontend, and backend receives in
/// [`split_targets`]; DevOps absorbs the remainder.
const PRIMARY_SHARE: f64 = 0.30;

/// Per-role targets for a practica cohort of `total` participants.
///
/// QA, frontend, and backend each receive `round(total * 30%)`; DevOps takes
/// exactly what is left, so the four targets always sum to `total`. When the
/// three rounded shares overshoot a small cohort, the overshoot is walked
/// back from backend, then frontend, then QA, keeping every target
/// non-negative.
pub fn split_targets(total: u32) -> RoleTable {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let share = (f64::from(total) * PRIMARY_SHARE).round() as u32;
    let mut targets = RoleTable::new(share, share, share, 0);

    let mut allotted = targets.qa + targets.frontend + targets.backend;
    for role in [JobRole::Backend, JobRole::Frontend, JobRole::Qa] {
        if allotted <= total {
            break;
        }
        let cut = (allotted - total).min(targets[role]);
        targets[role] -= cut;
        allotted -= cut;
    }
    targets.devops = total - allotted;
    targets
}

/// Convert an integer percentage split into headcounts for `total`
/// participants by largest-remainder apportionment.
///
/// Every share is floored first; leftover units then go to the roles with the
/// largest fractional remainder, ties in canonical role order, cycling while
/// units remain. The result sums to `total` whenever the split sums to 100.
pub fn percentage_targets(total: u32, pct: &RoleTable) -> RoleTable {
    let mut targets = RoleTable::default();
    let mut remainders: Vec<(JobRole, f64)> = Vec::with_capacity(JobRole::ORDER.len());
    for role in JobRole::ORDER {
        let raw = f64::from(pct[role]) / 100.0 * f64::from(total);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let floored = raw.floor() as u32;
        targets[role] = floored;
        remainders.push((role, raw.fract()));
    }
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut leftover = total.saturating_sub(targets.total());
    let mut cursor = 0;
    while leftover > 0 {
        targets[remainders[cursor % remainders.len()].0] += 1;
        leftover -= 1;
        cursor += 1;
    }
    targets
}

/// A role and how far it sits under (positive) or over (negative) its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDeficit {
    /// Role being scored.
    pub role: JobRole,
    /// `target - current`; larger means more under quota.
    pub deficit: i64,
}

/// Score every role by `target - current` and sort most-under-quota first.
/// Ties keep the canonical role order.
pub fn rank_deficits(targets: &RoleTable, counts: &RoleTable) -> Vec<RoleDeficit> {
    let mut scored: Vec<RoleDeficit> = JobRole::ORDER
        .iter()
        .map(|&role| RoleDeficit {
            role,
            deficit: i64::from(targets[role]) - i64::from(counts[role]),
        })
        .collect();
    scored.sort_by_key(|entry| Reverse(entry.deficit));
    scored
}

/// Count assigned primary roles across a cohort. Preferences do not count;
/// only `primary_role` marks a seat as taken.
pub fn primary_role_counts(cohort: &[Enrollment]) -> RoleTable {
    let mut counts = RoleTable::default();
    for enrollment in cohort {
        if let Some(role) = enrollment.primary_role {
            counts[role] += 1;
        }
    }
    counts
}

/// Assign a role to each of `count` juniors by repeatedly picking the role
/// with the largest remaining `target - assigned`.
///
/// Ties resolve to the earliest role in canonical order. Total: once every
/// target is exhausted, the leftover juniors keep cycling through the roles
/// evenly as the deficits go negative together.
pub fn assign_junior_roles(count: usize, targets: &RoleTable) -> Vec<JobRole> {
    let mut assigned = RoleTable::default();
    let mut roles = Vec::with_capacity(count);
    for _ in 0..count {
        let mut best = JobRole::ORDER[0];
        let mut best_deficit = i64::MIN;
        for role in JobRole::ORDER {
            let deficit = i64::from(targets[role]) - i64::from(assigned[role]);
            if deficit > best_deficit {
                best = role;
                best_deficit = deficit;
            }
        }
        assigned[best] += 1;
        roles.push(best);
    }
    roles
}

/// Outcome of the practica role-choice ranking: the most-deficient role is
/// mandatory, and the participant picks two of the next-ranked roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleOptions {
    /// Role the participant must take as primary.
    pub mandatory_role: JobRole,
    /// Roles offered as the free picks (second and third by deficit).
    pub selectable_roles: [JobRole; 2],
    /// Mandatory role plus the selectable pair, in deficit order.
    pub all_shown_roles: [JobRole; 3],
    /// Targets the ranking was computed against.
    pub targets: RoleTable,
    /// Primary-role counts the ranking was computed against.
    pub counts: RoleTable,
    /// Full deficit ranking, most under quota first.
    pub deficits: Vec<RoleDeficit>,
}

/// Rank deficits and split the result into the mandatory role and the
/// selectable pair.
pub fn pick_role_options(targets: &RoleTable, counts: &RoleTable) -> RoleOptions {
    let deficits = rank_deficits(targets, counts);
    let mandatory_role = deficits[0].role;
    let selectable_roles = [deficits[1].role, deficits[2].role];
    RoleOptions {
        mandatory_role,
        selectable_roles,
        all_shown_roles: [mandatory_role, selectable_roles[0], selectable_roles[1]],
        targets: *targets,
        counts: *counts,
        deficits,
    }
}
