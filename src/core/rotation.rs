//! Deterministic junior rotation across the four junior blocks.
//!
//! The plan is a pure function of cohort order and block order: the junior at
//! position `i` holds role `ORDER[(i + b) % 4]` during block `b`. Every
//! junior therefore visits all four roles exactly once, and each block's role
//! split stays even to within one participant.

use serde::{Deserialize, Serialize};

use crate::core::error::RotationError;
use crate::core::model::{
    BlockId, BlockKind, EnrollmentId, JobRole, OfferingId, ProgramId, ProgramStatus, RoleTable,
    Track, UserId,
};
use crate::core::plan::JUNIOR_BLOCKS;
use crate::core::store::StoreTx;

/// Role planned for the junior at `junior_index` during the junior block at
/// `block_index`, both 0-based.
pub const fn role_for(junior_index: usize, block_index: usize) -> JobRole {
    JobRole::ORDER[(junior_index + block_index) % JobRole::ORDER.len()]
}

/// Planned role counts for one junior block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRotation {
    /// Block the counts apply to.
    pub block_id: BlockId,
    /// 1-based junior block order.
    pub order: u32,
    /// Juniors per role during the block.
    pub counts: RoleTable,
    /// Juniors in the block.
    pub total: usize,
}

/// A single planned block-to-role pairing for one junior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRole {
    /// Block the role applies to.
    pub block_id: BlockId,
    /// 1-based junior block order.
    pub order: u32,
    /// Role held during the block.
    pub role: JobRole,
}

/// One junior's planned role per junior block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JuniorPlan {
    /// Enrollment the plan line belongs to.
    pub enrollment_id: EnrollmentId,
    /// Student behind the enrollment.
    pub student_id: UserId,
    /// Planned roles in block order.
    pub roles: Vec<BlockRole>,
}

/// Full rotation preview for a program's junior cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationPreview {
    /// Program previewed.
    pub program_id: ProgramId,
    /// Induction offering the cohort was read from.
    pub offering_id: OfferingId,
    /// Cohort size.
    pub juniors_total: usize,
    /// Per-block role counts.
    pub blocks: Vec<BlockRotation>,
    /// Per-junior role sequence.
    pub plan: Vec<JuniorPlan>,
}

/// Compute the rotation preview for a program. Read-only; nothing persists.
///
/// The program must be active with its four junior blocks generated, must
/// have exactly one linked induction offering, and that offering must carry
/// at least one approved enrollment.
pub fn preview_rotation(
    tx: &dyn StoreTx,
    program_id: &str,
) -> Result<RotationPreview, RotationError> {
    let program = tx
        .program(program_id)?
        .ok_or_else(|| RotationError::NotFound(format!("rotation program {program_id}")))?;
    if program.status != ProgramStatus::Active {
        return Err(RotationError::InvalidState(format!(
            "rotation program {program_id} is not active"
        )));
    }

    let mut junior_blocks: Vec<_> = tx
        .blocks(program_id)?
        .into_iter()
        .filter(|block| block.kind == BlockKind::JuniorBlock)
        .collect();
    junior_blocks.sort_by_key(|block| block.order);
    if junior_blocks.len() != JUNIOR_BLOCKS as usize {
        return Err(RotationError::InvalidState(format!(
            "expected {} junior blocks, found {}; activate the program first",
            JUNIOR_BLOCKS,
            junior_blocks.len()
        )));
    }

    let induccion: Vec<_> = tx
        .offering_links(program_id)?
        .into_iter()
        .filter(|link| link.kind == Track::Induccion)
        .collect();
    let offering_id = match induccion.as_slice() {
        [] => {
            return Err(RotationError::NotFound(format!(
                "no induction offering linked to program {program_id}"
            )))
        }
        [only] => only.offering_id.clone(),
        _ => {
            return Err(RotationError::InvalidState(format!(
                "multiple induction offerings linked to program {program_id}"
            )))
        }
    };

    let juniors = tx.approved_enrollments(&offering_id, Track::Induccion)?;
    if juniors.is_empty() {
        return Err(RotationError::InvalidState(
            "no approved induction enrollments found".into(),
        ));
    }

    let blocks = junior_blocks
        .iter()
        .enumerate()
        .map(|(block_idx, block)| {
            let mut counts = RoleTable::default();
            for junior_idx in 0..juniors.len() {
                counts[role_for(junior_idx, block_idx)] += 1;
            }
            BlockRotation {
                block_id: block.id.clone(),
                order: block.order,
                counts,
                total: juniors.len(),
            }
        })
        .collect();

    let plan = juniors
        .iter()
        .enumerate()
        .map(|(junior_idx, junior)| JuniorPlan {
            enrollment_id: junior.id.clone(),
            student_id: junior.student_id.clone(),
            roles: junior_blocks
                .iter()
                .enumerate()
                .map(|(block_idx, block)| BlockRole {
                    block_id: block.id.clone(),
                    order: block.order,
                    role: role_for(junior_idx, block_idx),
                })
                .collect(),
        })
        .collect();

    tracing::debug!(
        "rotation preview for program {}: {} juniors across {} blocks",
        program_id,
        juniors.len(),
        junior_blocks.len()
    );

    Ok(RotationPreview {
        program_id: program_id.to_owned(),
        offering_id,
        juniors_total: juniors.len(),
        blocks,
        plan,
    })
}
