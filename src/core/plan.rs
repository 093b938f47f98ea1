//! Fixed block plan derived from a program's anchor start date.
//!
//! Every program gets the same calendar shape: three back-to-back three-month
//! leader blocks, a one-month documentation block starting nine months in,
//! and four back-to-back two-month junior blocks that run on their own
//! timeline concurrently with the leader blocks. All boundaries are computed
//! from the anchor, so consecutive blocks share an edge even across clamped
//! month ends.

use chrono::NaiveDate;

use crate::core::calendar::{add_months, day_start};
use crate::core::error::RotationError;
use crate::core::model::{BlockId, BlockKind, ProgramBlock, ProgramId};

/// Number of leader blocks in a program.
pub const LEADER_BLOCKS: u32 = 3;
/// Months spanned by each leader block.
pub const LEADER_BLOCK_MONTHS: u32 = 3;
/// Months into the program at which the documentation block starts.
pub const DOCS_BLOCK_OFFSET_MONTHS: u32 = 9;
/// Number of junior blocks in a program.
pub const JUNIOR_BLOCKS: u32 = 4;
/// Months spanned by each junior block.
pub const JUNIOR_BLOCK_MONTHS: u32 = 2;

/// One block of the plan, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPlanEntry {
    /// Block kind.
    pub kind: BlockKind,
    /// 1-based position among blocks of the same kind.
    pub order: u32,
    /// Display label.
    pub label: String,
    /// First day of the block.
    pub starts_on: NaiveDate,
    /// First day after the block.
    pub ends_on: NaiveDate,
}

impl BlockPlanEntry {
    /// Convert the entry into a persistable block row.
    pub fn into_block(self, id: BlockId, program_id: ProgramId) -> ProgramBlock {
        ProgramBlock {
            id,
            program_id,
            kind: self.kind,
            order: self.order,
            label: self.label,
            starts_at: day_start(self.starts_on),
            ends_at: day_start(self.ends_on),
        }
    }
}

fn advance(date: NaiveDate, months: u32) -> Result<NaiveDate, RotationError> {
    add_months(date, months).ok_or_else(|| {
        RotationError::InvalidState("block plan leaves the supported date range".into())
    })
}

/// Build the full block plan anchored at `start`.
pub fn build_blocks(start: NaiveDate) -> Result<Vec<BlockPlanEntry>, RotationError> {
    let mut entries = Vec::with_capacity((LEADER_BLOCKS + 1 + JUNIOR_BLOCKS) as usize);

    for i in 1..=LEADER_BLOCKS {
        entries.push(BlockPlanEntry {
            kind: BlockKind::LeaderBlock,
            order: i,
            label: format!("Leader Block {i}"),
            starts_on: advance(start, (i - 1) * LEADER_BLOCK_MONTHS)?,
            ends_on: advance(start, i * LEADER_BLOCK_MONTHS)?,
        });
    }

    // The docs month is anchored on its own start so a clamped day carries
    // through to its end.
    let docs_start = advance(start, DOCS_BLOCK_OFFSET_MONTHS)?;
    entries.push(BlockPlanEntry {
        kind: BlockKind::DocsBlock,
        order: 1,
        label: "Docs Month".into(),
        starts_on: docs_start,
        ends_on: advance(docs_start, 1)?,
    });

    for i in 1..=JUNIOR_BLOCKS {
        entries.push(BlockPlanEntry {
            kind: BlockKind::JuniorBlock,
            order: i,
            label: format!("Junior Block {i}"),
            starts_on: advance(start, (i - 1) * JUNIOR_BLOCK_MONTHS)?,
            ends_on: advance(start, i * JUNIOR_BLOCK_MONTHS)?,
        });
    }

    Ok(entries)
}

/// Check that every entry ends strictly after it starts. A violation means
/// the calendar constants are misconfigured, and activation must abort.
pub fn validate_ranges(entries: &[BlockPlanEntry]) -> Result<(), RotationError> {
    if entries.iter().any(|entry| entry.ends_on <= entry.starts_on) {
        return Err(RotationError::InvalidState("invalid block range".into()));
    }
    Ok(())
}
