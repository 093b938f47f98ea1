//! Program activation: resolve the anchor start date, persist the block
//! calendar exactly once, and flip the program to active.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calendar::{day_start, parse_start_date};
use crate::core::error::RotationError;
use crate::core::model::{
    sort_blocks, LinkedOffering, Program, ProgramBlock, ProgramStatus, TermWindow,
};
use crate::core::plan::{build_blocks, validate_ranges};
use crate::core::store::{IdSource, StoreTx};
use crate::core::terms::resolve_start_day;

/// A program together with its ordered block calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCalendar {
    /// The program row as persisted.
    pub program: Program,
    /// Blocks ordered by start, kind, and order.
    pub blocks: Vec<ProgramBlock>,
}

/// Activate `program_id`, generating its block calendar exactly once.
///
/// Re-running activation against a program that is already active, or that
/// already has blocks, is a no-op returning the persisted state. Otherwise
/// the anchor start resolves through a fallback chain: the caller's override,
/// the linked offering terms (active term, then earliest upcoming, then
/// latest past), and finally Jan 1 of the program's academic year.
pub fn activate_program(
    tx: &mut dyn StoreTx,
    ids: &dyn IdSource,
    program_id: &str,
    override_start: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ProgramCalendar, RotationError> {
    let mut program = tx
        .program(program_id)?
        .ok_or_else(|| RotationError::NotFound(format!("rotation program {program_id}")))?;

    let mut existing = tx.blocks(program_id)?;
    if program.status == ProgramStatus::Active || !existing.is_empty() {
        sort_blocks(&mut existing);
        tracing::debug!(
            "program {} already activated, returning {} persisted blocks",
            program_id,
            existing.len()
        );
        return Ok(ProgramCalendar { program, blocks: existing });
    }

    let links = tx.offering_links(program_id)?;
    let start = resolve_start(&program, &links, override_start, now)?;

    let entries = build_blocks(start)?;
    validate_ranges(&entries)?;
    let rows: Vec<ProgramBlock> = entries
        .into_iter()
        .map(|entry| entry.into_block(ids.next_id(), program_id.to_owned()))
        .collect();
    tx.insert_blocks(&rows)?;

    let ends_at = rows
        .iter()
        .map(|block| block.ends_at)
        .max()
        .ok_or_else(|| RotationError::InvalidState("empty block plan".into()))?;

    program.status = ProgramStatus::Active;
    program.started_at = Some(now);
    program.starts_at = day_start(start);
    program.ends_at = ends_at;
    tx.update_program(&program)?;

    let mut blocks = rows;
    sort_blocks(&mut blocks);
    tracing::info!(
        "program {} activated with {} blocks starting {}",
        program_id,
        blocks.len(),
        start
    );
    Ok(ProgramCalendar { program, blocks })
}

/// Resolve the anchor start day for a draft program.
fn resolve_start(
    program: &Program,
    links: &[LinkedOffering],
    override_start: Option<&str>,
    now: DateTime<Utc>,
) -> Result<NaiveDate, RotationError> {
    if let Some(day) = override_start.and_then(parse_start_date) {
        return Ok(day);
    }

    let terms: Vec<TermWindow> = links.iter().filter_map(|link| link.term).collect();
    if let Some(day) = resolve_start_day(now, &terms)? {
        tracing::debug!("program {} start {} derived from linked terms", program.id, day);
        return Ok(day);
    }

    let fallback = NaiveDate::from_ymd_opt(program.academic_year, 1, 1).ok_or_else(|| {
        RotationError::InvalidState(format!(
            "academic year {} is out of range",
            program.academic_year
        ))
    })?;
    tracing::debug!("program {} start fell back to {}", program.id, fallback);
    Ok(fallback)
}
