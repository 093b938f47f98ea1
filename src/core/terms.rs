//! Active-term resolution shared by activation and team formation.
//!
//! A term is active when its window contains the current instant; windows
//! missing either bound never count. Exactly one active candidate wins.
//! Several active candidates are ambiguous and surface as an error instead of
//! being silently resolved. What happens when nothing is active is the
//! caller's fallback, not this module's.

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::calendar::utc_day;
use crate::core::error::RotationError;
use crate::core::model::TermWindow;

/// Select the single candidate whose term window contains `now`.
///
/// `Ok(Some)` when exactly one candidate is active, `Ok(None)` when none is.
/// More than one active candidate is an `InvalidState` error naming `scope`.
pub fn pick_active<'a, T>(
    now: DateTime<Utc>,
    candidates: &'a [T],
    scope: &str,
    window: impl Fn(&T) -> Option<TermWindow>,
) -> Result<Option<&'a T>, RotationError> {
    let mut active = candidates.iter().filter(|candidate| {
        window(candidate).is_some_and(|term| match (term.starts_at, term.ends_at) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        })
    });
    let first = active.next();
    if active.next().is_some() {
        return Err(RotationError::InvalidState(format!(
            "multiple active {scope} found (term overlap)"
        )));
    }
    Ok(first)
}

/// Resolve a program start day from linked term windows when no explicit
/// override was given.
///
/// Preference order: the unique active term's start, else the earliest start
/// that is not in the past, else the latest past start. `Ok(None)` when no
/// term carries a start at all.
pub fn resolve_start_day(
    now: DateTime<Utc>,
    terms: &[TermWindow],
) -> Result<Option<NaiveDate>, RotationError> {
    if let Some(active) = pick_active(now, terms, "offerings", |term| Some(*term))? {
        return Ok(active.starts_at.map(utc_day));
    }

    let mut dated: Vec<DateTime<Utc>> = terms.iter().filter_map(|term| term.starts_at).collect();
    dated.sort_unstable();
    let upcoming = dated.iter().find(|start| **start >= now).copied();
    Ok(upcoming.or_else(|| dated.last().copied()).map(utc_day))
}
