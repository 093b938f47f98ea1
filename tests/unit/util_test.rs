//! Tests for utility helpers

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use kraken_rotation::core::{Clock, IdSource};
use kraken_rotation::util::clock::{FixedClock, SystemClock};
use kraken_rotation::util::ids::{SequenceSource, UuidSource};
use kraken_rotation::util::telemetry::init_tracing;

#[test]
fn test_fixed_clock_returns_the_pinned_instant() {
    let instant = Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap();
    let clock = FixedClock(instant);
    assert_eq!(clock.now(), instant);
    assert_eq!(clock.now(), instant);
}

#[test]
fn test_system_clock_moves_forward() {
    let clock = SystemClock;
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}

#[test]
fn test_sequence_source_mints_in_order() {
    let ids = SequenceSource::new("blk");
    assert_eq!(ids.next_id(), "blk-1");
    assert_eq!(ids.next_id(), "blk-2");
    assert_eq!(ids.next_id(), "blk-3");
}

#[test]
fn test_uuid_source_mints_unique_ids() {
    let ids = UuidSource;
    let minted: HashSet<String> = (0..64).map(|_| ids.next_id()).collect();
    assert_eq!(minted.len(), 64);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
