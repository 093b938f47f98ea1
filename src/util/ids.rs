//! Identifier sources for rows created ahead of insertion.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::store::IdSource;

/// Random v4 UUID source for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Sequential ids (`prefix-1`, `prefix-2`, ...) for tests and deterministic
/// fixtures.
#[derive(Debug)]
pub struct SequenceSource {
    prefix: String,
    next: AtomicU64,
}

impl SequenceSource {
    /// Create a source minting ids under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl IdSource for SequenceSource {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
