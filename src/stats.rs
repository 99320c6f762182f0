//! Diagnostic event counters.
//!
//! The core has no user-facing errors (`spec.md` §7): every operational
//! anomaly is handled by degrading silently and bumping a named counter.
//! [`EventCounter`] is a minimal, lock-free counter in the style of the
//! teacher's `util::statistics::counter::EventCounter`, stripped of GC-phase
//! bookkeeping this crate has no use for (there is no notion of a "phase"
//! here, only a running total the host can read back at any time).

use std::sync::atomic::{AtomicU64, Ordering};

/// A simple monotonically-increasing named counter.
#[derive(Debug, Default)]
pub struct EventCounter {
    count: AtomicU64,
}

impl EventCounter {
    pub const fn new() -> Self {
        EventCounter {
            count: AtomicU64::new(0),
        }
    }

    /// Increments the counter by one.
    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current value.
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// The named diagnostic events from `spec.md` §7, owned by the [`crate::Sms`]
/// state object and readable at any time by the host simulator.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// A computed block index was `>= B`: a configuration error. The
    /// triggering update was dropped.
    pub access_pattern_block_index_over_spatial_pattern_limit: EventCounter,
    /// A PHT insert evicted a way whose pattern equalled the one being
    /// inserted.
    pub pattern_history_table_same_entry_evicted: EventCounter,
    /// A PHT insert evicted a way whose pattern differed from the one
    /// being inserted.
    pub pattern_history_table_different_entry_evicted: EventCounter,
    /// A PHT insert found a free way; nothing was evicted.
    pub pattern_history_table_no_entry_evicted: EventCounter,
    /// `at_transfer` found an AT entry for the evicted region and wrote it
    /// through to the PHT.
    pub accumulation_table_transfer_succeeded: EventCounter,
    /// `at_transfer` was invoked for a region with no AT entry.
    pub accumulation_table_transfer_failed: EventCounter,
}
