//! Pattern History Table (`spec.md` §4.5): persists learned patterns
//! across generations, keyed by region base.

use crate::address::Address;
use crate::pattern::AccessPattern;
use crate::stats::Diagnostics;
use crate::table::{EvictOutcome, SetAssocTable};

/// Persists the union of blocks touched during past completed generations
/// of a region. Capacity `pht_entries` (`pht_sets * pht_ways`), LRU
/// replacement within each set.
pub struct PatternHistoryTable {
    table: SetAssocTable,
}

impl PatternHistoryTable {
    /// `region_size` is the PHT's own line size (`spec.md` §4.5); the set
    /// index is drawn from the region *number*, i.e. the bits of the key
    /// above `log2(region_size)`, since a region-base key always has its
    /// low `log2(region_size)` bits zero.
    pub fn new(num_sets: usize, ways: usize, region_size: u32) -> Self {
        let key_shift = region_size.trailing_zeros();
        PatternHistoryTable {
            table: SetAssocTable::with_key_shift(num_sets, ways, key_shift),
        }
    }

    /// True iff any way in `key`'s set has a valid entry whose tag matches
    /// `key`.
    pub fn pht_check(&self, key: Address) -> bool {
        self.table.contains(key)
    }

    /// Inserts `pattern` at `key`, LRU-evicting a way on a full set. Bumps
    /// the appropriate eviction-diagnostic counter.
    pub fn pht_insert(&mut self, key: Address, pattern: AccessPattern, diagnostics: &Diagnostics) {
        match self.table.insert(key, pattern) {
            EvictOutcome::NoEviction => {
                diagnostics.pattern_history_table_no_entry_evicted.inc();
            }
            EvictOutcome::EvictedSame => {
                diagnostics.pattern_history_table_same_entry_evicted.inc();
            }
            EvictOutcome::EvictedDifferent => {
                diagnostics
                    .pattern_history_table_different_entry_evicted
                    .inc();
            }
        }
    }

    /// Returns the OR of patterns across all valid ways in `key`'s set
    /// whose tag matches `key`. With the wired `RegionBase` indexing
    /// scheme there is at most one matching way per key; the OR is a
    /// defensive generalisation for the `PcXorOffset` scheme noted in
    /// `spec.md` §9, under which multiple ways of one set could share a
    /// triggering PC.
    pub fn pht_lookup(&self, key: Address) -> AccessPattern {
        self.table.lookup_merged(key)
    }
}
