//! Accumulation Table (`spec.md` §4.4): tracks regions that have had at
//! least two distinct intra-region blocks touched in the current
//! generation, accumulating the generation's bitmap.

use crate::address::Address;
use crate::pattern::AccessPattern;
use crate::pattern_history_table::PatternHistoryTable;
use crate::stats::Diagnostics;
use crate::table::SetAssocTable;

/// Tracks regions with two or more distinct blocks touched this
/// generation. Capacity `accumulation_table_size`, one set, LRU on
/// conflict.
pub struct AccumulationTable {
    table: SetAssocTable,
}

impl AccumulationTable {
    pub fn new(capacity: usize) -> Self {
        AccumulationTable {
            table: SetAssocTable::new_single_set(capacity),
        }
    }

    /// Returns the stored pattern for `key`, if present, refreshing
    /// recency.
    pub fn at_check(&mut self, key: Address) -> Option<&mut AccessPattern> {
        self.table.check(key)
    }

    /// Is `key` present (without disturbing recency)?
    pub fn contains(&self, key: Address) -> bool {
        self.table.contains(key)
    }

    /// Inserts `pattern` at `key`. Called only from FT promotion; `pattern`
    /// is the FT's stored pattern OR'd with the promoting bit.
    pub fn at_insert(&mut self, key: Address, pattern: AccessPattern) {
        self.table.insert(key, pattern);
    }

    /// Applies a new access to an existing AT entry. Overwrites the stored
    /// pattern with `new_bit | p` if `new_bit` adds a block not already
    /// present; otherwise this is a no-op. Either way recency is
    /// refreshed (`spec.md` §4.4).
    pub fn at_update(&mut self, key: Address, new_bit: AccessPattern) {
        if let Some(p) = self.table.check(key) {
            if p.adds_new_bits(new_bit) {
                let merged = p.union(new_bit);
                self.table.insert(key, merged);
            }
        }
    }

    /// If `key` is present, writes its pattern through to the PHT keyed by
    /// the same region base and invalidates the AT entry. Returns whether
    /// a transfer occurred (`spec.md` §4.4).
    pub fn at_transfer(
        &mut self,
        key: Address,
        pht: &mut PatternHistoryTable,
        diagnostics: &Diagnostics,
    ) -> bool {
        match self.table.check(key) {
            Some(&mut pattern) => {
                self.table.invalidate(key);
                pht.pht_insert(key, pattern, diagnostics);
                diagnostics.accumulation_table_transfer_succeeded.inc();
                log::debug!("AT->PHT transfer for region {key:?}: pattern {pattern:?}");
                true
            }
            None => {
                diagnostics.accumulation_table_transfer_failed.inc();
                false
            }
        }
    }
}
