//! Filter Table (`spec.md` §4.3): tracks regions seen exactly once in the
//! current generation.

use crate::accumulation_table::AccumulationTable;
use crate::address::Address;
use crate::pattern::AccessPattern;
use crate::table::SetAssocTable;

/// Tracks first-touch regions of the current generation. Capacity
/// `filter_table_size`, one set (directly addressed), LRU on conflict.
pub struct FilterTable {
    table: SetAssocTable,
}

impl FilterTable {
    pub fn new(capacity: usize) -> Self {
        FilterTable {
            table: SetAssocTable::new_single_set(capacity),
        }
    }

    /// Returns the stored pattern for `key`, if present, refreshing
    /// recency.
    pub fn ft_check(&mut self, key: Address) -> Option<&mut AccessPattern> {
        self.table.check(key)
    }

    /// Is `key` present (without disturbing recency)?
    pub fn contains(&self, key: Address) -> bool {
        self.table.contains(key)
    }

    /// Unconditionally inserts `pattern` at `key`. The caller has already
    /// verified `key` is absent from the FT and the AT.
    pub fn ft_insert(&mut self, key: Address, pattern: AccessPattern) {
        self.table.insert(key, pattern);
    }

    /// Invalidates `key`'s entry, if any.
    pub fn invalidate(&mut self, key: Address) {
        self.table.invalidate(key);
    }
}

/// Applies a new access to an existing FT entry. If `new_bit` touches a
/// block not already in `current_pattern`, the region is promoted to the
/// Accumulation Table with the merged pattern and the FT entry is
/// invalidated; otherwise the FT entry is left untouched (`spec.md` §4.3).
///
/// Returns `true` if the region was promoted to the AT.
pub fn ft_update(
    ft: &mut FilterTable,
    at: &mut AccumulationTable,
    key: Address,
    new_bit: AccessPattern,
) -> bool {
    let current_pattern = match ft.table.check(key) {
        Some(p) => *p,
        None => return false,
    };

    if !current_pattern.adds_new_bits(new_bit) {
        // Still exactly one distinct block touched; nothing to do.
        return false;
    }

    let merged = current_pattern.union(new_bit);
    ft.invalidate(key);
    at.at_insert(key, merged);
    log::trace!("FT->AT promotion for region {key:?}: pattern {merged:?}");
    true
}
