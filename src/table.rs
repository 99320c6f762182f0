//! Table primitives (`spec.md` §4.2): a uniform, fixed-capacity,
//! set-associative, LRU-replaced store keyed by region base, shared by the
//! Filter Table, Accumulation Table and Pattern History Table. This is the
//! SMS's own bookkeeping table — distinct from (and much smaller than) the
//! host's data cache, which is an opaque collaborator per `spec.md` §6.2.

use crate::address::Address;
use crate::pattern::AccessPattern;

/// Outcome of an [`SetAssocTable::insert`], for diagnostic purposes only;
/// FT/AT discard the evicted pattern, the PHT additionally counts it
/// (`spec.md` §4.2, §4.5, §7).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum EvictOutcome {
    NoEviction,
    EvictedSame,
    EvictedDifferent,
}

#[derive(Copy, Clone, Default)]
struct Entry {
    valid: bool,
    tag: u64,
    pattern: AccessPattern,
    /// Monotonically increasing recency stamp; higher is more recent.
    last_used: u64,
}

/// A fixed-capacity, set-associative table of `(region base, AccessPattern)`
/// pairs with LRU replacement within each set.
///
/// `ways == num_entries` degenerates to the direct-mapped, one-set layout
/// the Filter and Accumulation Tables use; the Pattern History Table uses
/// multiple sets and multiple ways per set.
pub struct SetAssocTable {
    entries: Vec<Entry>,
    num_sets: usize,
    ways: usize,
    /// Bits to shift a key right before splitting it into set index and
    /// tag. Region-base keys have their low `log2(region_size)` bits
    /// always zero, so those bits would make useless set-index bits; the
    /// PHT sets this to `log2(region_size)` so the set index is drawn
    /// from the region *number* instead (`spec.md` §4.5).
    key_shift: u32,
    set_index_bits: u32,
    clock: u64,
}

impl SetAssocTable {
    /// Creates a table with `num_sets` sets of `ways` entries each. The set
    /// index is bits `[key_shift, key_shift + log2(num_sets))` of `key`,
    /// and the tag is everything above that; `num_sets` must be a power of
    /// two.
    pub fn with_key_shift(num_sets: usize, ways: usize, key_shift: u32) -> Self {
        assert!(num_sets.is_power_of_two(), "num_sets must be a power of two");
        assert!(ways >= 1, "ways must be at least 1");
        SetAssocTable {
            entries: vec![Entry::default(); num_sets * ways],
            num_sets,
            ways,
            key_shift,
            set_index_bits: num_sets.trailing_zeros(),
            clock: 0,
        }
    }

    /// Creates a table with `num_sets` sets of `ways` entries each, using
    /// the low `log2(num_sets)` bits of `key` directly as the set index
    /// (`key_shift == 0`).
    pub fn new(num_sets: usize, ways: usize) -> Self {
        Self::with_key_shift(num_sets, ways, 0)
    }

    /// A single-set table with `capacity` fully-associative ways; used for
    /// the Filter and Accumulation Tables.
    pub fn new_single_set(capacity: usize) -> Self {
        Self::new(1, capacity)
    }

    fn set_of(&self, key: Address) -> usize {
        if self.num_sets == 1 {
            0
        } else {
            ((key.raw() >> self.key_shift) & (self.num_sets as u64 - 1)) as usize
        }
    }

    fn tag_of(&self, key: Address) -> u64 {
        (key.raw() >> self.key_shift) >> self.set_index_bits
    }

    fn set_slice(&self, set: usize) -> std::ops::Range<usize> {
        set * self.ways..(set + 1) * self.ways
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Returns a mutable reference to the stored pattern if `key` is
    /// present, refreshing its recency. `spec.md` §4.2.
    pub fn check(&mut self, key: Address) -> Option<&mut AccessPattern> {
        let set = self.set_of(key);
        let tag = self.tag_of(key);
        let range = self.set_slice(set);
        let hit = range
            .clone()
            .find(|&i| self.entries[i].valid && self.entries[i].tag == tag);
        match hit {
            Some(i) => {
                let stamp = self.tick();
                self.entries[i].last_used = stamp;
                Some(&mut self.entries[i].pattern)
            }
            None => None,
        }
    }

    /// Is `key` present (without disturbing recency)?
    pub fn contains(&self, key: Address) -> bool {
        let set = self.set_of(key);
        let tag = self.tag_of(key);
        self.set_slice(set)
            .any(|i| self.entries[i].valid && self.entries[i].tag == tag)
    }

    /// Inserts `pattern` at `key`, LRU-evicting a way in the key's set if
    /// it is full. Overwrites an existing entry for the same key in place.
    pub fn insert(&mut self, key: Address, pattern: AccessPattern) -> EvictOutcome {
        let set = self.set_of(key);
        let tag = self.tag_of(key);
        let range = self.set_slice(set);

        if let Some(i) = range.clone().find(|&i| self.entries[i].valid && self.entries[i].tag == tag) {
            let stamp = self.tick();
            self.entries[i].pattern = pattern;
            self.entries[i].last_used = stamp;
            return EvictOutcome::NoEviction;
        }

        if let Some(i) = range.clone().find(|&i| !self.entries[i].valid) {
            let stamp = self.tick();
            self.entries[i] = Entry {
                valid: true,
                tag,
                pattern,
                last_used: stamp,
            };
            return EvictOutcome::NoEviction;
        }

        // Set is full: evict the least-recently-used way.
        let victim = range
            .clone()
            .min_by_key(|&i| self.entries[i].last_used)
            .expect("ways >= 1");
        let evicted_pattern = self.entries[victim].pattern;
        let stamp = self.tick();
        self.entries[victim] = Entry {
            valid: true,
            tag,
            pattern,
            last_used: stamp,
        };
        if evicted_pattern == pattern {
            EvictOutcome::EvictedSame
        } else {
            EvictOutcome::EvictedDifferent
        }
    }

    /// Invalidates the entry for `key`, if any. No-op if absent.
    pub fn invalidate(&mut self, key: Address) {
        let set = self.set_of(key);
        let tag = self.tag_of(key);
        for i in self.set_slice(set) {
            if self.entries[i].valid && self.entries[i].tag == tag {
                self.entries[i].valid = false;
                return;
            }
        }
    }

    /// Returns the OR of patterns across all valid ways in `key`'s set
    /// whose tag matches `key` (`spec.md` §4.5's defensive generalisation
    /// for PHT lookups; with the wired `RegionBase` scheme there is at
    /// most one matching way, so this degenerates to a single lookup).
    pub fn lookup_merged(&self, key: Address) -> AccessPattern {
        let set = self.set_of(key);
        let tag = self.tag_of(key);
        self.set_slice(set)
            .filter(|&i| self.entries[i].valid && self.entries[i].tag == tag)
            .fold(AccessPattern::EMPTY, |acc, i| acc.union(self.entries[i].pattern))
    }

    /// Writes a raw entry directly into way `way` of `set`, bypassing the
    /// tag-dedup check `insert` performs. `insert` can never leave two
    /// distinct valid entries of one set sharing a tag (a matching tag is
    /// always overwritten in place), so this is the only way to construct
    /// the multi-matching-way state `lookup_merged`'s OR branch exists for
    /// — reachable only under a keying scheme, like `PcXorOffset`
    /// (`spec.md` §9), that this crate doesn't wire up. Test-only.
    #[cfg(test)]
    pub(crate) fn debug_insert_way(&mut self, set: usize, way: usize, tag: u64, pattern: AccessPattern) {
        let i = set * self.ways + way;
        self.entries[i] = Entry {
            valid: true,
            tag,
            pattern,
            last_used: self.tick(),
        };
    }
}
