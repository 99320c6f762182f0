//! Static configuration for an SMS instance: table sizes, region/line
//! geometry, and the region-key indexing scheme.
//!
//! Mirrors the shape of a VM binding's options table: a plain struct of
//! tunables with documented defaults, validated once at construction time.
//! Invalid configuration is a build-time/setup-time mistake, not a runtime
//! condition the core can recover from, so [`Config::validate`] panics
//! rather than returning a `Result` (see `spec.md` §7).

use strum_macros::EnumString;

/// The default region size (the PHT's line size): 2 KiB.
pub const DEFAULT_REGION_SIZE: u32 = 2048;
/// The default data-cache line size: 64 B.
pub const DEFAULT_DCACHE_LINE_SIZE: u32 = 64;
/// The default Filter Table capacity.
pub const DEFAULT_FILTER_TABLE_SIZE: usize = 32;
/// The default Accumulation Table capacity.
pub const DEFAULT_ACCUMULATION_TABLE_SIZE: usize = 64;
/// The default number of sets in the Pattern History Table.
pub const DEFAULT_PHT_SETS: usize = 4096;
/// The default associativity of the Pattern History Table.
pub const DEFAULT_PHT_WAYS: usize = 4;

/// The widest access pattern this crate supports (`AccessPattern` is a
/// `u64` bitmap).
pub const MAX_BLOCKS_PER_REGION: u32 = u64::BITS;

static_assertions::const_assert_eq!(MAX_BLOCKS_PER_REGION, u64::BITS);
static_assertions::assert_eq_size!(crate::pattern::AccessPattern, u64);

/// How a region's table key is derived from an access.
///
/// The source design explored keying the PHT by `region_base` (one entry
/// per physical region) and by `pc ^ region_offset_bits` (one entry per
/// code site, as in the original SMS paper). This crate wires up
/// `RegionBase` only, per `spec.md` §9's recommendation to pick one scheme;
/// `PcXorOffset` is kept as a named, rejected variant so the discarded
/// alternative stays visible in the type rather than only in prose.
#[derive(Copy, Clone, Eq, PartialEq, Debug, EnumString)]
pub enum KeyScheme {
    RegionBase,
    PcXorOffset,
}

impl Default for KeyScheme {
    fn default() -> Self {
        KeyScheme::RegionBase
    }
}

/// Configuration for one [`crate::Sms`] instance.
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Size of a spatial region in bytes. Must be a power of two.
    pub region_size: u32,
    /// Size of a data-cache line in bytes. Must be a power of two and
    /// divide `region_size`.
    pub dcache_line_size: u32,
    /// Filter Table capacity.
    pub filter_table_size: usize,
    /// Accumulation Table capacity.
    pub accumulation_table_size: usize,
    /// Number of sets in the Pattern History Table. Must be a power of two.
    pub pht_sets: usize,
    /// Associativity of the Pattern History Table.
    pub pht_ways: usize,
    /// Region-key indexing scheme.
    pub indexing: KeyScheme,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region_size: DEFAULT_REGION_SIZE,
            dcache_line_size: DEFAULT_DCACHE_LINE_SIZE,
            filter_table_size: DEFAULT_FILTER_TABLE_SIZE,
            accumulation_table_size: DEFAULT_ACCUMULATION_TABLE_SIZE,
            pht_sets: DEFAULT_PHT_SETS,
            pht_ways: DEFAULT_PHT_WAYS,
            indexing: KeyScheme::RegionBase,
        }
    }
}

impl Config {
    /// Number of dcache blocks per region (`B` in `spec.md`).
    pub fn blocks_per_region(&self) -> u32 {
        self.region_size / self.dcache_line_size
    }

    /// The region-offset mask: the low bits of an address that select a
    /// position within a region.
    pub fn region_offset_mask(&self) -> u64 {
        (self.region_size as u64) - 1
    }

    /// Validates the configuration, panicking on a misconfiguration that
    /// would make the core's invariants unsatisfiable. This is the only
    /// place this crate treats a bad value as fatal, matching the
    /// teacher's `assert!(heap_size > 0, "Invalid heap size")` pattern at
    /// `gc_init` time rather than threading a `Result` through every call.
    pub fn validate(&self) {
        assert!(
            self.region_size.is_power_of_two(),
            "region_size must be a power of two, got {}",
            self.region_size
        );
        assert!(
            self.dcache_line_size.is_power_of_two(),
            "dcache_line_size must be a power of two, got {}",
            self.dcache_line_size
        );
        assert!(
            self.region_size >= self.dcache_line_size,
            "region_size ({}) must be >= dcache_line_size ({})",
            self.region_size,
            self.dcache_line_size
        );
        assert!(
            self.blocks_per_region() <= MAX_BLOCKS_PER_REGION,
            "region_size / dcache_line_size ({}) exceeds the {}-bit pattern width",
            self.blocks_per_region(),
            MAX_BLOCKS_PER_REGION
        );
        assert!(
            self.pht_sets.is_power_of_two(),
            "pht_sets must be a power of two, got {}",
            self.pht_sets
        );
        assert!(self.pht_ways >= 1, "pht_ways must be at least 1");
        assert!(
            self.filter_table_size >= 1,
            "filter_table_size must be at least 1"
        );
        assert!(
            self.accumulation_table_size >= 1,
            "accumulation_table_size must be at least 1"
        );
        assert_eq!(
            self.indexing,
            KeyScheme::RegionBase,
            "this core only wires up the RegionBase indexing scheme (see spec.md \u{a7}9)"
        );
    }
}
