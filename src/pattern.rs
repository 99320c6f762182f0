//! Region/pattern arithmetic (`spec.md` §4.1): deriving a region's base
//! address, a block index within the region, and the single-bit pattern
//! contribution of one access.

use crate::address::Address;
use crate::config::Config;
use crate::stats::Diagnostics;

/// A bitmap of blocks touched within a region during one generation.
/// Bit `k` set means block `k` of the region has been touched.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct AccessPattern(pub u64);

impl AccessPattern {
    pub const EMPTY: Self = AccessPattern(0);

    pub const fn new(bits: u64) -> Self {
        AccessPattern(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: AccessPattern) -> AccessPattern {
        AccessPattern(self.0 | other.0)
    }

    /// Does `other` contribute any bit not already set in `self`?
    pub const fn adds_new_bits(self, other: AccessPattern) -> bool {
        (self.0 | other.0) != self.0
    }

    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the indices of set bits in ascending order.
    pub fn set_bits(self) -> impl Iterator<Item = u32> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let idx = bits.trailing_zeros();
                bits &= bits - 1;
                Some(idx)
            }
        })
    }
}

/// Computes the region base of `addr`: `addr & ~region_offset_mask`.
pub fn region_base(addr: Address, config: &Config) -> Address {
    addr.and_not(config.region_offset_mask())
}

/// Computes the block index of `addr` within its region:
/// `(addr & region_offset_mask) / dcache_line_size`.
pub fn block_index(addr: Address, config: &Config) -> u32 {
    let offset = addr.and(config.region_offset_mask());
    (offset / config.dcache_line_size as u64) as u32
}

/// Computes the single-bit pattern contribution of `addr`. Returns
/// `AccessPattern::EMPTY` and bumps the misconfiguration counter if the
/// block index is out of range (`spec.md` §4.1, §7).
pub fn pattern_bit(addr: Address, config: &Config, diagnostics: &Diagnostics) -> AccessPattern {
    let idx = block_index(addr, config);
    if idx >= config.blocks_per_region() {
        diagnostics
            .access_pattern_block_index_over_spatial_pattern_limit
            .inc();
        log::warn!(
            "block index {} out of range for region size {} / line size {}",
            idx,
            config.region_size,
            config.dcache_line_size
        );
        return AccessPattern::EMPTY;
    }
    AccessPattern(1u64 << idx)
}

/// The table key for `addr` under the wired indexing scheme
/// (`table_key = region_base`, `spec.md` §4.1, §9).
pub fn table_key(addr: Address, config: &Config) -> Address {
    region_base(addr, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn region_base_masks_low_bits() {
        let addr = Address::new(0x0000_0000_0000_1040);
        assert_eq!(region_base(addr, &cfg()).raw(), 0x1000);
    }

    #[test]
    fn block_index_first_and_last() {
        let c = cfg();
        assert_eq!(block_index(Address::new(0x1000), &c), 0);
        assert_eq!(block_index(Address::new(0x1040), &c), 1);
        // last block: B - 1 = 31, offset = 31 * 64 = 0x7c0
        assert_eq!(block_index(Address::new(0x1000 + 0x7c0), &c), 31);
    }

    #[test]
    fn pattern_bit_sets_expected_bit() {
        let c = cfg();
        let diag = Diagnostics::default();
        assert_eq!(
            pattern_bit(Address::new(0x1040), &c, &diag),
            AccessPattern::new(0x2)
        );
        assert_eq!(
            pattern_bit(Address::new(0x10c0), &c, &diag),
            AccessPattern::new(0x8)
        );
        assert_eq!(diag.access_pattern_block_index_over_spatial_pattern_limit.get(), 0);
    }

    #[test]
    fn pattern_bit_out_of_range_is_silent_and_counted() {
        // `spec.md` §8 calls this case "synthetic": a misconfiguration
        // where region_size isn't an exact multiple of dcache_line_size,
        // so the last representable offset decodes to block_index == B.
        // Config::validate() would reject this; pattern_bit() must still
        // degrade silently rather than panic or index out of bounds.
        let misconfigured = Config {
            region_size: 2000,
            dcache_line_size: 64,
            ..Config::default()
        };
        assert_eq!(misconfigured.blocks_per_region(), 31);
        let diag = Diagnostics::default();
        // offset 1984 = 31 * 64, mask = region_size - 1 = 1999
        let addr = Address::new(1984);
        let pat = pattern_bit(addr, &misconfigured, &diag);
        assert!(pat.is_empty());
        assert_eq!(
            diag.access_pattern_block_index_over_spatial_pattern_limit.get(),
            1
        );
    }

    #[test]
    fn set_bits_iterates_ascending() {
        let p = AccessPattern::new(0b1010);
        let bits: Vec<u32> = p.set_bits().collect();
        assert_eq!(bits, vec![1, 3]);
    }

    #[test]
    fn union_and_adds_new_bits() {
        let a = AccessPattern::new(0x2);
        let b = AccessPattern::new(0x8);
        assert!(a.adds_new_bits(b));
        assert_eq!(a.union(b), AccessPattern::new(0xa));
        assert!(!a.adds_new_bits(AccessPattern::new(0x2)));
    }
}
