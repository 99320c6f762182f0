//! Prefetch emitter (`spec.md` §4.7): decomposes a merged bitmap into
//! block addresses and injects prefetch inserts into the data cache.

use crate::address::Address;
use crate::config::Config;
use crate::dcache::DcacheHost;
use crate::pattern::AccessPattern;
use crate::sms::Sms;

/// For every bit `k` set in `pattern`, computes the block address
/// `region + k * line_size` and injects a prefetch insert for it, in
/// ascending block order. If an insert evicts a line whose region is
/// currently tracked in the AGT, that eviction's generation-end semantics
/// are signalled synchronously through the same insert path a genuine
/// demand-miss eviction would use (`spec.md` §4.7, §9). This recursion is
/// bounded to depth 1: the transfer that recursive call performs never
/// itself emits prefetches.
pub(crate) fn emit_prefetches<H: DcacheHost>(sms: &mut Sms<H>, region: Address, pattern: AccessPattern) {
    let config: &Config = sms.config();
    let line_size = config.dcache_line_size as u64;
    let blocks: Vec<u32> = pattern.set_bits().collect();
    log::debug!(
        "emitting {} prefetch(es) for region {region:?}: pattern {pattern:?}",
        blocks.len()
    );
    for k in blocks {
        let block_addr = region + (k as u64) * line_size;
        if let Some(evicted) = sms.host_mut().insert_prefetch(block_addr) {
            // Recursive, but bounded: this call only ever reaches
            // agt_delete, never back into the emitter.
            sms.on_dcache_insert(Address::ZERO, evicted);
        }
    }
}
