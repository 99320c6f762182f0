//! The host simulator's data cache, as seen by this crate (`spec.md` §6.1,
//! §6.2). The underlying set-associative cache container is an opaque
//! collaborator: this crate only ever drives it through prefetch inserts,
//! and only ever learns about evictions through the arguments the host
//! passes into [`crate::Sms::on_dcache_insert`].
//!
//! Implementations provide the host's line size and region-offset mask
//! (used once, at construction, to cross-check the configured geometry)
//! and the single mutating operation the prefetch emitter needs.

use crate::address::Address;

/// The host's L1 data cache, generic over whatever cache/line representation
/// the simulator uses internally.
pub trait DcacheHost {
    /// The data cache's line size, in bytes.
    fn line_size(&self) -> u64;

    /// Injects a prefetch insert for `addr` into the data cache, marking
    /// the inserted line as hardware-prefetched so the host can account it
    /// correctly (`spec.md` §4.7). Returns the evicted line's address, or
    /// `None` if the insert did not evict a valid line.
    fn insert_prefetch(&mut self, addr: Address) -> Option<Address>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;

    /// A minimal in-memory dcache double for tests: fully associative,
    /// FIFO replacement, fixed capacity. Good enough to exercise the
    /// prefetch-insert-triggers-eviction recursion (`spec.md` §4.7).
    pub struct MockDcache {
        pub line_size: u64,
        capacity: usize,
        resident: VecDeque<Address>,
        pub prefetch_log: Vec<Address>,
    }

    impl MockDcache {
        pub fn new(line_size: u64, capacity: usize) -> Self {
            MockDcache {
                line_size,
                capacity,
                resident: VecDeque::new(),
                prefetch_log: Vec::new(),
            }
        }
    }

    impl DcacheHost for MockDcache {
        fn line_size(&self) -> u64 {
            self.line_size
        }

        fn insert_prefetch(&mut self, addr: Address) -> Option<Address> {
            self.prefetch_log.push(addr);
            if self.resident.contains(&addr) {
                return None;
            }
            let evicted = if self.resident.len() >= self.capacity {
                self.resident.pop_front()
            } else {
                None
            };
            self.resident.push_back(addr);
            evicted
        }
    }
}
