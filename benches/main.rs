use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sms_prefetcher::address::Address;
use sms_prefetcher::dcache::DcacheHost;
use sms_prefetcher::sms::{AccessOp, Sms};
use sms_prefetcher::Config;

/// Get a deterministic seeded Rng.
fn get_rng() -> ChaCha8Rng {
    // Create an Rng from a seed and an explicit Rng type.
    // Not secure at all, but completely deterministic and reproducible.
    // The following seed is read from /dev/random
    const SEED64: u64 = 0x9e3779b97f4a7c15;
    ChaCha8Rng::seed_from_u64(SEED64)
}

/// A dcache double with effectively unlimited capacity: benchmarks the
/// SMS core's own bookkeeping cost, not eviction handling.
struct NullDcache {
    line_size: u64,
}

impl DcacheHost for NullDcache {
    fn line_size(&self) -> u64 {
        self.line_size
    }

    fn insert_prefetch(&mut self, _addr: Address) -> Option<Address> {
        None
    }
}

fn bench_access_stream(c: &mut Criterion) {
    c.bench_function("on_dcache_access: repeated stride-through of 64 regions", |b| {
        let mut sms = Sms::new(NullDcache { line_size: 64 }, Config::default());
        let region_size = Config::default().region_size as u64;
        b.iter(|| {
            for region in 0..64u64 {
                for block in 0..32u64 {
                    let addr = Address::new(region * region_size + block * 64);
                    sms.on_dcache_access(AccessOp::default(), 0, black_box(addr));
                }
            }
        });
    });
}

/// A stride-through access stream has perfectly regular patterns; real L1D
/// traffic interleaves several regions at once. This benchmark drives the
/// core with a shuffled, multi-region access stream instead, to measure the
/// LRU/eviction paths a pure stride never exercises.
fn bench_interleaved_region_access(c: &mut Criterion) {
    c.bench_function("on_dcache_access: interleaved access across 64 regions", |b| {
        let mut sms = Sms::new(NullDcache { line_size: 64 }, Config::default());
        let region_size = Config::default().region_size as u64;
        let mut rng = get_rng();
        let mut accesses: Vec<Address> = Vec::with_capacity(64 * 32);
        for region in 0..64u64 {
            for block in 0..32u64 {
                accesses.push(Address::new(region * region_size + block * 64));
            }
        }
        // Fisher-Yates shuffle with the deterministic rng above.
        for i in (1..accesses.len()).rev() {
            let j = rng.random_range(0..=i);
            accesses.swap(i, j);
        }
        b.iter(|| {
            for addr in &accesses {
                sms.on_dcache_access(AccessOp::default(), 0, black_box(*addr));
            }
        });
    });
}

criterion_group!(benches, bench_access_stream, bench_interleaved_region_access);
criterion_main!(benches);
