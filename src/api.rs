//! Host-to-core interface (`spec.md` §6.1): free functions matching the
//! external entry-point names the specification gives the simulator,
//! thin wrappers over [`Sms`]'s inherent methods. Mirrors the shape of the
//! teacher's `memory_manager` module: a safe Rust surface a host binds
//! directly, or wraps further for its own FFI boundary.

use crate::address::Address;
use crate::config::Config;
use crate::dcache::DcacheHost;
use crate::sms::{AccessOp, Sms};
use crate::stats::Diagnostics;

/// Constructs a new SMS instance bound to `host`. Attempts to install the
/// built-in logger (`spec.md` §7's ambient logging) the first time any
/// instance is created; a host that runs its own `log` implementation can
/// disable the `builtin_env_logger` feature instead.
pub fn sms_init<H: DcacheHost>(host: H, config: Config) -> Sms<H> {
    crate::logger::try_init();
    Sms::new(host, config)
}

/// Invoked on every L1D access (`spec.md` §6.1).
pub fn sms_on_dcache_access<H: DcacheHost>(
    handle: &mut Sms<H>,
    op: AccessOp,
    proc_id: u32,
    line_addr: Address,
) {
    handle.on_dcache_access(op, proc_id, line_addr);
}

/// Invoked after every L1D insert; `repl_line_addr == Address::ZERO`
/// denotes no eviction (`spec.md` §6.1).
pub fn sms_on_dcache_insert<H: DcacheHost>(
    handle: &mut Sms<H>,
    _proc_id: u32,
    line_addr: Address,
    repl_line_addr: Address,
) {
    handle.on_dcache_insert(line_addr, repl_line_addr);
}

/// Reads back the diagnostic event counters (`spec.md` §7). The host may
/// poll these at any time; the core never prints or clears them itself.
pub fn sms_diagnostics<H: DcacheHost>(handle: &Sms<H>) -> &Diagnostics {
    handle.diagnostics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcache::mock::MockDcache;

    #[test]
    fn free_functions_delegate_to_sms_methods() {
        let mut sms = sms_init(MockDcache::new(64, 64), Config::default());
        sms_on_dcache_access(&mut sms, AccessOp::default(), 0, Address::new(0x1040));
        sms_on_dcache_access(&mut sms, AccessOp::default(), 0, Address::new(0x10c0));
        sms_on_dcache_insert(&mut sms, 0, Address::new(0x5000), Address::new(0x1080));
        assert_eq!(
            sms_diagnostics(&sms).accumulation_table_transfer_succeeded.get(),
            1
        );
    }
}
