//! Event handlers — the state machine (`spec.md` §4.8): the two entry
//! points that wire the SMS core into the host simulator, plus the owned
//! state object threaded through both.

use crate::accumulation_table::AccumulationTable;
use crate::address::Address;
use crate::agt;
use crate::config::Config;
use crate::dcache::DcacheHost;
use crate::emitter;
use crate::filter_table::{self, FilterTable};
use crate::pattern;
use crate::pattern_history_table::PatternHistoryTable;
use crate::stats::Diagnostics;

/// The instruction metadata the host passes alongside an access
/// (`spec.md` §6.1). Only `pc` would be consulted by the `PcXorOffset`
/// indexing scheme; the wired `RegionBase` scheme ignores it, but it is
/// kept in the signature so the external interface matches the host
/// contract exactly.
#[derive(Copy, Clone, Debug, Default)]
pub struct AccessOp {
    /// The program counter of the instruction performing the access.
    pub pc: Address,
}

/// Owned SMS state: the three tables, diagnostics, configuration, and the
/// host dcache collaborator. Constructed once via [`Sms::new`] (the
/// `sms_init` entry point) and passed by `&mut` into both handlers; no
/// lazy initialisation or double-pointer indirection (`spec.md` §9).
pub struct Sms<H: DcacheHost> {
    config: Config,
    diagnostics: Diagnostics,
    ft: FilterTable,
    at: AccumulationTable,
    pht: PatternHistoryTable,
    host: H,
}

impl<H: DcacheHost> Sms<H> {
    /// Constructs a new SMS instance (`spec.md` §6.1's `sms_init`).
    /// Panics if `config` is invalid, or if it disagrees with the host's
    /// own reported line size.
    pub fn new(host: H, config: Config) -> Self {
        config.validate();
        assert_eq!(
            host.line_size(),
            config.dcache_line_size as u64,
            "host dcache line size ({}) does not match configured dcache_line_size ({})",
            host.line_size(),
            config.dcache_line_size
        );
        log::info!("initialized SMS prefetcher with {config:?}");
        Sms {
            ft: FilterTable::new(config.filter_table_size),
            at: AccumulationTable::new(config.accumulation_table_size),
            pht: PatternHistoryTable::new(config.pht_sets, config.pht_ways, config.region_size),
            diagnostics: Diagnostics::default(),
            config,
            host,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[cfg(test)]
    pub(crate) fn at_mut(&mut self) -> &mut AccumulationTable {
        &mut self.at
    }

    #[cfg(test)]
    pub(crate) fn ft_mut(&mut self) -> &mut FilterTable {
        &mut self.ft
    }

    #[cfg(test)]
    pub(crate) fn pht(&self) -> &PatternHistoryTable {
        &self.pht
    }

    /// Every dcache access enters through here (`spec.md` §4.8,
    /// `sms_on_dcache_access`). `op` and `proc_id` are accepted to match
    /// the host interface but are unused by the `RegionBase` indexing
    /// scheme this core wires up.
    pub fn on_dcache_access(&mut self, _op: AccessOp, _proc_id: u32, addr: Address) {
        let key = pattern::table_key(addr, &self.config);
        let present = agt::agt_check(&mut self.ft, &mut self.at, key);

        if present {
            if self.at.at_check(key).is_some() {
                let bit = pattern::pattern_bit(addr, &self.config, &self.diagnostics);
                self.at.at_update(key, bit);
                log::trace!("AT update for region {key:?}");
            } else {
                let bit = pattern::pattern_bit(addr, &self.config, &self.diagnostics);
                filter_table::ft_update(&mut self.ft, &mut self.at, key, bit);
            }
            return;
        }

        // Trigger access for a new generation: consult the PHT first, then
        // start first-touch tracking in the FT.
        let region = pattern::region_base(addr, &self.config);
        let merged = self.pht.pht_lookup(key);
        if !merged.is_empty() {
            log::debug!("PHT hit for region {region:?}: pattern {merged:?}");
            emitter::emit_prefetches(self, region, merged);
        }

        let bit = pattern::pattern_bit(addr, &self.config, &self.diagnostics);
        self.ft.ft_insert(key, bit);
        log::trace!("FT insert for region {key:?}: pattern {bit:?}");
    }

    /// Every dcache insert enters through here (`spec.md` §4.8,
    /// `sms_on_dcache_insert`). `line_addr` is accepted to match the host
    /// interface but, per `spec.md` §9's bug note, only `repl_line_addr`
    /// (the evicted address) drives generation-end semantics.
    pub fn on_dcache_insert(&mut self, _line_addr: Address, repl_line_addr: Address) {
        if repl_line_addr.is_zero() {
            return;
        }
        let key = pattern::region_base(repl_line_addr, &self.config);
        if agt::agt_check(&mut self.ft, &mut self.at, key) {
            agt::agt_delete(&mut self.ft, &mut self.at, &mut self.pht, &self.diagnostics, key);
            log::debug!("generation end for region {key:?} (evicted {repl_line_addr:?})");
        }
    }
}
