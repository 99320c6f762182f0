//! Active Generation Table façade (`spec.md` §4.6): the logical union of
//! the Filter Table and the Accumulation Table, presenting a single
//! check/delete surface over both.

use crate::accumulation_table::AccumulationTable;
use crate::address::Address;
use crate::filter_table::FilterTable;
use crate::pattern_history_table::PatternHistoryTable;
use crate::stats::Diagnostics;

/// `agt_check(addr) = ft_check(key) || at_check(key)`.
pub fn agt_check(ft: &mut FilterTable, at: &mut AccumulationTable, key: Address) -> bool {
    ft.ft_check(key).is_some() || at.at_check(key).is_some()
}

/// Ends the generation of the region keyed by `key`: if the key is in the
/// AT, transfers its pattern to the PHT; otherwise invalidates any FT
/// entry. This is the operation that terminates a generation
/// (`spec.md` §4.6).
pub fn agt_delete(
    ft: &mut FilterTable,
    at: &mut AccumulationTable,
    pht: &mut PatternHistoryTable,
    diagnostics: &Diagnostics,
    key: Address,
) {
    if at.contains(key) {
        at.at_transfer(key, pht, diagnostics);
    } else {
        ft.invalidate(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pattern::AccessPattern;

    fn tables() -> (FilterTable, AccumulationTable, PatternHistoryTable) {
        let cfg = Config::default();
        (
            FilterTable::new(cfg.filter_table_size),
            AccumulationTable::new(cfg.accumulation_table_size),
            PatternHistoryTable::new(cfg.pht_sets, cfg.pht_ways, cfg.region_size),
        )
    }

    #[test]
    fn check_is_disjoint_union() {
        let (mut ft, mut at, _) = tables();
        let key = Address::new(0x1000);
        assert!(!agt_check(&mut ft, &mut at, key));
        ft.ft_insert(key, AccessPattern::new(0x1));
        assert!(agt_check(&mut ft, &mut at, key));
    }

    #[test]
    fn delete_transfers_at_entry_to_pht() {
        let (mut ft, mut at, mut pht) = tables();
        let diag = Diagnostics::default();
        let key = Address::new(0x1000);
        at.at_insert(key, AccessPattern::new(0xa));
        agt_delete(&mut ft, &mut at, &mut pht, &diag, key);
        assert!(!at.contains(key));
        assert_eq!(pht.pht_lookup(key), AccessPattern::new(0xa));
    }

    #[test]
    fn delete_invalidates_ft_entry_when_not_in_at() {
        let (mut ft, mut at, mut pht) = tables();
        let diag = Diagnostics::default();
        let key = Address::new(0x1000);
        ft.ft_insert(key, AccessPattern::new(0x1));
        agt_delete(&mut ft, &mut at, &mut pht, &diag, key);
        assert!(!ft.contains(key));
        assert!(pht.pht_lookup(key).is_empty());
    }
}
