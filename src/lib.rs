//! `sms-prefetcher` implements the core of a Spatial Memory Streaming (SMS)
//! hardware data prefetcher: the algorithmic engine that observes L1
//! data-cache activity, learns per-code-location spatial access patterns
//! over memory regions, and predicts which cache blocks inside a region to
//! prefetch when that code location next triggers a new generation.
//!
//! Logically, this crate includes:
//! * [Region/pattern arithmetic](pattern): deriving a region base, block
//!   index and pattern bit from a line address.
//! * [Table primitives](table): a uniform check/insert/invalidate
//!   set-associative store, shared by the three tables below.
//! * The [Filter Table](filter_table), [Accumulation Table](accumulation_table)
//!   and [Pattern History Table](pattern_history_table), together forming
//!   the [Active Generation Table facade](agt).
//! * The [prefetch emitter](emitter), which turns a learned pattern into a
//!   burst of prefetch inserts against the host's data cache.
//! * The [event handlers](sms) that wire the above into a host simulator
//!   through the two entry points in [`api`].
//!
//! This is an in-process library with no persisted state, no wire protocol
//! and no CLI: the host drives it entirely through [`api::sms_init`],
//! [`api::sms_on_dcache_access`] and [`api::sms_on_dcache_insert`].

pub mod accumulation_table;
pub mod address;
pub mod agt;
pub mod api;
pub mod config;
pub mod dcache;
pub mod emitter;
pub mod filter_table;
mod logger;
pub mod pattern;
pub mod pattern_history_table;
pub mod sms;
pub mod stats;
pub mod table;

pub use crate::address::Address;
pub use crate::api::{sms_diagnostics, sms_init, sms_on_dcache_access, sms_on_dcache_insert};
pub use crate::config::{Config, KeyScheme};
pub use crate::dcache::DcacheHost;
pub use crate::pattern::AccessPattern;
pub use crate::sms::{AccessOp, Sms};
pub use crate::stats::Diagnostics;
