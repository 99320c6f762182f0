//! Built-in logger bootstrap.
//!
//! Uses the `env_logger` crate, enabled by the default Cargo feature
//! `builtin_env_logger`. A host simulator that already runs its own
//! logging framework can disable the feature and register its own `log`
//! implementation before calling [`crate::sms_init`]; this module never
//! overrides a logger that is already installed.

/// Attempts to install an `env_logger` for this crate. Does nothing if the
/// `builtin_env_logger` feature is disabled, and does nothing (beyond a
/// debug-level log line) if a logger is already installed.
pub(crate) fn try_init() {
    cfg_if::cfg_if! {
        if #[cfg(feature = "builtin_env_logger")] {
            let result = env_logger::try_init_from_env(
                env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
            );

            match result {
                Ok(()) => {
                    log::debug!("sms-prefetcher initialized the logger.");
                }
                Err(e) => {
                    log::debug!("sms-prefetcher failed to initialize the built-in env_logger: {e}");
                }
            }
        } else {
            log::debug!("sms-prefetcher didn't initialize the built-in env_logger; the \"builtin_env_logger\" feature is disabled.");
        }
    }
}
