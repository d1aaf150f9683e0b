#![doc(test(attr(deny(warnings))))]

//! Payment Trackers: a personal/business money tracker with a persisted
//! ledger, simulated bank sync and a subscription checkout, driven from an
//! interactive shell.

pub mod app;
pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Like [`init`], with a configured filter directive. `RUST_LOG` still wins.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Payment Trackers tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_filter("pt_trackers=debug");
    }
}
