#![doc(test(attr(deny(warnings))))]

//! Salon Core derives a unified financial ledger from salon business records
//! (appointments, product sales, manual expenses) and aggregates it into
//! cash-register closing summaries and income-statement (DRE) snapshots.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Salon Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
