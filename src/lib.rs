#![doc(test(attr(deny(warnings))))]

//! Household budget: categories with spending envelopes, one-off and
//! recurring transactions, monthly summaries and JSON persistence.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("household_budget tracing initialized");
    });
}
