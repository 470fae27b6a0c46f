#![doc(test(attr(deny(warnings))))]

//! Wallet Core keeps a personal wallet ledger: a balance, a newest-first list of expenses and
//! their running total, persisted after every change, plus the spending summaries and paging
//! a front end needs.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
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
        tracing::info!("Wallet Core tracing initialized.");
    });
}
