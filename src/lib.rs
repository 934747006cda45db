//! Session Ledger tracks weekly tutoring sessions and their payments in a
//! single JSON document, exposing the ledger model behind a load-mutate-save
//! store and a small CLI.

pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        tracing::info!("Session Ledger tracing initialized.");
    });
}
