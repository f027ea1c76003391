//! Test utilities for dotenver
//!
//! Helpers shared by unit and integration tests:
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//! - [`StubGenerator`] - deterministic [`ValueGenerator`](crate::generators::ValueGenerator)
//! - [`TestProject`] - temporary directory with templates and `.env` files

pub mod project;
pub mod stub;

pub use project::TestProject;
pub use stub::StubGenerator;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=dotenver=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
