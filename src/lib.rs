//! dotenver - generate `.env` files from annotated templates
//!
//! A template is a regular `.env` file whose variables may carry a generator
//! directive in a trailing comment:
//!
//! ```text
//! DEBUG=true
//! SECRET_KEY= ## dotenver:password(length=50)
//! DB_PASSWORD= ## dotenver:password:db(special_chars=false)
//! ```
//!
//! Rendering produces the `.env` next to the template. Values already present
//! in that `.env` are kept, new variables are generated, and variables the
//! template does not know about are preserved in a separate block at the end.
//! Directives sharing a generator and a name (`password:db`) resolve to the
//! same value across every template processed in one run.
//!
//! # Modules
//!
//! - [`templating`] - line matching, merging and two-pass rendering
//! - [`dotenv`] - existing `.env` snapshots and destination paths
//! - [`generators`] - fake data generation behind [`generators::ValueGenerator`]
//! - [`discovery`] - recursive template discovery
//! - [`output`] - atomic writes and per-file reporting
//! - [`config`] - optional `dotenver.toml` settings
//! - [`cli`] - the `dotenver` command
//! - [`core`] - error types and user-facing error formatting

pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod dotenv;
pub mod generators;
pub mod output;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
