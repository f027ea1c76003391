//! Existing `.env` files: reading snapshots and locating destinations.
//!
//! - [`EnvSnapshot`] - ordered view of an existing `.env` file, used to keep
//!   values that are already set and to find leftover variables
//! - [`dotenv_path`] - where a template renders to

pub mod paths;
pub mod snapshot;

pub use paths::{
    DEFAULT_TEMPLATE_SUFFIXES, DOTENV_FILE_NAME, default_template_suffixes, dotenv_path,
    renders_onto_itself,
};
pub use snapshot::{EnvEntry, EnvSnapshot};
