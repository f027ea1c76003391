//! Configuration for dotenver.
//!
//! Settings are read from a single TOML file, looked up in this order:
//!
//! 1. `--config <path>` on the command line
//! 2. the `DOTENVER_CONFIG` environment variable
//! 3. `dotenver.toml` in the working directory
//! 4. `<config dir>/dotenver/config.toml` (e.g. `~/.config/dotenver/config.toml`)
//!
//! The first location that applies wins; files are not merged. Without any
//! file the defaults are used.
//!
//! ```toml
//! template_suffixes = [".example", ".template"]
//! recursive_pattern = "**/.env.example"
//! exclude_dirs = [".git", "node_modules", "target", "venv"]
//! ```

mod settings;

pub use settings::{CONFIG_ENV_VAR, Config, LOCAL_CONFIG_FILE};
