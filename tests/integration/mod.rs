//! Integration test suite for dotenver
//!
//! End-to-end tests driving the `dotenver` binary inside temporary projects.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: merge rules, override mode and output layout
//! - **named_values**: values shared across templates of one run
//! - **recursive**: `--recursive` discovery and `--pattern`
//! - **errors**: path validation and per-template failures
//! - **config**: `dotenver.toml` and `--config`

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod config;
mod errors;
mod named_values;
mod recursive;
mod render;
