//! Shared helpers for the integration suite.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated project directory with its own home and config directories.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    home_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let home_dir = temp_dir.path().join("home");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(home_dir.join(".config"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            home_dir,
        })
    }

    /// Get the project directory path
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Write a file relative to the project, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file relative to the project
    pub fn read(&self, relative: &str) -> String {
        let path = self.project_dir.join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e))
    }

    /// Whether a file exists relative to the project
    pub fn exists(&self, relative: &str) -> bool {
        self.project_dir.join(relative).exists()
    }

    /// `dotenver` command running in the project directory
    pub fn dotenver(&self) -> Command {
        let mut cmd = Command::cargo_bin("dotenver").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env("HOME", &self.home_dir)
            .env("XDG_CONFIG_HOME", self.home_dir.join(".config"))
            .env_remove("DOTENVER_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Template exercising literals, `export` and both boolean outcomes.
pub const BOOLEAN_TEMPLATE: &str = "
STATIC_VARIABLE=static
export FALSE_VARIABLE= ## ## dotenver:boolean(chance_of_getting_true=0)
TRUE_VARIABLE= ## dotenver:boolean(name='true', chance_of_getting_true=100)
";

/// Rendering of [`BOOLEAN_TEMPLATE`] without an existing `.env`.
pub const BOOLEAN_RENDERED: &str = "
STATIC_VARIABLE=static
export FALSE_VARIABLE=False
TRUE_VARIABLE=True
";

/// Separator written before variables unknown to the template.
pub const LEFTOVER_HEADER: &str = "
######################################
# Variables not in Dotenver template #
######################################

";
