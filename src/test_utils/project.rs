//! Temporary project directory for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding templates and `.env` files.
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    /// Create an empty project.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// Project root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read `relative` as text.
    pub fn read(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Whether `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.path().join(relative).exists()
    }
}
