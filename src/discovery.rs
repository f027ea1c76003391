//! Recursive template discovery.
//!
//! Finds templates below a base directory with a glob pattern such as
//! `**/.env.example`. Paths are matched relative to the base directory and
//! returned sorted so batches are processed in a stable order.
//!
//! Symlinks are never followed, and directories named in the exclusion list
//! (`.git`, `node_modules`, ... by default) are not descended into.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Glob pattern matcher for template discovery.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    original_pattern: String,
    exclude_dirs: Vec<String>,
}

impl PatternMatcher {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn new(pattern_str: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern_str)
            .with_context(|| format!("Invalid glob pattern: {pattern_str}"))?;

        Ok(Self {
            pattern,
            original_pattern: pattern_str.to_string(),
            exclude_dirs: Vec::new(),
        })
    }

    /// Skip directories with any of these names while walking.
    #[must_use]
    pub fn with_exclude_dirs(mut self, exclude_dirs: &[String]) -> Self {
        self.exclude_dirs = exclude_dirs.to_vec();
        self
    }

    /// Find every file below `base_path` matching the pattern.
    ///
    /// Returned paths are relative to `base_path` and sorted.
    pub fn find_matches(&self, base_path: &Path) -> Result<Vec<PathBuf>> {
        debug!("Searching for pattern '{}' in {}", self.original_pattern, base_path.display());

        if !base_path.is_dir() {
            anyhow::bail!("Search directory does not exist: {}", base_path.display());
        }

        let mut matches = Vec::new();
        let walker = WalkDir::new(base_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!("Skipping unreadable path during discovery: {error}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(base_path) else {
                continue;
            };
            trace!("Checking path: {}", relative_path.display());

            if self.matches(relative_path) {
                debug!("Found template: {}", relative_path.display());
                matches.push(relative_path.to_path_buf());
            }
        }

        matches.sort();
        debug!("Found {} matches for pattern '{}'", matches.len(), self.original_pattern);
        Ok(matches)
    }

    /// Whether `path` matches the pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.matches_path(path)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.iter().any(|excluded| excluded == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(base: &Path, relative: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "A=1\n").unwrap();
    }

    #[test]
    fn test_default_pattern_matches_root_and_nested() {
        let pattern = PatternMatcher::new("**/.env.example").unwrap();

        assert!(pattern.matches(Path::new(".env.example")));
        assert!(pattern.matches(Path::new("app/.env.example")));
        assert!(pattern.matches(Path::new("services/api/.env.example")));
        assert!(!pattern.matches(Path::new("app/.env")));
        assert!(!pattern.matches(Path::new("app/env.example")));
    }

    #[test]
    fn test_find_matches_sorted_and_relative() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        touch(base, "zeta/.env.example");
        touch(base, ".env.example");
        touch(base, "alpha/nested/.env.example");
        touch(base, "alpha/.env");

        let matches = PatternMatcher::new("**/.env.example").unwrap().find_matches(base).unwrap();
        assert_eq!(
            matches,
            vec![
                PathBuf::from(".env.example"),
                PathBuf::from("alpha/nested/.env.example"),
                PathBuf::from("zeta/.env.example"),
            ]
        );
    }

    #[test]
    fn test_excluded_directories_are_pruned() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        touch(base, "app/.env.example");
        touch(base, "node_modules/pkg/.env.example");
        touch(base, ".git/.env.example");

        let matches = PatternMatcher::new("**/.env.example")
            .unwrap()
            .with_exclude_dirs(&["node_modules".to_string(), ".git".to_string()])
            .find_matches(base)
            .unwrap();
        assert_eq!(matches, vec![PathBuf::from("app/.env.example")]);
    }

    #[test]
    fn test_custom_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        touch(base, "a/.env.template");
        touch(base, "a/.env.example");

        let matches = PatternMatcher::new("**/.env.template").unwrap().find_matches(base).unwrap();
        assert_eq!(matches, vec![PathBuf::from("a/.env.template")]);
    }

    #[test]
    fn test_invalid_pattern() {
        let error = PatternMatcher::new("[unclosed").unwrap_err();
        assert!(error.to_string().contains("Invalid glob pattern"));
    }

    #[test]
    fn test_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let matcher = PatternMatcher::new("**/.env.example").unwrap();
        assert!(matcher.find_matches(&temp_dir.path().join("missing")).is_err());
    }
}
