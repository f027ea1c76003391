//! Snapshot of an existing `.env` file.

use anyhow::Result;
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

use crate::core::FileOps;
use crate::templating::matcher::{LineMatcher, format_assignment};

/// Raw assignment of one variable in an existing `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    /// Text left of the `=`, including any `export ` prefix
    pub left_side: String,
    /// `None` when the variable is declared without `=`
    pub value: Option<String>,
}

impl EnvEntry {
    /// Render as it should appear in the output file.
    #[must_use]
    pub fn to_line(&self) -> String {
        format_assignment(&self.left_side, self.value.as_deref())
    }
}

/// Ordered mapping from variable name to its existing assignment.
///
/// Keys keep the position of their first occurrence; a later duplicate
/// replaces the stored assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    entries: IndexMap<String, EnvEntry>,
}

impl EnvSnapshot {
    /// An empty snapshot, as used in override mode.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the `.env` file at `path`.
    ///
    /// A missing file yields an empty snapshot. Any other read failure is
    /// returned with the path attached.
    pub fn read(path: &Path, matcher: &LineMatcher) -> Result<Self> {
        let Some(content) = FileOps::read_optional_with_context(path, "existing dotenv")? else {
            debug!("No existing dotenv at {}", path.display());
            return Ok(Self::empty());
        };

        let snapshot = Self::parse(&content, matcher);
        debug!("Read {} variable(s) from {}", snapshot.len(), path.display());
        Ok(snapshot)
    }

    /// Parse `.env` content. Comments, blanks and other non-declarations are skipped.
    #[must_use]
    pub fn parse(content: &str, matcher: &LineMatcher) -> Self {
        let mut entries = IndexMap::new();
        for declaration in content.lines().filter_map(|line| matcher.parse_value_line(line)) {
            entries.insert(
                declaration.variable,
                EnvEntry {
                    left_side: declaration.left_side,
                    value: declaration.value,
                },
            );
        }
        Self {
            entries,
        }
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&EnvEntry> {
        self.entries.get(variable)
    }

    /// Look up a variable, returning the stored name alongside the entry.
    #[must_use]
    pub fn get_key_value(&self, variable: &str) -> Option<(&String, &EnvEntry)> {
        self.entries.get_key_value(variable)
    }

    /// Iterate over `(variable, entry)` in read order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnvEntry)> {
        self.entries.iter()
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
