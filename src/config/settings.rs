use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::DotenverError;
use crate::dotenv::default_template_suffixes;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "DOTENVER_CONFIG";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "dotenver.toml";

fn default_recursive_pattern() -> String {
    "**/.env.example".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    [".git", "node_modules", "target"].iter().map(|dir| (*dir).to_string()).collect()
}

/// dotenver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Suffixes stripped from a template name to get its destination name.
    ///
    /// A template without a matching suffix renders to `.env` next to it.
    #[serde(default = "default_template_suffixes")]
    pub template_suffixes: Vec<String>,

    /// Glob used by `--recursive`, relative to the working directory.
    #[serde(default = "default_recursive_pattern")]
    pub recursive_pattern: String,

    /// Directory names skipped by `--recursive`.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_suffixes: default_template_suffixes(),
            recursive_pattern: default_recursive_pattern(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

impl Config {
    /// Load the configuration for this process.
    ///
    /// `explicit` comes from `--config` and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let global = Self::global_path();

        match Self::resolve_path(explicit, from_env.as_deref(), &cwd, global.as_deref())? {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Pick the configuration file to use, if any.
    ///
    /// Explicit and environment paths must exist; the local and global files
    /// are only used when present.
    pub fn resolve_path(
        explicit: Option<&Path>,
        from_env: Option<&Path>,
        cwd: &Path,
        global: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        for (path, source) in [(explicit, "--config"), (from_env, CONFIG_ENV_VAR)] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(DotenverError::ConfigError {
                        message: format!(
                            "configuration file '{}' from {source} does not exist",
                            path.display()
                        ),
                    }
                    .into());
                }
                return Ok(Some(path.to_path_buf()));
            }
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Ok(Some(local));
        }

        Ok(global.filter(|path| path.is_file()).map(Path::to_path_buf))
    }

    /// Global configuration file location, if a config directory exists.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dotenver").join("config.toml"))
    }

    /// Read and validate the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self =
            toml::from_str(&content).map_err(|error| DotenverError::ConfigError {
                message: format!("failed to parse '{}': {error}", path.display()),
            })?;
        config.validate().with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Check values that deserialize fine but can not be used.
    pub fn validate(&self) -> Result<(), DotenverError> {
        if self.template_suffixes.iter().any(String::is_empty) {
            return Err(DotenverError::ConfigError {
                message: "template_suffixes can not contain an empty suffix".to_string(),
            });
        }
        if self.recursive_pattern.trim().is_empty() {
            return Err(DotenverError::ConfigError {
                message: "recursive_pattern can not be empty".to_string(),
            });
        }
        Ok(())
    }
}
