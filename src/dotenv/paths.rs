//! Destination path derivation for templates.

use std::path::{Path, PathBuf};

/// File name used when a template has no recognized suffix.
pub const DOTENV_FILE_NAME: &str = ".env";

/// Suffixes stripped from a template file name by default.
pub const DEFAULT_TEMPLATE_SUFFIXES: &[&str] = &[".example"];

/// Derive the `.env` path a template renders to.
///
/// When the template's file name ends with one of `suffixes` and something is
/// left after stripping it, the destination is the stripped name next to the
/// template (`app/.env.local.example` → `app/.env.local`). Otherwise the
/// destination is `.env` in the template's directory.
///
/// # Examples
///
/// ```
/// use dotenver::dotenv::dotenv_path;
/// use std::path::{Path, PathBuf};
///
/// let suffixes = [".example".to_string()];
/// assert_eq!(dotenv_path(Path::new("app/.env.example"), &suffixes), PathBuf::from("app/.env"));
/// assert_eq!(dotenv_path(Path::new("/path/to/file"), &suffixes), PathBuf::from("/path/to/.env"));
/// ```
#[must_use]
pub fn dotenv_path(template_path: &Path, suffixes: &[String]) -> PathBuf {
    let directory = template_path.parent().unwrap_or_else(|| Path::new(""));

    let stripped = template_path.file_name().and_then(|name| name.to_str()).and_then(|name| {
        suffixes
            .iter()
            .filter(|suffix| !suffix.is_empty())
            .find_map(|suffix| name.strip_suffix(suffix.as_str()))
            .filter(|stem| !stem.is_empty())
    });

    directory.join(stripped.unwrap_or(DOTENV_FILE_NAME))
}

/// Whether rendering `template_path` would overwrite the template itself.
#[must_use]
pub fn renders_onto_itself(template_path: &Path, suffixes: &[String]) -> bool {
    dotenv_path(template_path, suffixes).file_name() == template_path.file_name()
}

/// Default suffixes as owned strings, for configuration defaults.
#[must_use]
pub fn default_template_suffixes() -> Vec<String> {
    DEFAULT_TEMPLATE_SUFFIXES.iter().map(|suffix| (*suffix).to_string()).collect()
}
