//! Writing rendered templates to their destinations.
//!
//! Each destination is written atomically: content goes to a temporary file
//! in the same directory, is synced, then renamed over the destination. An
//! existing destination keeps its permissions. A destination that is a
//! symlink is written through: the link target is replaced and the link
//! itself is left alone.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::{FileOperation, FileOperationError, FileResultExt, user_friendly_error};
use crate::templating::{Phase, RenderedTemplate, TemplateError};

const PURPOSE: &str = "rendered dotenv";

/// Atomically replace `path` with `content`.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let target = resolve_symlink(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp_file.write_all(content.as_bytes()).with_file_context(
        FileOperation::Write,
        &target,
        PURPOSE,
    )?;
    temp_file.as_file().sync_all().with_file_context(FileOperation::Write, &target, PURPOSE)?;

    if let Ok(metadata) = fs::metadata(&target) {
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of: {}", target.display()))?;
    }

    temp_file
        .persist(&target)
        .map_err(|error| error.error)
        .with_file_context(FileOperation::Write, &target, PURPOSE)?;

    Ok(())
}

/// The file a write to `path` should replace.
///
/// Symlinks are followed to their final target. A dangling link resolves to
/// the path it points at, so the write creates the target.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(path.to_path_buf());
        }
        Err(error) => {
            return Err(FileOperationError::new(FileOperation::Metadata, path, PURPOSE, error).into());
        }
    };
    if !metadata.file_type().is_symlink() {
        return Ok(path.to_path_buf());
    }

    match fs::canonicalize(path) {
        Ok(target) => {
            debug!("{} is a symlink to {}", path.display(), target.display());
            Ok(target)
        }
        Err(_) => {
            let link = fs::read_link(path).with_file_context(FileOperation::Metadata, path, PURPOSE)?;
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            Ok(base.join(link))
        }
    }
}

/// Outcome of writing a batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// `(template, destination)` pairs written successfully
    pub written: Vec<(PathBuf, PathBuf)>,
    /// Templates that failed, with the phase they failed in
    pub failed: Vec<(PathBuf, Phase)>,
}

impl BatchSummary {
    /// Whether every template was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of templates in the batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Writes rendered templates and reports each file on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputWriter {
    quiet: bool,
}

impl OutputWriter {
    /// Create a writer. With `quiet`, only failures are reported.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self {
            quiet,
        }
    }

    /// Write one rendered template.
    pub fn write(&self, rendered: &RenderedTemplate) -> Result<(), TemplateError> {
        atomic_write(&rendered.destination, &rendered.content).map_err(|source| {
            TemplateError::WriteFailed {
                template: rendered.template.clone(),
                destination: rendered.destination.clone(),
                source,
            }
        })?;
        debug!(
            "Wrote {} byte(s) to {}",
            rendered.content.len(),
            rendered.destination.display()
        );
        Ok(())
    }

    /// Write every successful result in order, reporting each file.
    ///
    /// A failure never stops the remaining writes; files already written are
    /// kept.
    pub fn write_all(
        &self,
        results: Vec<Result<RenderedTemplate, TemplateError>>,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for result in results {
            match result.and_then(|rendered| self.write(&rendered).map(|()| rendered)) {
                Ok(rendered) => {
                    if !self.quiet {
                        eprintln!(
                            "{}",
                            format!(
                                "'{}' rendered to '{}'",
                                rendered.template.display(),
                                rendered.destination.display()
                            )
                            .green()
                        );
                    }
                    summary.written.push((rendered.template, rendered.destination));
                }
                Err(error) => {
                    eprintln!(
                        "{}",
                        format!(
                            "The following error occurred while processing template '{}'",
                            error.template().display()
                        )
                        .red()
                    );
                    summary.failed.push((error.template().clone(), error.phase()));
                    user_friendly_error(anyhow::Error::new(error)).display();
                }
            }
        }

        summary
    }
}
