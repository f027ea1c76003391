//! Template path validation.
//!
//! Runs before anything is rendered, so a typo in one path fails the whole
//! command instead of producing a partial batch.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use crate::core::DotenverError;
use crate::dotenv::{dotenv_path, renders_onto_itself};

/// Check that `template` can be rendered.
///
/// - its destination must not be the template itself
/// - it must exist and be readable
/// - an existing destination must be readable and writable
pub fn check_template_path(template: &Path, suffixes: &[String]) -> Result<(), DotenverError> {
    let display = template.display().to_string();

    if renders_onto_itself(template, suffixes) {
        return Err(DotenverError::TemplateNamedLikeTarget {
            path: display,
        });
    }

    if template.is_dir() {
        return Err(DotenverError::TemplateNotReadable {
            path: display,
        });
    }

    match File::open(template) {
        Ok(_) => {}
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(DotenverError::TemplateNotFound {
                path: display,
            });
        }
        Err(error) if error.kind() == ErrorKind::PermissionDenied => {
            return Err(DotenverError::TemplateNotReadable {
                path: display,
            });
        }
        Err(error) => return Err(error.into()),
    }

    let destination = dotenv_path(template, suffixes);
    if destination.exists() {
        let destination_display = destination.display().to_string();
        if let Err(error) = OpenOptions::new().append(true).open(&destination) {
            if error.kind() == ErrorKind::PermissionDenied {
                return Err(DotenverError::TargetNotWritable {
                    path: destination_display,
                });
            }
        }
        if let Err(error) = File::open(&destination) {
            if error.kind() == ErrorKind::PermissionDenied {
                return Err(DotenverError::TemplateNotReadable {
                    path: destination_display,
                });
            }
        }
    }

    Ok(())
}
