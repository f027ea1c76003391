//! Error formatting utilities for dotenver
//!
//! Converts internal errors into clear, actionable messages for users.

use super::error::{DotenverError, ErrorContext};
use crate::core::file_error::FileOperationError;
use crate::templating::TemplateError;

/// Convert any error into a user-friendly format with contextual suggestions
///
/// The error chain is walked looking, in order, for a [`DotenverError`], a
/// [`TemplateError`] and a [`FileOperationError`]. Anything else is reported
/// with its full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(dotenver_error) = current_error.downcast_ref::<DotenverError>() {
            return create_error_context(dotenver_error);
        }

        if let Some(template_error) = current_error.downcast_ref::<TemplateError>() {
            let mut context = ErrorContext::new(DotenverError::Other {
                message: template_error.to_string(),
            })
            .with_details(template_error.format_with_context());
            if let Some(suggestion) = template_error.suggestion() {
                context = context.with_suggestion(suggestion);
            }
            return context;
        }

        if let Some(file_error) = current_error.downcast_ref::<FileOperationError>() {
            return file_error_context(file_error);
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return ErrorContext::new(DotenverError::FileSystemError {
            operation: "file operation".to_string(),
            path: "unknown path".to_string(),
        })
        .with_suggestion("Check file permissions and disk space")
        .with_details(format!("IO error: {io_error}"));
    }

    ErrorContext::new(DotenverError::Other {
        message: format!("{error:#}"),
    })
}

fn file_error_context(file_error: &FileOperationError) -> ErrorContext {
    let path = file_error.file_path.display().to_string();
    if file_error.source.kind() == std::io::ErrorKind::PermissionDenied {
        return ErrorContext::new(DotenverError::PermissionDenied {
            operation: file_error.operation.to_string(),
            path,
        })
        .with_suggestion("Check file permissions and try running with appropriate privileges")
        .with_details(file_error.user_message());
    }

    ErrorContext::new(DotenverError::FileSystemError {
        operation: file_error.operation.to_string(),
        path,
    })
    .with_suggestion("Check that the path exists and you have the necessary permissions")
    .with_details(file_error.user_message())
}

/// Build an [`ErrorContext`] with suggestions tailored to a [`DotenverError`]
#[must_use]
pub fn create_error_context(error: &DotenverError) -> ErrorContext {
    match error {
        DotenverError::TemplateNotFound {
            path,
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the template path, or use --recursive to discover templates")
            .with_details(format!("No file exists at '{path}'")),
        DotenverError::TemplateNamedLikeTarget {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Rename the template, for example to '.env.example'")
            .with_details("The rendered file would overwrite the template itself"),
        DotenverError::UnknownGenerator {
            generator,
            suggestion,
        } => {
            let context = ErrorContext::new(error.clone())
                .with_details(format!("'{generator}' is not a supported fake data generator"));
            match suggestion {
                Some(candidate) => context.with_suggestion(format!("Did you mean '{candidate}'?")),
                None => context.with_suggestion("Check the generator name in the directive"),
            }
        }
        DotenverError::InvalidQuotes {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Use quotes=\"'\" or quotes='\"' in the directive arguments"),
        DotenverError::UnexpectedArgument {
            generator,
            ..
        }
        | DotenverError::InvalidArgument {
            generator,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Check the arguments passed to '{generator}'")),
        DotenverError::InvalidPattern {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Use glob syntax such as '**/.env.example'"),
        DotenverError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check dotenver.toml for unknown keys or invalid values"),
        DotenverError::PermissionDenied {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check file permissions and try running with appropriate privileges"),
        DotenverError::BatchFailed {
            ..
        } => ErrorContext::new(error.clone())
            .with_details("Templates that failed were left untouched; the others were written"),
        _ => ErrorContext::new(error.clone()),
    }
}
