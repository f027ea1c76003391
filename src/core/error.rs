//! Error handling for dotenver
//!
//! This module provides the error types and user-friendly error reporting for
//! dotenver. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling inside the engine
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DotenverError`] - Enumerated error types for every failure dotenver reports
//! - [`ErrorContext`] - Wrapper that adds user-facing details and suggestions
//!
//! # Error Categories
//!
//! - **File System**: [`DotenverError::FileSystemError`], [`DotenverError::PermissionDenied`]
//! - **Templates**: [`DotenverError::TemplateNotFound`], [`DotenverError::TemplateNamedLikeTarget`]
//! - **Generators**: [`DotenverError::UnknownGenerator`], [`DotenverError::InvalidArgument`],
//!   [`DotenverError::InvalidQuotes`]
//! - **Configuration**: [`DotenverError::ConfigError`], [`DotenverError::InvalidPattern`]
//!
//! Use [`user_friendly_error`](super::user_friendly_error) to convert any
//! `anyhow::Error` into an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotenver::core::{DotenverError, ErrorContext};
//!
//! let error = DotenverError::TemplateNotFound {
//!     path: ".env.example".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Check the template path")
//!     .with_details("Templates are read before any .env file is touched");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for dotenver operations.
///
/// Each variant carries the context needed to explain the failure to a user:
/// file paths, generator names and offending argument values.
#[derive(Error, Debug)]
pub enum DotenverError {
    /// General file system error
    #[error("File system error: {operation} failed for {path}")]
    FileSystemError {
        /// The operation that failed (reading, writing, ...)
        operation: String,
        /// The path involved
        path: String,
    },

    /// Permission denied while accessing a file
    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// The path involved
        path: String,
    },

    /// Template file does not exist
    #[error("'{path}' could not be found")]
    TemplateNotFound {
        /// Path to the missing template
        path: String,
    },

    /// Template file exists but cannot be read
    #[error("'{path}' is not readable")]
    TemplateNotReadable {
        /// Path to the unreadable template
        path: String,
    },

    /// The derived .env path is the template itself
    #[error("'{path}'. Template file can not be named .env")]
    TemplateNamedLikeTarget {
        /// Path to the offending template
        path: String,
    },

    /// Destination .env file cannot be written
    #[error("'{path}' is not writable")]
    TargetNotWritable {
        /// Path to the destination file
        path: String,
    },

    /// Generator name is not known
    #[error("Unknown generator '{generator}'")]
    UnknownGenerator {
        /// The generator requested by the directive
        generator: String,
        /// Closest known generator name, if any is similar enough
        suggestion: Option<String>,
    },

    /// Generator received a keyword argument it does not accept
    #[error("{generator}() got an unexpected keyword argument '{argument}'")]
    UnexpectedArgument {
        /// Generator that rejected the argument
        generator: String,
        /// The rejected keyword
        argument: String,
    },

    /// Generator received a keyword argument of the wrong type or range
    #[error("{generator}(): invalid value for '{argument}', expected {expected}")]
    InvalidArgument {
        /// Generator that rejected the argument
        generator: String,
        /// The offending keyword
        argument: String,
        /// What the generator expected
        expected: String,
    },

    /// `quotes` option was neither `'` nor `"`
    #[error("quotes must be a single `'` or double `\"` quote, got {quotes}")]
    InvalidQuotes {
        /// The rejected value, rendered as JSON
        quotes: String,
    },

    /// Invalid glob pattern for template discovery
    #[error("Invalid template pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given
        pattern: String,
        /// Why the pattern was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// One or more templates failed in a batch
    #[error("{failed} of {total} template(s) failed")]
    BatchFailed {
        /// Number of templates that failed
        failed: usize,
        /// Number of templates in the batch
        total: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catch-all error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for DotenverError {
    fn clone(&self) -> Self {
        match self {
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::TemplateNotFound {
                path,
            } => Self::TemplateNotFound {
                path: path.clone(),
            },
            Self::TemplateNotReadable {
                path,
            } => Self::TemplateNotReadable {
                path: path.clone(),
            },
            Self::TemplateNamedLikeTarget {
                path,
            } => Self::TemplateNamedLikeTarget {
                path: path.clone(),
            },
            Self::TargetNotWritable {
                path,
            } => Self::TargetNotWritable {
                path: path.clone(),
            },
            Self::UnknownGenerator {
                generator,
                suggestion,
            } => Self::UnknownGenerator {
                generator: generator.clone(),
                suggestion: suggestion.clone(),
            },
            Self::UnexpectedArgument {
                generator,
                argument,
            } => Self::UnexpectedArgument {
                generator: generator.clone(),
                argument: argument.clone(),
            },
            Self::InvalidArgument {
                generator,
                argument,
                expected,
            } => Self::InvalidArgument {
                generator: generator.clone(),
                argument: argument.clone(),
                expected: expected.clone(),
            },
            Self::InvalidQuotes {
                quotes,
            } => Self::InvalidQuotes {
                quotes: quotes.clone(),
            },
            Self::InvalidPattern {
                pattern,
                reason,
            } => Self::InvalidPattern {
                pattern: pattern.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::BatchFailed {
                failed,
                total,
            } => Self::BatchFailed {
                failed: *failed,
                total: *total,
            },
            // io::Error is not Clone; keep its message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`DotenverError`] with optional details and a suggestion, and knows
/// how to print itself with terminal colors.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DotenverError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: DotenverError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details about the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
