//! Core types for dotenver
//!
//! Error types shared by every module live here:
//! - [`DotenverError`] - enumerated failure modes
//! - [`ErrorContext`] - user-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - converts any `anyhow::Error` into an [`ErrorContext`]
//! - [`FileOperationError`] - IO errors with the operation, path and purpose attached

pub mod error;
pub mod error_formatting;
pub mod file_error;

pub use error::{DotenverError, ErrorContext};
pub use error_formatting::{create_error_context, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
