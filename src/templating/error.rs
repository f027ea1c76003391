//! Template processing errors.
//!
//! Every error names the template it belongs to and the phase it happened in,
//! so a failing file in a batch can be reported without affecting the others.

use std::fmt;
use std::path::PathBuf;

use crate::core::DotenverError;

/// Batch phase in which a template failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading inputs and merging the template with the existing `.env`
    Merge,
    /// Expanding generator directives
    Render,
    /// Writing the rendered destination
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Merge => write!(f, "merge"),
            Phase::Render => write!(f, "render"),
            Phase::Write => write!(f, "write"),
        }
    }
}

/// Location of a directive inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLocation {
    /// 1-based line number in the template
    pub line_number: usize,
    /// Variable the directive belongs to
    pub variable: String,
    /// The template line, trimmed
    pub line: String,
}

/// Errors raised while processing one template.
#[derive(Debug)]
pub enum TemplateError {
    /// Template or existing `.env` could not be read
    InputFailed {
        template: PathBuf,
        source: anyhow::Error,
    },

    /// Directive arguments could not be compiled
    SyntaxError {
        template: PathBuf,
        message: String,
        location: Box<DirectiveLocation>,
    },

    /// The generator or the `dotenver` function rejected a call
    GenerationFailed {
        template: PathBuf,
        source: DotenverError,
        location: Box<DirectiveLocation>,
    },

    /// Any other rendering failure
    RenderFailed {
        template: PathBuf,
        message: String,
        location: Option<Box<DirectiveLocation>>,
    },

    /// Rendered content could not be written to the destination
    WriteFailed {
        template: PathBuf,
        destination: PathBuf,
        source: anyhow::Error,
    },
}

impl TemplateError {
    /// Template the error belongs to.
    #[must_use]
    pub fn template(&self) -> &PathBuf {
        match self {
            TemplateError::InputFailed {
                template,
                ..
            }
            | TemplateError::SyntaxError {
                template,
                ..
            }
            | TemplateError::GenerationFailed {
                template,
                ..
            }
            | TemplateError::RenderFailed {
                template,
                ..
            }
            | TemplateError::WriteFailed {
                template,
                ..
            } => template,
        }
    }

    /// Phase the error happened in.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            TemplateError::InputFailed {
                ..
            }
            | TemplateError::SyntaxError {
                ..
            } => Phase::Merge,
            TemplateError::GenerationFailed {
                ..
            }
            | TemplateError::RenderFailed {
                ..
            } => Phase::Render,
            TemplateError::WriteFailed {
                ..
            } => Phase::Write,
        }
    }

    /// Suggestion for fixing the error, if one applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<String> {
        match self {
            TemplateError::SyntaxError {
                ..
            } => Some(
                "Directive arguments use keyword syntax: name=value, strings in quotes, \
                 true/false for booleans"
                    .to_string(),
            ),
            TemplateError::GenerationFailed {
                source: DotenverError::UnknownGenerator {
                    suggestion: Some(candidate),
                    ..
                },
                ..
            } => Some(format!("Did you mean '{candidate}'?")),
            TemplateError::GenerationFailed {
                source: DotenverError::InvalidQuotes {
                    ..
                },
                ..
            } => Some("Use quotes=\"'\" or quotes='\"'".to_string()),
            TemplateError::WriteFailed {
                destination,
                ..
            } => Some(format!(
                "Check that the directory of '{}' exists and is writable",
                destination.display()
            )),
            _ => None,
        }
    }

    /// Detailed, multi-line description with the failing template line.
    #[must_use]
    pub fn format_with_context(&self) -> String {
        let mut message = format!(
            "Error in {} phase for template '{}'",
            self.phase(),
            self.template().display()
        );

        let location = match self {
            TemplateError::InputFailed {
                source,
                ..
            } => {
                message.push_str(&format!("\n\n{source:#}"));
                None
            }
            TemplateError::SyntaxError {
                message: detail,
                location,
                ..
            } => {
                message.push_str(&format!("\n\nInvalid directive arguments: {detail}"));
                Some(location.as_ref())
            }
            TemplateError::GenerationFailed {
                source,
                location,
                ..
            } => {
                message.push_str(&format!("\n\n{source}"));
                Some(location.as_ref())
            }
            TemplateError::RenderFailed {
                message: detail,
                location,
                ..
            } => {
                message.push_str(&format!("\n\n{detail}"));
                location.as_deref()
            }
            TemplateError::WriteFailed {
                source,
                ..
            } => {
                message.push_str(&format!("\n\n{source:#}"));
                None
            }
        };

        if let Some(location) = location {
            message.push_str(&format!(
                "\n\n  {} | {}\n  (variable {})",
                location.line_number, location.line, location.variable
            ));
        }

        message
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = self.template().display();
        match self {
            TemplateError::InputFailed {
                source,
                ..
            } => write!(f, "Failed to read inputs for '{template}': {source}"),
            TemplateError::SyntaxError {
                message,
                location,
                ..
            } => write!(
                f,
                "Invalid directive in '{template}' line {}: {message}",
                location.line_number
            ),
            TemplateError::GenerationFailed {
                source,
                location,
                ..
            } => write!(
                f,
                "Failed to generate {} in '{template}' line {}: {source}",
                location.variable, location.line_number
            ),
            TemplateError::RenderFailed {
                message,
                ..
            } => write!(f, "Failed to render '{template}': {message}"),
            TemplateError::WriteFailed {
                destination,
                source,
                ..
            } => write!(f, "Failed to write '{}': {source}", destination.display()),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::InputFailed {
                source,
                ..
            }
            | TemplateError::WriteFailed {
                source,
                ..
            } => Some(source.as_ref()),
            TemplateError::GenerationFailed {
                source,
                ..
            } => Some(source),
            _ => None,
        }
    }
}
