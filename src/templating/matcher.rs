//! Line pattern matching for `.env` files and dotenver templates.
//!
//! Both file kinds share one declaration grammar:
//!
//! ```text
//! [export ]NAME[=value]
//! ```
//!
//! Templates may additionally end with a generator directive:
//!
//! ```text
//! NAME= ## dotenver:generator[:name][(arguments)]
//! ```
//!
//! The directive-aware pattern is only used for templates. Existing `.env`
//! files are read with the plain pattern, so a value that happens to contain
//! `## dotenver:` is kept verbatim.

use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// Shared left side / variable / value grammar. `{directive}` is replaced by
/// the directive pattern for templates and by nothing for plain files.
const DECLARATION_PATTERN: &str = r"(?x)
    ^\s*
    (
        (?:export\s)?               # optional export command
        \s*
        ([^\s=\#]+)                 # variable name
    )
    (?:
        \s*=\s*?                    # assignment
        (.*?)                       # verbatim value, no parsing done
        {directive}
    )?
    \s*$
";

const DIRECTIVE_PATTERN: &str = r"
    (?:
        \#\#\ +dotenver:            # start of the directive comment
        ([^(\s\#:]+)                # generator
        (?::([^(\s\#]+))?           # value name
        (?:\((.*)\))?               # arguments, passed through unparsed
    )?
";

/// Generator directive attached to a template declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Generator to call, e.g. `boolean`
    pub generator: String,
    /// Identity shared by every directive with the same generator and name
    pub name: Option<String>,
    /// Argument text between the parentheses, verbatim
    pub arguments: Option<String>,
}

/// A parsed variable declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Text left of the `=`, including any `export ` prefix
    pub left_side: String,
    /// Bare variable name, the merge key
    pub variable: String,
    /// Literal value when the line has an `=`; `Some("")` for `NAME=`
    pub value: Option<String>,
    /// Generator directive, templates only
    pub directive: Option<Directive>,
}

impl Declaration {
    /// Render as `left_side=value`, or the bare left side when unassigned.
    #[must_use]
    pub fn to_line(&self) -> String {
        format_assignment(&self.left_side, self.value.as_deref())
    }
}

/// Format a left side and an optional value as an output line (without newline).
#[must_use]
pub fn format_assignment(left_side: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{left_side}={value}"),
        None => left_side.to_string(),
    }
}

/// Compiled patterns for plain `.env` lines and template lines.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    values: Regex,
    template: Regex,
}

impl LineMatcher {
    /// Compile both line patterns.
    pub fn new() -> Result<Self> {
        let values = Regex::new(&DECLARATION_PATTERN.replace("{directive}", ""))
            .context("Failed to compile .env line pattern")?;
        let template = Regex::new(&DECLARATION_PATTERN.replace("{directive}", DIRECTIVE_PATTERN))
            .context("Failed to compile template line pattern")?;

        Ok(Self {
            values,
            template,
        })
    }

    /// Parse a line of an existing `.env` file. Directives are not recognized.
    #[must_use]
    pub fn parse_value_line(&self, line: &str) -> Option<Declaration> {
        let captures = self.values.captures(line)?;
        Some(Self::declaration(&captures, None))
    }

    /// Parse a line of a dotenver template.
    ///
    /// A literal value followed by a directive loses the whitespace that
    /// separates it from the `##` marker.
    #[must_use]
    pub fn parse_template_line(&self, line: &str) -> Option<Declaration> {
        let captures = self.template.captures(line)?;
        let directive = captures.get(4).map(|generator| Directive {
            generator: generator.as_str().to_string(),
            name: captures.get(5).map(|m| m.as_str().to_string()),
            arguments: captures.get(6).map(|m| m.as_str().to_string()),
        });
        let mut declaration = Self::declaration(&captures, None);
        if directive.is_some() {
            declaration.value = declaration.value.map(|value| value.trim_end().to_string());
        }
        declaration.directive = directive;
        Some(declaration)
    }

    fn declaration(captures: &Captures<'_>, directive: Option<Directive>) -> Declaration {
        let group = |index: usize| captures.get(index).map(|m| m.as_str().to_string());
        Declaration {
            left_side: group(1).unwrap_or_default(),
            variable: group(2).unwrap_or_default(),
            value: group(3),
            directive,
        }
    }
}
