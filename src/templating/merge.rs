//! Merging one template with the snapshot of its existing `.env`.
//!
//! The merge produces an [`IntermediateTemplate`]: finished text lines plus
//! deferred generator calls that the renderer expands in its second pass.
//! Named values found in the existing file are captured into the batch cache
//! here, so they are known before anything is generated.

use std::collections::HashSet;
use tracing::trace;

use super::cache::NamedValueCache;
use super::error::DirectiveLocation;
use super::matcher::{Declaration, Directive, LineMatcher, format_assignment};
use crate::dotenv::{EnvEntry, EnvSnapshot};

/// Separator written before variables that only exist in the existing file.
pub const LEFTOVER_HEADER: &str = "\n\
######################################\n\
# Variables not in Dotenver template #\n\
######################################\n\
\n";

/// A generator call whose value is produced during rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredCall {
    /// Generator to call
    pub generator: String,
    /// Named value identity, if any
    pub name: Option<String>,
    /// Keyword argument text, verbatim from the template
    pub arguments: Option<String>,
    /// Where the directive appears in the template
    pub location: DirectiveLocation,
}

impl DeferredCall {
    /// Template expression calling the `dotenver` function.
    ///
    /// Returns `None` when the generator or name cannot be written as a
    /// string literal (it contains every quote character).
    #[must_use]
    pub fn expression(&self) -> Option<String> {
        let mut parameters = vec![format!("generator={}", string_literal(&self.generator)?)];
        if let Some(name) = &self.name {
            parameters.push(format!("name={}", string_literal(name)?));
        }
        match self.arguments.as_deref().map(str::trim) {
            Some(arguments) if !arguments.is_empty() => parameters.push(arguments.to_string()),
            _ => {}
        }
        Some(format!("{{{{ dotenver({}) }}}}", parameters.join(", ")))
    }
}

/// Template string literal for `value`, using the first quote character it
/// does not contain. Literals have no escape sequences.
fn string_literal(value: &str) -> Option<String> {
    ['"', '\'', '`']
        .into_iter()
        .find(|quote| !value.contains(*quote))
        .map(|quote| format!("{quote}{value}{quote}"))
}

/// One output line of an intermediate template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Finished line, without the trailing newline
    Text(String),
    /// `prefix` followed by the value of `call`
    Deferred {
        prefix: String,
        call: DeferredCall,
    },
}

/// Merged template awaiting expansion of its deferred calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateTemplate {
    segments: Vec<Segment>,
}

impl IntermediateTemplate {
    /// Deferred calls in output order.
    pub fn deferred_calls(&self) -> impl Iterator<Item = &DeferredCall> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Deferred {
                call,
                ..
            } => Some(call),
            Segment::Text(_) => None,
        })
    }

    /// Render the template, asking `expand` for the value of each deferred call.
    pub fn render_with<E>(
        &self,
        mut expand: impl FnMut(usize, &DeferredCall) -> Result<String, E>,
    ) -> Result<String, E> {
        let mut output = String::new();
        let mut deferred_index = 0;
        for segment in &self.segments {
            match segment {
                Segment::Text(line) => output.push_str(line),
                Segment::Deferred {
                    prefix,
                    call,
                } => {
                    output.push_str(prefix);
                    output.push_str(&expand(deferred_index, call)?);
                    deferred_index += 1;
                }
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn push_line(&mut self, line: &str) {
        self.segments.push(Segment::Text(line.trim().to_string()));
    }
}

/// Result of merging one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Merged template, including the leftover block
    pub template: IntermediateTemplate,
    /// Variables of the existing file that the template does not declare
    pub leftovers: Vec<String>,
}

/// Merge `template_text` with `snapshot`.
///
/// Existing assignments always win over template values and directives.
/// Named directives whose variable already exists capture the existing value
/// into `cache`.
pub fn merge(
    template_text: &str,
    snapshot: &EnvSnapshot,
    matcher: &LineMatcher,
    cache: &mut NamedValueCache,
) -> MergeResult {
    let mut template = IntermediateTemplate::default();
    let mut reconciled: HashSet<&str> = HashSet::new();

    for (index, line) in template_text.lines().enumerate() {
        let Some(declaration) = matcher.parse_template_line(line) else {
            template.push_line(line);
            continue;
        };

        if let Some((variable, entry)) = snapshot.get_key_value(&declaration.variable) {
            trace!("{}: keeping existing value", declaration.variable);
            reconciled.insert(variable.as_str());
            if let Some(Directive {
                generator,
                name: Some(name),
                ..
            }) = &declaration.directive
            {
                cache.capture(generator, name, entry.value.as_deref());
            }
            template.push_line(&entry.to_line());
            continue;
        }

        match declaration {
            Declaration {
                left_side,
                variable,
                directive: Some(directive),
                ..
            } => {
                trace!("{variable}: deferred to {}", directive.generator);
                let call = DeferredCall {
                    generator: directive.generator,
                    name: directive.name,
                    arguments: directive.arguments,
                    location: DirectiveLocation {
                        line_number: index + 1,
                        variable,
                        line: line.trim().to_string(),
                    },
                };
                template.segments.push(Segment::Deferred {
                    prefix: format!("{}=", left_side.trim()),
                    call,
                });
            }
            declaration => {
                trace!("{}: taken from template", declaration.variable);
                template.push_line(&declaration.to_line());
            }
        }
    }

    let leftovers: Vec<(&String, &EnvEntry)> =
        snapshot.iter().filter(|(variable, _)| !reconciled.contains(variable.as_str())).collect();

    if !leftovers.is_empty() {
        template.segments.extend(LEFTOVER_HEADER.lines().map(|line| Segment::Text(line.to_string())));
        for (_, entry) in &leftovers {
            template.push_line(&format_assignment(&entry.left_side, entry.value.as_deref()));
        }
    }

    MergeResult {
        template,
        leftovers: leftovers.into_iter().map(|(variable, _)| variable.clone()).collect(),
    }
}
