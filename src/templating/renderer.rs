//! Two-pass batch rendering.
//!
//! Pass one merges every template of the batch with its existing `.env`,
//! captures existing named values into the shared cache and compiles each
//! deferred generator call into a `tera` template. Pass two renders those
//! calls. Running all captures before any generation lets a value that exists
//! in one `.env` be reused by every other template naming it.
//!
//! A failure aborts only the template it belongs to.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tera::{Context as TeraContext, Tera};
use tracing::{debug, warn};

use super::cache::NamedValueCache;
use super::error::TemplateError;
use super::functions::{DotenverFunction, FUNCTION_NAME};
use super::matcher::LineMatcher;
use super::merge::{DeferredCall, IntermediateTemplate, merge};
use crate::core::{DotenverError, FileOps};
use crate::dotenv::EnvSnapshot;
use crate::generators::ValueGenerator;

/// One template together with the inputs it is merged with.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    /// Template path, as given by the user
    pub template: PathBuf,
    /// Where the rendered result goes
    pub destination: PathBuf,
    /// Template content
    pub text: String,
    /// Existing destination content (empty in override mode)
    pub snapshot: EnvSnapshot,
}

impl TemplateSource {
    /// Read the template and, unless `override_existing`, its destination.
    pub fn load(
        template: &Path,
        destination: PathBuf,
        override_existing: bool,
        matcher: &LineMatcher,
    ) -> Result<Self, TemplateError> {
        let input_failed = |source: anyhow::Error| TemplateError::InputFailed {
            template: template.to_path_buf(),
            source,
        };

        let text = FileOps::read_with_context(template, "dotenver template")
            .map_err(|error| input_failed(error.into()))?;
        let snapshot = if override_existing {
            EnvSnapshot::empty()
        } else {
            EnvSnapshot::read(&destination, matcher).map_err(input_failed)?
        };

        Ok(Self {
            template: template.to_path_buf(),
            destination,
            text,
            snapshot,
        })
    }
}

/// A fully rendered template, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub template: PathBuf,
    pub destination: PathBuf,
    pub content: String,
}

/// Output of pass one for a single template.
struct MergedTemplate {
    template: PathBuf,
    destination: PathBuf,
    intermediate: IntermediateTemplate,
    /// Registered `tera` template name of each deferred call, in order
    call_names: Vec<String>,
}

/// Renders a batch of templates sharing one named value cache.
pub struct BatchRenderer {
    matcher: LineMatcher,
    generator: Arc<dyn ValueGenerator>,
}

impl BatchRenderer {
    /// Create a renderer producing values with `generator`.
    pub fn new(matcher: LineMatcher, generator: Arc<dyn ValueGenerator>) -> Self {
        Self {
            matcher,
            generator,
        }
    }

    /// Line matcher used for merging, shared with snapshot reading.
    #[must_use]
    pub fn matcher(&self) -> &LineMatcher {
        &self.matcher
    }

    /// Render every source, keeping input order in the results.
    ///
    /// Sources that already failed to load are passed through unchanged.
    pub fn render_batch(
        &self,
        sources: Vec<Result<TemplateSource, TemplateError>>,
    ) -> Vec<Result<RenderedTemplate, TemplateError>> {
        let cache = Arc::new(Mutex::new(NamedValueCache::new()));
        let mut tera = Tera::default();
        tera.register_function(
            FUNCTION_NAME,
            DotenverFunction::new(Arc::clone(&cache), Arc::clone(&self.generator)),
        );

        debug!("Pass 1: merging {} template(s)", sources.len());
        let merged: Vec<Result<MergedTemplate, TemplateError>> = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| self.merge_one(index, source?, &cache, &mut tera))
            .collect();

        debug!("Pass 2: rendering");
        let rendered = merged
            .into_iter()
            .map(|merged| merged.and_then(|merged| render_one(&tera, merged)))
            .collect();

        match cache.lock() {
            Ok(cache) => {
                let (hits, misses, captures) = cache.stats();
                debug!(
                    "Named values: {} known, {hits} hit(s), {misses} generated, {captures} captured",
                    cache.len()
                );
            }
            Err(_) => warn!("Named value cache was poisoned during rendering"),
        }

        rendered
    }

    fn merge_one(
        &self,
        index: usize,
        source: TemplateSource,
        cache: &Mutex<NamedValueCache>,
        tera: &mut Tera,
    ) -> Result<MergedTemplate, TemplateError> {
        let result = {
            let mut cache = cache.lock().map_err(|_| TemplateError::RenderFailed {
                template: source.template.clone(),
                message: "named value cache is poisoned".to_string(),
                location: None,
            })?;
            merge(&source.text, &source.snapshot, &self.matcher, &mut cache)
        };

        let mut call_names = Vec::new();
        for (call_index, call) in result.template.deferred_calls().enumerate() {
            let syntax_error = |message: String| TemplateError::SyntaxError {
                template: source.template.clone(),
                message,
                location: Box::new(call.location.clone()),
            };

            let expression = call.expression().ok_or_else(|| {
                syntax_error("generator and name can not contain every quote character".into())
            })?;
            let name = format!("{index}#{call_index}");
            tera.add_raw_template(&name, &expression)
                .map_err(|error| syntax_error(format_tera_error(&error)))?;
            call_names.push(name);
        }

        debug!(
            "Merged '{}': {} deferred call(s), {} leftover variable(s)",
            source.template.display(),
            call_names.len(),
            result.leftovers.len()
        );

        Ok(MergedTemplate {
            template: source.template,
            destination: source.destination,
            intermediate: result.template,
            call_names,
        })
    }
}

fn render_one(tera: &Tera, merged: MergedTemplate) -> Result<RenderedTemplate, TemplateError> {
    let context = TeraContext::new();
    let content = merged.intermediate.render_with(|index, call| {
        tera.render(&merged.call_names[index], &context)
            .map_err(|error| classify_render_error(&merged.template, call, &error))
    })?;

    debug!("Rendered '{}'", merged.template.display());
    Ok(RenderedTemplate {
        template: merged.template,
        destination: merged.destination,
        content,
    })
}

fn classify_render_error(
    template: &Path,
    call: &DeferredCall,
    error: &tera::Error,
) -> TemplateError {
    let location = Box::new(call.location.clone());
    match find_dotenver_error(error) {
        Some(source) => TemplateError::GenerationFailed {
            template: template.to_path_buf(),
            source: source.clone(),
            location,
        },
        None => TemplateError::RenderFailed {
            template: template.to_path_buf(),
            message: format_tera_error(error),
            location: Some(location),
        },
    }
}

fn find_dotenver_error(error: &tera::Error) -> Option<&DotenverError> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(error) = current {
        if let Some(found) = error.downcast_ref::<DotenverError>() {
            return Some(found);
        }
        current = error.source();
    }
    None
}

/// Flatten a `tera` error chain, dropping the wrappers naming the internal
/// template of a deferred call.
pub fn format_tera_error(error: &tera::Error) -> String {
    let mut messages = Vec::new();
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(error) = current {
        let message = error.to_string();
        let message = message.trim();
        if !message.is_empty()
            && !message.starts_with("Failed to parse '")
            && !message.starts_with("Failed to render '")
        {
            messages.push(message.to_string());
        }
        current = error.source();
    }

    if messages.is_empty() {
        error.to_string()
    } else {
        messages.join(": ")
    }
}
