//! The `dotenver` template function.
//!
//! Deferred calls are compiled into expressions such as
//! `{{ dotenver(generator="password", name="db", length=24, quotes="'") }}`.
//! The function resolves the value through the batch cache and applies the
//! per-call quoting options.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::cache::NamedValueCache;
use crate::core::DotenverError;
use crate::generators::{Arguments, ValueGenerator};

/// Name the function is registered under.
pub const FUNCTION_NAME: &str = "dotenver";

const DEFAULT_ESCAPE: &str = "\\";

/// `tera` function resolving generator directives.
pub struct DotenverFunction {
    cache: Arc<Mutex<NamedValueCache>>,
    generator: Arc<dyn ValueGenerator>,
}

impl DotenverFunction {
    /// Create a function sharing `cache` with the rest of the batch.
    pub fn new(cache: Arc<Mutex<NamedValueCache>>, generator: Arc<dyn ValueGenerator>) -> Self {
        Self {
            cache,
            generator,
        }
    }

    fn resolve(&self, args: &HashMap<String, Value>) -> Result<String, DotenverError> {
        let mut arguments: Arguments = args.clone();

        let generator = match arguments.remove("generator") {
            Some(Value::String(generator)) => generator,
            _ => {
                return Err(DotenverError::Other {
                    message: format!("{FUNCTION_NAME}() requires a generator name"),
                });
            }
        };
        let name = match arguments.remove("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => Some(plain_text(&other)),
        };
        let quotes = match arguments.remove("quotes") {
            None | Some(Value::Null) => None,
            Some(Value::String(quotes)) if quotes == "'" || quotes == "\"" => Some(quotes),
            Some(other) => {
                return Err(DotenverError::InvalidQuotes {
                    quotes: plain_text(&other),
                });
            }
        };
        let escape_with = match arguments.remove("escape_with") {
            None => DEFAULT_ESCAPE.to_string(),
            Some(value) => plain_text(&value),
        };

        let value = {
            let mut cache = self.cache.lock().map_err(|_| DotenverError::Other {
                message: "named value cache is poisoned".to_string(),
            })?;
            cache.resolve(&generator, name.as_deref(), || {
                self.generator.generate(&generator, &arguments)
            })?
        };

        Ok(apply_quotes(value.unwrap_or_default(), quotes.as_deref(), &escape_with))
    }
}

impl tera::Function for DotenverFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.resolve(args)
            .map(Value::String)
            .map_err(|error| tera::Error::chain(format!("{FUNCTION_NAME}() failed"), error))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Wrap `value` in `quotes`, escaping embedded quotes with `escape_with`.
#[must_use]
pub fn apply_quotes(value: String, quotes: Option<&str>, escape_with: &str) -> String {
    match quotes {
        None => value,
        Some(quotes) => {
            let escaped = value.replace(quotes, &format!("{escape_with}{quotes}"));
            format!("{quotes}{escaped}{quotes}")
        }
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
