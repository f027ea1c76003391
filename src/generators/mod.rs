//! Fake data generators.
//!
//! A [`ValueGenerator`] turns a generator name and its keyword arguments into
//! a string. The renderer only talks to this trait, so tests can plug in
//! deterministic implementations; [`FakerGenerator`] is the real one.

pub mod faker;

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::core::DotenverError;

pub use faker::FakerGenerator;

/// Keyword arguments passed to a generator.
pub type Arguments = HashMap<String, Value>;

/// Produces fake values by generator name.
pub trait ValueGenerator: Send + Sync {
    /// Generate a value with `generator`, passing `arguments` through.
    fn generate(&self, generator: &str, arguments: &Arguments) -> Result<String, DotenverError>;
}

/// Typed access to generator keyword arguments.
///
/// Every argument read is marked as used; [`ArgumentReader::finish`] rejects
/// anything left over, so typos in templates surface as errors.
pub struct ArgumentReader<'a> {
    generator: &'a str,
    remaining: BTreeMap<&'a str, &'a Value>,
}

impl<'a> ArgumentReader<'a> {
    /// Start reading `arguments` for `generator`.
    #[must_use]
    pub fn new(generator: &'a str, arguments: &'a Arguments) -> Self {
        Self {
            generator,
            remaining: arguments.iter().map(|(key, value)| (key.as_str(), value)).collect(),
        }
    }

    /// Read an integer argument.
    pub fn int(&mut self, key: &str, default: i64) -> Result<i64, DotenverError> {
        match self.remaining.remove(key) {
            None => Ok(default),
            Some(value) => value.as_i64().ok_or_else(|| self.invalid(key, "an integer")),
        }
    }

    /// Read a non-negative integer argument.
    pub fn count(&mut self, key: &str, default: usize) -> Result<usize, DotenverError> {
        match self.remaining.remove(key) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| self.invalid(key, "a non-negative integer")),
        }
    }

    /// Read a non-negative integer argument no larger than `max`.
    pub fn bounded_count(
        &mut self,
        key: &str,
        default: usize,
        max: usize,
    ) -> Result<usize, DotenverError> {
        let count = self.count(key, default)?;
        if count > max {
            return Err(self.out_of_range(key, &format!("at most {max}")));
        }
        Ok(count)
    }

    /// Read a boolean argument.
    pub fn flag(&mut self, key: &str, default: bool) -> Result<bool, DotenverError> {
        match self.remaining.remove(key) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| self.invalid(key, "true or false")),
        }
    }

    /// Read a string argument.
    pub fn string(&mut self, key: &str, default: &str) -> Result<String, DotenverError> {
        match self.remaining.remove(key) {
            None => Ok(default.to_string()),
            Some(value) => {
                value.as_str().map(str::to_string).ok_or_else(|| self.invalid(key, "a string"))
            }
        }
    }

    /// Error for an argument outside the accepted range.
    #[must_use]
    pub fn out_of_range(&self, key: &str, expected: &str) -> DotenverError {
        self.invalid(key, expected)
    }

    /// Fail if any argument was not read.
    pub fn finish(self) -> Result<(), DotenverError> {
        match self.remaining.keys().next() {
            None => Ok(()),
            Some(argument) => Err(DotenverError::UnexpectedArgument {
                generator: self.generator.to_string(),
                argument: (*argument).to_string(),
            }),
        }
    }

    fn invalid(&self, key: &str, expected: &str) -> DotenverError {
        DotenverError::InvalidArgument {
            generator: self.generator.to_string(),
            argument: key.to_string(),
            expected: expected.to_string(),
        }
    }
}
