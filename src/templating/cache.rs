//! Named value cache for one render batch.
//!
//! Every directive that carries a name (`## dotenver:password:db`) resolves to
//! the same value across all templates of a batch. Values come either from an
//! existing `.env` assignment (captured during the merge pass) or from the
//! first generation during the render pass.

use std::collections::HashMap;

/// Cache key for a named value: generator identity plus explicit name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedValueKey(String);

impl NamedValueKey {
    /// Build the key for `generator` and `name`.
    #[must_use]
    pub fn new(generator: &str, name: &str) -> Self {
        Self(format!("{generator}+{name}"))
    }

    /// The key as text, `generator+name`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Values resolved for named directives during one invocation.
///
/// Once a key is set it never changes. A captured value may be absent (the
/// variable was declared without `=` in the existing file).
#[derive(Debug, Default)]
pub struct NamedValueCache {
    values: HashMap<NamedValueKey, Option<String>>,
    hits: usize,
    misses: usize,
    captures: usize,
}

impl NamedValueCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache from an existing value without generating anything.
    ///
    /// Does nothing if the key is already set.
    pub fn capture(&mut self, generator: &str, name: &str, value: Option<&str>) {
        let key = NamedValueKey::new(generator, name);
        if self.values.contains_key(&key) {
            tracing::trace!("Named value {} already set, capture ignored", key.as_str());
            return;
        }
        tracing::trace!("Captured named value {}", key.as_str());
        self.values.insert(key, value.map(str::to_string));
        self.captures += 1;
    }

    /// Resolve a value, calling `generate` only when needed.
    ///
    /// Unnamed directives always generate. Named directives return the cached
    /// value when present; otherwise the generated value is stored. A failed
    /// generation leaves the key unset.
    pub fn resolve<E>(
        &mut self,
        generator: &str,
        name: Option<&str>,
        generate: impl FnOnce() -> Result<String, E>,
    ) -> Result<Option<String>, E> {
        let Some(name) = name else {
            return generate().map(Some);
        };

        let key = NamedValueKey::new(generator, name);
        if let Some(value) = self.values.get(&key) {
            self.hits += 1;
            return Ok(value.clone());
        }

        self.misses += 1;
        let value = generate()?;
        tracing::trace!("Generated named value {}", key.as_str());
        self.values.insert(key, Some(value.clone()));
        Ok(Some(value))
    }

    /// Look up a named value without generating.
    #[must_use]
    pub fn get(&self, generator: &str, name: &str) -> Option<&Option<String>> {
        self.values.get(&NamedValueKey::new(generator, name))
    }

    /// Number of named values known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no named value is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cache statistics: `(hits, misses, captures)`.
    #[must_use]
    pub fn stats(&self) -> (usize, usize, usize) {
        (self.hits, self.misses, self.captures)
    }
}
