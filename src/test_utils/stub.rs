//! Deterministic value generator for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::DotenverError;
use crate::generators::{ArgumentReader, Arguments, ValueGenerator};

/// Generator with predictable output.
///
/// - `echo(text="...")` returns `text` (empty by default)
/// - `counter()` returns `value-1`, `value-2`, ... in call order
/// - `fail()` always fails
///
/// Every other name is an unknown generator.
#[derive(Debug, Default)]
pub struct StubGenerator {
    calls: AtomicUsize,
}

impl StubGenerator {
    /// Create a stub with its counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `generate` calls so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ValueGenerator for StubGenerator {
    fn generate(&self, generator: &str, arguments: &Arguments) -> Result<String, DotenverError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let mut args = ArgumentReader::new(generator, arguments);

        let value = match generator {
            "echo" => args.string("text", "")?,
            "counter" => format!("value-{call}"),
            "fail" => {
                return Err(DotenverError::Other {
                    message: "stub generator failure".to_string(),
                });
            }
            _ => {
                return Err(DotenverError::UnknownGenerator {
                    generator: generator.to_string(),
                    suggestion: None,
                });
            }
        };

        args.finish()?;
        Ok(value)
    }
}
