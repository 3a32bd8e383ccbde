//! Per-invocation input to placeholder resolution.

use crate::method::TestMethod;
use crate::value::Value;

/// Everything a placeholder may look at: the test method, the zero-based
/// row index and the converted arguments of the row.
#[derive(Clone, Copy, Debug)]
pub struct ReplacementContext<'a> {
    method: &'a TestMethod,
    index: usize,
    arguments: &'a [Value],
}

impl<'a> ReplacementContext<'a> {
    /// Bundle the inputs for one invocation.
    #[must_use]
    pub const fn new(method: &'a TestMethod, index: usize, arguments: &'a [Value]) -> Self {
        Self {
            method,
            index,
            arguments,
        }
    }

    /// The test method being expanded.
    #[must_use]
    pub const fn method(&self) -> &'a TestMethod {
        self.method
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Converted arguments of the row.
    #[must_use]
    pub const fn arguments(&self) -> &'a [Value] {
        self.arguments
    }
}
