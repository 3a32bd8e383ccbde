//! Default synchronous harness implementation.

use crate::adapter::HarnessAdapter;
use crate::request::InvocationRequest;

/// Framework-agnostic synchronous harness.
///
/// `StdHarness` executes the invocation body directly on the calling
/// thread. Panics raised by the body propagate to the caller unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdHarness;

impl StdHarness {
    /// Creates the standard harness.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HarnessAdapter for StdHarness {
    fn run<T>(&self, request: InvocationRequest<'_, T>) -> T {
        request.run()
    }
}
