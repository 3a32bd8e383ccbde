//! Harness adapter trait for invocation execution.

use crate::request::InvocationRequest;

/// Runs invocation closures inside a harness-specific environment.
///
/// # Examples
///
/// ```
/// use dataprovider_harness::{HarnessAdapter, InvocationMetadata, InvocationRequest, StdHarness};
///
/// let request = InvocationRequest::new(
///     InvocationMetadata::new("math::add", "add[0: 1, 2]", 0),
///     || 5 + 5,
/// );
/// let harness = StdHarness::new();
/// assert_eq!(harness.run(request), 10);
/// ```
pub trait HarnessAdapter {
    /// Executes one invocation request and returns the body's result.
    fn run<T>(&self, request: InvocationRequest<'_, T>) -> T;
}
