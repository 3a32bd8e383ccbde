//! A single invocation handed to a harness.

/// Identifies one expanded invocation of a test method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationMetadata {
    test_name: String,
    display_name: String,
    index: usize,
}

impl InvocationMetadata {
    /// Describes row `index` of `test_name`, displayed as `display_name`.
    #[must_use]
    pub fn new(test_name: impl Into<String>, display_name: impl Into<String>, index: usize) -> Self {
        Self {
            test_name: test_name.into(),
            display_name: display_name.into(),
            index,
        }
    }

    /// Qualified name of the test method.
    #[must_use]
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Formatted invocation name, e.g. `add[2: 1, 2]`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Zero-based row index within the provider data.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// An invocation body paired with its metadata.
///
/// The body may borrow from the caller; it runs at most once.
///
/// # Examples
///
/// ```
/// use dataprovider_harness::{InvocationMetadata, InvocationRequest};
///
/// let request = InvocationRequest::new(
///     InvocationMetadata::new("calc::tests::add", "add[2: 1, 2]", 2),
///     || 1 + 2,
/// );
/// assert_eq!(request.metadata().index(), 2);
/// assert_eq!(request.run(), 3);
/// ```
pub struct InvocationRequest<'a, T> {
    metadata: InvocationMetadata,
    body: Box<dyn FnOnce() -> T + 'a>,
}

impl<'a, T> InvocationRequest<'a, T> {
    /// Pairs `metadata` with the body to execute.
    #[must_use]
    pub fn new(metadata: InvocationMetadata, body: impl FnOnce() -> T + 'a) -> Self {
        Self {
            metadata,
            body: Box::new(body),
        }
    }

    /// Metadata of the invocation, available before it runs.
    #[must_use]
    pub const fn metadata(&self) -> &InvocationMetadata {
        &self.metadata
    }

    /// Runs the body on the current thread.
    #[must_use]
    pub fn run(self) -> T {
        (self.body)()
    }
}

#[cfg(test)]
mod tests {
    use super::{InvocationMetadata, InvocationRequest};

    #[test]
    fn body_may_mutate_borrowed_state() {
        let mut rows_seen = 0;
        let request = InvocationRequest::new(InvocationMetadata::new("t", "t[0]", 0), || {
            rows_seen += 1;
            rows_seen
        });
        assert_eq!(request.run(), 1);
        assert_eq!(rows_seen, 1);
    }

    #[test]
    fn metadata_outlives_the_body() {
        let request = InvocationRequest::new(
            InvocationMetadata::new("calc::divide", "divide[3: 9, 3]", 3),
            || 9 / 3,
        );
        let metadata = request.metadata().clone();
        assert_eq!(request.run(), 3);
        assert_eq!(metadata.test_name(), "calc::divide");
        assert_eq!(metadata.display_name(), "divide[3: 9, 3]");
        assert_eq!(metadata.index(), 3);
    }
}
