//! A single named placeholder.

use std::fmt;
use std::sync::Arc;

use dataprovider_patterns::PatternError;
use dataprovider_patterns::token::{compile_anchored, compile_token};
use regex::Regex;

use crate::placeholder::{FormatError, ReplacementContext};

type Resolver = dyn Fn(&str, &ReplacementContext<'_>) -> Result<String, FormatError> + Send + Sync;

/// A template token and the function resolving it.
///
/// Resolvers are pure: they receive the matched text and the invocation
/// context and return the replacement, which is inserted literally.
///
/// # Examples
/// ```
/// use dataprovider::{Placeholder, ReplacementContext, TestMethod};
///
/// let row_number = Placeholder::new("row number", "%n", |_, context| {
///     Ok((context.index() + 1).to_string())
/// })
/// .ok();
/// let method = TestMethod::new("suite", "check");
/// let context = ReplacementContext::new(&method, 4, &[]);
/// let name = row_number.and_then(|placeholder| placeholder.process("row %n of %n", &context).ok());
/// assert_eq!(name.as_deref(), Some("row 5 of 5"));
/// ```
#[derive(Clone)]
pub struct Placeholder {
    name: String,
    source: String,
    pattern: Regex,
    anchored: Regex,
    resolver: Arc<Resolver>,
}

impl Placeholder {
    /// Create a placeholder matching the regex `source`.
    ///
    /// # Errors
    /// Returns [`PatternError::Regex`] when `source` does not compile.
    pub fn new<F>(name: impl Into<String>, source: &str, resolver: F) -> Result<Self, PatternError>
    where
        F: Fn(&str, &ReplacementContext<'_>) -> Result<String, FormatError>
            + Send
            + Sync
            + 'static,
    {
        Ok(Self {
            name: name.into(),
            source: source.to_owned(),
            pattern: compile_token(source)?,
            anchored: compile_anchored(source)?,
            resolver: Arc::new(resolver),
        })
    }

    /// Name used in diagnostics and for removal from a formatter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regex source of the token.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve one occurrence of the token.
    ///
    /// # Errors
    /// Propagates the resolver's [`FormatError`].
    pub fn resolve(
        &self,
        matched: &str,
        context: &ReplacementContext<'_>,
    ) -> Result<String, FormatError> {
        (self.resolver)(matched, context)
    }

    /// Replace every occurrence of the token in `template`.
    ///
    /// # Errors
    /// Propagates the first resolver failure.
    pub fn process(
        &self,
        template: &str,
        context: &ReplacementContext<'_>,
    ) -> Result<String, FormatError> {
        let mut output = String::with_capacity(template.len());
        let mut copied = 0;
        for found in self.pattern.find_iter(template) {
            output.push_str(template.get(copied..found.start()).unwrap_or_default());
            output.push_str(&self.resolve(found.as_str(), context)?);
            copied = found.end();
        }
        output.push_str(template.get(copied..).unwrap_or_default());
        Ok(output)
    }

    /// Length of a non-empty match at the start of `rest`.
    pub(crate) fn match_len(&self, rest: &str) -> Option<usize> {
        self.anchored
            .find(rest)
            .map(|found| found.end())
            .filter(|len| *len > 0)
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
