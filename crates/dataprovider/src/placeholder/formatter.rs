//! Template formatting over an ordered list of placeholders.

use crate::placeholder::{FormatError, Placeholder, ReplacementContext, builtin_placeholders};

/// Produces the display name of one invocation.
pub trait TestNameFormatter: Send + Sync {
    /// Render `template` for the invocation described by `context`.
    ///
    /// # Errors
    /// Returns [`FormatError`] when the template cannot be resolved.
    fn format(
        &self,
        template: &str,
        context: &ReplacementContext<'_>,
    ) -> Result<String, FormatError>;
}

/// Resolves templates with an explicit, ordered set of placeholders.
///
/// The template is scanned once. At each position the placeholders are tried
/// in order and the first match is replaced; resolved text is never scanned
/// again, so an argument containing `%m` stays as written.
///
/// # Examples
/// ```
/// use dataprovider::{ParamType, PlaceholderFormatter, ReplacementContext, TestMethod, Value};
///
/// let method = TestMethod::new("calc::tests", "testAdd")
///     .param("a", ParamType::of::<i32>())
///     .param("b", ParamType::of::<i32>())
///     .param("expected", ParamType::of::<i32>());
/// let arguments = [Value::Int(1), Value::Int(2), Value::Int(3)];
/// let context = ReplacementContext::new(&method, 2, &arguments);
/// let name = PlaceholderFormatter::default().format("%m[%i: %p[0..-1]]", &context);
/// assert_eq!(name.ok().as_deref(), Some("testAdd[2: 1, 2]"));
/// ```
#[derive(Clone, Debug)]
pub struct PlaceholderFormatter {
    placeholders: Vec<Placeholder>,
}

impl Default for PlaceholderFormatter {
    fn default() -> Self {
        Self::new(builtin_placeholders())
    }
}

impl PlaceholderFormatter {
    /// Use exactly `placeholders`, in the given order.
    #[must_use]
    pub const fn new(placeholders: Vec<Placeholder>) -> Self {
        Self { placeholders }
    }

    /// Placeholders in resolution order.
    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Append a placeholder, tried after all existing ones.
    #[must_use]
    pub fn with(mut self, placeholder: Placeholder) -> Self {
        self.placeholders.push(placeholder);
        self
    }

    /// Append a placeholder, tried after all existing ones.
    pub fn push(&mut self, placeholder: Placeholder) {
        self.placeholders.push(placeholder);
    }

    /// Insert a placeholder at `position`, or at the end when `position` is
    /// past it.
    pub fn insert(&mut self, position: usize, placeholder: Placeholder) {
        let position = position.min(self.placeholders.len());
        self.placeholders.insert(position, placeholder);
    }

    /// Remove the first placeholder called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Placeholder> {
        let position = self
            .placeholders
            .iter()
            .position(|placeholder| placeholder.name() == name)?;
        Some(self.placeholders.remove(position))
    }

    /// Render `template` for one invocation.
    ///
    /// # Errors
    /// Returns the first [`FormatError`] raised by a placeholder.
    pub fn format(
        &self,
        template: &str,
        context: &ReplacementContext<'_>,
    ) -> Result<String, FormatError> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(next) = rest.chars().next() {
            let found = self.placeholders.iter().find_map(|placeholder| {
                placeholder.match_len(rest).map(|len| (placeholder, len))
            });
            let consumed = match found {
                Some((placeholder, len)) => {
                    let matched = rest.get(..len).unwrap_or_default();
                    output.push_str(&placeholder.resolve(matched, context)?);
                    len
                }
                None => {
                    output.push(next);
                    next.len_utf8()
                }
            };
            rest = rest.get(consumed..).unwrap_or_default();
        }
        Ok(output)
    }
}

impl TestNameFormatter for PlaceholderFormatter {
    fn format(
        &self,
        template: &str,
        context: &ReplacementContext<'_>,
    ) -> Result<String, FormatError> {
        Self::format(self, template, context)
    }
}
