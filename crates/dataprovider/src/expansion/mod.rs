//! Expansion of one test method and provider into named invocations.

mod error;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

pub use error::ExpansionError;

use crate::context::ConverterContext;
use crate::convert::{
    ArgumentRow, DataConverter, ObjectArrayConversion, SingleArgConversion, StringConversion,
};
use crate::method::TestMethod;
use crate::placeholder::{
    Placeholder, PlaceholderFormatter, ReplacementContext, TestNameFormatter,
};
use crate::provider::DataProvider;
use crate::value::{FromValue, Value, ValueError};

/// One generated test case.
#[derive(Clone, Debug, PartialEq)]
pub struct TestInvocation {
    index: usize,
    name: String,
    arguments: ArgumentRow,
}

impl TestInvocation {
    /// Assemble an invocation.
    #[must_use]
    pub const fn new(index: usize, name: String, arguments: ArgumentRow) -> Self {
        Self {
            index,
            name,
            arguments,
        }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converted arguments.
    #[must_use]
    pub const fn arguments(&self) -> &ArgumentRow {
        &self.arguments
    }

    /// Read the argument at `index` as `T`.
    ///
    /// # Errors
    /// Returns [`ValueError`] when the argument is missing or has another
    /// type.
    pub fn arg<T: FromValue>(&self, index: usize) -> Result<T, ValueError> {
        self.arguments.arg(index)
    }

    /// Converted arguments as a slice.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        self.arguments.values()
    }
}

/// The invocations generated for a test method.
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion {
    method: TestMethod,
    provider: String,
    invocations: Vec<TestInvocation>,
}

impl Expansion {
    /// The expanded test method.
    #[must_use]
    pub const fn method(&self) -> &TestMethod {
        &self.method
    }

    /// Name of the provider the rows came from.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Invocations in row order.
    #[must_use]
    pub fn invocations(&self) -> &[TestInvocation] {
        &self.invocations
    }

    /// Display names in row order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.invocations.iter().map(TestInvocation::name)
    }

    /// Number of invocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    /// Whether there are no invocations. Never true for an expansion
    /// returned by [`Expander`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Expansion {
    type Item = &'a TestInvocation;
    type IntoIter = std::slice::Iter<'a, TestInvocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.iter()
    }
}

/// Turns a test method and a provider into named invocations.
///
/// The expander owns the placeholder set used for names and may override the
/// conversion strategies of every provider it expands.
///
/// # Examples
/// ```
/// use dataprovider::{DataProvider, Expander, ParamType, ProviderData, TestMethod};
///
/// let method = TestMethod::new("calc::tests", "add")
///     .param("a", ParamType::of::<i32>())
///     .param("b", ParamType::of::<i32>())
///     .param("sum", ParamType::of::<i32>());
/// let provider = DataProvider::new("additions", || ProviderData::table([[1, 1, 2], [2, 3, 5]]));
/// let expansion = Expander::new().expand(&method, &provider).ok();
/// let names: Option<Vec<String>> =
///     expansion.map(|expansion| expansion.names().map(str::to_owned).collect());
/// assert_eq!(names, Some(vec!["add[0: 1, 1]".to_owned(), "add[1: 2, 3]".to_owned()]));
/// ```
#[derive(Clone, Default)]
pub struct Expander {
    formatter: PlaceholderFormatter,
    object_array_converter: Option<Arc<dyn ObjectArrayConversion>>,
    single_arg_converter: Option<Arc<dyn SingleArgConversion>>,
    string_converter: Option<Arc<dyn StringConversion>>,
}

impl Expander {
    /// An expander with the built-in placeholders and converters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the placeholder set.
    #[must_use]
    pub fn with_formatter(mut self, formatter: PlaceholderFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Add a placeholder after the existing ones.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.formatter.push(placeholder);
        self
    }

    /// Use `converter` for rows of typed values.
    #[must_use]
    pub fn object_array_converter(mut self, converter: Arc<dyn ObjectArrayConversion>) -> Self {
        self.object_array_converter = Some(converter);
        self
    }

    /// Use `converter` for lone values.
    #[must_use]
    pub fn single_arg_converter(mut self, converter: Arc<dyn SingleArgConversion>) -> Self {
        self.single_arg_converter = Some(converter);
        self
    }

    /// Use `converter` for string rows.
    #[must_use]
    pub fn string_converter(mut self, converter: Arc<dyn StringConversion>) -> Self {
        self.string_converter = Some(converter);
        self
    }

    /// The placeholder set used by [`expand`](Self::expand).
    #[must_use]
    pub const fn formatter(&self) -> &PlaceholderFormatter {
        &self.formatter
    }

    /// Expand `method` with the rows of `provider`, naming invocations with
    /// the expander's placeholders.
    ///
    /// # Errors
    /// Returns [`ExpansionError`] when the signature, the provider options,
    /// the data or a name template is unusable, or when the provider yields
    /// no rows.
    pub fn expand(
        &self,
        method: &TestMethod,
        provider: &DataProvider,
    ) -> Result<Expansion, ExpansionError> {
        self.expand_with(method, provider, &self.formatter)
    }

    /// Expand `method` with the rows of `provider`, naming invocations with
    /// `formatter`.
    ///
    /// # Errors
    /// As for [`expand`](Self::expand).
    pub fn expand_with(
        &self,
        method: &TestMethod,
        provider: &DataProvider,
        formatter: &dyn TestNameFormatter,
    ) -> Result<Expansion, ExpansionError> {
        let provider_name = provider.name();
        method
            .validate()
            .map_err(|source| ExpansionError::Signature {
                provider: provider_name.to_owned(),
                source,
            })?;
        let context = self.converter_context(provider)?;
        let data = provider.load(method);
        let rows = DataConverter::convert(&data, method, &context).map_err(|source| {
            ExpansionError::Conversion {
                provider: provider_name.to_owned(),
                source,
            }
        })?;
        if rows.is_empty() {
            return Err(ExpansionError::EmptyProvider {
                provider: provider_name.to_owned(),
                method: method.qualified_name(),
            });
        }

        let template = provider.options().template();
        let invocations = rows
            .into_iter()
            .enumerate()
            .map(|(index, arguments)| {
                let replacement = ReplacementContext::new(method, index, arguments.values());
                let name = formatter
                    .format(&template, &replacement)
                    .map_err(|source| ExpansionError::Format {
                        provider: provider_name.to_owned(),
                        index,
                        source,
                    })?;
                Ok(TestInvocation::new(index, name, arguments))
            })
            .collect::<Result<Vec<_>, ExpansionError>>()?;
        log::debug!(
            "expanded `{}` into {} invocation(s) from {} provider `{provider_name}`",
            method.qualified_name(),
            invocations.len(),
            data.shape()
        );
        Ok(Expansion {
            method: method.clone(),
            provider: provider_name.to_owned(),
            invocations,
        })
    }

    fn converter_context(&self, provider: &DataProvider) -> Result<ConverterContext, ExpansionError> {
        let mut builder = provider.options().configure(ConverterContext::builder());
        if let Some(converter) = &self.object_array_converter {
            builder = builder.object_array_converter(Arc::clone(converter));
        }
        if let Some(converter) = &self.single_arg_converter {
            builder = builder.single_arg_converter(Arc::clone(converter));
        }
        if let Some(converter) = &self.string_converter {
            builder = builder.string_converter(Arc::clone(converter));
        }
        builder
            .build()
            .map_err(|source| ExpansionError::Configuration {
                provider: provider.name().to_owned(),
                source,
            })
    }
}

impl fmt::Debug for Expander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expander")
            .field("formatter", &self.formatter)
            .field("custom_object_array_converter", &self.object_array_converter.is_some())
            .field("custom_single_arg_converter", &self.single_arg_converter.is_some())
            .field("custom_string_converter", &self.string_converter.is_some())
            .finish()
    }
}
