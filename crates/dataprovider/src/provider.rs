//! Data providers and their declarative options.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cache::load_cached;
use crate::config::default_format;
use crate::context::{
    ConfigError, ConverterContext, ConverterContextBuilder, DEFAULT_NULL_MARKER, DEFAULT_SPLIT_BY,
};
use crate::convert::ProviderData;
use crate::method::TestMethod;

/// Settings attached to a provider.
///
/// # Examples
/// ```
/// use dataprovider::ProviderOptions;
///
/// let options = ProviderOptions::default().split_by(";").format("%m#%i");
/// assert_eq!(options.template(), "%m#%i");
/// assert!(options.is_cached());
/// assert_eq!(options.converter_context().map(|context| context.split_by().to_owned()).ok().as_deref(), Some(";"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderOptions {
    split_by: String,
    null_marker: String,
    convert_nulls: bool,
    trim_values: bool,
    ignore_enum_case: bool,
    cache: bool,
    format: Option<String>,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            split_by: DEFAULT_SPLIT_BY.to_owned(),
            null_marker: DEFAULT_NULL_MARKER.to_owned(),
            convert_nulls: true,
            trim_values: true,
            ignore_enum_case: false,
            cache: true,
            format: None,
        }
    }
}

impl ProviderOptions {
    /// Regex separating the fields of string rows.
    #[must_use]
    pub fn split_by(mut self, pattern: impl Into<String>) -> Self {
        self.split_by = pattern.into();
        self
    }

    /// Token converted to null.
    #[must_use]
    pub fn null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    /// Whether the null marker is honoured.
    #[must_use]
    pub const fn convert_nulls(mut self, enabled: bool) -> Self {
        self.convert_nulls = enabled;
        self
    }

    /// Whether tokens are trimmed before conversion.
    #[must_use]
    pub const fn trim_values(mut self, enabled: bool) -> Self {
        self.trim_values = enabled;
        self
    }

    /// Whether enum constants match case-insensitively.
    #[must_use]
    pub const fn ignore_enum_case(mut self, enabled: bool) -> Self {
        self.ignore_enum_case = enabled;
        self
    }

    /// Whether loaded data is kept in the process-wide cache.
    #[must_use]
    pub const fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Name template for the provider's invocations.
    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    /// Whether loaded data is cached.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cache
    }

    /// The effective name template: the provider's own, else the process
    /// default.
    #[must_use]
    pub fn template(&self) -> String {
        self.format.clone().unwrap_or_else(default_format)
    }

    /// Apply the conversion settings to `builder`.
    #[must_use]
    pub fn configure(&self, builder: ConverterContextBuilder) -> ConverterContextBuilder {
        builder
            .split_by(self.split_by.clone())
            .null_marker(self.null_marker.clone())
            .convert_nulls(self.convert_nulls)
            .trim_values(self.trim_values)
            .ignore_enum_case(self.ignore_enum_case)
    }

    /// Build the converter context described by these options.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the delimiter is invalid.
    pub fn converter_context(&self) -> Result<ConverterContext, ConfigError> {
        self.configure(ConverterContext::builder()).build()
    }
}

type FixedSource = dyn Fn() -> ProviderData + Send + Sync;
type MethodSource = dyn Fn(&TestMethod) -> ProviderData + Send + Sync;

#[derive(Clone)]
enum Source {
    Fixed(Arc<FixedSource>),
    ForMethod(Arc<MethodSource>),
    Inline(Arc<[String]>),
}

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(0);

/// A named source of provider data.
///
/// # Examples
/// ```
/// use dataprovider::{DataProvider, ParamType, ProviderData, TestMethod};
///
/// let squares = DataProvider::for_method("squares", |method: &TestMethod| {
///     let rows = method.parameters().len();
///     ProviderData::table((1..=rows as i32).map(|n| [n, n * n]))
/// });
/// let method = TestMethod::new("m", "square")
///     .param("n", ParamType::of::<i32>())
///     .param("expected", ParamType::of::<i32>());
/// assert_eq!(squares.load(&method).len(), Some(2));
/// ```
#[derive(Clone)]
pub struct DataProvider {
    id: u64,
    name: String,
    options: ProviderOptions,
    source: Source,
}

impl DataProvider {
    /// A provider returning a fixed dataset.
    pub fn new<F>(name: impl Into<String>, source: F) -> Self
    where
        F: Fn() -> ProviderData + Send + Sync + 'static,
    {
        Self::with_source(name, Source::Fixed(Arc::new(source)))
    }

    /// A provider computing its dataset from the test method it feeds.
    pub fn for_method<F>(name: impl Into<String>, source: F) -> Self
    where
        F: Fn(&TestMethod) -> ProviderData + Send + Sync + 'static,
    {
        Self::with_source(name, Source::ForMethod(Arc::new(source)))
    }

    /// A provider of delimited string rows written inline.
    pub fn inline<I, S>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        Self::with_source(name, Source::Inline(rows.into()))
    }

    fn with_source(name: impl Into<String>, source: Source) -> Self {
        Self {
            id: NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            options: ProviderOptions::default(),
            source,
        }
    }

    /// Replace the provider's options.
    #[must_use]
    pub fn with_options(mut self, options: ProviderOptions) -> Self {
        self.options = options;
        self
    }

    /// Name of the provider.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options of the provider.
    #[must_use]
    pub const fn options(&self) -> &ProviderOptions {
        &self.options
    }

    /// Key under which results for `method` are cached.
    ///
    /// Keys combine the name with an identity shared only by clones of this
    /// provider, so same-named providers never share results. Method-aware
    /// providers are cached per test method. Inline rows are never cached.
    #[must_use]
    pub fn cache_key(&self, method: &TestMethod) -> Option<String> {
        match self.source {
            Source::Fixed(_) => Some(format!("{}@{}", self.name, self.id)),
            Source::ForMethod(_) => Some(format!(
                "{}@{}#{}",
                self.name,
                self.id,
                method.qualified_name()
            )),
            Source::Inline(_) => None,
        }
    }

    /// Produce the dataset for `method`, through the cache when enabled.
    #[must_use]
    pub fn load(&self, method: &TestMethod) -> Arc<ProviderData> {
        self.cache_key(method)
            .filter(|_| self.options.is_cached())
            .map_or_else(
                || Arc::new(self.fetch(method)),
                |key| load_cached(&key, || self.fetch(method)),
            )
    }

    fn fetch(&self, method: &TestMethod) -> ProviderData {
        match &self.source {
            Source::Fixed(source) => source(),
            Source::ForMethod(source) => source(method),
            Source::Inline(rows) => ProviderData::Strings(rows.to_vec()),
        }
    }
}

impl fmt::Debug for DataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            Source::Fixed(_) => "fixed",
            Source::ForMethod(_) => "for_method",
            Source::Inline(_) => "inline",
        };
        f.debug_struct("DataProvider")
            .field("name", &self.name)
            .field("source", &source)
            .field("options", &self.options)
            .finish()
    }
}
