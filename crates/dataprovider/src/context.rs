//! Settings and strategies used while converting provider data.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;

use crate::convert::{
    ObjectArrayConversion, ObjectArrayConverter, SingleArgConversion, SingleArgConverter,
    StringConversion, StringConverter,
};

/// Regex separating the fields of a string row by default.
pub const DEFAULT_SPLIT_BY: &str = ",";

/// Token converted to null by default.
pub const DEFAULT_NULL_MARKER: &str = "null";

static DEFAULT_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_SPLIT_BY)
        .unwrap_or_else(|_| unreachable!("default delimiter should compile"))
});

/// Raised when converter settings are invalid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The delimiter pattern is empty and would split between every
    /// character.
    #[error("the `split_by` pattern must not be empty")]
    EmptyDelimiter,
    /// The delimiter pattern does not compile.
    #[error("the `split_by` pattern `{pattern}` is not a valid regular expression")]
    InvalidDelimiter {
        /// The rejected pattern.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: regex::Error,
    },
}

/// Read-only conversion settings shared by every row of one expansion.
///
/// # Examples
/// ```
/// use dataprovider::ConverterContext;
///
/// let context = ConverterContext::builder()
///     .split_by(r"\|")
///     .null_marker("<none>")
///     .ignore_enum_case(true)
///     .build()
///     .ok();
/// assert_eq!(context.as_ref().map(ConverterContext::split_by), Some(r"\|"));
/// assert!(ConverterContext::builder().split_by("(").build().is_err());
/// ```
#[derive(Clone)]
pub struct ConverterContext {
    split_by: String,
    delimiter: Regex,
    null_marker: String,
    convert_nulls: bool,
    trim_values: bool,
    ignore_enum_case: bool,
    object_array_converter: Arc<dyn ObjectArrayConversion>,
    single_arg_converter: Arc<dyn SingleArgConversion>,
    string_converter: Arc<dyn StringConversion>,
}

impl ConverterContext {
    /// Start from the default settings.
    #[must_use]
    pub fn builder() -> ConverterContextBuilder {
        ConverterContextBuilder::default()
    }

    /// Source of the delimiter regex.
    #[must_use]
    pub fn split_by(&self) -> &str {
        &self.split_by
    }

    /// Compiled delimiter regex.
    #[must_use]
    pub const fn delimiter(&self) -> &Regex {
        &self.delimiter
    }

    /// Token converted to null.
    #[must_use]
    pub fn null_marker(&self) -> &str {
        &self.null_marker
    }

    /// Whether the null marker is honoured.
    #[must_use]
    pub const fn convert_nulls(&self) -> bool {
        self.convert_nulls
    }

    /// Whether tokens are trimmed before conversion.
    #[must_use]
    pub const fn trim_values(&self) -> bool {
        self.trim_values
    }

    /// Whether enum constants match case-insensitively.
    #[must_use]
    pub const fn ignore_enum_case(&self) -> bool {
        self.ignore_enum_case
    }

    /// Strategy for rows of typed values.
    #[must_use]
    pub fn object_array_converter(&self) -> &dyn ObjectArrayConversion {
        self.object_array_converter.as_ref()
    }

    /// Strategy for lone values.
    #[must_use]
    pub fn single_arg_converter(&self) -> &dyn SingleArgConversion {
        self.single_arg_converter.as_ref()
    }

    /// Strategy for string rows.
    #[must_use]
    pub fn string_converter(&self) -> &dyn StringConversion {
        self.string_converter.as_ref()
    }
}

impl Default for ConverterContext {
    fn default() -> Self {
        ConverterContextBuilder::default().finish(DEFAULT_DELIMITER.clone())
    }
}

impl fmt::Debug for ConverterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterContext")
            .field("split_by", &self.split_by)
            .field("null_marker", &self.null_marker)
            .field("convert_nulls", &self.convert_nulls)
            .field("trim_values", &self.trim_values)
            .field("ignore_enum_case", &self.ignore_enum_case)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ConverterContext`].
#[derive(Clone)]
pub struct ConverterContextBuilder {
    split_by: String,
    null_marker: String,
    convert_nulls: bool,
    trim_values: bool,
    ignore_enum_case: bool,
    object_array_converter: Arc<dyn ObjectArrayConversion>,
    single_arg_converter: Arc<dyn SingleArgConversion>,
    string_converter: Arc<dyn StringConversion>,
}

impl Default for ConverterContextBuilder {
    fn default() -> Self {
        Self {
            split_by: DEFAULT_SPLIT_BY.to_owned(),
            null_marker: DEFAULT_NULL_MARKER.to_owned(),
            convert_nulls: true,
            trim_values: true,
            ignore_enum_case: false,
            object_array_converter: Arc::new(ObjectArrayConverter),
            single_arg_converter: Arc::new(SingleArgConverter),
            string_converter: Arc::new(StringConverter),
        }
    }
}

impl ConverterContextBuilder {
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

    /// Replace the strategy for rows of typed values.
    #[must_use]
    pub fn object_array_converter(mut self, converter: Arc<dyn ObjectArrayConversion>) -> Self {
        self.object_array_converter = converter;
        self
    }

    /// Replace the strategy for lone values.
    #[must_use]
    pub fn single_arg_converter(mut self, converter: Arc<dyn SingleArgConversion>) -> Self {
        self.single_arg_converter = converter;
        self
    }

    /// Replace the strategy for string rows.
    #[must_use]
    pub fn string_converter(mut self, converter: Arc<dyn StringConversion>) -> Self {
        self.string_converter = converter;
        self
    }

    /// Compile the delimiter and freeze the settings.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the delimiter is empty or not a valid
    /// regex.
    pub fn build(self) -> Result<ConverterContext, ConfigError> {
        if self.split_by.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        let delimiter = if self.split_by == DEFAULT_SPLIT_BY {
            DEFAULT_DELIMITER.clone()
        } else {
            Regex::new(&self.split_by).map_err(|source| ConfigError::InvalidDelimiter {
                pattern: self.split_by.clone(),
                source,
            })?
        };
        Ok(self.finish(delimiter))
    }

    fn finish(self, delimiter: Regex) -> ConverterContext {
        ConverterContext {
            split_by: self.split_by,
            delimiter,
            null_marker: self.null_marker,
            convert_nulls: self.convert_nulls,
            trim_values: self.trim_values,
            ignore_enum_case: self.ignore_enum_case,
            object_array_converter: self.object_array_converter,
            single_arg_converter: self.single_arg_converter,
            string_converter: self.string_converter,
        }
    }
}

impl fmt::Debug for ConverterContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterContextBuilder")
            .field("split_by", &self.split_by)
            .field("null_marker", &self.null_marker)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_match_documented_values() {
        let context = ConverterContext::default();
        assert_eq!(context.split_by(), ",");
        assert_eq!(context.null_marker(), "null");
        assert!(context.convert_nulls());
        assert!(context.trim_values());
        assert!(!context.ignore_enum_case());
    }

    #[rstest]
    #[case("")]
    #[case("[")]
    fn rejects_unusable_delimiters(#[case] pattern: &str) {
        assert!(ConverterContext::builder().split_by(pattern).build().is_err());
    }

    #[test]
    fn compiles_custom_delimiter() {
        let Ok(context) = ConverterContext::builder().split_by(r"\s*;\s*").build() else {
            panic!("delimiter should compile");
        };
        let fields: Vec<&str> = context.delimiter().split("a ; b;c").collect();
        assert_eq!(fields, ["a", "b", "c"]);
    }
}
