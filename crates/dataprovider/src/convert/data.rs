//! Dispatch of provider data to the matching row converter.

use crate::context::ConverterContext;
use crate::convert::{ArgumentRow, ConversionError};
use crate::method::TestMethod;
use crate::value::Value;

/// What a data provider returns.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderData {
    /// Rows of typed values.
    Table(Vec<Vec<Value>>),
    /// One value per invocation.
    Array(Vec<Value>),
    /// One delimited string per invocation.
    Strings(Vec<String>),
    /// Rows of typed values produced as a nested sequence.
    Nested(Vec<Vec<Value>>),
    /// A sequence whose list elements are rows and whose other elements are
    /// single arguments.
    Sequence(Vec<Value>),
    /// Anything else, including null. Never convertible.
    Other(Value),
}

impl ProviderData {
    /// Rows of typed values.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::{ProviderData, Value};
    ///
    /// let data = ProviderData::table([[1, 2, 3], [4, 5, 9]]);
    /// assert_eq!(data.len(), Some(2));
    /// assert!(matches!(data, ProviderData::Table(rows) if rows[1][2] == Value::Int(9)));
    /// ```
    pub fn table<R, C, V>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Table(collect_rows(rows))
    }

    /// Rows of typed values as a nested sequence.
    pub fn nested<R, C, V>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Nested(collect_rows(rows))
    }

    /// One value per invocation.
    pub fn array<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Array(values.into_iter().map(Into::into).collect())
    }

    /// One delimited string per invocation.
    pub fn strings<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Strings(rows.into_iter().map(Into::into).collect())
    }

    /// A mixed sequence of rows and single arguments.
    pub fn sequence<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Number of rows, or `None` for [`ProviderData::Other`].
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Table(rows) | Self::Nested(rows) => Some(rows.len()),
            Self::Array(values) | Self::Sequence(values) => Some(values.len()),
            Self::Strings(rows) => Some(rows.len()),
            Self::Other(_) => None,
        }
    }

    /// Whether the data has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Short name of the data shape, for diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::Array(_) => "array",
            Self::Strings(_) => "strings",
            Self::Nested(_) => "nested",
            Self::Sequence(_) => "sequence",
            Self::Other(_) => "other",
        }
    }
}

fn collect_rows<R, C, V>(rows: R) -> Vec<Vec<Value>>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = V>,
    V: Into<Value>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

impl From<Vec<Vec<Value>>> for ProviderData {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::Table(rows)
    }
}

impl From<Vec<String>> for ProviderData {
    fn from(rows: Vec<String>) -> Self {
        Self::Strings(rows)
    }
}

impl From<Vec<&str>> for ProviderData {
    fn from(rows: Vec<&str>) -> Self {
        Self::strings(rows)
    }
}

/// Converts any [`ProviderData`] into argument rows.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataConverter;

impl DataConverter {
    /// Whether `data` has a convertible shape.
    #[must_use]
    pub const fn can_convert(data: &ProviderData) -> bool {
        !matches!(data, ProviderData::Other(_))
    }

    /// Convert every row of `data` for `method` with the strategies of
    /// `context`.
    ///
    /// # Errors
    /// Returns [`ConversionError`] for null or unsupported data, methods
    /// without parameters and the first row that fails to convert.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::{ConverterContext, DataConverter, ParamType, ProviderData, TestMethod, Value};
    ///
    /// let method = TestMethod::new("m", "t")
    ///     .param("word", ParamType::of::<String>())
    ///     .param("length", ParamType::of::<i32>());
    /// let data = ProviderData::strings(["a, 1", "bb, 2"]);
    /// let rows = DataConverter::convert(&data, &method, &ConverterContext::default()).ok();
    /// assert_eq!(rows.map(|rows| rows.len()), Some(2));
    /// ```
    pub fn convert(
        data: &ProviderData,
        method: &TestMethod,
        context: &ConverterContext,
    ) -> Result<Vec<ArgumentRow>, ConversionError> {
        if method.parameters().is_empty() {
            return Err(ConversionError::NoParameters {
                method: method.qualified_name(),
            });
        }
        match data {
            ProviderData::Table(rows) | ProviderData::Nested(rows) => rows
                .iter()
                .enumerate()
                .map(|(row, values)| context.object_array_converter().convert(values, method, row))
                .collect(),
            ProviderData::Array(values) => values
                .iter()
                .enumerate()
                .map(|(row, value)| context.single_arg_converter().convert(value, method, row))
                .collect(),
            ProviderData::Strings(rows) => rows
                .iter()
                .enumerate()
                .map(|(row, text)| context.string_converter().convert(text, method, row, context))
                .collect(),
            ProviderData::Sequence(values) => values
                .iter()
                .enumerate()
                .map(|(row, value)| match value {
                    Value::List(items) => {
                        context.object_array_converter().convert(items, method, row)
                    }
                    other => context.single_arg_converter().convert(other, method, row),
                })
                .collect(),
            ProviderData::Other(Value::Null) => Err(ConversionError::NullData),
            ProviderData::Other(other) => Err(ConversionError::UnsupportedData {
                data: other.to_string(),
            }),
        }
    }
}
