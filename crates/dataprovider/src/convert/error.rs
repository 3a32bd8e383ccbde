//! Error types surfaced by the conversion pipeline.

use std::error::Error as StdError;

use thiserror::Error;

use crate::method::SignatureError;
use crate::registry::TypeLookupError;

/// Errors raised while turning provider data into argument rows.
///
/// A single failing row aborts the whole expansion, so every variant carries
/// enough context to find the offending literal without a debugger.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// The provider returned null instead of data.
    #[error("cannot convert provider data because it was null")]
    NullData,
    /// The provider returned a value of an unrecognised shape.
    #[error(
        "cannot convert provider data to a table, an array, strings or a sequence because data was: {data}"
    )]
    UnsupportedData {
        /// Display form of the value.
        data: String,
    },
    /// The test method declares no parameters.
    #[error("test method `{method}` must declare at least one parameter to receive provider data")]
    NoParameters {
        /// Qualified method name.
        method: String,
    },
    /// A single-argument row was supplied for a variadic method.
    #[error("single argument data does not support variadic test method `{method}`")]
    VariadicSingleArgument {
        /// Qualified method name.
        method: String,
    },
    /// A non-variadic row has the wrong number of arguments.
    #[error("test method has {expected} parameters but got {actual} arguments in row {row}")]
    Arity {
        /// Zero-based row index.
        row: usize,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments in the row.
        actual: usize,
    },
    /// A variadic row has too few arguments for the fixed parameters.
    #[error("variadic test method has {expected} parameters but got only {actual} arguments in row {row}")]
    VariadicArity {
        /// Zero-based row index.
        row: usize,
        /// Number of declared parameters, including the variadic one.
        expected: usize,
        /// Number of arguments in the row.
        actual: usize,
    },
    /// An argument does not match its declared parameter type.
    #[error(
        "parameter number {parameter} is of type `{expected}` but argument given is `{value}` of type `{actual}`"
    )]
    ArgumentType {
        /// Zero-based parameter position.
        parameter: usize,
        /// Declared parameter type.
        expected: String,
        /// Display form of the argument.
        value: String,
        /// Runtime type of the argument.
        actual: String,
    },
    /// `null` was given for a non-nullable parameter.
    #[error("parameter number {parameter} is of non-nullable type `{expected}` but argument given is null")]
    NullPrimitive {
        /// Zero-based parameter position.
        parameter: usize,
        /// Declared parameter type.
        expected: String,
    },
    /// A token does not parse as the target primitive.
    #[error("cannot convert `{token}` to type `{target}`")]
    Parse {
        /// The offending token.
        token: String,
        /// Target type name.
        target: String,
        /// Underlying parse failure.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// A `char` token is not exactly one character long.
    #[error("`{token}` cannot be converted to type `{target}`: expected exactly one character")]
    InvalidChar {
        /// The offending token.
        token: String,
        /// Target type name.
        target: String,
    },
    /// A token does not name a constant of the target enum.
    #[error("`{token}` is not a valid value of enum `{enum_name}`{hint}")]
    UnknownEnumConstant {
        /// The offending token.
        token: String,
        /// Target enum name.
        enum_name: String,
        /// Suggestion appended when matching was case sensitive.
        hint: &'static str,
    },
    /// A token does not name a known type.
    #[error("unable to resolve `Type` for `{token}`")]
    UnknownType {
        /// The offending token.
        token: String,
        /// Underlying lookup failure.
        #[source]
        source: TypeLookupError,
    },
    /// A string constructor rejected the token.
    #[error("tried to construct `{constructor}` for argument `{token}`; error was: {message}")]
    Construction {
        /// Name of the constructed type.
        constructor: String,
        /// The offending token.
        token: String,
        /// Constructor failure message.
        message: String,
    },
    /// The target type cannot be produced from text.
    #[error(
        "type `{target}` is not supported as parameter type of test methods; supported types are primitives and their `Option` wrappers, enums, `String`, `Type` and types constructible from a single string"
    )]
    UnsupportedTarget {
        /// Target type name.
        target: String,
    },
    /// A custom value conversion failed.
    #[error("custom conversion of `{token}` to type `{target}` failed")]
    Custom {
        /// The offending token.
        token: String,
        /// Target type name.
        target: String,
        /// Failure reported by the custom converter.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// The test method declaration is inconsistent.
    #[error(transparent)]
    Signature(#[from] SignatureError),
    /// Wraps a failure with the position it occurred at.
    #[error("row {row}, parameter {parameter}: {source}")]
    InRow {
        /// Zero-based row index.
        row: usize,
        /// Zero-based parameter position.
        parameter: usize,
        /// The underlying failure.
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Wrap a custom conversion failure.
    pub fn custom<E>(token: impl Into<String>, target: impl Into<String>, err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Custom {
            token: token.into(),
            target: target.into(),
            source: err.into(),
        }
    }

    pub(crate) fn parse<E>(token: &str, target: impl ToString, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Parse {
            token: token.to_owned(),
            target: target.to_string(),
            source: Box::new(err),
        }
    }

    pub(crate) fn in_row(self, row: usize, parameter: usize) -> Self {
        match self {
            already @ Self::InRow { .. } => already,
            other => Self::InRow {
                row,
                parameter,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping positional wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::InRow { source, .. } => source.root(),
            other => other,
        }
    }
}
