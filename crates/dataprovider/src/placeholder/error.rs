//! Errors raised while building test names.

use dataprovider_patterns::{PatternError, SubscriptError};
use thiserror::Error;

/// Raised when a template cannot be resolved against an invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// A subscript addresses arguments the row does not have.
    #[error("placeholder `{token}` does not fit the arguments of this invocation")]
    Subscript {
        /// The placeholder text as written in the template.
        token: String,
        /// Resolution failure.
        #[source]
        source: SubscriptError,
    },
    /// A placeholder's subscript or pattern is malformed.
    #[error("placeholder `{token}` is malformed")]
    Pattern {
        /// The placeholder text as written in the template.
        token: String,
        /// Parse failure.
        #[source]
        source: PatternError,
    },
    /// A custom placeholder failed.
    #[error("{message}")]
    Other {
        /// Description of the failure.
        message: String,
    },
}

impl FormatError {
    /// Failure reported by a custom placeholder resolver.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
