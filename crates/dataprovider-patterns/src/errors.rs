//! Error types shared by the token and subscript parsing modules.

use std::fmt;
use thiserror::Error;

/// Additional context for subscript parsing errors.
///
/// # Examples
/// ```
/// use dataprovider_patterns::SubscriptErrorInfo;
/// let info = SubscriptErrorInfo::new("expected digit", 3, "0..x");
/// assert_eq!(info.subscript, "0..x");
/// assert_eq!(info.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptErrorInfo {
    /// Human readable description of the failure.
    pub message: &'static str,
    /// Byte offset within the subscript text.
    pub position: usize,
    /// The subscript text without its brackets.
    pub subscript: String,
}

impl SubscriptErrorInfo {
    /// Create a new error description for a subscript failure.
    ///
    /// # Examples
    /// ```
    /// use dataprovider_patterns::SubscriptErrorInfo;
    /// let info = SubscriptErrorInfo::new("invalid", 1, "1.");
    /// assert_eq!(info.message, "invalid");
    /// ```
    #[must_use]
    pub fn new(message: &'static str, position: usize, subscript: impl Into<String>) -> Self {
        Self {
            message,
            position,
            subscript: subscript.into(),
        }
    }
}

impl fmt::Display for SubscriptErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in subscript `[{}]` at byte {} (zero-based)",
            self.message, self.subscript, self.position
        )
    }
}

/// Errors surfaced while parsing subscripts or compiling placeholder tokens.
///
/// # Examples
/// ```
/// use dataprovider_patterns::{PatternError, SubscriptErrorInfo};
/// let info = SubscriptErrorInfo::new("invalid", 2, "1..");
/// let err = PatternError::Subscript(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The subscript text is not an index or range.
    #[error("{0}")]
    Subscript(SubscriptErrorInfo),
    /// A token regex failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn subscript_error(
    message: &'static str,
    position: usize,
    subscript: &str,
) -> PatternError {
    PatternError::Subscript(SubscriptErrorInfo::new(message, position, subscript))
}

/// Raised when a well-formed subscript does not fit the argument list it is
/// applied to.
///
/// Subscripts are never clamped: a template that addresses arguments the row
/// does not have is an authoring mistake and must surface as such.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptError {
    /// The resolved bounds fall outside `0..=len`.
    #[error("subscript `{subscript}` is out of bounds for {len} argument(s) (resolved to {from}..{to})")]
    OutOfBounds {
        /// Display form of the offending subscript.
        subscript: String,
        /// Number of arguments the subscript was applied to.
        len: usize,
        /// Resolved inclusive start.
        from: i64,
        /// Resolved exclusive end.
        to: i64,
    },
    /// The resolved start lies after the resolved end.
    #[error("subscript `{subscript}` resolves to a reversed range {from}..{to}")]
    Reversed {
        /// Display form of the offending subscript.
        subscript: String,
        /// Resolved inclusive start.
        from: usize,
        /// Resolved exclusive end.
        to: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_subscript_error_info() {
        let info = SubscriptErrorInfo::new("expected digit", 4, "1..x");
        assert_eq!(
            info.to_string(),
            "expected digit in subscript `[1..x]` at byte 4 (zero-based)"
        );
    }

    #[test]
    fn forwards_regex_error_display() {
        let err = PatternError::Regex(regex::Error::Syntax("bad".into()));
        assert_eq!(
            err.to_string(),
            regex::Error::Syntax("bad".into()).to_string()
        );
    }

    #[test]
    fn out_of_bounds_names_the_subscript() {
        let err = SubscriptError::OutOfBounds {
            subscript: "[5]".into(),
            len: 2,
            from: 5,
            to: 6,
        };
        assert_eq!(
            err.to_string(),
            "subscript `[5]` is out of bounds for 2 argument(s) (resolved to 5..6)"
        );
    }
}
