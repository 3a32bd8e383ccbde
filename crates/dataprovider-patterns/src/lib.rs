//! Shared placeholder parsing utilities for dataprovider.
//!
//! The crate exposes the token grammar used by test-name templates, the
//! argument subscript parser and the text sanitising helpers reused by the
//! runtime formatter, so the grammar lives in one place and can be tested
//! without any knowledge of argument values.

mod errors;
mod sanitize;
mod subscript;
pub mod token;

pub use errors::{PatternError, SubscriptError, SubscriptErrorInfo};
pub use sanitize::{
    EMPTY_STRING_MARKER, NON_PRINTABLE_MARKER, NULL_MARKER, escape_line_breaks,
    replace_non_printable, sanitize,
};
pub use subscript::Subscript;
