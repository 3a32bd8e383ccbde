//! Test name templates.
//!
//! A template such as `%m[%i: %p[0..-1]]` is resolved per invocation by a
//! [`PlaceholderFormatter`]. Built-in tokens:
//!
//! | token | resolves to |
//! |---|---|
//! | `%a[..]`, `%p[..]` | arguments selected by index or range |
//! | `%cc` | module path of the test |
//! | `%cm` | complete method signature |
//! | `%i` | zero-based row index |
//! | `%na[..]` | selected arguments as `name=value` |
//! | `%c` | last module path segment |
//! | `%m` | method name |

mod builtin;
mod context;
mod error;
mod formatter;
mod rule;

pub use builtin::{
    ARGUMENT, CANONICAL_CLASS_NAME, COMPLETE_METHOD_SIGNATURE, INDEX, NAMED_ARGUMENT,
    SIMPLE_CLASS_NAME, SIMPLE_METHOD_NAME, builtin_placeholders, format_argument,
    format_arguments,
};
pub use context::ReplacementContext;
pub use error::FormatError;
pub use formatter::{PlaceholderFormatter, TestNameFormatter};
pub use rule::Placeholder;
