//! The built-in placeholders and argument rendering.

use std::sync::LazyLock;

use dataprovider_patterns::token;
use dataprovider_patterns::{EMPTY_STRING_MARKER, NULL_MARKER, Subscript, sanitize};

use crate::placeholder::{FormatError, Placeholder, ReplacementContext};
use crate::value::Value;

/// Placeholder for `%a[..]` and `%p[..]`.
pub const ARGUMENT: &str = "argument";
/// Placeholder for `%cc`.
pub const CANONICAL_CLASS_NAME: &str = "canonical class name";
/// Placeholder for `%cm`.
pub const COMPLETE_METHOD_SIGNATURE: &str = "complete method signature";
/// Placeholder for `%i`.
pub const INDEX: &str = "index";
/// Placeholder for `%na[..]`.
pub const NAMED_ARGUMENT: &str = "named argument";
/// Placeholder for `%c`.
pub const SIMPLE_CLASS_NAME: &str = "simple class name";
/// Placeholder for `%m`.
pub const SIMPLE_METHOD_NAME: &str = "simple method name";

static BUILTIN: LazyLock<Vec<Placeholder>> = LazyLock::new(|| {
    build_builtin()
        .unwrap_or_else(|err| unreachable!("built-in placeholders should compile: {err}"))
});

/// The built-in placeholders in their default order.
///
/// Longer tokens precede the shorter tokens they start with, so `%cc` and
/// `%cm` are tried before `%c`.
#[must_use]
pub fn builtin_placeholders() -> Vec<Placeholder> {
    BUILTIN.clone()
}

fn build_builtin() -> Result<Vec<Placeholder>, dataprovider_patterns::PatternError> {
    Ok(vec![
        Placeholder::new(ARGUMENT, token::ARGUMENT, resolve_arguments)?,
        Placeholder::new(CANONICAL_CLASS_NAME, token::CANONICAL_CLASS_NAME, |_, context| {
            Ok(context.method().canonical_class_name().to_owned())
        })?,
        Placeholder::new(COMPLETE_METHOD_SIGNATURE, token::COMPLETE_METHOD_SIGNATURE, |_, context| {
            Ok(context.method().signature())
        })?,
        Placeholder::new(INDEX, token::INDEX, |_, context| Ok(context.index().to_string()))?,
        Placeholder::new(NAMED_ARGUMENT, token::NAMED_ARGUMENT, resolve_named_arguments)?,
        Placeholder::new(SIMPLE_CLASS_NAME, token::SIMPLE_CLASS_NAME, |_, context| {
            Ok(context.method().class_name().to_owned())
        })?,
        Placeholder::new(SIMPLE_METHOD_NAME, token::SIMPLE_METHOD_NAME, |_, context| {
            Ok(context.method().name().to_owned())
        })?,
    ])
}

fn subscripted<'a>(
    matched: &str,
    arguments: &'a [Value],
) -> Result<(usize, &'a [Value]), FormatError> {
    let subscript = Subscript::from_token(matched).map_err(|source| FormatError::Pattern {
        token: matched.to_owned(),
        source,
    })?;
    let range = subscript
        .resolve(arguments.len())
        .map_err(|source| FormatError::Subscript {
            token: matched.to_owned(),
            source,
        })?;
    let start = range.start;
    Ok((start, arguments.get(range).unwrap_or_default()))
}

fn resolve_arguments(matched: &str, context: &ReplacementContext<'_>) -> Result<String, FormatError> {
    let (_, selected) = subscripted(matched, context.arguments())?;
    Ok(format_arguments(selected))
}

fn resolve_named_arguments(
    matched: &str,
    context: &ReplacementContext<'_>,
) -> Result<String, FormatError> {
    let method = context.method();
    if !method.has_parameter_names() {
        log::warn!(
            "parameter names of `{}` are not available; `%na` renders `?` for unnamed parameters",
            method.qualified_name()
        );
    }
    let (start, selected) = subscripted(matched, context.arguments())?;
    let parameters = method.parameters();
    let named = selected
        .iter()
        .enumerate()
        .map(|(offset, value)| {
            let name = parameters
                .get(start + offset)
                .and_then(|parameter| parameter.name())
                .unwrap_or("?");
            format!("{name}={}", format_argument(value))
        })
        .collect::<Vec<_>>();
    Ok(named.join(", "))
}

/// Render arguments separated by `, `.
#[must_use]
pub fn format_arguments(values: &[Value]) -> String {
    values
        .iter()
        .map(format_argument)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render one argument for a test name.
///
/// Null and the empty string become visible markers, arrays render their
/// elements recursively in brackets, and every other value uses its display
/// form with line breaks escaped and non-printable characters masked.
///
/// # Examples
/// ```
/// use dataprovider::{ParamType, Value, format_argument};
///
/// assert_eq!(format_argument(&Value::Null), "<null>");
/// assert_eq!(format_argument(&Value::from("")), "<empty string>");
/// assert_eq!(format_argument(&Value::from("a\nb")), "a\\nb");
/// let words = Value::array(ParamType::String, [Value::from("x"), Value::Null]);
/// assert_eq!(format_argument(&words), "[x, <null>]");
/// ```
#[must_use]
pub fn format_argument(value: &Value) -> String {
    match value {
        Value::Null => NULL_MARKER.to_owned(),
        Value::Str(text) if text.is_empty() => EMPTY_STRING_MARKER.to_owned(),
        Value::Array(array) => format!("[{}]", format_arguments(array.elements())),
        Value::Object(object) => object
            .render()
            .map_or_else(|| NULL_MARKER.to_owned(), |text| sanitize(&text)),
        other => sanitize(&other.to_string()),
    }
}
