//! Text sanitising applied to rendered argument values.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Rendered in place of a null argument.
pub const NULL_MARKER: &str = "<null>";

/// Rendered in place of an empty string argument.
pub const EMPTY_STRING_MARKER: &str = "<empty string>";

/// Replaces every non-printable character in a rendered argument.
pub const NON_PRINTABLE_MARKER: &str = "<np>";

// Surrogates (`Cs`) cannot occur in a `str`, so they need no class here.
static NON_PRINTABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Cc}\p{Cf}\p{Co}\p{Cn}]")
        .unwrap_or_else(|_| unreachable!("non-printable character class should compile"))
});

/// Rewrite NUL, carriage return and line feed as their two-character escape
/// sequences.
///
/// # Examples
/// ```
/// use dataprovider_patterns::escape_line_breaks;
///
/// assert_eq!(escape_line_breaks("a\r\nb\0"), "a\\r\\nb\\0");
/// ```
#[must_use]
pub fn escape_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(['\0', '\r', '\n']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        match ch {
            '\0' => escaped.push_str("\\0"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Replace every control, format, private-use or unassigned character with
/// `replacement`.
///
/// The replacement is inserted literally; `$` has no special meaning.
///
/// # Examples
/// ```
/// use dataprovider_patterns::replace_non_printable;
///
/// assert_eq!(replace_non_printable("a\u{7}b", "$1"), "a$1b");
/// ```
#[must_use]
pub fn replace_non_printable<'a>(text: &'a str, replacement: &str) -> Cow<'a, str> {
    NON_PRINTABLE.replace_all(text, NoExpand(replacement))
}

/// Escape line breaks and then mask remaining non-printable characters with
/// [`NON_PRINTABLE_MARKER`].
///
/// # Examples
/// ```
/// use dataprovider_patterns::sanitize;
///
/// assert_eq!(sanitize("x\ny\u{1b}"), "x\\ny<np>");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    let escaped = escape_line_breaks(text);
    replace_non_printable(&escaped, NON_PRINTABLE_MARKER).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("tab\there", "tab<np>here")]
    #[case("bell\u{7}", "bell<np>")]
    #[case("soft\u{ad}hyphen", "soft<np>hyphen")]
    #[case("private\u{e000}", "private<np>")]
    #[case("unassigned\u{378}", "unassigned<np>")]
    #[case("line\nbreak", "line\\nbreak")]
    #[case("nul\0", "nul\\0")]
    #[case("crlf\r\n", "crlf\\r\\n")]
    #[case("umlaut äöü", "umlaut äöü")]
    fn sanitises_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn escape_borrows_when_nothing_changes() {
        assert!(matches!(escape_line_breaks("calm"), Cow::Borrowed("calm")));
    }

    #[test]
    fn escapes_before_masking() {
        // A masked line feed would lose the information that it was one.
        assert_eq!(sanitize("\n"), "\\n");
    }
}
