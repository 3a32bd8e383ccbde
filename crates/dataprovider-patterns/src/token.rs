//! Regex sources for the built-in test-name placeholders.
//!
//! Every placeholder is recognised by a regular expression. The runtime
//! compiles each source twice: unanchored to replace every occurrence within
//! a template, and anchored to test whether a template position starts a
//! token.

use regex::Regex;

use crate::errors::PatternError;

/// Subscript grammar shared by the argument placeholders.
pub const SUBSCRIPT: &str = r"\[(-?[0-9]+|-?[0-9]+\.\.-?[0-9]+)\]";

/// `%p[..]` or `%a[..]`: the comma separated values of a subscript.
pub const ARGUMENT: &str = r"%[ap]\[(-?[0-9]+|-?[0-9]+\.\.-?[0-9]+)\]";

/// `%na[..]`: like [`ARGUMENT`] but each value is prefixed by its parameter
/// name.
pub const NAMED_ARGUMENT: &str = r"%na\[(-?[0-9]+|-?[0-9]+\.\.-?[0-9]+)\]";

/// `%cc`: fully qualified name of the owning test module.
pub const CANONICAL_CLASS_NAME: &str = "%cc";

/// `%cm`: complete signature of the test method.
pub const COMPLETE_METHOD_SIGNATURE: &str = "%cm";

/// `%i`: zero-based index of the row within the dataset.
pub const INDEX: &str = "%i";

/// `%c`: last path segment of the owning test module.
pub const SIMPLE_CLASS_NAME: &str = "%c";

/// `%m`: bare test method name.
pub const SIMPLE_METHOD_NAME: &str = "%m";

/// Compile a token source for whole-template replacement.
///
/// # Errors
/// Returns [`PatternError::Regex`] when `source` is not a valid regex.
///
/// # Examples
/// ```
/// use dataprovider_patterns::token::{self, compile_token};
///
/// let regex = compile_token(token::ARGUMENT).expect("built-in token compiles");
/// assert_eq!(regex.find_iter("%p[0] and %a[-1..-1]").count(), 2);
/// ```
pub fn compile_token(source: &str) -> Result<Regex, PatternError> {
    Ok(Regex::new(source)?)
}

/// Compile a token source so that it only matches at the start of the
/// haystack.
///
/// # Errors
/// Returns [`PatternError::Regex`] when `source` is not a valid regex.
///
/// # Examples
/// ```
/// use dataprovider_patterns::token::{self, compile_anchored};
///
/// let regex = compile_anchored(token::INDEX).expect("built-in token compiles");
/// assert!(regex.is_match("%i]"));
/// assert!(!regex.is_match("x%i"));
/// ```
pub fn compile_anchored(source: &str) -> Result<Regex, PatternError> {
    Ok(Regex::new(&format!(r"\A(?:{source})"))?)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "built-in token sources must compile")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ARGUMENT, "%p[0]", true)]
    #[case(ARGUMENT, "%a[-2..3]", true)]
    #[case(ARGUMENT, "%p[]", false)]
    #[case(ARGUMENT, "%p[1..]", false)]
    #[case(ARGUMENT, "%x[1]", false)]
    #[case(NAMED_ARGUMENT, "%na[0..-1]", true)]
    #[case(NAMED_ARGUMENT, "%n[0]", false)]
    #[case(CANONICAL_CLASS_NAME, "%cc", true)]
    #[case(COMPLETE_METHOD_SIGNATURE, "%cm", true)]
    #[case(INDEX, "%i", true)]
    #[case(SIMPLE_CLASS_NAME, "%c", true)]
    #[case(SIMPLE_METHOD_NAME, "%m", true)]
    fn anchored_tokens_match_whole_placeholders(
        #[case] source: &str,
        #[case] text: &str,
        #[case] expected: bool,
    ) {
        let regex = compile_anchored(source).unwrap();
        let matched = regex
            .find(text)
            .is_some_and(|m| m.end() == text.len());
        assert_eq!(matched, expected, "{source} against {text}");
    }

    #[test]
    fn argument_source_embeds_subscript_grammar() {
        assert!(ARGUMENT.ends_with(SUBSCRIPT));
        assert!(NAMED_ARGUMENT.ends_with(SUBSCRIPT));
    }

    #[test]
    fn invalid_custom_source_is_reported() {
        assert!(matches!(
            compile_token("%q[("),
            Err(PatternError::Regex(_))
        ));
    }

    #[test]
    fn simple_class_prefix_also_matches_canonical_token() {
        // Registration order decides which placeholder claims `%cc`.
        let simple = compile_anchored(SIMPLE_CLASS_NAME).unwrap();
        assert!(simple.is_match("%cc"));
    }
}
