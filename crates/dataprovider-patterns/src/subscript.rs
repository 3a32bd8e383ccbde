//! Argument subscript parsing and resolution.
//!
//! Subscripts address the arguments of a row from a name template, either as
//! a single index (`[1]`, `[-1]`) or as a range (`[0..2]`, `[1..-1]`).

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::errors::{PatternError, SubscriptError, subscript_error};

/// A parsed argument subscript.
///
/// Negative values count from the end of the argument list. A single index
/// selects exactly one argument, so `-1` is the last one. In a range the
/// start is inclusive; a non-negative end is inclusive as well while a
/// negative end is exclusive, which makes `0..-1` select every argument but
/// the last.
///
/// # Examples
/// ```
/// use dataprovider_patterns::Subscript;
///
/// let all_but_last = Subscript::parse("0..-1").expect("valid subscript");
/// assert_eq!(all_but_last.resolve(4).expect("in bounds"), 0..3);
///
/// let explicit = Subscript::parse("0..2").expect("valid subscript");
/// assert_eq!(explicit.resolve(4).expect("in bounds"), 0..3);
///
/// let last = Subscript::parse("-1").expect("valid subscript");
/// assert_eq!(last.resolve(4).expect("in bounds"), 3..4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscript {
    /// A single argument index.
    Index(i64),
    /// A range of arguments.
    Range {
        /// Start of the range.
        from: i64,
        /// End of the range.
        to: i64,
    },
}

fn parse_integer(bytes: &[u8], start: usize, text: &str) -> Result<(usize, i64), PatternError> {
    let mut index = start;
    let negative = matches!(bytes.get(index), Some(b'-'));
    if negative {
        index += 1;
    }
    let digits_start = index;
    let mut value = 0i64;
    while let Some(&b) = bytes.get(index) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
            .ok_or_else(|| subscript_error("index does not fit into 64 bits", digits_start, text))?;
        index += 1;
    }
    if index == digits_start {
        return Err(subscript_error("expected digit", index, text));
    }
    Ok((index, if negative { -value } else { value }))
}

impl Subscript {
    /// Parse the text between the brackets of a subscript.
    ///
    /// # Errors
    /// Returns [`PatternError::Subscript`] when the text is not an integer or
    /// an `a..b` integer range.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let bytes = text.as_bytes();
        let (next, from) = parse_integer(bytes, 0, text)?;
        if next == bytes.len() {
            return Ok(Self::Index(from));
        }
        if bytes.get(next..next + 2) != Some(b"..".as_slice()) {
            return Err(subscript_error(
                "expected `..` or end of subscript",
                next,
                text,
            ));
        }
        let (end, to) = parse_integer(bytes, next + 2, text)?;
        if end != bytes.len() {
            return Err(subscript_error("unexpected trailing characters", end, text));
        }
        Ok(Self::Range { from, to })
    }

    /// Parse the subscript carried by a whole placeholder token such as
    /// `%p[0..-1]`.
    ///
    /// # Errors
    /// Returns [`PatternError::Subscript`] when the token has no bracketed
    /// subscript or the subscript itself is malformed.
    ///
    /// # Examples
    /// ```
    /// use dataprovider_patterns::Subscript;
    ///
    /// let subscript = Subscript::from_token("%na[2]").expect("valid token");
    /// assert_eq!(subscript, Subscript::Index(2));
    /// ```
    pub fn from_token(token: &str) -> Result<Self, PatternError> {
        let inner = token
            .find('[')
            .filter(|_| token.ends_with(']'))
            .and_then(|open| token.get(open + 1..token.len() - 1))
            .ok_or_else(|| subscript_error("missing bracketed subscript", 0, token))?;
        Self::parse(inner)
    }

    /// Resolve the subscript against an argument list of `len` elements.
    ///
    /// # Errors
    /// Returns [`SubscriptError`] when the resolved range does not lie within
    /// the argument list or is reversed.
    pub fn resolve(self, len: usize) -> Result<Range<usize>, SubscriptError> {
        let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
        let normalise = |value: i64| {
            if value >= 0 {
                value
            } else {
                signed_len.saturating_add(value)
            }
        };
        let (from, to) = match self {
            Self::Index(index) => {
                let from = normalise(index);
                (from, from.saturating_add(1))
            }
            Self::Range { from, to } => {
                let end = if to >= 0 {
                    to.saturating_add(1)
                } else {
                    signed_len.saturating_add(to)
                };
                (normalise(from), end)
            }
        };
        let out_of_bounds = || SubscriptError::OutOfBounds {
            subscript: self.to_string(),
            len,
            from,
            to,
        };
        let start = usize::try_from(from).map_err(|_| out_of_bounds())?;
        let end = usize::try_from(to).map_err(|_| out_of_bounds())?;
        if start > len || end > len {
            return Err(out_of_bounds());
        }
        if start > end {
            return Err(SubscriptError::Reversed {
                subscript: self.to_string(),
                from: start,
                to: end,
            });
        }
        Ok(start..end)
    }
}

impl FromStr for Subscript {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Range { from, to } => write!(f, "[{from}..{to}]"),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests exercise subscript parser fallibility"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Subscript::Index(0))]
    #[case("-1", Subscript::Index(-1))]
    #[case("12", Subscript::Index(12))]
    #[case("0..-1", Subscript::Range { from: 0, to: -1 })]
    #[case("-3..-2", Subscript::Range { from: -3, to: -2 })]
    #[case("1..4", Subscript::Range { from: 1, to: 4 })]
    fn parses_valid_subscripts(#[case] text: &str, #[case] expected: Subscript) {
        assert_eq!(Subscript::parse(text).unwrap(), expected);
    }

    #[rstest]
    #[case("", "expected digit")]
    #[case("-", "expected digit")]
    #[case("1.", "expected `..` or end of subscript")]
    #[case("1..", "expected digit")]
    #[case("1..2x", "unexpected trailing characters")]
    #[case("a", "expected digit")]
    #[case("99999999999999999999", "index does not fit into 64 bits")]
    fn rejects_malformed_subscripts(#[case] text: &str, #[case] message: &str) {
        let err = Subscript::parse(text).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error for {text:?}: {err}"
        );
    }

    #[test]
    fn extracts_subscript_from_token() {
        assert_eq!(
            Subscript::from_token("%p[0..-1]").unwrap(),
            Subscript::Range { from: 0, to: -1 }
        );
        assert!(Subscript::from_token("%p").is_err());
    }

    #[rstest]
    #[case(Subscript::Index(0), 3, 0..1)]
    #[case(Subscript::Index(-1), 3, 2..3)]
    #[case(Subscript::Range { from: 0, to: -1 }, 3, 0..2)]
    #[case(Subscript::Range { from: 0, to: 2 }, 3, 0..3)]
    #[case(Subscript::Range { from: -2, to: -1 }, 3, 1..2)]
    #[case(Subscript::Range { from: 1, to: 1 }, 3, 1..2)]
    #[case(Subscript::Range { from: 0, to: -1 }, 1, 0..0)]
    fn resolves_against_length(
        #[case] subscript: Subscript,
        #[case] len: usize,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(subscript.resolve(len).unwrap(), expected);
    }

    #[test]
    fn negative_and_positive_endpoints_agree() {
        let negative = Subscript::Range { from: 0, to: -1 }.resolve(4).unwrap();
        let positive = Subscript::Range { from: 0, to: 2 }.resolve(4).unwrap();
        assert_eq!(negative, positive);
    }

    #[rstest]
    #[case(Subscript::Index(3), 3)]
    #[case(Subscript::Index(-4), 3)]
    #[case(Subscript::Range { from: 0, to: 3 }, 3)]
    #[case(Subscript::Range { from: -5, to: 1 }, 3)]
    fn out_of_range_subscripts_are_not_clamped(#[case] subscript: Subscript, #[case] len: usize) {
        let err = subscript.resolve(len).unwrap_err();
        assert!(matches!(err, SubscriptError::OutOfBounds { .. }), "{err}");
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        let err = Subscript::Range { from: 2, to: 0 }.resolve(3).unwrap_err();
        assert_eq!(
            err,
            SubscriptError::Reversed {
                subscript: "[2..0]".into(),
                from: 2,
                to: 1,
            }
        );
    }
}
