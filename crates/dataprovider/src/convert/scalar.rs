//! Conversion of a single text token into a typed value.

use std::str::FromStr;

use crate::context::ConverterContext;
use crate::convert::ConversionError;
use crate::registry::resolve_type;
use crate::types::{ParamType, PrimitiveKind};
use crate::value::Value;

const CASE_HINT: &str = " Please be aware of case sensitivity or use `ignore_enum_case`.";

/// Convert `token` to `target` without consulting a custom hook.
///
/// Strings pass through, primitives and their wrappers are parsed, enum
/// constants are looked up by name, `Type` arguments go through the type
/// registry and constructed types call their string constructor.
///
/// # Errors
/// Returns [`ConversionError`] when the token does not parse or the target
/// cannot be built from text.
///
/// # Examples
/// ```
/// use dataprovider::{ConverterContext, ParamType, Value, convert_builtin};
///
/// let context = ConverterContext::default();
/// assert_eq!(convert_builtin("42l", &ParamType::of::<i64>(), &context).ok(), Some(Value::Long(42)));
/// assert_eq!(convert_builtin("e", &ParamType::of::<char>(), &context).ok(), Some(Value::Char('e')));
/// assert!(convert_builtin("ab", &ParamType::of::<char>(), &context).is_err());
/// ```
pub fn convert_builtin(
    token: &str,
    target: &ParamType,
    context: &ConverterContext,
) -> Result<Value, ConversionError> {
    match target {
        ParamType::String | ParamType::Any => Ok(Value::Str(token.to_owned())),
        ParamType::Primitive(kind) | ParamType::Boxed(kind) => parse_primitive(token, *kind),
        ParamType::Enum(enum_type) => enum_type
            .lookup(token, context.ignore_enum_case())
            .map(Value::Enum)
            .ok_or_else(|| ConversionError::UnknownEnumConstant {
                token: token.to_owned(),
                enum_name: enum_type.name().to_owned(),
                hint: if context.ignore_enum_case() { "" } else { CASE_HINT },
            }),
        ParamType::Type => resolve_type(token)
            .map(Value::Type)
            .map_err(|source| ConversionError::UnknownType {
                token: token.to_owned(),
                source,
            }),
        ParamType::Constructed(constructor) => constructor
            .construct(token)
            .map(Value::Object)
            .map_err(|message| ConversionError::Construction {
                constructor: constructor.name().to_owned(),
                token: token.to_owned(),
                message,
            }),
        ParamType::Object(_) | ParamType::List | ParamType::Array(_) => {
            Err(ConversionError::UnsupportedTarget {
                target: target.to_string(),
            })
        }
    }
}

fn parse<T>(token: &str, kind: PrimitiveKind) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    token
        .parse::<T>()
        .map_err(|err| ConversionError::parse(token, kind, err))
}

/// Floats accept an optional `f` or `d` type suffix, tried only when the
/// bare token does not parse.
fn parse_float<T>(token: &str, kind: PrimitiveKind) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse(token, kind).or_else(|err| {
        token
            .strip_suffix(['f', 'F', 'd', 'D'])
            .and_then(|bare| bare.parse::<T>().ok())
            .ok_or(err)
    })
}

pub(crate) fn parse_primitive(token: &str, kind: PrimitiveKind) -> Result<Value, ConversionError> {
    match kind {
        PrimitiveKind::Boolean => parse(token, kind).map(Value::Bool),
        PrimitiveKind::Byte => parse(token, kind).map(Value::Byte),
        PrimitiveKind::Char => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(only), None) => Ok(Value::Char(only)),
                _ => Err(ConversionError::InvalidChar {
                    token: token.to_owned(),
                    target: kind.to_string(),
                }),
            }
        }
        PrimitiveKind::Short => parse(token, kind).map(Value::Short),
        PrimitiveKind::Int => parse(token, kind).map(Value::Int),
        PrimitiveKind::Long => {
            let digits = token.strip_suffix('l').unwrap_or(token);
            parse(digits, kind).map(Value::Long)
        }
        PrimitiveKind::Float => parse_float(token, kind).map(Value::Float),
        PrimitiveKind::Double => parse_float(token, kind).map(Value::Double),
    }
}
