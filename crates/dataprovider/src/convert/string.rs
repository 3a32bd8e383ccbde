//! Conversion of delimited string rows.

use crate::context::ConverterContext;
use crate::convert::ConversionError;
use crate::convert::check::{check_argument, coerce_element};
use crate::convert::row::{ArgumentRow, check_arity, parameter_types, variadic_component};
use crate::convert::scalar::convert_builtin;
use crate::method::TestMethod;
use crate::types::ParamType;
use crate::value::{ArrayValue, Value};

/// Turns a delimited string row into typed arguments.
///
/// Implementors usually override only
/// [`custom_convert_value`](Self::custom_convert_value) to teach the
/// converter about additional target types; the provided
/// [`convert`](Self::convert) handles splitting, null markers, trimming and
/// variadic packing.
///
/// # Examples
/// ```
/// use dataprovider::{
///     ConversionError, ConverterContext, ParamType, StringConversion, TestMethod, Value,
/// };
///
/// struct Percent;
///
/// impl StringConversion for Percent {
///     fn custom_convert_value(
///         &self,
///         token: &str,
///         target: &ParamType,
///         _context: &ConverterContext,
///     ) -> Result<Option<Value>, ConversionError> {
///         let Some(digits) = token.strip_suffix('%') else {
///             return Ok(None);
///         };
///         if target != &ParamType::of::<f64>() {
///             return Ok(None);
///         }
///         digits
///             .parse::<f64>()
///             .map(|percent| Some(Value::Double(percent / 100.0)))
///             .map_err(|err| ConversionError::custom(token, target.to_string(), err))
///     }
/// }
///
/// let method = TestMethod::new("m", "t").param("ratio", ParamType::of::<f64>());
/// let row = Percent.convert("50%", &method, 0, &ConverterContext::default()).ok();
/// assert_eq!(row.map(|row| row.into_values()), Some(vec![Value::Double(0.5)]));
/// ```
pub trait StringConversion: Send + Sync {
    /// Convert string row number `row` for `method`.
    ///
    /// # Errors
    /// Returns [`ConversionError`] on arity mismatches and on tokens that do
    /// not convert to their parameter type.
    fn convert(
        &self,
        data: &str,
        method: &TestMethod,
        row: usize,
        context: &ConverterContext,
    ) -> Result<ArgumentRow, ConversionError> {
        convert_string_row(self, data, method, row, context)
    }

    /// Hook consulted for every token after trimming and null handling.
    ///
    /// Return `Ok(Some(value))` to take over the conversion and `Ok(None)` to
    /// fall back to the built-in rules.
    ///
    /// # Errors
    /// Returns [`ConversionError`] when the hook recognises the target but
    /// the token is malformed.
    fn custom_convert_value(
        &self,
        token: &str,
        target: &ParamType,
        context: &ConverterContext,
    ) -> Result<Option<Value>, ConversionError> {
        let _ = (token, target, context);
        Ok(None)
    }
}

/// Default [`StringConversion`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StringConverter;

impl StringConversion for StringConverter {}

/// Split a string row on the context's delimiter.
///
/// Empty fields are kept, trailing ones included, so `"a,"` yields two
/// fields.
#[must_use]
pub fn split_row<'a>(data: &'a str, context: &ConverterContext) -> Vec<&'a str> {
    context.delimiter().split(data).collect()
}

/// Convert one token, applying trimming, the null marker and the custom hook
/// of `converter` before the built-in rules.
///
/// # Errors
/// Returns [`ConversionError`] when the token does not convert to `target`.
pub fn convert_token<S>(
    converter: &S,
    token: &str,
    target: &ParamType,
    context: &ConverterContext,
) -> Result<Value, ConversionError>
where
    S: StringConversion + ?Sized,
{
    let token = if context.trim_values() {
        token.trim()
    } else {
        token
    };
    if context.convert_nulls() && token == context.null_marker() {
        return Ok(Value::Null);
    }
    match converter.custom_convert_value(token, target, context)? {
        Some(value) => Ok(value),
        None => convert_builtin(token, target, context),
    }
}

/// Convert a string row for `method` with `converter`'s value hook.
///
/// A method with a single non-variadic parameter receives the whole row as
/// one token, delimiters included. A single variadic parameter receives an
/// empty array for an empty row.
///
/// # Errors
/// Returns [`ConversionError`] on arity mismatches and on tokens that do not
/// convert to their parameter type.
pub fn convert_string_row<S>(
    converter: &S,
    data: &str,
    method: &TestMethod,
    row: usize,
    context: &ConverterContext,
) -> Result<ArgumentRow, ConversionError>
where
    S: StringConversion + ?Sized,
{
    let parameters = parameter_types(method)?;
    let variadic = method.is_variadic();
    let component = variadic.then(|| variadic_component(&parameters)).flatten();

    if let [only] = parameters.as_slice() {
        match component {
            Some(component) if data.is_empty() => {
                let empty = Value::Array(ArrayValue::empty(component.clone()));
                return Ok(ArgumentRow::new(vec![empty]));
            }
            Some(_) => {}
            None => {
                let value = convert_checked(converter, data, only, context, 0)
                    .map_err(|err| err.in_row(row, 0))?;
                return Ok(ArgumentRow::new(vec![value]));
            }
        }
    }

    let fields = split_row(data, context);
    check_arity(fields.len(), parameters.len(), variadic, row)?;

    let fixed = if component.is_some() {
        parameters.len() - 1
    } else {
        parameters.len()
    };
    let mut values = Vec::with_capacity(parameters.len());
    for (position, (field, param)) in fields.iter().zip(&parameters).take(fixed).enumerate() {
        let value = convert_checked(converter, field, param, context, position)
            .map_err(|err| err.in_row(row, position))?;
        values.push(value);
    }

    if let Some(component) = component {
        let packed = fields
            .get(fixed..)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, field)| {
                convert_token(converter, field, component, context)
                    .and_then(|value| coerce_element(value, component, fixed + offset))
                    .map_err(|err| err.in_row(row, fixed + offset))
            })
            .collect::<Result<Vec<_>, _>>()?;
        values.push(Value::Array(ArrayValue::new(component.clone(), packed)));
    }
    Ok(ArgumentRow::new(values))
}

fn convert_checked<S>(
    converter: &S,
    token: &str,
    param: &ParamType,
    context: &ConverterContext,
    position: usize,
) -> Result<Value, ConversionError>
where
    S: StringConversion + ?Sized,
{
    let value = convert_token(converter, token, param, context)?;
    check_argument(&value, param, position)?;
    Ok(value)
}
