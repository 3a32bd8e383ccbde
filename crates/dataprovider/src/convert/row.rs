//! Argument rows and the converters producing them from in-memory values.

use derive_more::{Deref, From, IntoIterator};

use crate::convert::ConversionError;
use crate::convert::check::{check_argument, coerce_element};
use crate::method::TestMethod;
use crate::types::ParamType;
use crate::value::{ArrayValue, FromValue, Value, ValueError};

/// The arguments of one test invocation, in parameter order.
///
/// For variadic methods the last value is always a [`Value::Array`] holding
/// the trailing arguments.
#[derive(Clone, Debug, Default, PartialEq, Deref, From, IntoIterator)]
pub struct ArgumentRow(Vec<Value>);

impl ArgumentRow {
    /// Wrap converted values.
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Read the argument at `index` as `T`.
    ///
    /// # Errors
    /// Returns [`ValueError::MissingArgument`] when the row is too short and
    /// [`ValueError::Mismatch`] when the argument has another type.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::{ArgumentRow, Value};
    ///
    /// let row = ArgumentRow::new(vec![Value::Int(2), Value::from("two")]);
    /// assert_eq!(row.arg::<i64>(0).ok(), Some(2));
    /// assert_eq!(row.arg::<String>(1).ok().as_deref(), Some("two"));
    /// assert!(row.arg::<i32>(2).is_err());
    /// ```
    pub fn arg<T: FromValue>(&self, index: usize) -> Result<T, ValueError> {
        let value = self.0.get(index).ok_or_else(|| ValueError::MissingArgument {
            index,
            len: self.0.len(),
        })?;
        T::from_value(value)
    }

    /// The values in parameter order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Take the values out of the row.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

/// Turns a row of already typed values into arguments for a method.
///
/// The provided method checks each value against its parameter and packs the
/// trailing values of variadic methods. Override it to accept other row
/// shapes.
pub trait ObjectArrayConversion: Send + Sync {
    /// Convert row number `row` for `method`.
    ///
    /// # Errors
    /// Returns [`ConversionError`] when the row does not fit the signature.
    fn convert(
        &self,
        data: &[Value],
        method: &TestMethod,
        row: usize,
    ) -> Result<ArgumentRow, ConversionError> {
        convert_object_row(data, method, row)
    }
}

/// Turns a lone value into the single argument of a method.
pub trait SingleArgConversion: Send + Sync {
    /// Convert row number `row` for `method`.
    ///
    /// # Errors
    /// Returns [`ConversionError`] when the method does not take exactly one
    /// non-variadic parameter of a compatible type.
    fn convert(
        &self,
        data: &Value,
        method: &TestMethod,
        row: usize,
    ) -> Result<ArgumentRow, ConversionError> {
        convert_single_arg(data, method, row)
    }
}

/// Default [`ObjectArrayConversion`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectArrayConverter;

impl ObjectArrayConversion for ObjectArrayConverter {}

/// Default [`SingleArgConversion`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleArgConverter;

impl SingleArgConversion for SingleArgConverter {}

pub(crate) fn parameter_types(method: &TestMethod) -> Result<Vec<&ParamType>, ConversionError> {
    method.validate()?;
    let parameters: Vec<&ParamType> = method.parameter_types().collect();
    if parameters.is_empty() {
        return Err(ConversionError::NoParameters {
            method: method.qualified_name(),
        });
    }
    Ok(parameters)
}

pub(crate) fn check_arity(
    actual: usize,
    expected: usize,
    variadic: bool,
    row: usize,
) -> Result<(), ConversionError> {
    if variadic && actual + 1 < expected {
        return Err(ConversionError::VariadicArity {
            row,
            expected,
            actual,
        });
    }
    if !variadic && actual != expected {
        return Err(ConversionError::Arity {
            row,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Component type of the trailing variadic parameter.
pub(crate) fn variadic_component<'a>(parameters: &[&'a ParamType]) -> Option<&'a ParamType> {
    parameters.last().and_then(|last| last.component())
}

/// Convert a row of values for `method`.
///
/// A variadic row whose length equals the parameter count and whose last
/// value already is an array of the variadic component passes that array
/// through unchanged. Otherwise the trailing values are packed into a new
/// array.
///
/// # Errors
/// Returns [`ConversionError`] on arity or type mismatches.
pub fn convert_object_row(
    data: &[Value],
    method: &TestMethod,
    row: usize,
) -> Result<ArgumentRow, ConversionError> {
    let parameters = parameter_types(method)?;
    let variadic = method.is_variadic();
    check_arity(data.len(), parameters.len(), variadic, row)?;

    let fixed = if variadic {
        parameters.len() - 1
    } else {
        parameters.len()
    };
    let mut values = Vec::with_capacity(parameters.len());
    for (position, (value, param)) in data.iter().zip(&parameters).take(fixed).enumerate() {
        check_argument(value, param, position).map_err(|err| err.in_row(row, position))?;
        values.push(value.clone());
    }

    let Some(component) = variadic.then(|| variadic_component(&parameters)).flatten() else {
        return Ok(ArgumentRow(values));
    };
    let trailing = data.get(fixed..).unwrap_or_default();
    match trailing {
        [Value::Array(array)] if data.len() == parameters.len() && array.component() == component => {
            values.push(Value::Array(array.clone()));
        }
        _ => {
            let packed = trailing
                .iter()
                .enumerate()
                .map(|(offset, value)| {
                    coerce_element(value.clone(), component, fixed + offset)
                        .map_err(|err| err.in_row(row, fixed + offset))
                })
                .collect::<Result<Vec<_>, _>>()?;
            values.push(Value::Array(ArrayValue::new(component.clone(), packed)));
        }
    }
    Ok(ArgumentRow(values))
}

/// Convert a lone value into the single argument of `method`.
///
/// # Errors
/// Returns [`ConversionError`] when `method` is variadic, does not declare
/// exactly one parameter, or the value does not fit it.
pub fn convert_single_arg(
    data: &Value,
    method: &TestMethod,
    row: usize,
) -> Result<ArgumentRow, ConversionError> {
    let parameters = parameter_types(method)?;
    if method.is_variadic() {
        return Err(ConversionError::VariadicSingleArgument {
            method: method.qualified_name(),
        });
    }
    check_arity(1, parameters.len(), false, row)?;
    if let Some(param) = parameters.first() {
        check_argument(data, param, 0).map_err(|err| err.in_row(row, 0))?;
    }
    Ok(ArgumentRow(vec![data.clone()]))
}
