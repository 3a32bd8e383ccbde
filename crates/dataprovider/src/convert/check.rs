//! Argument compatibility checks shared by the row converters.

use crate::convert::ConversionError;
use crate::types::ParamType;
use crate::value::Value;

/// Whether `value` may be passed where `param` is declared.
///
/// Primitives accept the same kind or a widening of it, nullable wrappers
/// accept their exact kind, and host types compare by [`TypeId`](std::any::TypeId).
pub(crate) fn accepts(param: &ParamType, value: &Value) -> bool {
    if value.is_null() {
        return param.is_nullable();
    }
    match param {
        ParamType::Primitive(kind) => value
            .primitive_kind()
            .is_some_and(|source| source == *kind || source.widens_to(*kind)),
        ParamType::Boxed(kind) => value.primitive_kind() == Some(*kind),
        ParamType::String => matches!(value, Value::Str(_)),
        ParamType::Enum(enum_type) => {
            matches!(value, Value::Enum(constant) if constant.enum_type() == *enum_type)
        }
        ParamType::Type => matches!(value, Value::Type(_)),
        ParamType::Constructed(constructor) => matches!(
            value,
            Value::Object(object) if object.value_type_id() == constructor.type_id()
        ),
        ParamType::Object(object_type) => matches!(
            value,
            Value::Object(object) if object.value_type_id() == object_type.type_id()
        ),
        ParamType::List => matches!(value, Value::List(_) | Value::Array(_)),
        ParamType::Array(component) => {
            matches!(value, Value::Array(array) if array.component() == component.as_ref())
        }
        ParamType::Any => true,
    }
}

/// Check one argument against its declared parameter.
pub(crate) fn check_argument(
    value: &Value,
    param: &ParamType,
    parameter: usize,
) -> Result<(), ConversionError> {
    if value.is_null() && !param.is_nullable() {
        return Err(ConversionError::NullPrimitive {
            parameter,
            expected: param.to_string(),
        });
    }
    if accepts(param, value) {
        Ok(())
    } else {
        Err(mismatch(value, param, parameter))
    }
}

/// Check an element packed into a variadic array and widen primitives to the
/// array's component kind.
pub(crate) fn coerce_element(
    value: Value,
    component: &ParamType,
    parameter: usize,
) -> Result<Value, ConversionError> {
    check_argument(&value, component, parameter)?;
    let ParamType::Primitive(kind) = component else {
        return Ok(value);
    };
    value
        .widen_to(*kind)
        .ok_or_else(|| mismatch(&value, component, parameter))
}

fn mismatch(value: &Value, param: &ParamType, parameter: usize) -> ConversionError {
    ConversionError::ArgumentType {
        parameter,
        expected: param.to_string(),
        value: value.to_string(),
        actual: value.type_name(),
    }
}
