//! Dynamically typed argument values.
//!
//! Provider rows are heterogeneous, so every argument travels as a
//! [`Value`]. Test bodies read typed arguments back with [`FromValue`].

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::types::{
    ArgumentType, DataProviderEnum, EnumValue, ParamType, PrimitiveKind,
};

/// One argument of a provider row.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// `bool`
    Bool(bool),
    /// `i8`
    Byte(i8),
    /// `char`
    Char(char),
    /// `i16`
    Short(i16),
    /// `i32`
    Int(i32),
    /// `i64`
    Long(i64),
    /// `f32`
    Float(f32),
    /// `f64`
    Double(f64),
    /// Text.
    Str(String),
    /// An enum constant.
    Enum(EnumValue),
    /// A resolved type handle.
    Type(ParamType),
    /// An untyped sequence.
    List(Vec<Value>),
    /// A typed array.
    Array(ArrayValue),
    /// An arbitrary host value.
    Object(ObjectRef),
}

impl Value {
    /// Build a [`Value::List`] from anything convertible into values.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Build a [`Value::Array`] with the given component type.
    pub fn array<I, V>(component: ParamType, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Array(ArrayValue::new(
            component,
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Primitive kind of the value, if it is a primitive.
    #[must_use]
    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Bool(_) => Some(PrimitiveKind::Boolean),
            Self::Byte(_) => Some(PrimitiveKind::Byte),
            Self::Char(_) => Some(PrimitiveKind::Char),
            Self::Short(_) => Some(PrimitiveKind::Short),
            Self::Int(_) => Some(PrimitiveKind::Int),
            Self::Long(_) => Some(PrimitiveKind::Long),
            Self::Float(_) => Some(PrimitiveKind::Float),
            Self::Double(_) => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// Name of the value's runtime type, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        if let Some(kind) = self.primitive_kind() {
            return kind.name().to_owned();
        }
        match self {
            Self::Null => "null".to_owned(),
            Self::Str(_) => "String".to_owned(),
            Self::Enum(value) => value.enum_type().name().to_owned(),
            Self::Type(_) => "Type".to_owned(),
            Self::List(_) => "List".to_owned(),
            Self::Array(array) => format!("Vec<{}>", array.component()),
            Self::Object(object) => object.type_name().to_owned(),
            _ => String::new(),
        }
    }

    /// Text content of a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the host value behind a [`Value::Object`].
    #[must_use]
    pub fn downcast_object<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Object(object) => object.downcast_ref(),
            _ => None,
        }
    }

    /// Convert a primitive to `target` when that is the same kind or a
    /// widening of it.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::{PrimitiveKind, Value};
    ///
    /// assert_eq!(Value::Byte(7).widen_to(PrimitiveKind::Long), Some(Value::Long(7)));
    /// assert_eq!(Value::Char('a').widen_to(PrimitiveKind::Int), Some(Value::Int(97)));
    /// assert_eq!(Value::Int(7).widen_to(PrimitiveKind::Short), None);
    /// ```
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "integral to floating widening may round, as primitive widening does"
    )]
    pub fn widen_to(&self, target: PrimitiveKind) -> Option<Self> {
        let source = self.primitive_kind()?;
        if source == target {
            return Some(self.clone());
        }
        if !source.widens_to(target) {
            return None;
        }
        match target {
            PrimitiveKind::Short => i16::try_from(self.integral()?).ok().map(Self::Short),
            PrimitiveKind::Int => i32::try_from(self.integral()?).ok().map(Self::Int),
            PrimitiveKind::Long => self.integral().map(Self::Long),
            PrimitiveKind::Float => self.integral().map(|value| Self::Float(value as f32)),
            PrimitiveKind::Double => match self {
                Self::Float(value) => Some(Self::Double(f64::from(*value))),
                _ => self.integral().map(|value| Self::Double(value as f64)),
            },
            PrimitiveKind::Boolean | PrimitiveKind::Byte | PrimitiveKind::Char => None,
        }
    }

    fn integral(&self) -> Option<i64> {
        match self {
            Self::Byte(value) => Some(i64::from(*value)),
            Self::Char(value) => Some(i64::from(u32::from(*value))),
            Self::Short(value) => Some(i64::from(*value)),
            Self::Int(value) => Some(i64::from(*value)),
            Self::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Read an enum constant back as the Rust enum `E`.
    ///
    /// # Errors
    /// Returns [`ValueError::Mismatch`] when the value is not a constant of
    /// `E`.
    pub fn to_enum<E: DataProviderEnum>(&self) -> Result<E, ValueError> {
        match self {
            Self::Enum(value) if value.enum_type() == E::TYPE => E::from_ordinal(value.ordinal())
                .ok_or_else(|| ValueError::mismatch(self, E::TYPE.name())),
            _ => Err(ValueError::mismatch(self, E::TYPE.name())),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (position, value) in values.iter().enumerate() {
        if position > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Byte(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "{value}"),
            Self::Short(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            // Debug keeps the fractional part of whole numbers: `4.0`.
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Double(value) => write!(f, "{value:?}"),
            Self::Str(value) => f.write_str(value),
            Self::Enum(value) => write!(f, "{value}"),
            Self::Type(value) => write!(f, "{value}"),
            Self::List(values) => write_joined(f, values),
            Self::Array(array) => write_joined(f, array.elements()),
            Self::Object(object) => f.write_str(object.render().as_deref().unwrap_or("null")),
        }
    }
}

/// A typed array of values.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    component: ParamType,
    elements: Vec<Value>,
}

impl ArrayValue {
    /// Create an array of `component` holding `elements`.
    #[must_use]
    pub fn new(component: ParamType, elements: Vec<Value>) -> Self {
        Self {
            component,
            elements,
        }
    }

    /// Create a zero-length array of `component`.
    #[must_use]
    pub fn empty(component: ParamType) -> Self {
        Self::new(component, Vec::new())
    }

    /// Component type of the array.
    #[must_use]
    pub fn component(&self) -> &ParamType {
        &self.component
    }

    /// Elements of the array.
    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Take the elements out of the array.
    #[must_use]
    pub fn into_elements(self) -> Vec<Value> {
        self.elements
    }
}

type Render = dyn Fn(&dyn Any) -> Option<String> + Send + Sync;

fn eq_as<T: PartialEq + 'static>(left: &dyn Any, right: &dyn Any) -> bool {
    match (left.downcast_ref::<T>(), right.downcast_ref::<T>()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// A shared handle to an arbitrary host value.
///
/// The handle remembers how to compare and render the value it wraps, so
/// rows holding host values can still be checked for equality and shown in
/// test names.
///
/// # Examples
/// ```
/// use dataprovider::ObjectRef;
///
/// let port = ObjectRef::new(8080_u16);
/// assert_eq!(port.render().as_deref(), Some("8080"));
/// assert_eq!(port.downcast_ref::<u16>(), Some(&8080));
///
/// let hidden = ObjectRef::with_renderer(3_u8, |_| None);
/// assert!(hidden.render().is_none());
/// ```
#[derive(Clone)]
pub struct ObjectRef {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    eq: fn(&dyn Any, &dyn Any) -> bool,
    render: Arc<Render>,
}

impl ObjectRef {
    /// Wrap a value rendered through its [`Display`](fmt::Display)
    /// implementation.
    pub fn new<T>(value: T) -> Self
    where
        T: fmt::Display + PartialEq + Send + Sync + 'static,
    {
        Self::with_renderer(value, |value: &T| Some(value.to_string()))
    }

    /// Wrap a value with a custom renderer. A renderer returning `None`
    /// makes the value show as null in test names.
    pub fn with_renderer<T, F>(value: T, renderer: F) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
            eq: eq_as::<T>,
            render: Arc::new(move |any: &dyn Any| any.downcast_ref::<T>().and_then(&renderer)),
        }
    }

    /// Borrow the wrapped value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// [`TypeId`] of the wrapped value.
    #[must_use]
    pub fn value_type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    /// Fully qualified name of the wrapped value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Text form of the wrapped value, if it has one.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        (self.render)(&*self.value)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        (self.eq)(&*self.value, &*other.value)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name)
            .field("rendered", &self.render())
            .finish()
    }
}

/// Raised when a [`Value`] cannot be read as the requested Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// The value has an incompatible type.
    #[error("cannot read {actual} value `{value}` as {expected}")]
    Mismatch {
        /// Requested type.
        expected: String,
        /// Runtime type of the value.
        actual: String,
        /// Display form of the value.
        value: String,
    },
    /// A row was asked for an argument it does not have.
    #[error("argument {index} is missing; the row has {len} argument(s)")]
    MissingArgument {
        /// Requested zero-based position.
        index: usize,
        /// Number of arguments in the row.
        len: usize,
    },
}

impl ValueError {
    pub(crate) fn mismatch(value: &Value, expected: impl Into<String>) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            actual: value.type_name(),
            value: value.to_string(),
        }
    }
}

/// Typed extraction from a [`Value`].
///
/// Numeric extraction follows the same widening rules as argument checking:
/// an `i8` argument can be read as `i32`, never the other way round.
///
/// # Examples
/// ```
/// use dataprovider::{FromValue, Value};
///
/// assert_eq!(i64::from_value(&Value::Int(3)).ok(), Some(3));
/// assert!(i8::from_value(&Value::Int(3)).is_err());
/// assert_eq!(Option::<i32>::from_value(&Value::Null).ok(), Some(None));
/// ```
pub trait FromValue: Sized {
    /// Read `value` as `Self`.
    ///
    /// # Errors
    /// Returns [`ValueError`] when the value has an incompatible type.
    fn from_value(value: &Value) -> Result<Self, ValueError>;
}

macro_rules! primitive_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, ValueError> {
                match value.widen_to(PrimitiveKind::$kind) {
                    Some(Value::$variant(inner)) => Ok(inner),
                    _ => Err(ValueError::mismatch(value, PrimitiveKind::$kind.name())),
                }
            }
        }

        impl ArgumentType for $ty {
            fn param_type() -> ParamType {
                ParamType::Primitive(PrimitiveKind::$kind)
            }
        }
    };
}

primitive_value!(bool, Boolean, Bool);
primitive_value!(i8, Byte, Byte);
primitive_value!(char, Char, Char);
primitive_value!(i16, Short, Short);
primitive_value!(i32, Int, Int);
primitive_value!(i64, Long, Long);
primitive_value!(f32, Float, Float);
primitive_value!(f64, Double, Double);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<ParamType> for Value {
    fn from(value: ParamType) -> Self {
        Self::Type(value)
    }
}

impl From<ArrayValue> for Value {
    fn from(value: ArrayValue) -> Self {
        Self::Array(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value> + ArgumentType> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::array(T::param_type(), values)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| ValueError::mismatch(value, "String"))
    }
}

impl FromValue for EnumValue {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Enum(inner) => Ok(*inner),
            _ => Err(ValueError::mismatch(value, "enum")),
        }
    }
}

impl FromValue for ParamType {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Type(inner) => Ok(inner.clone()),
            _ => Err(ValueError::mismatch(value, "Type")),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        let elements = match value {
            Value::List(values) => values.as_slice(),
            Value::Array(array) => array.elements(),
            _ => return Err(ValueError::mismatch(value, "Vec")),
        };
        elements.iter().map(T::from_value).collect()
    }
}
