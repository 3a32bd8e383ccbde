//! Parameter type descriptors.
//!
//! Every declared test parameter is classified once into a [`ParamType`].
//! Conversion and argument checking then dispatch on that classification
//! with a single `match` instead of probing the value over and over.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::value::{ObjectRef, Value};

/// The primitive kinds a parameter or value can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `bool`
    Boolean,
    /// `i8`
    Byte,
    /// `char`
    Char,
    /// `i16`
    Short,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
}

impl PrimitiveKind {
    /// Every primitive kind in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    /// Rust name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::Byte => "i8",
            Self::Char => "char",
            Self::Short => "i16",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// Look up a kind by its Rust name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether a value of this kind may be passed where `target` is declared
    /// without an explicit cast.
    ///
    /// Identity is not a widening; callers test equality separately.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::PrimitiveKind;
    ///
    /// assert!(PrimitiveKind::Byte.widens_to(PrimitiveKind::Double));
    /// assert!(PrimitiveKind::Char.widens_to(PrimitiveKind::Int));
    /// assert!(!PrimitiveKind::Int.widens_to(PrimitiveKind::Short));
    /// assert!(!PrimitiveKind::Char.widens_to(PrimitiveKind::Short));
    /// ```
    #[must_use]
    pub const fn widens_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Byte,
                Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
            ) | (
                Self::Short | Self::Char,
                Self::Int | Self::Long | Self::Float | Self::Double
            ) | (Self::Int, Self::Long | Self::Float | Self::Double)
                | (Self::Long, Self::Float | Self::Double)
                | (Self::Float, Self::Double)
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a declared test parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParamType {
    /// A non-nullable primitive. Accepts narrower primitives by widening.
    Primitive(PrimitiveKind),
    /// A nullable primitive wrapper, rendered as `Option<kind>`. Accepts the
    /// exact kind only.
    Boxed(PrimitiveKind),
    /// Text.
    String,
    /// A user enum.
    Enum(EnumType),
    /// A type handle resolved by name through the type registry.
    Type,
    /// A host type built from a single string.
    Constructed(StringConstructor),
    /// A host type that cannot be built from text.
    Object(ObjectType),
    /// Any sequence of values.
    List,
    /// A typed array, also used for the variadic trailing parameter.
    Array(Box<ParamType>),
    /// Accepts every value unchanged.
    Any,
}

impl ParamType {
    /// Descriptor of a statically known argument type.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::{ParamType, PrimitiveKind};
    ///
    /// assert_eq!(ParamType::of::<i32>(), ParamType::Primitive(PrimitiveKind::Int));
    /// assert_eq!(ParamType::of::<Option<i32>>(), ParamType::Boxed(PrimitiveKind::Int));
    /// assert_eq!(ParamType::of::<Vec<String>>().to_string(), "Vec<String>");
    /// ```
    #[must_use]
    pub fn of<T: ArgumentType>() -> Self {
        T::param_type()
    }

    /// Descriptor of a user enum.
    #[must_use]
    pub fn enumeration<E: DataProviderEnum>() -> Self {
        Self::Enum(E::TYPE)
    }

    /// Descriptor of a host type parsed with [`FromStr`].
    #[must_use]
    pub fn constructed<T>() -> Self
    where
        T: FromStr + fmt::Display + PartialEq + Send + Sync + 'static,
        T::Err: fmt::Display,
    {
        Self::Constructed(StringConstructor::parsing::<T>())
    }

    /// Descriptor of an opaque host type.
    #[must_use]
    pub fn object<T: Any>() -> Self {
        Self::Object(ObjectType::of::<T>())
    }

    /// Descriptor of an array of `component`.
    #[must_use]
    pub fn array(component: Self) -> Self {
        Self::Array(Box::new(component))
    }

    /// Component type when this is an array.
    #[must_use]
    pub fn component(&self) -> Option<&Self> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Whether `null` is a legal argument for this parameter.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !matches!(self, Self::Primitive(_))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Boxed(kind) => write!(f, "Option<{kind}>"),
            Self::String => f.write_str("String"),
            Self::Enum(enum_type) => f.write_str(enum_type.name()),
            Self::Type => f.write_str("Type"),
            Self::Constructed(constructor) => f.write_str(constructor.name()),
            Self::Object(object) => f.write_str(object.name()),
            Self::List => f.write_str("List"),
            Self::Array(component) => write!(f, "Vec<{component}>"),
            Self::Any => f.write_str("Value"),
        }
    }
}

/// Types with a fixed [`ParamType`].
pub trait ArgumentType {
    /// Descriptor used when the type is declared as a test parameter.
    fn param_type() -> ParamType;
}

impl ArgumentType for String {
    fn param_type() -> ParamType {
        ParamType::String
    }
}

impl<T: ArgumentType> ArgumentType for Option<T> {
    fn param_type() -> ParamType {
        match T::param_type() {
            ParamType::Primitive(kind) => ParamType::Boxed(kind),
            other => other,
        }
    }
}

impl<T: ArgumentType> ArgumentType for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::array(T::param_type())
    }
}

impl ArgumentType for Value {
    fn param_type() -> ParamType {
        ParamType::Any
    }
}

impl ArgumentType for ParamType {
    fn param_type() -> ParamType {
        ParamType::Type
    }
}

/// An enum type: its name plus constant names in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: &'static str,
    constants: &'static [&'static str],
}

impl EnumType {
    /// Describe an enum.
    #[must_use]
    pub const fn new(name: &'static str, constants: &'static [&'static str]) -> Self {
        Self { name, constants }
    }

    /// Name of the enum.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Constant names in declaration order.
    #[must_use]
    pub const fn constants(self) -> &'static [&'static str] {
        self.constants
    }

    /// Constant at `ordinal`.
    #[must_use]
    pub fn value(self, ordinal: usize) -> Option<EnumValue> {
        (ordinal < self.constants.len()).then_some(EnumValue {
            enum_type: self,
            ordinal,
        })
    }

    /// Find the constant called `token`.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::EnumType;
    ///
    /// let colour = EnumType::new("Colour", &["Red", "Green"]);
    /// assert!(colour.lookup("green", false).is_none());
    /// assert_eq!(colour.lookup("green", true).map(|value| value.name()), Some("Green"));
    /// ```
    #[must_use]
    pub fn lookup(self, token: &str, ignore_case: bool) -> Option<EnumValue> {
        let position = if ignore_case {
            let wanted = token.to_lowercase();
            self.constants
                .iter()
                .position(|constant| constant.to_lowercase() == wanted)
        } else {
            self.constants.iter().position(|constant| *constant == token)
        };
        position.and_then(|ordinal| self.value(ordinal))
    }
}

/// A constant of an [`EnumType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_type: EnumType,
    ordinal: usize,
}

impl EnumValue {
    /// The enum the constant belongs to.
    #[must_use]
    pub const fn enum_type(self) -> EnumType {
        self.enum_type
    }

    /// Position of the constant in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.ordinal
    }

    /// Name of the constant.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.enum_type
            .constants
            .get(self.ordinal)
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust enums usable as test parameters.
///
/// Implement it with [`dataprovider_enum!`](crate::dataprovider_enum), which
/// also wires up value conversion in both directions.
pub trait DataProviderEnum: Copy + 'static {
    /// Descriptor of the enum. `TYPE.constants()` must list the variants in
    /// the order of [`variants`](Self::variants).
    const TYPE: EnumType;

    /// Every variant in declaration order.
    fn variants() -> &'static [Self];

    /// Position of `self` within [`variants`](Self::variants).
    fn ordinal(self) -> usize;

    /// Variant at `ordinal`.
    #[must_use]
    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::variants().get(ordinal).copied()
    }

    /// The constant describing `self`.
    #[must_use]
    fn to_enum_value(self) -> EnumValue {
        EnumValue {
            enum_type: Self::TYPE,
            ordinal: self.ordinal(),
        }
    }
}

type Construct = dyn Fn(&str) -> Result<ObjectRef, String> + Send + Sync;

/// Builds a host value from a single string token.
#[derive(Clone)]
pub struct StringConstructor {
    type_id: TypeId,
    name: &'static str,
    construct: Arc<Construct>,
}

impl StringConstructor {
    /// Wrap a fallible constructor for `T`.
    pub fn new<T, E, F>(construct: F) -> Self
    where
        T: fmt::Display + PartialEq + Send + Sync + 'static,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
            construct: Arc::new(move |token| {
                construct(token)
                    .map(ObjectRef::new)
                    .map_err(|err| err.to_string())
            }),
        }
    }

    /// Constructor delegating to `T`'s [`FromStr`] implementation.
    #[must_use]
    pub fn parsing<T>() -> Self
    where
        T: FromStr + fmt::Display + PartialEq + Send + Sync + 'static,
        T::Err: fmt::Display,
    {
        Self::new(|token: &str| token.parse::<T>())
    }

    /// Fully qualified name of the constructed type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// [`TypeId`] of the constructed type.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Build a value from `token`.
    ///
    /// # Errors
    /// Returns the constructor's failure message.
    pub fn construct(&self, token: &str) -> Result<ObjectRef, String> {
        (self.construct)(token)
    }
}

impl PartialEq for StringConstructor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for StringConstructor {}

impl fmt::Debug for StringConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StringConstructor").field(&self.name).finish()
    }
}

/// Identity of an opaque host type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectType {
    type_id: TypeId,
    name: &'static str,
}

impl ObjectType {
    /// Identity of `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Fully qualified name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// [`TypeId`] of the type.
    #[must_use]
    pub const fn type_id(self) -> TypeId {
        self.type_id
    }
}
