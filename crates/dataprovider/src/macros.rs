//! Declarative macros for provider data and enum parameters.

/// Build one row of [`Value`](crate::Value)s from anything convertible.
///
/// # Examples
/// ```
/// use dataprovider::{Value, row};
///
/// assert_eq!(row![1, "two", 3.0], vec![Value::Int(1), Value::from("two"), Value::Double(3.0)]);
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),*]
    };
}

/// Build a [`ProviderData::Table`](crate::ProviderData::Table) from
/// bracketed rows.
///
/// # Examples
/// ```
/// use dataprovider::{ProviderData, table};
///
/// let data = table![[-1, -1, -2], [0, 0, 0], [1, 1, 2]];
/// assert_eq!(data.len(), Some(3));
/// ```
#[macro_export]
macro_rules! table {
    ($([$($value:expr),* $(,)?]),* $(,)?) => {
        $crate::ProviderData::Table(::std::vec![$($crate::row![$($value),*]),*])
    };
}

/// Declare a fieldless enum usable as a test parameter.
///
/// The macro derives `Clone`, `Copy`, `Debug`, `PartialEq`, `Eq` and `Hash`,
/// implements [`DataProviderEnum`](crate::DataProviderEnum) and converts the
/// enum to and from [`Value`](crate::Value).
///
/// # Examples
/// ```
/// use dataprovider::{FromValue, ParamType, Value, dataprovider_enum};
///
/// dataprovider_enum! {
///     /// Access modes.
///     pub enum Mode { Read, Write }
/// }
///
/// let value = Value::from(Mode::Write);
/// assert_eq!(value.to_string(), "Write");
/// assert_eq!(Mode::from_value(&value).ok(), Some(Mode::Write));
/// assert_eq!(ParamType::of::<Mode>().to_string(), "Mode");
/// ```
#[macro_export]
macro_rules! dataprovider_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::DataProviderEnum for $name {
            const TYPE: $crate::EnumType =
                $crate::EnumType::new(stringify!($name), &[$(stringify!($variant)),+]);

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::core::convert::From<$name> for $crate::Value {
            fn from(value: $name) -> Self {
                Self::Enum($crate::DataProviderEnum::to_enum_value(value))
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(
                value: &$crate::Value,
            ) -> ::core::result::Result<Self, $crate::ValueError> {
                value.to_enum::<Self>()
            }
        }

        impl $crate::ArgumentType for $name {
            fn param_type() -> $crate::ParamType {
                $crate::ParamType::enumeration::<Self>()
            }
        }
    };
}
