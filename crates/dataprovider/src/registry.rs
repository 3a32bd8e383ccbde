//! Registry of type names usable as `Type` arguments.
//!
//! A `Type` parameter receives a [`ParamType`] looked up by name. Built-in
//! names cover the primitives, their `Option` wrappers and `String`; other
//! types opt in with [`register_type!`](crate::register_type), which submits a
//! [`RegisteredType`] to an `inventory` collection.

use std::sync::LazyLock;

use hashbrown::HashMap;
use inventory::iter;
use thiserror::Error;

use crate::types::{ParamType, PrimitiveKind};

/// A type registered for lookup by name.
#[derive(Debug)]
pub struct RegisteredType {
    /// Name the type is looked up by.
    pub name: &'static str,
    /// Produces the descriptor of the type.
    pub param_type: fn() -> ParamType,
}

inventory::collect!(RegisteredType);

/// Register a type so `Type` parameters can name it.
///
/// The one-argument form registers an opaque host type under its path as
/// written. The two-argument form takes an explicit name and a function
/// producing the descriptor.
///
/// # Examples
/// ```
/// use dataprovider::{ParamType, register_type, resolve_type};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// register_type!(Celsius);
/// register_type!("temperature::Kelvin", || ParamType::constructed::<u32>());
///
/// assert_eq!(resolve_type("Celsius").ok(), Some(ParamType::object::<Celsius>()));
/// assert!(resolve_type("temperature::Kelvin").is_ok());
/// ```
#[macro_export]
macro_rules! register_type {
    ($ty:ty) => {
        $crate::submit! {
            $crate::RegisteredType {
                name: stringify!($ty),
                param_type: || $crate::ParamType::object::<$ty>(),
            }
        }
    };
    ($name:expr, $param_type:expr $(,)?) => {
        $crate::submit! {
            $crate::RegisteredType {
                name: $name,
                param_type: $param_type,
            }
        }
    };
}

/// Raised when a type name is neither built in nor registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no type named `{name}` is known; register it with `register_type!`")]
pub struct TypeLookupError {
    /// The name that failed to resolve.
    pub name: String,
}

static REGISTERED: LazyLock<HashMap<&'static str, fn() -> ParamType>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for registered in iter::<RegisteredType> {
        if map.insert(registered.name, registered.param_type).is_some() {
            log::warn!(
                "type name `{}` is registered more than once; the last registration wins",
                registered.name
            );
        }
    }
    map
});

fn builtin(name: &str) -> Option<ParamType> {
    if let Some(kind) = PrimitiveKind::from_name(name) {
        return Some(ParamType::Primitive(kind));
    }
    if let Some(inner) = name
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return PrimitiveKind::from_name(inner.trim()).map(ParamType::Boxed);
    }
    match name {
        "String" | "str" | "&str" | "std::string::String" | "alloc::string::String" => {
            Some(ParamType::String)
        }
        _ => None,
    }
}

/// Resolve a type by name.
///
/// # Errors
/// Returns [`TypeLookupError`] when the name is unknown.
///
/// # Examples
/// ```
/// use dataprovider::{ParamType, PrimitiveKind, resolve_type};
///
/// assert_eq!(resolve_type("i64").ok(), Some(ParamType::Primitive(PrimitiveKind::Long)));
/// assert_eq!(resolve_type("Option<char>").ok(), Some(ParamType::Boxed(PrimitiveKind::Char)));
/// assert!(resolve_type("java.lang.Object").is_err());
/// ```
pub fn resolve_type(name: &str) -> Result<ParamType, TypeLookupError> {
    builtin(name)
        .or_else(|| REGISTERED.get(name).map(|param_type| param_type()))
        .ok_or_else(|| TypeLookupError {
            name: name.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Token;

    crate::register_type!(Token);
    crate::register_type!("tests::Port", || ParamType::constructed::<u16>());

    #[rstest]
    #[case("bool", ParamType::Primitive(PrimitiveKind::Boolean))]
    #[case("Option<f32>", ParamType::Boxed(PrimitiveKind::Float))]
    #[case("String", ParamType::String)]
    #[case("str", ParamType::String)]
    fn resolves_builtin_names(#[case] name: &str, #[case] expected: ParamType) {
        assert_eq!(resolve_type(name), Ok(expected));
    }

    #[test]
    fn resolves_registered_names() {
        assert_eq!(resolve_type("Token"), Ok(ParamType::object::<Token>()));
        assert_eq!(
            resolve_type("tests::Port"),
            Ok(ParamType::constructed::<u16>())
        );
    }

    #[test]
    fn unknown_names_are_reported() {
        assert_eq!(
            resolve_type("Option<String>"),
            Err(TypeLookupError {
                name: "Option<String>".into()
            })
        );
    }
}
