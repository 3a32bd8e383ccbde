//! Conversion of provider data into typed argument rows.
//!
//! [`DataConverter`] picks a strategy by data shape: rows of values go to an
//! [`ObjectArrayConversion`], lone values to a [`SingleArgConversion`] and
//! delimited strings to a [`StringConversion`]. The strategies live on the
//! [`ConverterContext`](crate::ConverterContext) so callers can swap any of
//! them.

mod check;
mod data;
mod error;
mod row;
mod scalar;
mod string;

pub use data::{DataConverter, ProviderData};
pub use error::ConversionError;
pub use row::{
    ArgumentRow, ObjectArrayConversion, ObjectArrayConverter, SingleArgConversion,
    SingleArgConverter, convert_object_row, convert_single_arg,
};
pub use scalar::convert_builtin;
pub use string::{
    StringConversion, StringConverter, convert_string_row, convert_token, split_row,
};
