//! Data provider parameterised testing.
//!
//! A [`DataProvider`] supplies rows of arguments for a [`TestMethod`]. The
//! [`Expander`] converts every row to the declared parameter types and names
//! each invocation from a placeholder template such as `%m[%i: %p[0..-1]]`,
//! which lists every argument except the expected value in the last column.
//! [`Expansion::run`] then executes a test body once per row through a
//! [`HarnessAdapter`], collecting every outcome in a [`RunSummary`].
//!
//! # Examples
//! ```
//! use dataprovider::{DataProvider, Expander, ParamType, StdHarness, TestMethod, table};
//!
//! let method = TestMethod::new("calc::tests", "add")
//!     .param("a", ParamType::of::<i32>())
//!     .param("b", ParamType::of::<i32>())
//!     .param("expected", ParamType::of::<i64>());
//! let provider = DataProvider::new("sums", || table![[1, 2, 3], [-1, 1, 0]]);
//!
//! let Ok(expansion) = Expander::new().expand(&method, &provider) else {
//!     panic!("provider data converts");
//! };
//! let names: Vec<&str> = expansion.names().collect();
//! assert_eq!(names, ["add[0: 1, 2]", "add[1: -1, 1]"]);
//!
//! expansion
//!     .run(&StdHarness::new(), |invocation| {
//!         let (Ok(a), Ok(b), Ok(expected)) = (
//!             invocation.arg::<i32>(0),
//!             invocation.arg::<i32>(1),
//!             invocation.arg::<i64>(2),
//!         ) else {
//!             panic!("arguments have declared types");
//!         };
//!         assert_eq!(i64::from(a + b), expected);
//!     })
//!     .assert_all_passed();
//! ```

#[doc(hidden)]
pub use inventory::{iter, submit};

mod cache;
mod config;
mod context;
mod convert;
mod execution;
mod expansion;
mod helpers;
mod macros;
mod method;
mod panic;
pub mod placeholder;
mod provider;
mod registry;
#[cfg(feature = "diagnostics")]
pub mod report;
mod types;
mod value;

#[cfg(any(test, feature = "diagnostics"))]
pub use cache::{cache_miss_count, reset_cache_miss_count};
pub use cache::{cached_provider_count, clear_provider_cache};
pub use config::{
    DEFAULT_FORMAT, DEFAULT_FORMAT_ENV, clear_default_format_override, default_format,
    set_default_format,
};
pub use context::{
    ConfigError, ConverterContext, ConverterContextBuilder, DEFAULT_NULL_MARKER, DEFAULT_SPLIT_BY,
};
pub use convert::{
    ArgumentRow, ConversionError, DataConverter, ObjectArrayConversion, ObjectArrayConverter,
    ProviderData, SingleArgConversion, SingleArgConverter, StringConversion, StringConverter,
    convert_builtin, convert_object_row, convert_single_arg, convert_string_row, convert_token,
    split_row,
};
pub use dataprovider_harness::{HarnessAdapter, InvocationMetadata, InvocationRequest, StdHarness};
pub use execution::{InvocationOutcome, InvocationReport, IntoOutcome, RunSummary};
pub use expansion::{Expander, Expansion, ExpansionError, TestInvocation};
pub use helpers::{cross_product, cross_product_single_arg, test_for_each, test_for_each_enum};
pub use method::{Parameter, SignatureError, TestMethod};
pub use panic::panic_message;
pub use placeholder::{
    FormatError, Placeholder, PlaceholderFormatter, ReplacementContext, TestNameFormatter,
    format_argument, format_arguments,
};
pub use provider::{DataProvider, ProviderOptions};
pub use registry::{RegisteredType, TypeLookupError, resolve_type};
pub use types::{
    ArgumentType, DataProviderEnum, EnumType, EnumValue, ObjectType, ParamType, PrimitiveKind,
    StringConstructor,
};
pub use value::{ArrayValue, FromValue, ObjectRef, Value, ValueError};
