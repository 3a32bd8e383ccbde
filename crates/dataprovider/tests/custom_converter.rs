//! Replacing and extending the conversion strategies.

use std::sync::Arc;
use std::time::Duration;

use dataprovider::{
    ArgumentRow, ConversionError, ConverterContext, DataProvider, Expander, ObjectArrayConversion,
    ObjectRef, ParamType, ProviderOptions, StringConversion, TestMethod, Value,
};

/// Understands `250ms` and `3s` for `Duration` parameters.
struct DurationConverter;

fn duration_value(duration: Duration) -> Value {
    Value::Object(ObjectRef::with_renderer(duration, |duration: &Duration| {
        Some(format!("{duration:?}"))
    }))
}

impl StringConversion for DurationConverter {
    fn custom_convert_value(
        &self,
        token: &str,
        target: &ParamType,
        _context: &ConverterContext,
    ) -> Result<Option<Value>, ConversionError> {
        if target != &ParamType::object::<Duration>() {
            return Ok(None);
        }
        let parsed = if let Some(millis) = token.strip_suffix("ms") {
            millis.parse().map(Duration::from_millis)
        } else if let Some(secs) = token.strip_suffix('s') {
            secs.parse().map(Duration::from_secs)
        } else {
            return Err(ConversionError::custom(token, target.to_string(), "missing unit"));
        };
        parsed
            .map(|duration| Some(duration_value(duration)))
            .map_err(|err| ConversionError::custom(token, target.to_string(), err))
    }
}

/// Doubles every integer argument before the default checks run.
struct Doubling;

impl ObjectArrayConversion for Doubling {
    fn convert(
        &self,
        data: &[Value],
        method: &TestMethod,
        row: usize,
    ) -> Result<ArgumentRow, ConversionError> {
        let doubled: Vec<Value> = data
            .iter()
            .map(|value| match value {
                Value::Int(n) => Value::Int(n * 2),
                other => other.clone(),
            })
            .collect();
        dataprovider::convert_object_row(&doubled, method, row)
    }
}

fn options() -> ProviderOptions {
    ProviderOptions::default().cache(false).format("%m(%p[0])")
}

#[test]
fn custom_string_hook_handles_its_type() {
    let method = TestMethod::new("net", "timeout")
        .param("after", ParamType::object::<Duration>())
        .param("retries", ParamType::of::<i32>());
    let provider = DataProvider::inline("timeouts", ["250ms, 1", "3s, 2"]).with_options(options());

    let Ok(expansion) = Expander::new()
        .string_converter(Arc::new(DurationConverter))
        .expand(&method, &provider)
    else {
        panic!("durations convert through the hook");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["timeout(250ms)", "timeout(3s)"]);
    let Some(first) = expansion.invocations().first() else {
        panic!("two invocations");
    };
    assert_eq!(
        first.values().first().and_then(|value| value.downcast_object::<Duration>()),
        Some(&Duration::from_millis(250))
    );

    let Err(err) = Expander::new().expand(&method, &provider) else {
        panic!("the default converter cannot build a `Duration`");
    };
    assert!(err.to_string().contains("not supported as parameter type"), "unexpected message: {err}");
}

#[test]
fn custom_hook_failures_surface_with_their_token() {
    let method = TestMethod::new("net", "timeout").param("after", ParamType::object::<Duration>());
    let provider = DataProvider::inline("bad-timeouts", ["soon"]).with_options(options());
    let Err(err) = Expander::new()
        .string_converter(Arc::new(DurationConverter))
        .expand(&method, &provider)
    else {
        panic!("`soon` has no unit");
    };
    assert!(
        err.to_string().contains("custom conversion of `soon` to type"),
        "unexpected message: {err}"
    );
}

#[test]
fn object_array_strategy_can_be_replaced() {
    let method = TestMethod::new("calc", "twice").param("n", ParamType::of::<i32>());
    let provider =
        DataProvider::new("twice", || dataprovider::table![[1], [21]]).with_options(options());
    let Ok(expansion) = Expander::new()
        .object_array_converter(Arc::new(Doubling))
        .expand(&method, &provider)
    else {
        panic!("doubled rows convert");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["twice(2)", "twice(42)"]);
}
