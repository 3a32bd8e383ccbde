//! Registering additional name placeholders.

use dataprovider::{
    DataProvider, Expander, FormatError, FromValue, ParamType, Placeholder, PlaceholderFormatter,
    ProviderOptions, ReplacementContext, TestMethod, format_argument, table,
};

fn upper_method() -> Placeholder {
    let Ok(placeholder) = Placeholder::new("upper-method", "%um", |_token, context| {
        Ok(context.method().name().to_uppercase())
    }) else {
        panic!("placeholder pattern compiles");
    };
    placeholder
}

/// `%sum` renders the sum of all integer arguments.
fn sum_of_arguments() -> Placeholder {
    let Ok(placeholder) = Placeholder::new("sum", "%sum", |_token, context: &ReplacementContext<'_>| {
        context
            .arguments()
            .iter()
            .map(i64::from_value)
            .sum::<Result<i64, _>>()
            .map(|total| total.to_string())
            .map_err(|err| FormatError::other(err.to_string()))
    }) else {
        panic!("placeholder pattern compiles");
    };
    placeholder
}

fn method() -> TestMethod {
    TestMethod::new("calc::tests", "add")
        .param("a", ParamType::of::<i32>())
        .param("b", ParamType::of::<i32>())
}

fn provider(template: &str) -> DataProvider {
    DataProvider::new("pairs", || table![[1, 2], [30, 12]])
        .with_options(ProviderOptions::default().cache(false).format(template))
}

#[test]
fn expander_placeholders_extend_the_builtins() {
    let expander = Expander::new()
        .with_placeholder(upper_method())
        .with_placeholder(sum_of_arguments());
    let Ok(expansion) = expander.expand(&method(), &provider("%um %p[0..1] = %sum")) else {
        panic!("template resolves");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["ADD 1, 2 = 3", "ADD 30, 12 = 42"]);
}

#[test]
fn per_call_formatter_replaces_the_default() {
    let formatter = PlaceholderFormatter::new(vec![upper_method()]);
    let Ok(expansion) = Expander::new().expand_with(&method(), &provider("%um/%m/%i"), &formatter) else {
        panic!("template resolves");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["ADD/%m/%i", "ADD/%m/%i"]);
}

#[test]
fn failing_placeholders_abort_expansion() {
    let failing = match Placeholder::new("first", "%first", |_token, context| {
        context
            .arguments()
            .first()
            .filter(|value| !value.is_null())
            .map(format_argument)
            .ok_or_else(|| FormatError::other("no first argument"))
    }) {
        Ok(placeholder) => placeholder,
        Err(err) => panic!("placeholder pattern compiles: {err}"),
    };
    let method = TestMethod::new("m", "maybe").param("value", ParamType::of::<Option<i32>>());
    let provider = DataProvider::inline("maybe-first", ["1", "null"])
        .with_options(ProviderOptions::default().cache(false).format("%first"));
    let Err(err) = Expander::new().with_placeholder(failing).expand(&method, &provider) else {
        panic!("the second row has no first argument");
    };
    assert!(err.to_string().contains("no first argument"), "unexpected message: {err}");
}

#[test]
fn removing_a_builtin_leaves_its_token_verbatim() {
    let mut formatter = PlaceholderFormatter::default();
    assert!(formatter.remove(dataprovider::placeholder::INDEX).is_some());
    let Ok(expansion) = Expander::new().with_formatter(formatter).expand(&method(), &provider("%m[%i]")) else {
        panic!("template resolves");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["add[%i]", "add[%i]"]);
}
