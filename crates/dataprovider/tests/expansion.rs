//! End-to-end expansion of providers into named invocations.

use dataprovider::{
    DataProvider, Expander, ExpansionError, ParamType, ProviderData, ProviderOptions, StdHarness,
    TestMethod, Value, cross_product, dataprovider_enum, row, table, test_for_each_enum,
};
use rstest::{fixture, rstest};

dataprovider_enum! {
    /// Shipping speeds.
    pub enum Speed {
        /// Ground shipping.
        Standard,
        /// Next-day delivery.
        Express,
    }
}

fn options(template: &str) -> ProviderOptions {
    ProviderOptions::default().cache(false).format(template)
}

#[fixture]
fn add() -> TestMethod {
    TestMethod::new("calc::tests", "testAdd")
        .param("a", ParamType::of::<i32>())
        .param("b", ParamType::of::<i32>())
        .param("expected", ParamType::of::<i32>())
}

#[rstest]
fn table_rows_drop_expected_value_from_names(add: TestMethod) {
    let provider = DataProvider::new("sums", || table![[-1, -1, -2], [0, 0, 0], [1, 2, 3]])
        .with_options(options("%m[%i: %p[0..-1]]"));
    let Ok(expansion) = Expander::new().expand(&add, &provider) else {
        panic!("table converts");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(
        names,
        ["testAdd[0: -1, -1]", "testAdd[1: 0, 0]", "testAdd[2: 1, 2]"]
    );
}

#[rstest]
fn inline_rows_convert_like_tables(add: TestMethod) {
    let provider = DataProvider::inline("inline-sums", ["1, 2, 3", " 4 ,5,9"])
        .with_options(options("%m(%na[0..-1])"));
    let Ok(expansion) = Expander::new().expand(&add, &provider) else {
        panic!("inline rows convert");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["testAdd(a=1, b=2)", "testAdd(a=4, b=5)"]);
    let Some(second) = expansion.invocations().get(1) else {
        panic!("two invocations");
    };
    assert_eq!(second.values(), row![4, 5, 9]);
}

#[rstest]
fn invocations_run_in_row_order(add: TestMethod) {
    let provider = DataProvider::new("run-sums", || table![[1, 1, 2], [2, 2, 5], [3, 3, 6]])
        .with_options(options("%m[%i]"));
    let Ok(expansion) = Expander::new().expand(&add, &provider) else {
        panic!("table converts");
    };
    let summary = expansion.run(&StdHarness::new(), |invocation| {
        let (Ok(a), Ok(b), Ok(expected)) = (
            invocation.arg::<i32>(0),
            invocation.arg::<i32>(1),
            invocation.arg::<i32>(2),
        ) else {
            return Err("arguments do not match the signature".to_owned());
        };
        if a + b == expected {
            Ok(())
        } else {
            Err(format!("{a} + {b} != {expected}"))
        }
    });
    assert_eq!(summary.test(), "calc::tests::testAdd");
    assert_eq!(summary.passed(), 2);
    let failures: Vec<&str> = summary.failures().map(|report| report.name()).collect();
    assert_eq!(failures, ["testAdd[1]"]);
}

#[test]
fn panicking_bodies_fail_only_their_row() {
    let method = TestMethod::new("m", "positive").param("n", ParamType::of::<i64>());
    let provider =
        DataProvider::new("signed", || ProviderData::array([1_i64, -2, 3])).with_options(options("%p[0]"));
    let Ok(expansion) = Expander::new().expand(&method, &provider) else {
        panic!("array converts");
    };
    let summary = expansion.run(&StdHarness::new(), |invocation| {
        let Ok(n) = invocation.arg::<i64>(0) else {
            panic!("argument is an i64");
        };
        assert!(n > 0, "{n} is not positive");
    });
    assert_eq!(summary.passed(), 2);
    let Some(failure) = summary.failures().next() else {
        panic!("one row fails");
    };
    assert_eq!(failure.name(), "-2");
    assert_eq!(failure.outcome().label(), "failed");
}

#[test]
fn method_aware_providers_see_the_method() {
    let provider = DataProvider::for_method("by-name", |method| {
        ProviderData::array([method.name().to_owned()])
    })
    .with_options(options("%m: %p[0]"));
    let method = TestMethod::new("m", "echo").param("name", ParamType::String);
    let Ok(expansion) = Expander::new().expand(&method, &provider) else {
        panic!("strings convert");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["echo: echo"]);
}

#[test]
fn enum_helpers_cover_every_variant() {
    let method = TestMethod::new("shop", "ships")
        .param("speed", ParamType::of::<Speed>())
        .param("days", ParamType::of::<i32>());
    let provider = DataProvider::new("speeds", || {
        let ProviderData::Table(speeds) = test_for_each_enum::<Speed>() else {
            return ProviderData::Table(Vec::new());
        };
        cross_product(&speeds, &[row![1], row![5]])
    })
    .with_options(options("%p[0..1]"));
    let Ok(expansion) = Expander::new().expand(&method, &provider) else {
        panic!("enum rows convert");
    };
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(
        names,
        ["Standard, 1", "Standard, 5", "Express, 1", "Express, 5"]
    );
    let speeds: Vec<Speed> = expansion
        .invocations()
        .iter()
        .filter_map(|invocation| invocation.arg::<Speed>(0).ok())
        .collect();
    assert_eq!(
        speeds,
        [Speed::Standard, Speed::Standard, Speed::Express, Speed::Express]
    );
}

#[test]
fn enum_tokens_respect_case_option() {
    let method = TestMethod::new("shop", "parse").param("speed", ParamType::of::<Speed>());
    let strict = DataProvider::inline("strict-speeds", ["express"]).with_options(options("%i"));
    let Err(err) = Expander::new().expand(&method, &strict) else {
        panic!("case-sensitive lookup rejects `express`");
    };
    assert!(err.to_string().contains("ignore_enum_case"));

    let relaxed = DataProvider::inline("relaxed-speeds", ["express"])
        .with_options(options("%i").ignore_enum_case(true));
    let Ok(expansion) = Expander::new().expand(&method, &relaxed) else {
        panic!("case-insensitive lookup accepts `express`");
    };
    let Some(invocation) = expansion.invocations().first() else {
        panic!("one invocation");
    };
    assert_eq!(invocation.arg::<Speed>(0).ok(), Some(Speed::Express));
}

#[rstest]
fn empty_datasets_are_errors(add: TestMethod) {
    let provider =
        DataProvider::new("nothing", || ProviderData::Table(Vec::new())).with_options(options("%i"));
    let Err(err) = Expander::new().expand(&add, &provider) else {
        panic!("an empty provider cannot expand");
    };
    assert!(matches!(err, ExpansionError::EmptyProvider { .. }));
    assert_eq!(err.provider(), "nothing");
}

#[rstest]
fn arity_mismatches_abort_expansion(add: TestMethod) {
    let provider = DataProvider::new("short", || table![[1, 2, 3], [1, 2]]).with_options(options("%i"));
    let Err(err) = Expander::new().expand(&add, &provider) else {
        panic!("the second row is too short");
    };
    assert!(
        err.to_string()
            .contains("test method has 3 parameters but got 2 arguments in row 1"),
        "unexpected message: {err}"
    );
}

#[test]
fn nullable_parameters_accept_null_markers() {
    let method = TestMethod::new("m", "maybe")
        .param("label", ParamType::String)
        .param("count", ParamType::of::<Option<i32>>());
    let provider = DataProvider::inline("maybe", ["null, null", "x, 2"]).with_options(options("%p[0..1]"));
    let Ok(expansion) = Expander::new().expand(&method, &provider) else {
        panic!("null markers convert");
    };
    let Some(first) = expansion.invocations().first() else {
        panic!("two invocations");
    };
    assert_eq!(first.values(), [Value::Null, Value::Null]);
    assert_eq!(first.arg::<Option<i32>>(1).ok(), Some(None));
    let names: Vec<&str> = expansion.names().collect();
    assert_eq!(names, ["<null>, <null>", "x, 2"]);
}
