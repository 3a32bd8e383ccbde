//! Unit tests for expansion.

use rstest::{fixture, rstest};

use super::*;
use crate::convert::{ConversionError, ProviderData};
use crate::placeholder::FormatError;
use crate::provider::ProviderOptions;
use crate::types::ParamType;

fn uncached() -> ProviderOptions {
    ProviderOptions::default().cache(false)
}

#[fixture]
fn add() -> TestMethod {
    TestMethod::new("calc::tests", "testAdd")
        .param("a", ParamType::of::<i32>())
        .param("b", ParamType::of::<i32>())
        .param("expected", ParamType::of::<i32>())
}

#[rstest]
fn names_follow_default_template(add: TestMethod) {
    let provider = DataProvider::new("expansion::tests::table", || {
        ProviderData::table([[-1, -1, -2], [0, 0, 0], [1, 2, 3]])
    })
    .with_options(uncached().format(crate::config::DEFAULT_FORMAT));
    let Ok(expansion) = Expander::new().expand(&add, &provider) else {
        panic!("table converts");
    };
    assert_eq!(expansion.len(), 3);
    assert_eq!(expansion.provider(), "expansion::tests::table");
    assert_eq!(
        expansion.names().collect::<Vec<_>>(),
        ["testAdd[0: -1, -1]", "testAdd[1: 0, 0]", "testAdd[2: 1, 2]"]
    );
    assert!(expansion.invocations().iter().all(|invocation| invocation.values().len() == 3));
}

#[rstest]
fn empty_provider_is_rejected(add: TestMethod) {
    let provider = DataProvider::new("expansion::tests::empty", || {
        ProviderData::table(Vec::<Vec<i32>>::new())
    })
    .with_options(uncached());
    assert!(matches!(
        Expander::new().expand(&add, &provider),
        Err(ExpansionError::EmptyProvider { .. })
    ));
}

#[rstest]
fn conversion_failures_name_the_provider(add: TestMethod) {
    let provider = DataProvider::inline("expansion::tests::bad", ["1, 2, x"])
        .with_options(uncached());
    let Err(err) = Expander::new().expand(&add, &provider) else {
        panic!("`x` is not an i32");
    };
    assert_eq!(err.provider(), "expansion::tests::bad");
    assert!(matches!(
        err,
        ExpansionError::Conversion {
            source: ConversionError::InRow { row: 0, parameter: 2, .. },
            ..
        }
    ));
}

#[rstest]
fn invalid_delimiter_is_a_configuration_error(add: TestMethod) {
    let provider = DataProvider::inline("expansion::tests::delimiter", ["1"])
        .with_options(uncached().split_by("("));
    assert!(matches!(
        Expander::new().expand(&add, &provider),
        Err(ExpansionError::Configuration { .. })
    ));
}

#[rstest]
fn out_of_range_template_fails_with_index(add: TestMethod) {
    let provider = DataProvider::inline("expansion::tests::format", ["1, 2, 3"])
        .with_options(uncached().format("%m %p[3]"));
    assert!(matches!(
        Expander::new().expand(&add, &provider),
        Err(ExpansionError::Format {
            index: 0,
            source: FormatError::Subscript { .. },
            ..
        })
    ));
}

#[test]
fn broken_signature_is_reported() {
    let method = TestMethod::new("m", "t")
        .param("x", ParamType::of::<i32>())
        .variadic(true);
    let provider = DataProvider::inline("expansion::tests::signature", ["1"])
        .with_options(uncached());
    assert!(matches!(
        Expander::new().expand(&method, &provider),
        Err(ExpansionError::Signature { .. })
    ));
}

#[rstest]
fn custom_formatter_is_used(add: TestMethod) {
    struct Fixed;

    impl TestNameFormatter for Fixed {
        fn format(
            &self,
            _template: &str,
            context: &ReplacementContext<'_>,
        ) -> Result<String, FormatError> {
            Ok(format!("case-{}", context.index()))
        }
    }

    let provider = DataProvider::inline("expansion::tests::formatter", ["1, 2, 3"])
        .with_options(uncached());
    let names = Expander::new()
        .expand_with(&add, &provider, &Fixed)
        .map(|expansion| expansion.names().map(str::to_owned).collect::<Vec<_>>())
        .ok();
    assert_eq!(names, Some(vec!["case-0".to_owned()]));
}

#[rstest]
fn invocation_arguments_read_back_typed(add: TestMethod) {
    let provider = DataProvider::inline("expansion::tests::typed", ["4, 5, 9"])
        .with_options(uncached());
    let Ok(expansion) = Expander::new().expand(&add, &provider) else {
        panic!("row converts");
    };
    let Some(invocation) = expansion.invocations().first() else {
        panic!("one invocation");
    };
    assert_eq!(invocation.index(), 0);
    assert_eq!(invocation.arg::<i64>(2).ok(), Some(9));
    assert!(invocation.arg::<i32>(3).is_err());
}
