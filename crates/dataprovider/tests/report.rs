//! JSON reports of executed expansions.

use dataprovider::{
    DataProvider, Expander, ParamType, ProviderData, ProviderOptions, StdHarness, TestMethod,
    report,
};

fn summary() -> dataprovider::RunSummary {
    let method = TestMethod::new("report", "small").param("n", ParamType::of::<i32>());
    let provider = DataProvider::new("sizes", || ProviderData::array([1, 50, 2]))
        .with_options(ProviderOptions::default().cache(false).format("%m(%p[0])"));
    let Ok(expansion) = Expander::new().expand(&method, &provider) else {
        panic!("array converts");
    };
    expansion.run(&StdHarness::new(), |invocation| match invocation.arg::<i32>(0) {
        Ok(n) if n < 10 => Ok(()),
        Ok(n) => Err(format!("{n} is too large")),
        Err(err) => Err(err.to_string()),
    })
}

#[test]
fn report_lists_every_invocation() {
    let mut buffer = Vec::new();
    assert!(report::write_json(&mut buffer, &[summary()]).is_ok());
    let Ok(parsed) = serde_json::from_slice::<serde_json::Value>(&buffer) else {
        panic!("report is valid JSON");
    };
    let field = |path: &str| parsed.pointer(path).cloned();
    assert_eq!(field("/runs/0/test"), Some("report::small".into()));
    assert_eq!(field("/runs/0/provider"), Some("sizes".into()));
    assert_eq!(field("/runs/0/passed"), Some(2.into()));
    assert_eq!(field("/runs/0/failed"), Some(1.into()));
    assert_eq!(field("/runs/0/invocations/1/name"), Some("small(50)".into()));
    assert_eq!(field("/runs/0/invocations/1/status"), Some("failed".into()));
    assert_eq!(
        field("/runs/0/invocations/1/message"),
        Some("50 is too large".into())
    );
    assert_eq!(field("/runs/0/invocations/2/message"), None);
}

#[test]
fn string_and_writer_forms_agree() {
    let summaries = [summary()];
    let mut buffer = Vec::new();
    assert!(report::write_json(&mut buffer, &summaries).is_ok());
    let Ok(text) = report::to_json_string(&summaries) else {
        panic!("report serializes");
    };
    assert_eq!(text.as_bytes(), buffer.as_slice());
}
