//! JSON writer for run summaries.
//!
//! Status labels are lowercase so downstream tools can rely on consistent
//! casing. Failure messages appear only on failed invocations.

use std::io::Write;

use serde::Serialize;

use crate::execution::{InvocationOutcome, InvocationReport, RunSummary};

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: Vec<JsonRun<'a>>,
}

#[derive(Serialize)]
struct JsonRun<'a> {
    test: &'a str,
    provider: &'a str,
    passed: usize,
    failed: usize,
    invocations: Vec<JsonInvocation<'a>>,
}

#[derive(Serialize)]
struct JsonInvocation<'a> {
    index: usize,
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<'a> From<&'a [RunSummary]> for JsonReport<'a> {
    fn from(summaries: &'a [RunSummary]) -> Self {
        Self {
            runs: summaries.iter().map(JsonRun::from).collect(),
        }
    }
}

impl<'a> From<&'a RunSummary> for JsonRun<'a> {
    fn from(summary: &'a RunSummary) -> Self {
        let passed = summary.passed();
        Self {
            test: summary.test(),
            provider: summary.provider(),
            passed,
            failed: summary.reports().len() - passed,
            invocations: summary.reports().iter().map(JsonInvocation::from).collect(),
        }
    }
}

impl<'a> From<&'a InvocationReport> for JsonInvocation<'a> {
    fn from(report: &'a InvocationReport) -> Self {
        let message = match report.outcome() {
            InvocationOutcome::Passed => None,
            InvocationOutcome::Failed { message } => Some(message.as_str()),
        };
        Self {
            index: report.index(),
            name: report.name(),
            status: report.outcome().label(),
            message,
        }
    }
}

/// Serialize `summaries` into `writer`.
///
/// # Examples
/// ```
/// use dataprovider::{DataProvider, Expander, ParamType, ProviderData, StdHarness, TestMethod, report};
///
/// let method = TestMethod::new("math", "positive").param("n", ParamType::of::<i32>());
/// let provider = DataProvider::new("numbers", || ProviderData::array([1, 2]));
/// let Ok(expansion) = Expander::new().expand(&method, &provider) else {
///     panic!("provider converts");
/// };
/// let summary = expansion.run(&StdHarness::new(), |_| ());
/// let mut buffer = Vec::new();
/// report::write_json(&mut buffer, &[summary]).ok();
/// let output = String::from_utf8(buffer).unwrap_or_default();
/// assert!(output.contains("\"status\":\"passed\""));
/// ```
///
/// # Errors
/// Returns an error when serialization or the writer fails.
pub fn write_json<W: Write>(writer: &mut W, summaries: &[RunSummary]) -> serde_json::Result<()> {
    serde_json::to_writer(writer, &JsonReport::from(summaries))
}

/// Serialize `summaries` into a JSON string.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_json_string(summaries: &[RunSummary]) -> serde_json::Result<String> {
    serde_json::to_string(&JsonReport::from(summaries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary::from_reports(
            "calc::add",
            "sums",
            vec![
                InvocationReport::new(0, "add[0: 1]", InvocationOutcome::Passed),
                InvocationReport::new(
                    1,
                    "add[1: 2]",
                    InvocationOutcome::Failed {
                        message: "boom".into(),
                    },
                ),
            ],
        )
    }

    #[test]
    fn serializes_counts_and_failure_messages() {
        let Ok(json) = to_json_string(&[summary()]) else {
            panic!("summary serializes");
        };
        let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&json) else {
            panic!("output parses");
        };
        let field = |path: &str| parsed.pointer(path).cloned();
        assert_eq!(field("/runs/0/test"), Some("calc::add".into()));
        assert_eq!(field("/runs/0/passed"), Some(1.into()));
        assert_eq!(field("/runs/0/failed"), Some(1.into()));
        assert_eq!(field("/runs/0/invocations/0/status"), Some("passed".into()));
        assert_eq!(field("/runs/0/invocations/0/message"), None);
        assert_eq!(field("/runs/0/invocations/1/message"), Some("boom".into()));
    }
}
