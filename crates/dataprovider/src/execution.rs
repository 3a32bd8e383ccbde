//! Running the invocations of an expansion.
//!
//! Each invocation runs through a [`HarnessAdapter`]. A panicking body fails
//! only its own invocation; the summary collects every outcome so one report
//! lists all failing rows.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use dataprovider_harness::{HarnessAdapter, InvocationMetadata, InvocationRequest};

use crate::expansion::{Expansion, TestInvocation};
use crate::panic::panic_message;

/// Result of one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The body completed.
    Passed,
    /// The body panicked or returned an error.
    Failed {
        /// Panic or error message.
        message: String,
    },
}

impl InvocationOutcome {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
        }
    }

    /// Whether the invocation passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Return values a test body may produce.
pub trait IntoOutcome {
    /// Classify the return value.
    fn into_outcome(self) -> InvocationOutcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> InvocationOutcome {
        InvocationOutcome::Passed
    }
}

impl<E: fmt::Display> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> InvocationOutcome {
        match self {
            Ok(()) => InvocationOutcome::Passed,
            Err(err) => InvocationOutcome::Failed {
                message: err.to_string(),
            },
        }
    }
}

/// Outcome of one named invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationReport {
    index: usize,
    name: String,
    outcome: InvocationOutcome,
}

impl InvocationReport {
    pub(crate) fn new(index: usize, name: impl Into<String>, outcome: InvocationOutcome) -> Self {
        Self {
            index,
            name: name.into(),
            outcome,
        }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Display name of the invocation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What happened.
    #[must_use]
    pub const fn outcome(&self) -> &InvocationOutcome {
        &self.outcome
    }
}

/// Outcomes of every invocation of one expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    test: String,
    provider: String,
    reports: Vec<InvocationReport>,
}

impl RunSummary {
    pub(crate) fn from_reports(
        test: impl Into<String>,
        provider: impl Into<String>,
        reports: Vec<InvocationReport>,
    ) -> Self {
        Self {
            test: test.into(),
            provider: provider.into(),
            reports,
        }
    }

    /// Qualified name of the test method.
    #[must_use]
    pub fn test(&self) -> &str {
        &self.test
    }

    /// Name of the provider.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Per-invocation reports in row order.
    #[must_use]
    pub fn reports(&self) -> &[InvocationReport] {
        &self.reports
    }

    /// Number of passed invocations.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome.is_passed())
            .count()
    }

    /// Reports of failed invocations.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationReport> {
        self.reports
            .iter()
            .filter(|report| !report.outcome.is_passed())
    }

    /// Whether every invocation passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Panic listing every failed invocation, if any.
    ///
    /// # Panics
    /// Panics when at least one invocation failed.
    #[track_caller]
    pub fn assert_all_passed(&self) {
        let failures: Vec<String> = self
            .failures()
            .map(|report| match &report.outcome {
                InvocationOutcome::Failed { message } => format!("  {}: {message}", report.name),
                InvocationOutcome::Passed => format!("  {}", report.name),
            })
            .collect();
        assert!(
            failures.is_empty(),
            "{} of {} invocation(s) of `{}` failed:\n{}",
            failures.len(),
            self.reports.len(),
            self.test,
            failures.join("\n")
        );
    }
}

impl Expansion {
    /// Run `body` for every invocation through `harness`.
    ///
    /// Panics raised by `body` are caught per invocation and recorded as
    /// failures; bodies returning `Result` fail on `Err`.
    ///
    /// # Examples
    /// ```
    /// use dataprovider::{DataProvider, Expander, ParamType, ProviderData, StdHarness, TestMethod};
    ///
    /// let method = TestMethod::new("math", "is_even").param("n", ParamType::of::<i32>());
    /// let provider = DataProvider::new("evens", || ProviderData::array([2, 4, 5]));
    /// let Ok(expansion) = Expander::new().expand(&method, &provider) else {
    ///     panic!("provider converts");
    /// };
    /// let summary = expansion.run(&StdHarness::new(), |invocation| {
    ///     let n: i32 = invocation.arg(0).map_err(|err| err.to_string())?;
    ///     if n % 2 == 0 { Ok(()) } else { Err(format!("{n} is odd")) }
    /// });
    /// assert_eq!(summary.passed(), 2);
    /// assert!(!summary.all_passed());
    /// ```
    pub fn run<H, F, R>(&self, harness: &H, body: F) -> RunSummary
    where
        H: HarnessAdapter,
        F: Fn(&TestInvocation) -> R,
        R: IntoOutcome,
    {
        let test = self.method().qualified_name();
        let reports = self
            .invocations()
            .iter()
            .map(|invocation| {
                let metadata =
                    InvocationMetadata::new(test.clone(), invocation.name(), invocation.index());
                let request = InvocationRequest::new(metadata, || {
                    catch_unwind(AssertUnwindSafe(|| body(invocation).into_outcome()))
                        .unwrap_or_else(|payload| InvocationOutcome::Failed {
                            message: panic_message(payload.as_ref()),
                        })
                });
                let outcome = harness.run(request);
                log::debug!("{} {}", invocation.name(), outcome.label());
                InvocationReport::new(invocation.index(), invocation.name(), outcome)
            })
            .collect();
        RunSummary::from_reports(test, self.provider(), reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Ok(()), InvocationOutcome::Passed)]
    #[case(Err("bad row"), InvocationOutcome::Failed { message: "bad row".into() })]
    fn results_classify_outcomes(
        #[case] result: Result<(), &str>,
        #[case] expected: InvocationOutcome,
    ) {
        assert_eq!(result.into_outcome(), expected);
    }

    #[test]
    fn failing_summary_lists_every_failure() {
        let summary = RunSummary::from_reports(
            "m::t",
            "p",
            vec![
                InvocationReport::new(0, "t[0]", InvocationOutcome::Passed),
                InvocationReport::new(1, "t[1]", InvocationOutcome::Failed { message: "one".into() }),
                InvocationReport::new(2, "t[2]", InvocationOutcome::Failed { message: "two".into() }),
            ],
        );
        assert_eq!(summary.passed(), 1);
        let result = std::panic::catch_unwind(|| summary.assert_all_passed());
        let Err(payload) = result else {
            panic!("assertion should fail");
        };
        let message = panic_message(payload.as_ref());
        assert!(message.starts_with("2 of 3 invocation(s) of `m::t` failed:"));
        assert!(message.contains("  t[1]: one\n  t[2]: two"));
    }
}
