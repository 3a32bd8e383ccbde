//! Identity and signature of the test method being expanded.

use std::fmt;

use thiserror::Error;

use crate::types::ParamType;

/// A declared test parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    name: Option<String>,
    param_type: ParamType,
}

impl Parameter {
    /// A parameter with a known name.
    #[must_use]
    pub fn named(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: Some(name.into()),
            param_type,
        }
    }

    /// A parameter whose name is not available.
    #[must_use]
    pub const fn unnamed(param_type: ParamType) -> Self {
        Self {
            name: None,
            param_type,
        }
    }

    /// Declared name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared type.
    #[must_use]
    pub const fn param_type(&self) -> &ParamType {
        &self.param_type
    }
}

/// Raised when a test method declaration is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SignatureError {
    /// The method is variadic but declares no parameters at all.
    #[error("variadic test method `{method}` declares no parameters")]
    VariadicWithoutParameters {
        /// Qualified method name.
        method: String,
    },
    /// The method is variadic but its last parameter is not an array.
    #[error("variadic test method `{method}` must end in an array parameter but ends in `{found}`")]
    VariadicWithoutArray {
        /// Qualified method name.
        method: String,
        /// Declared type of the last parameter.
        found: String,
    },
}

/// The test method a provider is expanded for.
///
/// # Examples
/// ```
/// use dataprovider::{ParamType, TestMethod};
///
/// let method = TestMethod::new("calc::tests", "add")
///     .param("a", ParamType::of::<i32>())
///     .param("b", ParamType::of::<i32>())
///     .param("expected", ParamType::of::<i32>());
/// assert_eq!(method.class_name(), "tests");
/// assert_eq!(method.signature(), "calc::tests::add(i32, i32, i32)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestMethod {
    canonical_class_name: String,
    name: String,
    parameters: Vec<Parameter>,
    variadic: bool,
}

impl TestMethod {
    /// Describe method `name` declared in module `canonical_class_name`.
    #[must_use]
    pub fn new(canonical_class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            canonical_class_name: canonical_class_name.into(),
            name: name.into(),
            parameters: Vec::new(),
            variadic: false,
        }
    }

    /// Append a named parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.parameters.push(Parameter::named(name, param_type));
        self
    }

    /// Append a parameter whose name is not available.
    #[must_use]
    pub fn unnamed_param(mut self, param_type: ParamType) -> Self {
        self.parameters.push(Parameter::unnamed(param_type));
        self
    }

    /// Append a named trailing array parameter of `component` and mark the
    /// method variadic.
    #[must_use]
    pub fn variadic_param(mut self, name: impl Into<String>, component: ParamType) -> Self {
        self.parameters
            .push(Parameter::named(name, ParamType::array(component)));
        self.variadic = true;
        self
    }

    /// Mark the method variadic (or not) without adding a parameter.
    #[must_use]
    pub const fn variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }

    /// Last path segment of the owning module.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.canonical_class_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.canonical_class_name)
    }

    /// Fully qualified path of the owning module.
    #[must_use]
    pub fn canonical_class_name(&self) -> &str {
        &self.canonical_class_name
    }

    /// Bare method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `module::path::name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.canonical_class_name.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.canonical_class_name, self.name)
        }
    }

    /// Declared parameters in order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Declared parameter types in order.
    pub fn parameter_types(&self) -> impl ExactSizeIterator<Item = &ParamType> {
        self.parameters.iter().map(Parameter::param_type)
    }

    /// Whether the last parameter collects trailing arguments.
    #[must_use]
    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Whether every parameter has a known name.
    #[must_use]
    pub fn has_parameter_names(&self) -> bool {
        self.parameters.iter().all(|parameter| parameter.name.is_some())
    }

    /// Complete signature, e.g. `calc::tests::sum(i32, Vec<i32>)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.param_type.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({parameters})", self.qualified_name())
    }

    /// Check that a variadic declaration ends in an array parameter.
    ///
    /// # Errors
    /// Returns [`SignatureError`] when the method is variadic without a
    /// trailing array parameter.
    pub fn validate(&self) -> Result<(), SignatureError> {
        if !self.variadic {
            return Ok(());
        }
        match self.parameters.last() {
            None => Err(SignatureError::VariadicWithoutParameters {
                method: self.qualified_name(),
            }),
            Some(last) if last.param_type.component().is_none() => {
                Err(SignatureError::VariadicWithoutArray {
                    method: self.qualified_name(),
                    found: last.param_type.to_string(),
                })
            }
            Some(_) => Ok(()),
        }
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sum() -> TestMethod {
        TestMethod::new("calc::tests", "sum")
            .param("offset", ParamType::of::<i64>())
            .variadic_param("values", ParamType::of::<i32>())
    }

    #[rstest]
    fn renders_signature_with_variadic_array(sum: TestMethod) {
        assert_eq!(sum.signature(), "calc::tests::sum(i64, Vec<i32>)");
        assert!(sum.is_variadic());
        assert!(sum.validate().is_ok());
    }

    #[rstest]
    #[case("calc::tests", "tests")]
    #[case("tests", "tests")]
    #[case("", "")]
    fn simple_class_name_is_last_segment(#[case] canonical: &str, #[case] expected: &str) {
        assert_eq!(TestMethod::new(canonical, "m").class_name(), expected);
    }

    #[test]
    fn variadic_without_array_is_rejected() {
        let method = TestMethod::new("m", "broken")
            .param("x", ParamType::of::<i32>())
            .variadic(true);
        assert_eq!(
            method.validate(),
            Err(SignatureError::VariadicWithoutArray {
                method: "m::broken".into(),
                found: "i32".into(),
            })
        );
    }

    #[test]
    fn variadic_without_parameters_is_rejected() {
        let method = TestMethod::new("m", "empty").variadic(true);
        assert!(matches!(
            method.validate(),
            Err(SignatureError::VariadicWithoutParameters { .. })
        ));
    }

    #[test]
    fn reports_missing_parameter_names() {
        let method = TestMethod::new("m", "t")
            .param("a", ParamType::String)
            .unnamed_param(ParamType::String);
        assert!(!method.has_parameter_names());
        assert_eq!(method.parameters().get(1).and_then(Parameter::name), None);
    }
}
