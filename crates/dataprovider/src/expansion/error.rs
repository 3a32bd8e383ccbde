//! Errors raised while expanding a provider into invocations.

use thiserror::Error;

use crate::context::ConfigError;
use crate::convert::ConversionError;
use crate::method::SignatureError;
use crate::placeholder::FormatError;

/// Raised when a test method cannot be expanded.
///
/// Every variant names the provider so a failing setup points straight at the
/// data it came from.
///
/// # Examples
///
/// ```
/// use dataprovider::ExpansionError;
///
/// let error = ExpansionError::EmptyProvider {
///     provider: "primes".into(),
///     method: "math::is_prime".into(),
/// };
/// assert_eq!(error.provider(), "primes");
/// assert_eq!(
///     error.to_string(),
///     "data provider `primes` returned no rows for `math::is_prime`, so nothing would run"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExpansionError {
    /// The provider produced no rows.
    #[error("data provider `{provider}` returned no rows for `{method}`, so nothing would run")]
    EmptyProvider {
        /// Provider name.
        provider: String,
        /// Qualified test method name.
        method: String,
    },
    /// The provider's options are invalid.
    #[error("data provider `{provider}` is misconfigured: {source}")]
    Configuration {
        /// Provider name.
        provider: String,
        /// Underlying failure.
        #[source]
        source: ConfigError,
    },
    /// A row could not be converted.
    #[error("data provider `{provider}` supplied unusable data: {source}")]
    Conversion {
        /// Provider name.
        provider: String,
        /// Underlying failure.
        #[source]
        source: ConversionError,
    },
    /// The name of an invocation could not be built.
    #[error("cannot name invocation {index} of data provider `{provider}`: {source}")]
    Format {
        /// Provider name.
        provider: String,
        /// Zero-based row index.
        index: usize,
        /// Underlying failure.
        #[source]
        source: FormatError,
    },
    /// The test method declaration is inconsistent.
    #[error("data provider `{provider}` cannot feed the test method: {source}")]
    Signature {
        /// Provider name.
        provider: String,
        /// Underlying failure.
        #[source]
        source: SignatureError,
    },
}

impl ExpansionError {
    /// Name of the provider involved.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::EmptyProvider { provider, .. }
            | Self::Configuration { provider, .. }
            | Self::Conversion { provider, .. }
            | Self::Format { provider, .. }
            | Self::Signature { provider, .. } => provider,
        }
    }
}
