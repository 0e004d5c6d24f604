//! Error types for marker parsing and evaluation

use miette::{Diagnostic, SourceSpan};
use rattler_conda_types::Platform;
use thiserror::Error;

/// A marker expression that could not be parsed.
///
/// Carries the full marker text so that [`miette`] can point at the
/// offending position.
#[derive(Debug, Error, Diagnostic)]
#[error("failed to parse environment marker: {message}")]
#[diagnostic(code(wheel2conda::marker::parse))]
pub struct MarkerParseError {
    /// The marker text.
    #[source_code]
    pub src: String,

    /// Where parsing failed.
    #[label("here")]
    pub span: SourceSpan,

    /// What was expected.
    pub message: String,
}

impl MarkerParseError {
    pub(crate) fn new(src: &str, offset: usize, len: usize, message: impl Into<String>) -> Self {
        Self {
            src: src.to_owned(),
            span: (offset, len).into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while evaluating an environment marker
#[derive(Debug, Error, Diagnostic)]
pub enum MarkerError {
    /// The marker text is not a valid expression
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] MarkerParseError),

    /// The marker refers to a variable that cannot be derived from the
    /// target environment
    #[error("unsupported environment marker variable: `{0}`")]
    #[diagnostic(
        code(wheel2conda::marker::unsupported_variable),
        help("markers are evaluated for a platform and Python version only, so variables such as `platform_release` are unknown")
    )]
    UnsupportedVariable(String),

    /// The operands of a version-only operator are not versions
    #[error("cannot compare `{lhs}` {operator} `{rhs}`")]
    #[diagnostic(code(wheel2conda::marker::invalid_comparison))]
    InvalidComparison {
        /// Left operand after substitution
        lhs: String,
        /// The operator
        operator: String,
        /// Right operand after substitution
        rhs: String,
    },

    /// Markers can only be evaluated for a fixed set of platforms
    #[error("unsupported target platform: {0}")]
    #[diagnostic(code(wheel2conda::marker::unsupported_platform))]
    UnsupportedPlatform(Platform),
}
