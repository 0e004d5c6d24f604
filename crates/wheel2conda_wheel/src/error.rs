//! Error types for the wheel2conda_wheel crate

use std::path::PathBuf;

/// Errors raised while opening or validating a wheel.
///
/// Apart from [`WheelError::Io`] every variant describes a malformed or
/// unsupported wheel.
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a zip archive
    #[error("invalid wheel archive: {0}")]
    InvalidZip(String),

    /// The archive could not be unpacked
    #[error("failed to extract wheel: {0}")]
    Extraction(String),

    /// No `.dist-info` directory at the wheel root
    #[error("didn't find .dist-info directory")]
    MissingDistInfo,

    /// More than one `.dist-info` directory at the wheel root
    #[error("multiple .dist-info directories")]
    MultipleDistInfo,

    /// A `.dist-info` or `.data` entry that is a file
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// More than one `.data` directory at the wheel root
    #[error("multiple .data directories")]
    MultipleDataDirs,

    /// `Wheel-Version` is not `1.0`
    #[error("unsupported wheel format version {0}, only 1.0 is supported")]
    UnsupportedWheelVersion(String),

    /// `Root-Is-Purelib` is not `true`
    #[error("can't convert platform-specific (platlib) wheels")]
    PlatformSpecific,

    /// A required metadata field is absent
    #[error("missing required field {field} in {file}")]
    MissingField {
        /// The metadata file (`METADATA` or `WHEEL`)
        file: &'static str,
        /// The missing field
        field: &'static str,
    },

    /// A metadata line that is neither `key: value` nor a continuation
    #[error("malformed metadata in {} at line {line}: {content:?}", .path.display())]
    MalformedMetadata {
        /// The metadata file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },
}
