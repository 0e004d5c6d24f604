//! Error types for the wheel2conda_package crate

use std::path::PathBuf;

use miette::Diagnostic;
use wheel2conda_markers::MarkerError;
use wheel2conda_wheel::WheelError;

/// Result type alias using PackageError
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur during package creation
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum PackageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize JSON
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Failed to read or write a RECORD file
    #[error("Failed to process RECORD: {0}")]
    Record(#[from] csv::Error),

    /// WalkDir error
    #[error("Failed to walk directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Failed to strip prefix from path
    #[error("Could not strip prefix from path: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// `entry_points.txt` is not a valid ini file
    #[error("Invalid entry_points.txt at {}: {message}", .path.display())]
    InvalidEntryPoints {
        /// Path of the file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A console script entry point is not of the form `module:function`
    #[error("Bad entry point: {name} = {value:?}")]
    #[diagnostic(
        code(wheel2conda::package::bad_entry_point),
        help("console scripts must look like `name = module:function`")
    )]
    BadEntryPoint {
        /// Script name
        name: String,
        /// The raw value
        value: String,
    },

    /// The wheel version is not a valid conda version
    #[error("Invalid package version {version:?}: {source}")]
    InvalidVersion {
        /// The version from the wheel metadata
        version: String,
        /// Parser error
        source: rattler_conda_types::ParseVersionError,
    },

    /// A `.data` subdirectory other than `data`
    #[error("{0} under .data directory is not supported")]
    #[diagnostic(
        code(wheel2conda::package::unsupported_data_layout),
        help("only files under `<name>.data/data/` can be converted")
    )]
    UnsupportedDataLayout(String),

    /// A launcher executable is missing from the launcher directory
    #[error("Windows launcher not found: {}", .0.display())]
    LauncherNotFound(PathBuf),

    /// A Windows package needs launchers but none were configured
    #[error("No Windows launcher executables are configured")]
    #[diagnostic(
        code(wheel2conda::package::no_launchers),
        help("pass --launcher-dir pointing at a directory containing cli-64.exe and cli-32.exe")
    )]
    NoLauncherProvider,

    /// Failed to evaluate an environment marker
    #[error(transparent)]
    #[diagnostic(transparent)]
    Marker(#[from] MarkerError),

    /// The wheel is malformed
    #[error(transparent)]
    Wheel(#[from] WheelError),
}
