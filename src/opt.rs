//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, crate_version};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rattler_conda_types::Platform;
use wheel2conda_markers::SUPPORTED_PLATFORMS;

use crate::tool_configuration::{Configuration, PYTHON_VERSIONS};

/// Convert a pure-Python wheel into conda packages for several platforms
/// and Python versions.
#[derive(Parser, Debug)]
#[clap(version = crate_version!())]
pub struct App {
    /// The wheel file to convert
    pub wheel_file: PathBuf,

    /// Directory that receives one subdirectory per platform.
    #[arg(short, long, env = "WHEEL2CONDA_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Python version to build for (e.g. `3.6`). Can be repeated.
    /// Defaults to 3.6, 3.5, 3.4 and 2.7; versions the wheel does not
    /// support are skipped.
    #[arg(long = "python", value_parser = parse_python_version)]
    pub python_versions: Vec<String>,

    /// Platform to build for. Can be repeated.
    /// Defaults to linux-64, linux-32, osx-64, win-64 and win-32.
    #[arg(long = "target-platform", value_parser = parse_platform)]
    pub target_platforms: Vec<Platform>,

    /// Directory containing the Windows launchers `cli-64.exe` and
    /// `cli-32.exe`. Required for Windows packages of wheels with console
    /// scripts.
    #[arg(long, env = "WHEEL2CONDA_LAUNCHER_DIR")]
    pub launcher_dir: Option<PathBuf>,

    /// bzip2 compression level of the packages.
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..=9))]
    pub compression_level: u32,

    /// Modification time stored for every file in the packages, in RFC3339
    /// format. Defaults to the start of the run.
    #[arg(long, value_parser = parse_datetime)]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,

    /// Enable verbose logging.
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl App {
    /// Resolve the options into a [`Configuration`]
    pub fn configuration(&self) -> Configuration {
        let python_versions = if self.python_versions.is_empty() {
            PYTHON_VERSIONS.iter().map(ToString::to_string).collect()
        } else {
            self.python_versions.clone()
        };
        let platforms = if self.target_platforms.is_empty() {
            SUPPORTED_PLATFORMS.to_vec()
        } else {
            self.target_platforms.clone()
        };

        Configuration {
            output_dir: self.output_dir.clone(),
            python_versions,
            platforms,
            launcher_dir: self.launcher_dir.clone(),
            compression_level: self.compression_level,
            timestamp: Some(self.timestamp.unwrap_or_else(chrono::Utc::now)),
            ..Configuration::default()
        }
    }
}

/// Parse a `major.minor` Python version
fn parse_python_version(s: &str) -> Result<String, String> {
    match s.split_once('.') {
        Some((major, minor))
            if !major.is_empty()
                && !minor.is_empty()
                && major.chars().chain(minor.chars()).all(|c| c.is_ascii_digit()) =>
        {
            Ok(s.to_string())
        }
        _ => Err(format!(
            "Invalid Python version '{s}'. Expected major.minor (e.g., 3.6)"
        )),
    }
}

/// Parse one of the platforms a pure-Python wheel can be converted for
fn parse_platform(s: &str) -> Result<Platform, String> {
    let supported = || {
        SUPPORTED_PLATFORMS
            .iter()
            .map(|platform| platform.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    s.parse::<Platform>()
        .ok()
        .filter(|platform| SUPPORTED_PLATFORMS.contains(platform))
        .ok_or_else(|| format!("Unsupported platform '{s}'. Expected one of {}", supported()))
}

/// Parse a datetime string in RFC3339 format
fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, String> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| {
            format!(
                "Invalid datetime format '{}': {}. Expected RFC3339 format (e.g., 2024-03-15T12:00:00Z)",
                s, e
            )
        })
}
