//! Configuration for the wheel2conda tool
//! This is useful when using wheel2conda as a library

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indicatif::MultiProgress;
use rattler_conda_types::Platform;
use wheel2conda_markers::SUPPORTED_PLATFORMS;

/// Python versions a wheel is converted for, unless restricted
pub const PYTHON_VERSIONS: [&str; 4] = ["3.6", "3.5", "3.4", "2.7"];

/// Global configuration for a conversion run
#[derive(Clone, Debug)]
pub struct Configuration {
    /// Directory that receives one subdirectory per platform
    pub output_dir: PathBuf,

    /// Candidate Python versions, filtered per wheel
    pub python_versions: Vec<String>,

    /// Platforms to build packages for
    pub platforms: Vec<Platform>,

    /// Directory holding `cli-64.exe` and `cli-32.exe`, needed for Windows
    /// packages of wheels with console scripts
    pub launcher_dir: Option<PathBuf>,

    /// bzip2 compression level (1-9)
    pub compression_level: u32,

    /// Modification time of every archive entry.
    pub timestamp: Option<DateTime<Utc>>,

    /// Progress bars are drawn here, log lines are printed above them
    pub multi_progress: MultiProgress,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            python_versions: PYTHON_VERSIONS.iter().map(ToString::to_string).collect(),
            platforms: SUPPORTED_PLATFORMS.to_vec(),
            launcher_dir: None,
            compression_level: 9,
            timestamp: None,
            multi_progress: MultiProgress::new(),
        }
    }
}
