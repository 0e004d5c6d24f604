//! The synthetic environment a conda package is being built for

use std::fmt;

use rattler_conda_types::Platform;

use crate::MarkerError;

/// The platforms a pure-Python wheel can be converted for.
pub const SUPPORTED_PLATFORMS: [Platform; 5] = [
    Platform::Linux64,
    Platform::Linux32,
    Platform::Osx64,
    Platform::Win64,
    Platform::Win32,
];

/// Operating system family of a target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    /// `linux-*`
    Linux,
    /// `osx-*`
    Osx,
    /// `win-*`
    Windows,
}

impl TargetOs {
    /// The conda platform name (`linux`, `osx` or `win`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Osx => "osx",
            TargetOs::Windows => "win",
        }
    }

    /// Value of `sys.platform` on this operating system
    pub fn sys_platform(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Osx => "darwin",
            TargetOs::Windows => "win32",
        }
    }

    /// Value of `os.name` on this operating system
    pub fn os_name(&self) -> &'static str {
        match self {
            TargetOs::Linux | TargetOs::Osx => "posix",
            TargetOs::Windows => "nt",
        }
    }

    /// Value of `platform.system()` on this operating system
    pub fn platform_system(&self) -> &'static str {
        match self {
            TargetOs::Linux => "Linux",
            TargetOs::Osx => "Darwin",
            TargetOs::Windows => "Windows",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer width of a target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitness {
    /// 32-bit (`x86`)
    Bits32,
    /// 64-bit (`x86_64`)
    Bits64,
}

impl Bitness {
    /// `"32"` or `"64"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Bitness::Bits32 => "32",
            Bitness::Bits64 => "64",
        }
    }

    /// Value of `platform.machine()` for this bitness
    pub fn platform_machine(&self) -> &'static str {
        match self {
            Bitness::Bits32 => "i386",
            Bitness::Bits64 => "x86_64",
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Python version and conda platform that a package is built for.
///
/// Markers are evaluated against this environment, and the package layout
/// (site-packages location, script directory) is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnvironment {
    python_version: String,
    platform: Platform,
    os: TargetOs,
    bitness: Bitness,
}

impl TargetEnvironment {
    /// Create a target environment for a `major.minor` Python version and a
    /// conda platform. Only the platforms in [`SUPPORTED_PLATFORMS`] are
    /// accepted.
    pub fn new(python_version: impl Into<String>, platform: Platform) -> Result<Self, MarkerError> {
        let (os, bitness) = match platform {
            Platform::Linux64 => (TargetOs::Linux, Bitness::Bits64),
            Platform::Linux32 => (TargetOs::Linux, Bitness::Bits32),
            Platform::Osx64 => (TargetOs::Osx, Bitness::Bits64),
            Platform::Win64 => (TargetOs::Windows, Bitness::Bits64),
            Platform::Win32 => (TargetOs::Windows, Bitness::Bits32),
            other => return Err(MarkerError::UnsupportedPlatform(other)),
        };

        Ok(Self {
            python_version: python_version.into(),
            platform,
            os,
            bitness,
        })
    }

    /// The `major.minor` Python version, e.g. `3.6`
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    /// The Python version without the dot, e.g. `36`
    pub fn python_version_nodot(&self) -> String {
        self.python_version.replace('.', "")
    }

    /// The full Python version. Builds target any patch release, so this is
    /// always the `.0` release.
    pub fn python_full_version(&self) -> String {
        format!("{}.0", self.python_version)
    }

    /// The conda platform, e.g. `linux-64`
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Operating system family
    pub fn os(&self) -> TargetOs {
        self.os
    }

    /// Pointer width
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// Whether this targets Windows
    pub fn is_windows(&self) -> bool {
        self.os == TargetOs::Windows
    }
}

impl fmt::Display for TargetEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Python {}", self.platform, self.python_version)
    }
}
