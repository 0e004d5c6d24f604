//! Native Windows launchers for console scripts
//!
//! On Windows a console script is a `<name>-script.py` file next to a small
//! `<name>.exe` that runs it. The executables are prebuilt and copied into
//! the package unchanged.

use std::{fmt, path::PathBuf};

use wheel2conda_markers::{Bitness, TargetEnvironment};

use crate::{PackageError, Result};

/// Launcher architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LauncherArch {
    /// 64-bit Windows
    X64,
    /// 32-bit Windows
    X86,
}

impl LauncherArch {
    /// The launcher matching the bitness of `target`
    pub fn for_target(target: &TargetEnvironment) -> Self {
        match target.bitness() {
            Bitness::Bits64 => LauncherArch::X64,
            Bitness::Bits32 => LauncherArch::X86,
        }
    }

    /// `x64` or `x86`
    pub fn as_str(&self) -> &'static str {
        match self {
            LauncherArch::X64 => "x64",
            LauncherArch::X86 => "x86",
        }
    }

    /// File name of the launcher in a [`LauncherDirectory`]
    pub fn file_name(&self) -> &'static str {
        match self {
            LauncherArch::X64 => "cli-64.exe",
            LauncherArch::X86 => "cli-32.exe",
        }
    }
}

impl fmt::Display for LauncherArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of launcher executables
pub trait LauncherProvider {
    /// Path to the launcher for `arch`
    fn find_launcher(&self, arch: LauncherArch) -> Result<PathBuf>;
}

/// Launchers stored as `cli-64.exe` and `cli-32.exe` in one directory
#[derive(Debug, Clone)]
pub struct LauncherDirectory {
    dir: PathBuf,
}

impl LauncherDirectory {
    /// Use the launchers in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LauncherProvider for LauncherDirectory {
    fn find_launcher(&self, arch: LauncherArch) -> Result<PathBuf> {
        let path = self.dir.join(arch.file_name());
        if path.is_file() {
            Ok(path)
        } else {
            Err(PackageError::LauncherNotFound(path))
        }
    }
}

/// Used when no launchers are available. Building packages without
/// console scripts, or for Linux and macOS, still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLaunchers;

impl LauncherProvider for NoLaunchers {
    fn find_launcher(&self, _arch: LauncherArch) -> Result<PathBuf> {
        Err(PackageError::NoLauncherProvider)
    }
}
