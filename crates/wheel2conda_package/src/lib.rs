//! # wheel2conda_package
//!
//! Builds conda `.tar.bz2` packages from unpacked pure-Python wheels.
//!
//! For one [`TargetEnvironment`] the [`PackageBuilder`]:
//!
//! - places the wheel's modules and `.dist-info` in site-packages
//! - moves `<name>.data/data/` to the prefix root
//! - generates console scripts (plus `.exe` launchers on Windows)
//! - rewrites the PEP 376 `RECORD` for the conda layout
//! - writes `info/index.json`, `info/has_prefix` and `info/files`
//!
//! Files are stored in the order they are written, and with a pinned
//! timestamp the same inputs give byte-identical archives.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use rattler_conda_types::Platform;
//! use wheel2conda_markers::TargetEnvironment;
//! use wheel2conda_package::{LauncherDirectory, PackageBuilder, PackageConfig, archive_file_name};
//! use wheel2conda_wheel::WheelContents;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let wheel = WheelContents::from_wheel_file(Path::new("mypkg-1.0-py3-none-any.whl"))?;
//! let launchers = LauncherDirectory::new("launchers");
//! let target = TargetEnvironment::new("3.6", Platform::Win64)?;
//!
//! let archive = PackageBuilder::new(&wheel, &target, PackageConfig::default())
//!     .with_launchers(&launchers)
//!     .build()?;
//! fs_err::write(archive_file_name(wheel.name(), wheel.version(), &target), archive)?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod builder;
pub mod error;
pub mod files;
pub mod launcher;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod record;
pub mod requirements;
pub mod scripts;

mod archiver;

use wheel2conda_markers::TargetEnvironment;

// Re-export main types
pub use builder::{PackageBuilder, PackageConfig};
pub use error::{PackageError, Result};
pub use launcher::{LauncherArch, LauncherDirectory, LauncherProvider, NoLaunchers};
pub use metadata::IndexJsonBuilder;

/// Install prefix placeholder that conda replaces at install time
pub const PREFIX_PLACEHOLDER: &str = "/opt/anaconda1anaconda2anaconda3";

/// Build number of every converted package
pub const BUILD_NUMBER: u64 = 0;

/// The build string, e.g. `py36_0`
pub fn build_string(target: &TargetEnvironment) -> String {
    format!("py{}_{BUILD_NUMBER}", target.python_version_nodot())
}

/// File name of the package, e.g. `mypkg-1.0-py36_0.tar.bz2`
pub fn archive_file_name(name: &str, version: &str, target: &TargetEnvironment) -> String {
    format!("{name}-{version}-{}.tar.bz2", build_string(target))
}
