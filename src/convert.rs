//! The conversion driver: one wheel in, one conda package per platform and
//! Python version out.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use indicatif::{ProgressBar, ProgressStyle};
use wheel2conda_markers::{MarkerError, TargetEnvironment};
use wheel2conda_package::{
    LauncherDirectory, LauncherProvider, NoLaunchers, PackageBuilder, PackageConfig, PackageError,
    archive_file_name,
};
use wheel2conda_wheel::{WheelContents, WheelError};

use crate::tool_configuration::Configuration;

/// Errors that abort a conversion run
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConvertError {
    /// The wheel is malformed or not convertible
    #[error(transparent)]
    Wheel(#[from] WheelError),

    /// Building one of the packages failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Package(#[from] PackageError),

    /// A target environment could not be set up
    #[error(transparent)]
    #[diagnostic(transparent)]
    Marker(#[from] MarkerError),

    /// Writing a package failed
    #[error("failed to write package: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert a wheel for every configured platform and compatible Python
/// version.
///
/// Packages are written to `<output_dir>/<platform>/<name>-<version>-py<XY>_0.tar.bz2`
/// and their paths returned in build order. The first failing combination
/// aborts the run; packages written before it are kept.
pub fn convert_wheel(
    wheel_file: &Path,
    config: &Configuration,
) -> Result<Vec<PathBuf>, ConvertError> {
    let wheel = WheelContents::from_wheel_file(wheel_file)?;

    let python_versions = wheel.filter_compatible_pythons(&config.python_versions);
    if python_versions.is_empty() {
        tracing::warn!(
            "{} {} is not compatible with any of the Python versions {}",
            wheel.name(),
            wheel.version(),
            config.python_versions.join(", ")
        );
    }

    let launchers: Box<dyn LauncherProvider> = match &config.launcher_dir {
        Some(dir) => Box::new(LauncherDirectory::new(dir)),
        None => Box::new(NoLaunchers),
    };
    let package_config = PackageConfig {
        compression_level: config.compression_level,
        timestamp: config.timestamp,
    };

    let total = config.platforms.len() * python_versions.len();
    let progress = config.multi_progress.add(ProgressBar::new(total as u64));
    progress.set_style(progress_style());
    progress.set_prefix(format!("{} {}", wheel.name(), wheel.version()));

    let mut written = Vec::with_capacity(total);
    for platform in &config.platforms {
        // every platform directory exists afterwards, even without packages
        let dir = config.output_dir.join(platform.as_str());
        fs_err::create_dir_all(&dir)?;

        for python in &python_versions {
            let target = TargetEnvironment::new(python.as_str(), *platform)?;
            tracing::info!("Converting for: {target}");
            progress.set_message(target.to_string());

            let archive = PackageBuilder::new(&wheel, &target, package_config.clone())
                .with_launchers(launchers.as_ref())
                .build()?;
            written.push(write_package(&dir, &wheel, &target, &archive)?);

            progress.inc(1);
        }
    }
    progress.finish_and_clear();

    wheel.close()?;
    Ok(written)
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:20!} [{elapsed_precise}] [{bar:30}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("━━╾─"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Publish `archive` in the platform directory `dir`. The archive only
/// appears under its final name once it is complete.
fn write_package(
    dir: &Path,
    wheel: &WheelContents,
    target: &TargetEnvironment,
    archive: &[u8],
) -> Result<PathBuf, ConvertError> {
    let path = dir.join(archive_file_name(wheel.name(), wheel.version(), target));

    let mut file = tempfile::Builder::new()
        .prefix(".wheel2conda-")
        .suffix(".partial")
        .tempfile_in(dir)?;
    file.write_all(archive)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    file.persist(&path).map_err(|err| err.error)?;
    tracing::debug!("wrote {}", path.display());

    Ok(path)
}
