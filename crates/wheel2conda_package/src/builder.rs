//! Package builder - turns an unpacked wheel into a conda package

use chrono::{DateTime, Utc};
use rattler_conda_types::PackageName;
use wheel2conda_markers::TargetEnvironment;
use wheel2conda_wheel::{WheelContents, fields, sorted_entries};

use crate::{
    BUILD_NUMBER, PackageError, Result,
    archiver::{EXECUTABLE_MODE, PackageWriter, REGULAR_MODE},
    build_string,
    files::FileCollector,
    launcher::{LauncherArch, LauncherProvider, NoLaunchers},
    layout::InstallLayout,
    manifest::BuildManifest,
    metadata::{IndexJsonBuilder, identify_license},
    record::rewrite_record,
    requirements::requires_dist_to_conda_requirements,
    scripts::read_console_scripts,
};

/// Configuration for package creation
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Compression level (1-9, higher = better compression but slower)
    pub compression_level: u32,

    /// Timestamp for reproducible builds
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            compression_level: 9,
            timestamp: None,
        }
    }
}

/// Builds one conda package from a wheel for one target environment.
///
/// A builder is used for a single [`PackageBuilder::build`] call. Building
/// the same wheel for another platform or Python version needs a new
/// builder; the wheel itself can be shared.
///
/// # Example
/// ```rust,no_run
/// use std::path::Path;
/// use rattler_conda_types::Platform;
/// use wheel2conda_markers::TargetEnvironment;
/// use wheel2conda_package::{PackageBuilder, PackageConfig};
/// use wheel2conda_wheel::WheelContents;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let wheel = WheelContents::from_wheel_file(Path::new("mypkg-1.0-py3-none-any.whl"))?;
/// let target = TargetEnvironment::new("3.6", Platform::Linux64)?;
/// let archive = PackageBuilder::new(&wheel, &target, PackageConfig::default()).build()?;
/// fs_err::write("mypkg-1.0-py36_0.tar.bz2", archive)?;
/// # Ok(())
/// # }
/// ```
pub struct PackageBuilder<'a> {
    wheel: &'a WheelContents,
    target: &'a TargetEnvironment,
    launchers: &'a dyn LauncherProvider,
    config: PackageConfig,
    layout: InstallLayout,
    manifest: BuildManifest,
}

impl<'a> PackageBuilder<'a> {
    /// Create a builder for `wheel` targeting `target`
    pub fn new(
        wheel: &'a WheelContents,
        target: &'a TargetEnvironment,
        config: PackageConfig,
    ) -> Self {
        Self {
            wheel,
            target,
            launchers: &NoLaunchers,
            config,
            layout: InstallLayout::for_target(target),
            manifest: BuildManifest::new(),
        }
    }

    /// Use `launchers` for the `.exe` wrappers of Windows console scripts
    pub fn with_launchers(mut self, launchers: &'a dyn LauncherProvider) -> Self {
        self.launchers = launchers;
        self
    }

    /// Build the package and return the compressed archive
    pub fn build(mut self) -> Result<Vec<u8>> {
        tracing::debug!(
            "building {} {} for {}",
            self.wheel.name(),
            self.wheel.version(),
            self.target
        );

        let mut writer = PackageWriter::new(self.config.compression_level, self.config.timestamp);

        self.add_module(&mut writer)?;
        self.add_data_dir(&mut writer)?;
        self.create_scripts(&mut writer)?;
        self.write_pep376_record(&mut writer)?;
        self.write_index(&mut writer)?;
        self.write_has_prefix_list(&mut writer)?;
        self.write_files_list(&mut writer)?;

        let archive = writer.finish()?;
        tracing::debug!(
            "packaged {} files ({} bytes)",
            self.manifest.files().len(),
            archive.len()
        );
        Ok(archive)
    }

    /// Copy everything except the `.data` directory into site-packages
    fn add_module(&mut self, writer: &mut PackageWriter) -> Result<()> {
        for src in sorted_entries(self.wheel.root())? {
            if Some(src.as_path()) == self.wheel.data_dir() {
                continue;
            }
            let Some(name) = src.file_name().map(|name| name.to_string_lossy()) else {
                continue;
            };

            let dst = self.layout.in_site_packages(&name);
            let is_dist_info = src == self.wheel.dist_info();

            for file in FileCollector::new(&src).collect()? {
                let dest = file.destination(&dst);
                // RECORD is rewritten once the scripts are known
                if !(is_dist_info && file.relative_path == "RECORD") {
                    writer.append_file(&dest, &file.source)?;
                }
                self.manifest.record_file(dest, false);
            }
        }
        Ok(())
    }

    /// Move the contents of `<name>.data/data/` to the prefix root
    fn add_data_dir(&mut self, writer: &mut PackageWriter) -> Result<()> {
        let Some(data_dir) = self.wheel.data_dir() else {
            return Ok(());
        };

        for sub_dir in sorted_entries(data_dir)? {
            let name = sub_dir
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            if name != "data" || !sub_dir.is_dir() {
                return Err(PackageError::UnsupportedDataLayout(name));
            }

            for src in sorted_entries(&sub_dir)? {
                let Some(name) = src.file_name().map(|name| name.to_string_lossy()) else {
                    continue;
                };
                for file in FileCollector::new(&src).collect()? {
                    let dest = file.destination(&name);
                    writer.append_file(&dest, &file.source)?;
                    self.manifest.record_file(dest, false);
                }
            }
        }
        Ok(())
    }

    /// Generate launcher scripts for `console_scripts` entry points
    fn create_scripts(&mut self, writer: &mut PackageWriter) -> Result<()> {
        let entry_points = self.wheel.dist_info().join("entry_points.txt");
        if !entry_points.is_file() {
            return Ok(());
        }

        for entry_point in read_console_scripts(&entry_points)? {
            let script = entry_point.render_script();
            if self.target.is_windows() {
                self.write_script(writer, &format!("{}-script.py", entry_point.name), &script)?;

                let launcher = self
                    .launchers
                    .find_launcher(LauncherArch::for_target(self.target))?;
                let contents = fs_err::read(&launcher)?;
                let dest = self.layout.script(&format!("{}.exe", entry_point.name));
                writer.append_bytes(&dest, &contents, EXECUTABLE_MODE)?;
                self.manifest.record_file(dest.clone(), false);
                self.manifest.record_generated(dest, &contents);
            } else {
                self.write_script(writer, &entry_point.name, &script)?;
            }
        }
        Ok(())
    }

    fn write_script(&mut self, writer: &mut PackageWriter, name: &str, script: &str) -> Result<()> {
        let dest = self.layout.script(name);
        writer.append_bytes(&dest, script.as_bytes(), EXECUTABLE_MODE)?;
        self.manifest.record_file(dest.clone(), true);
        self.manifest.record_generated(dest, script.as_bytes());
        Ok(())
    }

    /// Write the installed RECORD, including rows for generated scripts
    fn write_pep376_record(&mut self, writer: &mut PackageWriter) -> Result<()> {
        let original_path = self.wheel.dist_info().join("RECORD");
        let original = if original_path.is_file() {
            fs_err::read(&original_path)?
        } else {
            tracing::warn!("{} has no RECORD file", self.wheel.dist_info_name());
            Vec::new()
        };

        let record = rewrite_record(&original, &self.layout, self.manifest.generated())?;
        let dest = self
            .layout
            .in_site_packages(&format!("{}/RECORD", self.wheel.dist_info_name()));
        writer.append_bytes(&dest, &record, REGULAR_MODE)?;

        // normally recorded together with the rest of .dist-info
        if !self.manifest.files().contains(&dest) {
            self.manifest.record_file(dest, false);
        }
        Ok(())
    }

    fn write_index(&mut self, writer: &mut PackageWriter) -> Result<()> {
        let metadata = self.wheel.metadata();
        let requirements = requires_dist_to_conda_requirements(
            metadata.get_all(fields::REQUIRES_DIST),
            self.target,
        )?;

        let version = self.wheel.version().parse().map_err(|source| {
            PackageError::InvalidVersion {
                version: self.wheel.version().to_string(),
                source,
            }
        })?;
        let index = IndexJsonBuilder::new(
            PackageName::new_unchecked(self.wheel.name()),
            version,
            build_string(self.target),
        )
        .with_build_number(BUILD_NUMBER)
        .with_target(self.target)
        .with_dependency(format!("python {}*", self.target.python_version()))
        .with_dependencies(requirements)
        .with_license(identify_license(metadata))
        .build()?;

        let index = serde_json::to_string_pretty(&index)?;
        writer.append_bytes("info/index.json", index.as_bytes(), REGULAR_MODE)
    }

    fn write_has_prefix_list(&mut self, writer: &mut PackageWriter) -> Result<()> {
        let contents = self.manifest.has_prefix_contents();
        writer.append_bytes("info/has_prefix", contents.as_bytes(), REGULAR_MODE)
    }

    fn write_files_list(&mut self, writer: &mut PackageWriter) -> Result<()> {
        let contents = self.manifest.files_contents();
        writer.append_bytes("info/files", contents.as_bytes(), REGULAR_MODE)
    }
}
