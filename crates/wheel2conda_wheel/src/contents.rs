//! A validated, unpacked wheel

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{
    WheelError,
    compatibility,
    extract::extract_wheel,
    metadata::{Metadata, fields},
};

/// Suffix of the metadata directory at the wheel root
pub const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Suffix of the optional data directory at the wheel root
pub const DATA_SUFFIX: &str = ".data";

/// The only wheel format version that can be converted
pub const SUPPORTED_WHEEL_VERSION: &str = "1.0";

/// An unpacked wheel that passed validation.
///
/// Owns the temporary extraction directory. The directory is deleted by
/// [`WheelContents::close`], or on drop if closing is skipped.
#[derive(Debug)]
pub struct WheelContents {
    dir: TempDir,
    dist_info: PathBuf,
    data_dir: Option<PathBuf>,
    metadata: Metadata,
    wheel_metadata: Metadata,
    name: String,
    version: String,
}

impl WheelContents {
    /// Extract and validate a wheel file
    pub fn from_wheel_file(path: &Path) -> Result<Self, WheelError> {
        let dir = extract_wheel(path)?;
        Self::from_unpacked(dir)
    }

    /// Validate an already unpacked wheel.
    ///
    /// Requires exactly one `.dist-info` directory, at most one `.data`
    /// directory, a `1.0` wheel format, a pure (non-platlib) wheel and the
    /// `Name` and `Version` metadata fields.
    pub fn from_unpacked(dir: TempDir) -> Result<Self, WheelError> {
        let mut dist_info = None;
        let mut data_dir = None;

        for path in sorted_entries(dir.path())? {
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            if file_name.ends_with(DIST_INFO_SUFFIX) {
                if !path.is_dir() {
                    return Err(WheelError::NotADirectory(path));
                }
                if dist_info.is_some() {
                    return Err(WheelError::MultipleDistInfo);
                }
                dist_info = Some(path);
            } else if file_name.ends_with(DATA_SUFFIX) {
                if !path.is_dir() {
                    return Err(WheelError::NotADirectory(path));
                }
                if data_dir.is_some() {
                    return Err(WheelError::MultipleDataDirs);
                }
                data_dir = Some(path);
            }
        }

        let dist_info = dist_info.ok_or(WheelError::MissingDistInfo)?;

        let wheel_metadata = Metadata::from_path(&dist_info.join("WHEEL"))?;
        let wheel_version = wheel_metadata
            .get(fields::WHEEL_VERSION)
            .ok_or(WheelError::MissingField {
                file: "WHEEL",
                field: fields::WHEEL_VERSION,
            })?;
        if wheel_version != SUPPORTED_WHEEL_VERSION {
            return Err(WheelError::UnsupportedWheelVersion(
                wheel_version.to_string(),
            ));
        }
        let purelib = wheel_metadata
            .get(fields::ROOT_IS_PURELIB)
            .ok_or(WheelError::MissingField {
                file: "WHEEL",
                field: fields::ROOT_IS_PURELIB,
            })?;
        if !purelib.eq_ignore_ascii_case("true") {
            return Err(WheelError::PlatformSpecific);
        }

        let metadata = Metadata::from_path(&dist_info.join("METADATA"))?;
        let required = |field: &'static str| {
            metadata
                .get(field)
                .map(ToString::to_string)
                .ok_or(WheelError::MissingField {
                    file: "METADATA",
                    field,
                })
        };
        let name = required(fields::NAME)?;
        let version = required(fields::VERSION)?;

        tracing::debug!("found wheel for {name} {version}");

        Ok(Self {
            dir,
            dist_info,
            data_dir,
            metadata,
            wheel_metadata,
            name,
            version,
        })
    }

    /// The directory the wheel was unpacked into
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The `.dist-info` directory
    pub fn dist_info(&self) -> &Path {
        &self.dist_info
    }

    /// File name of the `.dist-info` directory, e.g. `mypkg-1.0.dist-info`
    pub fn dist_info_name(&self) -> &str {
        self.dist_info
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// The `.data` directory, if the wheel has one
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// The parsed `METADATA` file
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Distribution name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distribution version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The subset of `candidates` this wheel can be installed on, see
    /// [`compatibility::filter_compatible_pythons`]
    pub fn filter_compatible_pythons<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<String> {
        compatibility::filter_compatible_pythons(&self.metadata, &self.wheel_metadata, candidates)
    }

    /// Remove the extraction directory
    pub fn close(self) -> Result<(), WheelError> {
        let root = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!("removed {}", root.display());
        Ok(())
    }
}

/// The entries of `dir`, sorted by name
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, WheelError> {
    let mut entries = fs_err::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}
