//! IndexJson builder

use rattler_conda_types::package::IndexJson;
use rattler_conda_types::{NoArchType, PackageName, VersionWithSource};
use wheel2conda_markers::TargetEnvironment;

use crate::Result;

/// Builder for creating IndexJson metadata
///
/// # Example
/// ```rust
/// use rattler_conda_types::{PackageName, Platform};
/// use wheel2conda_markers::TargetEnvironment;
/// use wheel2conda_package::metadata::IndexJsonBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetEnvironment::new("3.6", Platform::Linux64)?;
/// let index = IndexJsonBuilder::new(
///         PackageName::new_unchecked("mypackage"),
///         "1.0.0".parse()?,
///         "py36_0",
///     )
///     .with_target(&target)
///     .with_dependency("python 3.6*")
///     .build()?;
/// assert_eq!(index.subdir.as_deref(), Some("linux-64"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IndexJsonBuilder {
    name: PackageName,
    version: VersionWithSource,
    build: String,
    build_number: u64,
    arch: Option<String>,
    platform: Option<String>,
    subdir: Option<String>,
    license: Option<String>,
    depends: Vec<String>,
}

impl IndexJsonBuilder {
    /// Create a new IndexJsonBuilder
    ///
    /// # Arguments
    /// * `name` - Package name
    /// * `version` - Package version
    /// * `build` - Build string (e.g., "py36_0")
    pub fn new(name: PackageName, version: VersionWithSource, build: impl Into<String>) -> Self {
        Self {
            name,
            version,
            build: build.into(),
            build_number: 0,
            arch: None,
            platform: None,
            subdir: None,
            license: None,
            depends: Vec::new(),
        }
    }

    /// Set the build number
    pub fn with_build_number(mut self, build_number: u64) -> Self {
        self.build_number = build_number;
        self
    }

    /// Set arch, platform and subdir from a target environment
    pub fn with_target(mut self, target: &TargetEnvironment) -> Self {
        let platform = target.platform();
        self.arch = platform.arch().map(|a| a.to_string());
        self.platform = Some(target.os().to_string());
        self.subdir = Some(platform.to_string());
        self
    }

    /// Set the license
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Add a dependency
    pub fn with_dependency(mut self, dep: impl Into<String>) -> Self {
        self.depends.push(dep.into());
        self
    }

    /// Add several dependencies
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = String>) -> Self {
        self.depends.extend(deps);
        self
    }

    /// Build the IndexJson
    pub fn build(self) -> Result<IndexJson> {
        Ok(IndexJson {
            name: self.name,
            version: self.version,
            build: self.build,
            build_number: self.build_number,
            arch: self.arch,
            platform: self.platform,
            subdir: self.subdir,
            license: Some(
                self.license
                    .unwrap_or_else(|| super::UNKNOWN_LICENSE.to_string()),
            ),
            license_family: None,
            timestamp: None,
            depends: self.depends,
            constrains: Vec::new(),
            noarch: NoArchType::none(),
            track_features: Vec::new(),
            features: None,
            python_site_packages_path: None,
            purls: None,
            experimental_extra_depends: Default::default(),
        })
    }
}
