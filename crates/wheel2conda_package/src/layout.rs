//! Where files of a Python package end up inside a conda package

use wheel2conda_markers::TargetEnvironment;

/// Install locations for one target environment.
///
/// All paths are relative to the conda prefix and use `/` as separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    site_packages: String,
    scripts: &'static str,
    record_prefix: &'static str,
}

impl InstallLayout {
    /// The layout used by CPython on the target platform
    pub fn for_target(target: &TargetEnvironment) -> Self {
        if target.is_windows() {
            Self {
                site_packages: "Lib/site-packages".to_string(),
                scripts: "Scripts",
                record_prefix: "../..",
            }
        } else {
            Self {
                site_packages: format!("lib/python{}/site-packages", target.python_version()),
                scripts: "bin",
                record_prefix: "../../..",
            }
        }
    }

    /// Archive path of `relative` inside site-packages
    pub fn in_site_packages(&self, relative: &str) -> String {
        format!("{}/{relative}", self.site_packages)
    }

    /// Archive path of a script called `name`
    pub fn script(&self, name: &str) -> String {
        format!("{}/{name}", self.scripts)
    }

    /// How a file at archive path `path` is referred to from a RECORD file
    /// in site-packages
    pub fn relative_to_site_packages(&self, path: &str) -> String {
        format!("{}/{path}", self.record_prefix)
    }
}
