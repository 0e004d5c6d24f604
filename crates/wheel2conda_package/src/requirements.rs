//! Translation of `Requires-Dist` into conda dependencies

use wheel2conda_markers::{TargetEnvironment, eval_marker};

use crate::Result;

/// Turn the wheel's `Requires-Dist` entries into conda dependency specs.
///
/// Entries with an environment marker are kept only if the marker holds for
/// `target`. Parentheses around version constraints are dropped, so
/// `foo (>=1.0)` becomes `foo >=1.0`. Order is kept and nothing is
/// deduplicated.
pub fn requires_dist_to_conda_requirements<S: AsRef<str>>(
    requires_dist: &[S],
    target: &TargetEnvironment,
) -> Result<Vec<String>> {
    let mut requirements = Vec::new();
    for requirement in requires_dist {
        let requirement = requirement.as_ref();
        let (requirement, applicable) = match requirement.split_once(';') {
            Some((requirement, marker)) => (requirement, eval_marker(marker, target)?),
            None => (requirement, true),
        };

        if applicable {
            requirements.push(requirement.trim().replace(['(', ')'], ""));
        } else {
            tracing::debug!("skipping requirement {requirement:?} for {target}");
        }
    }
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use rattler_conda_types::Platform;

    use super::*;
    use crate::PackageError;

    fn target(python: &str, platform: Platform) -> TargetEnvironment {
        TargetEnvironment::new(python, platform).unwrap()
    }

    #[test]
    fn test_strip_parentheses() {
        let requirements =
            requires_dist_to_conda_requirements(&["foo (>=1.0)"], &target("3.6", Platform::Linux64))
                .unwrap();
        assert_eq!(requirements, ["foo >=1.0"]);
    }

    #[test]
    fn test_markers() {
        let requires_dist = [
            "requests (>=2.0)",
            "enum34; python_version < '3.4'",
            "pywin32 (>=1.0) ; sys_platform == 'win32'",
            "colorama; os_name == 'nt' and platform_machine == 'x86_64'",
            "requests (>=2.0)",
        ];

        let linux = requires_dist_to_conda_requirements(
            &requires_dist,
            &target("3.6", Platform::Linux64),
        )
        .unwrap();
        assert_eq!(linux, ["requests >=2.0", "requests >=2.0"]);

        let win32 = requires_dist_to_conda_requirements(
            &requires_dist,
            &target("2.7", Platform::Win32),
        )
        .unwrap();
        assert_eq!(
            win32,
            ["requests >=2.0", "enum34", "pywin32 >=1.0", "requests >=2.0"]
        );

        let win64 = requires_dist_to_conda_requirements(
            &requires_dist,
            &target("3.6", Platform::Win64),
        )
        .unwrap();
        assert_eq!(
            win64,
            ["requests >=2.0", "pywin32 >=1.0", "colorama", "requests >=2.0"]
        );
    }

    #[test]
    fn test_unsupported_marker_fails() {
        let err = requires_dist_to_conda_requirements(
            &["foo; sys.path == 'x'"],
            &target("3.6", Platform::Linux64),
        )
        .unwrap_err();
        assert!(matches!(err, PackageError::Marker(_)));
    }
}
