//! Which Python versions a wheel can be installed on

use std::collections::HashSet;

use crate::metadata::{Metadata, fields};

/// `Requires-Python` prefixes that rule out Python 2
const PYTHON3_ONLY_PREFIXES: [&str; 4] = ["3", ">3", ">=3", "~=3"];

/// `Requires-Python` values that rule out Python 3
const PYTHON2_ONLY: [&str; 2] = ["<3", "<3.0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PythonMajor {
    Python2,
    Python3,
}

impl PythonMajor {
    fn matches(&self, version: &str) -> bool {
        let is_python2 = version.starts_with("2.");
        match self {
            PythonMajor::Python2 => is_python2,
            PythonMajor::Python3 => !is_python2,
        }
    }
}

/// Restrict `candidates` to the Python versions the wheel supports.
///
/// This is a heuristic. `Requires-Python` is consulted first and only a few
/// well-known spellings are understood. Otherwise the wheel tags decide, and
/// only wheels tagged exclusively `py2` or exclusively `py3` are filtered.
/// Everything else is assumed to work everywhere.
pub fn filter_compatible_pythons<S: AsRef<str>>(
    metadata: &Metadata,
    wheel_metadata: &Metadata,
    candidates: &[S],
) -> Vec<String> {
    let restriction = requires_python_restriction(metadata)
        .or_else(|| tag_restriction(wheel_metadata));

    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|version| restriction.is_none_or(|major| major.matches(version)))
        .map(ToString::to_string)
        .collect()
}

fn requires_python_restriction(metadata: &Metadata) -> Option<PythonMajor> {
    let requires_python = metadata.get(fields::REQUIRES_PYTHON)?;
    if PYTHON3_ONLY_PREFIXES
        .iter()
        .any(|prefix| requires_python.starts_with(prefix))
    {
        Some(PythonMajor::Python3)
    } else if PYTHON2_ONLY.contains(&requires_python) {
        Some(PythonMajor::Python2)
    } else {
        tracing::debug!("not interpreting Requires-Python: {requires_python}");
        None
    }
}

fn tag_restriction(wheel_metadata: &Metadata) -> Option<PythonMajor> {
    let python_tags: HashSet<&str> = wheel_metadata
        .get_all(fields::TAG)
        .iter()
        .map(|tag| tag.split('-').next().unwrap_or_default())
        .collect();

    if python_tags.len() != 1 {
        return None;
    }
    if python_tags.contains("py3") {
        Some(PythonMajor::Python3)
    } else if python_tags.contains("py2") {
        Some(PythonMajor::Python2)
    } else {
        None
    }
}
