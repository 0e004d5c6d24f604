//! Best-effort license detection from wheel metadata

use wheel2conda_wheel::{Metadata, fields};

/// License used when nothing better is found
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Trove classifiers mapped to short license names
static LICENSE_CLASSIFIERS: &[(&str, &str)] = &[
    ("License :: OSI Approved :: MIT License", "MIT"),
    ("License :: OSI Approved :: BSD License", "BSD"),
    ("License :: OSI Approved :: Apache Software License", "Apache"),
    (
        "License :: OSI Approved :: GNU General Public License (GPL)",
        "GPL",
    ),
    (
        "License :: OSI Approved :: GNU General Public License v2 (GPLv2)",
        "GPLv2",
    ),
    (
        "License :: OSI Approved :: GNU General Public License v2 or later (GPLv2+)",
        "GPLv2+",
    ),
    (
        "License :: OSI Approved :: GNU General Public License v3 (GPLv3)",
        "GPLv3",
    ),
    (
        "License :: OSI Approved :: GNU General Public License v3 or later (GPLv3+)",
        "GPLv3+",
    ),
    (
        "License :: OSI Approved :: GNU Lesser General Public License v2 (LGPLv2)",
        "LGPLv2",
    ),
    (
        "License :: OSI Approved :: GNU Lesser General Public License v2 or later (LGPLv2+)",
        "LGPLv2+",
    ),
    (
        "License :: OSI Approved :: GNU Lesser General Public License v3 (LGPLv3)",
        "LGPLv3",
    ),
    (
        "License :: OSI Approved :: GNU Lesser General Public License v3 or later (LGPLv3+)",
        "LGPLv3+",
    ),
    (
        "License :: OSI Approved :: GNU Library or Lesser General Public License (LGPL)",
        "LGPL",
    ),
];

/// Pick a license string for `index.json`.
///
/// Checks, in order:
/// 1. `License-Expression` (PEP 639)
/// 2. `License`, unless it is empty or `UNKNOWN`
/// 3. the first `Classifier` found in [`LICENSE_CLASSIFIERS`]
///
/// and falls back to [`UNKNOWN_LICENSE`].
pub fn identify_license(metadata: &Metadata) -> String {
    let declared = |field| {
        metadata
            .get(field)
            .map(str::trim)
            .filter(|license| !license.is_empty() && !license.eq_ignore_ascii_case("unknown"))
    };

    if let Some(license) = declared(fields::LICENSE_EXPRESSION).or_else(|| declared(fields::LICENSE))
    {
        return license.to_string();
    }

    metadata
        .get_all(fields::CLASSIFIER)
        .iter()
        .find_map(|classifier| {
            LICENSE_CLASSIFIERS
                .iter()
                .find(|(known, _)| known == classifier)
                .map(|(_, license)| license.to_string())
        })
        .unwrap_or_else(|| UNKNOWN_LICENSE.to_string())
}
