//! The PEP 376 `RECORD` file of the installed distribution

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;

use crate::{Result, layout::InstallLayout};

/// Line in a RECORD file.
///
/// ```csv
/// mypkg/__init__.py,sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU,0
/// mypkg-1.0.dist-info/RECORD,,
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordEntry {
    /// Path of the file, relative to site-packages
    pub path: String,
    /// `sha256=<urlsafe base64 digest>`
    pub hash: Option<String>,
    /// Size in bytes
    pub size: Option<u64>,
}

impl RecordEntry {
    /// Create a record entry for a file with the given contents
    pub fn for_contents(path: impl Into<String>, contents: &[u8]) -> Self {
        Self {
            path: path.into(),
            hash: Some(record_hash(contents)),
            size: Some(contents.len() as u64),
        }
    }
}

/// The hash of `contents` as written in RECORD files
pub fn record_hash(contents: &[u8]) -> String {
    let digest = rattler_digest::compute_bytes_digest::<rattler_digest::Sha256>(contents);
    format!("sha256={}", URL_SAFE_NO_PAD.encode(digest))
}

/// Rewrite the RECORD of a wheel for installation into a conda prefix.
///
/// Rows for files from `<name>.data/data/` point at their installed
/// location outside site-packages. `generated` lists files created during
/// conversion (scripts and launchers) by archive path; they are appended
/// after the wheel's own rows.
pub fn rewrite_record(
    original: &[u8],
    layout: &InstallLayout,
    generated: &[RecordEntry],
) -> Result<Vec<u8>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(original);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in reader.records() {
        let row = row?;
        let mut fields: Vec<String> = row.iter().map(ToString::to_string).collect();
        if let Some(path) = fields.first_mut()
            && let Some(relocated) = relocate_data_path(path, layout)
        {
            tracing::trace!("RECORD: {path} -> {relocated}");
            *path = relocated;
        }
        writer.write_record(&fields)?;
    }

    for entry in generated {
        writer.serialize(RecordEntry {
            path: layout.relative_to_site_packages(&entry.path),
            ..entry.clone()
        })?;
    }

    Ok(writer.into_inner().map_err(|err| err.into_error())?)
}

/// `mypkg.data/data/share/x` -> `<record prefix>/share/x`
fn relocate_data_path(path: &str, layout: &InstallLayout) -> Option<String> {
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        [data_dir, "data", rest @ ..] if data_dir.ends_with(".data") && !rest.is_empty() => {
            Some(layout.relative_to_site_packages(&rest.join("/")))
        }
        _ => None,
    }
}
