//! File collection from the unpacked wheel

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::FileEntry;
use crate::Result;

/// Collects the files below one top-level entry of an unpacked wheel
///
/// Directories are walked depth first with entries sorted by file name, so
/// the result does not depend on the order the filesystem returns them in.
pub struct FileCollector {
    /// Source file or directory
    source: PathBuf,
}

impl FileCollector {
    /// Create a new FileCollector for the given file or directory
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Collect all regular files.
    ///
    /// A source that is itself a file yields a single entry with an empty
    /// relative path.
    pub fn collect(self) -> Result<Vec<FileEntry>> {
        if !self.source.is_dir() {
            return Ok(vec![FileEntry {
                source: self.source,
                relative_path: String::new(),
            }]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.source).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let relative_path = entry.path().strip_prefix(&self.source)?;
            files.push(FileEntry {
                source: entry.path().to_path_buf(),
                relative_path: to_archive_path(relative_path),
            });
        }

        tracing::trace!(
            "collected {} files from {}",
            files.len(),
            self.source.display()
        );
        Ok(files)
    }
}

/// Join path components with `/`
fn to_archive_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
