//! File collection for package creation

use std::path::PathBuf;

mod collector;

pub use collector::FileCollector;

/// A file of the unpacked wheel to be placed in the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Source path on disk
    pub source: PathBuf,

    /// Path below the collected entry, `/`-separated. Empty when the
    /// collected entry is a file.
    pub relative_path: String,
}

impl FileEntry {
    /// Archive path of this file when the collected entry is placed at
    /// `base`
    pub fn destination(&self, base: &str) -> String {
        if self.relative_path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{}", self.relative_path)
        }
    }
}
