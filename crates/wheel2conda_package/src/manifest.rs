//! Bookkeeping of the files written to a package

use crate::{PREFIX_PLACEHOLDER, record::RecordEntry};

/// Everything the builder needs to remember about files it has written.
///
/// The order of [`BuildManifest::files`] is the order files were recorded
/// and becomes the order of `info/files`.
#[derive(Debug, Default, Clone)]
pub struct BuildManifest {
    files: Vec<String>,
    has_prefix: Vec<String>,
    generated: Vec<RecordEntry>,
}

impl BuildManifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file written at archive path `path`
    pub fn record_file(&mut self, path: impl Into<String>, has_prefix: bool) {
        let path = path.into();
        if has_prefix {
            self.has_prefix.push(path.clone());
        }
        self.files.push(path);
    }

    /// Remember a generated file that needs its own row in the installed
    /// RECORD
    pub fn record_generated(&mut self, path: impl Into<String>, contents: &[u8]) {
        self.generated.push(RecordEntry::for_contents(path, contents));
    }

    /// All recorded archive paths
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// RECORD rows for generated files, paths relative to the archive root
    pub fn generated(&self) -> &[RecordEntry] {
        &self.generated
    }

    /// Contents of `info/has_prefix`
    pub fn has_prefix_contents(&self) -> String {
        self.has_prefix
            .iter()
            .map(|path| format!("{PREFIX_PLACEHOLDER} text {path}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Contents of `info/files`
    pub fn files_contents(&self) -> String {
        self.files.join("\n")
    }
}
