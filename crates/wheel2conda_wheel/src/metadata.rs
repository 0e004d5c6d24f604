//! Parsing of the `key: value` header blocks found in `METADATA` and `WHEEL`

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;

use crate::WheelError;

/// Field names used by the converter
pub mod fields {
    /// `Name` (METADATA)
    pub const NAME: &str = "Name";
    /// `Version` (METADATA)
    pub const VERSION: &str = "Version";
    /// `Requires-Dist` (METADATA, repeated)
    pub const REQUIRES_DIST: &str = "Requires-Dist";
    /// `Requires-Python` (METADATA)
    pub const REQUIRES_PYTHON: &str = "Requires-Python";
    /// `License` (METADATA)
    pub const LICENSE: &str = "License";
    /// `License-Expression` (METADATA)
    pub const LICENSE_EXPRESSION: &str = "License-Expression";
    /// `Classifier` (METADATA, repeated)
    pub const CLASSIFIER: &str = "Classifier";
    /// `Wheel-Version` (WHEEL)
    pub const WHEEL_VERSION: &str = "Wheel-Version";
    /// `Root-Is-Purelib` (WHEEL)
    pub const ROOT_IS_PURELIB: &str = "Root-Is-Purelib";
    /// `Tag` (WHEEL, repeated)
    pub const TAG: &str = "Tag";
}

/// A line of a metadata block that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: usize,
    /// The line as written
    pub content: String,
}

/// The header block of a metadata file.
///
/// Maps each field name to its values in file order. Fields such as
/// `Classifier` occur many times and keep every occurrence. Parsing stops at
/// the first blank line, so a long description body is never read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: IndexMap<String, Vec<String>>,
}

impl Metadata {
    /// Read and parse a metadata file
    pub fn from_path(path: &Path) -> Result<Self, WheelError> {
        let text = fs_err::read_to_string(path)?;
        text.parse()
            .map_err(|MalformedLine { line, content }| WheelError::MalformedMetadata {
                path: path.to_path_buf(),
                line,
                content,
            })
    }

    /// The first value of `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `field`, empty if the field is absent
    pub fn get_all(&self, field: &str) -> &[String] {
        self.fields
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `field` occurs at least once
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over all fields in the order they first appear
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl FromStr for Metadata {
    type Err = MalformedLine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut last_key: Option<String> = None;

        for (idx, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                break;
            }

            let malformed = || MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            };

            // folded header: the line continues the previous value
            if line.starts_with([' ', '\t']) {
                let value = last_key
                    .as_ref()
                    .and_then(|key| fields.get_mut(key))
                    .and_then(|values| values.last_mut())
                    .ok_or_else(malformed)?;
                value.push('\n');
                value.push_str(line.trim());
                continue;
            }

            let (key, value) = line.split_once(':').ok_or_else(malformed)?;
            let key = key.trim().to_string();
            fields
                .entry(key.clone())
                .or_default()
                .push(value.trim().to_string());
            last_key = Some(key);
        }

        Ok(Self { fields })
    }
}
