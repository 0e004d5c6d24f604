//! Console script launchers generated from `entry_points.txt`

use std::path::Path;

use configparser::ini::Ini;

use crate::{PREFIX_PLACEHOLDER, PackageError, Result};

/// A `console_scripts` entry: `name = module:function`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Name of the command
    pub name: String,
    /// Module to import from
    pub module: String,
    /// Function to call
    pub function: String,
}

impl EntryPoint {
    /// Parse the value of an entry point, e.g. `mypkg.cli:main`.
    ///
    /// A trailing extras list (`mypkg.cli:main [cli]`) is ignored.
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let bad_entry_point = || PackageError::BadEntryPoint {
            name: name.to_string(),
            value: value.to_string(),
        };

        if value.matches(':').count() != 1 {
            return Err(bad_entry_point());
        }
        let (module, function) = value.split_once(':').ok_or_else(bad_entry_point)?;
        let function = function
            .split_once('[')
            .map_or(function, |(function, _extras)| function);

        let (module, function) = (module.trim(), function.trim());
        if module.is_empty() || function.is_empty() {
            return Err(bad_entry_point());
        }

        Ok(Self {
            name: name.trim().to_string(),
            module: module.to_string(),
            function: function.to_string(),
        })
    }

    /// The Python launcher script for this entry point
    pub fn render_script(&self) -> String {
        format!(
            "#!{PREFIX_PLACEHOLDER}/bin/python\n\
             from {module} import {function}\n\
             if __name__ == '__main__':\n    {function}()\n",
            module = self.module,
            function = self.function,
        )
    }
}

/// Read the `console_scripts` section of an `entry_points.txt` file.
///
/// Entries keep the order of the file. Keys are case-sensitive.
pub fn read_console_scripts(path: &Path) -> Result<Vec<EntryPoint>> {
    let text = fs_err::read_to_string(path)?;
    let sections = Ini::new_cs()
        .read(text)
        .map_err(|message| PackageError::InvalidEntryPoints {
            path: path.to_path_buf(),
            message,
        })?;

    let Some(console_scripts) = sections.get("console_scripts") else {
        return Ok(Vec::new());
    };

    console_scripts
        .iter()
        .map(|(name, value)| EntryPoint::parse(name, value.as_deref().unwrap_or_default()))
        .collect()
}
