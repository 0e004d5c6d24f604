//! # wheel2conda_wheel
//!
//! Opening pure-Python wheels for conversion into conda packages.
//!
//! A wheel is extracted into a temporary directory, validated, and exposed
//! through [`WheelContents`]: the unpacked tree, the `.dist-info` and
//! optional `.data` directories, and the parsed `METADATA` and `WHEEL`
//! files.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wheel2conda_wheel::WheelContents;
//!
//! # fn main() -> Result<(), wheel2conda_wheel::WheelError> {
//! let wheel = WheelContents::from_wheel_file(Path::new("mypkg-1.0-py3-none-any.whl"))?;
//! let pythons = wheel.filter_compatible_pythons(&["3.6", "2.7"]);
//! println!("{} {} supports {pythons:?}", wheel.name(), wheel.version());
//! wheel.close()?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod compatibility;
pub mod contents;
pub mod error;
pub mod extract;
pub mod metadata;

pub use contents::{DATA_SUFFIX, DIST_INFO_SUFFIX, WheelContents, sorted_entries};
pub use error::WheelError;
pub use metadata::{Metadata, fields};
