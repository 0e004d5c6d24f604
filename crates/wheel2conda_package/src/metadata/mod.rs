//! Metadata generation for conda packages

mod index;
mod license;

pub use index::IndexJsonBuilder;
pub use license::{UNKNOWN_LICENSE, identify_license};
