//! The library pieces of wheel2conda

pub mod console_utils;
pub mod convert;
pub mod opt;
pub mod tool_configuration;

pub use convert::{ConvertError, convert_wheel};
pub use tool_configuration::{Configuration, PYTHON_VERSIONS};
