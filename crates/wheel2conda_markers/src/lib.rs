//! Environment markers for converting wheels into conda packages.
//!
//! A wheel lists its dependencies with optional PEP 508 environment markers
//! (`requests; python_version < "3"`). Conda packages are built per platform
//! and Python version, so markers are evaluated ahead of time against a
//! [`TargetEnvironment`] describing one such combination.
//!
//! Markers are parsed into a [`MarkerExpression`] tree and evaluated by a
//! plain function over that tree; no Python is ever executed.
//!
//! ```rust
//! use rattler_conda_types::Platform;
//! use wheel2conda_markers::{TargetEnvironment, eval_marker};
//!
//! let env = TargetEnvironment::new("3.6", Platform::Linux64).unwrap();
//! assert!(eval_marker("sys_platform == 'linux'", &env).unwrap());
//! assert!(!eval_marker("python_version < '3'", &env).unwrap());
//! ```

#![deny(missing_docs)]

mod environment;
mod error;
mod evaluate;
mod parse;
mod tree;

pub use environment::{Bitness, SUPPORTED_PLATFORMS, TargetEnvironment, TargetOs};
pub use error::{MarkerError, MarkerParseError};
pub use evaluate::{MarkerVariable, compare, eval_marker};
pub use parse::parse_marker;
pub use tree::{BoolOperator, MarkerExpression, MarkerOperator, MarkerValue};
