//! Archive creation

mod writer;

pub use writer::{EXECUTABLE_MODE, PackageWriter, REGULAR_MODE};
