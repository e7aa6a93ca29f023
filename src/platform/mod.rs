//! Leaf-level system helpers built on the retry engine.
//!
//! Each helper wraps a single filesystem or environment call. File
//! operations run through a [`Retrier`](crate::backoff::Retrier) and report
//! an integer-coded [`FileStatus`]; path waiting polls at a fixed interval.

pub mod arch;
pub mod file_ops;
pub mod wait;

pub use arch::{ProcessorArchitecture, processor_architecture};
pub use file_ops::{FileStatus, create_file, remove_file};
pub use wait::wait_for_path;
