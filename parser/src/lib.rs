//! This crate provides interfaces and data structures for reading and writing
//! DICOM data sets, at different layers of abstraction.
//!
//! For the time being, all APIs are based on synchronous I/O.
#![recursion_limit = "72"]

pub mod dataset;
pub mod error;
pub mod stateful;

mod util;

pub use error::{Error, Result};
