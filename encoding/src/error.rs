//! Crate-level error types.

pub use dicom_core::error::{CastValueError, ConvertValueError, InvalidValueReadError};
use dicom_core::Tag;
use snafu::Snafu;

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main data type for errors in this crate.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Raised when the obtained data element tag was not the one expected.
    #[snafu(display("unexpected DICOM tag {tag}"))]
    UnexpectedTag { tag: Tag },

    /// Raised when the obtained length is inconsistent.
    #[snafu(display("inconsistent data value length in data element"))]
    UnexpectedDataValueLength,

    /// Error related to an invalid value read.
    #[snafu(display("invalid value read: {source}"))]
    ReadValue { source: InvalidValueReadError },

    /// Error related to a failed text encoding/decoding procedure.
    #[snafu(display("failed text encoding/decoding: {source}"))]
    TextEncoding { source: crate::text::DecodeTextError },

    /// A failed attempt to cast a value to an inappropriate format.
    #[snafu(display("failed value cast: {source}"))]
    CastValue { source: CastValueError },

    /// A failed attempt to convert a value to an inappropriate format.
    #[snafu(display("failed value conversion: {source}"))]
    ConvertValue { source: ConvertValueError },

    /// Other I/O errors.
    #[snafu(display("I/O error: {source}"))]
    Io { source: std::io::Error },
}

impl From<dicom_core::Error> for Error {
    fn from(e: dicom_core::Error) -> Self {
        match e {
            dicom_core::Error::UnexpectedDataValueLength => Error::UnexpectedDataValueLength,
            dicom_core::Error::UnexpectedTag { tag } => Error::UnexpectedTag { tag },
            dicom_core::Error::ReadValue { source } => Error::ReadValue { source },
            dicom_core::Error::CastValue { source } => Error::CastValue { source },
            _ => unreachable!(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}
