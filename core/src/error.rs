//! Crate-level error types.
use crate::header::Tag;
use snafu::Snafu;
use std::num::{ParseFloatError, ParseIntError};

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main data type for errors raised directly by `dicom-core`.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Raised when a value was accessed as a different value type than the
    /// one it actually holds.
    #[snafu(display("Failed value cast: {source}"))]
    CastValue { source: CastValueError },

    /// Raised when a primitive value could not be read or converted.
    #[snafu(display("Invalid value read: {source}"))]
    ReadValue { source: InvalidValueReadError },

    /// Raised when the obtained data element tag was not the one expected.
    #[snafu(display("Unexpected DICOM tag {tag}"))]
    UnexpectedTag { tag: Tag },

    /// Raised when the obtained length of a data value is inconsistent with
    /// its value representation.
    #[snafu(display("Inconsistent data value length"))]
    UnexpectedDataValueLength,
}

impl From<CastValueError> for Error {
    fn from(source: CastValueError) -> Self {
        Error::CastValue { source }
    }
}

impl From<InvalidValueReadError> for Error {
    fn from(source: InvalidValueReadError) -> Self {
        Error::ReadValue { source }
    }
}

/// An error raised while attempting to interpret a primitive value in an
/// inappropriate format (for instance, reading a string as a date).
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum InvalidValueReadError {
    /// attempted to retrieve a sequence-shaped value as a primitive
    #[snafu(display("attempted to retrieve a complex value as primitive"))]
    NonPrimitiveType,

    /// the value's effective length could not be resolved (undefined length
    /// outside of a context that can resolve it)
    #[snafu(display("value length could not be resolved"))]
    UnresolvedValueLength,

    /// a numeric or textual component did not parse as the expected kind
    #[snafu(display("invalid date/time component: expected {expected} but got {got}"))]
    ParseDateTime { got: i64, expected: &'static str },

    /// chrono failed to construct a calendar date or time from its parts
    #[snafu(display("invalid or ambiguous combination of date with time"))]
    DateTimeZone,

    /// could not parse a floating point component of a value
    #[snafu(display("failed to parse text value as floating point: {source}"))]
    ParseFloat { source: ParseFloatError },

    /// could not parse an integral component of a value
    #[snafu(display("failed to parse text value as integer: {source}"))]
    ParseInteger { source: ParseIntError },

    /// fewer bytes were available than the value's declared length implied
    #[snafu(display("unexpected end of element while reading a value"))]
    UnexpectedEndOfElement,
}

/// An error raised when a value is accessed through an incompatible
/// conversion (e.g. asking for an integer from a sequence value).
#[derive(Debug, Clone, PartialEq)]
pub struct CastValueError {
    /// the value format requested by the caller
    pub requested: &'static str,
    /// the value's actual representation
    pub got: crate::value::ValueType,
}

impl std::fmt::Display for CastValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "bad value cast: requested {} but value is {:?}",
            self.requested, self.got
        )
    }
}

impl std::error::Error for CastValueError {}

/// An error raised when converting a primitive value between
/// representations fails (e.g. string to number).
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertValueError {
    /// the value format requested by the caller
    pub requested: &'static str,
    /// the value's original representation
    pub original: crate::value::ValueType,
    /// the cause of the conversion failure, if known
    pub cause: Option<InvalidValueReadError>,
}

impl std::fmt::Display for ConvertValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "could not convert {:?} value to {}",
            self.original, self.requested
        )?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertValueError {}
