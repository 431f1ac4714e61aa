//! Crate-level error types.
use crate::dataset::DataToken;
use snafu::{Backtrace, Snafu};
use std::error::Error as StdError;

pub use dicom_core::error::{CastValueError, InvalidValueReadError};

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main data type for errors in this crate.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Raised while decoding an element header or a primitive value
    /// out of a data set.
    #[snafu(display("could not decode data set content"))]
    DecodeElement {
        #[snafu(backtrace)]
        source: crate::stateful::decode::Error,
    },

    /// Raised while encoding an element header or a primitive value
    /// into a data set.
    #[snafu(display("could not encode data set content"))]
    EncodeElement {
        #[snafu(backtrace)]
        source: crate::stateful::encode::Error,
    },

    /// Raised when a sequence or item's declared length does not agree
    /// with the number of bytes actually consumed by its contents.
    #[snafu(display(
        "already read {} bytes, but end of sequence or item is at {} bytes",
        bytes_read,
        eos
    ))]
    InconsistentSequenceEnd {
        eos: u64,
        bytes_read: u64,
        backtrace: Backtrace,
    },

    /// Raised while writing a data set and a token was found out of the
    /// order the writer expects (e.g. a value with no preceding header).
    #[snafu(display("unexpected data set token {}", token))]
    UnexpectedToken {
        token: DataToken,
        backtrace: Backtrace,
    },

    /// Raised when the demanded transfer syntax is not supported for
    /// reading or writing a data set.
    #[snafu(display("unsupported transfer syntax"))]
    UnsupportedTransferSyntax,

    /// Raised when the required character set is not supported.
    #[snafu(display("unsupported character set"))]
    UnsupportedCharacterSet,

    /// Raised when a sequence is nested deeper than the reader's
    /// configured maximum.
    #[snafu(display("sequence nesting depth {} exceeds the maximum of {}", depth, max_depth))]
    SequenceDepthExceeded {
        depth: u32,
        max_depth: u32,
        backtrace: Backtrace,
    },

    /// Raised when the total number of sequence/fragment items read
    /// exceeds the reader's configured maximum.
    #[snafu(display("item count {} exceeds the maximum of {}", count, max_items))]
    ItemCountExceeded {
        count: u64,
        max_items: u64,
        backtrace: Backtrace,
    },
}

impl From<crate::stateful::decode::Error> for Error {
    fn from(source: crate::stateful::decode::Error) -> Self {
        Error::DecodeElement { source }
    }
}

impl From<crate::stateful::encode::Error> for Error {
    fn from(source: crate::stateful::encode::Error) -> Self {
        Error::EncodeElement { source }
    }
}

impl Error {
    /// Whether this error represents the data source running out cleanly
    /// at an element boundary, as opposed to a genuine I/O or format error.
    pub fn is_unexpected_eof(&self) -> bool {
        fn is_eof(mut err: &(dyn StdError + 'static)) -> bool {
            loop {
                if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
                    return io_err.kind() == std::io::ErrorKind::UnexpectedEof;
                }
                match err.source() {
                    Some(source) => err = source,
                    None => return false,
                }
            }
        }
        is_eof(self)
    }
}
