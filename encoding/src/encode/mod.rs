//! Data element header and primitive value encoding.

pub mod basic;
pub mod explicit_be;
pub mod explicit_le;
pub mod implicit_le;

use byteordered::Endianness;
use dicom_core::value::PrimitiveValue;
use dicom_core::{DataElementHeader, Tag};
use snafu::{Backtrace, ResultExt, Snafu};
use std::io::{self, Write};

/// Module-level error type: failures while encoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("failed to write tag: {source}"))]
    WriteTag {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write item header: {source}"))]
    WriteItemHeader {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write element header: {source}"))]
    WriteHeader {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write item delimiter: {source}"))]
    WriteItemDelimiter {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write sequence delimiter: {source}"))]
    WriteSequenceDelimiter {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write {typ} value: {source}"))]
    WriteBinary {
        typ: &'static str,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write string value: {source}"))]
    WriteString {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("failed to write bytes: {source}"))]
    WriteBytes {
        source: io::Error,
        backtrace: Backtrace,
    },
}

/// The module-level result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Encode the fixed-width numeric primitives that make up a DICOM value.
pub trait BasicEncode {
    /// The byte order this encoder writes in.
    fn endianness(&self) -> Endianness;

    fn encode_us<W: Write>(&self, to: W, value: u16) -> io::Result<()>;
    fn encode_ul<W: Write>(&self, to: W, value: u32) -> io::Result<()>;
    fn encode_uv<W: Write>(&self, to: W, value: u64) -> io::Result<()>;
    fn encode_ss<W: Write>(&self, to: W, value: i16) -> io::Result<()>;
    fn encode_sl<W: Write>(&self, to: W, value: i32) -> io::Result<()>;
    fn encode_sv<W: Write>(&self, to: W, value: i64) -> io::Result<()>;
    fn encode_fl<W: Write>(&self, to: W, value: f32) -> io::Result<()>;
    fn encode_fd<W: Write>(&self, to: W, value: f64) -> io::Result<()>;

    /// Encode an attribute tag (group then element).
    fn encode_tag<W: Write>(&self, mut to: W, tag: Tag) -> io::Result<()> {
        self.encode_us(&mut to, tag.0)?;
        self.encode_us(to, tag.1)
    }

    /// Encode a primitive value, delegating to the numeric and string
    /// methods above depending on its variant. Returns the number of bytes
    /// written, not including any padding.
    fn encode_primitive<W: Write>(&self, mut to: W, value: &PrimitiveValue) -> Result<usize> {
        use PrimitiveValue::*;
        match value {
            Empty => Ok(0),
            Strs(strings) => encode_backslash_delimited(&mut to, strings, |to, s| {
                write!(to, "{s}")?;
                Ok(s.len())
            })
            .context(WriteStringSnafu),
            Date(dates) => encode_backslash_delimited(&mut to, dates, |to, d| {
                let text = d.to_string();
                to.write_all(text.as_bytes())?;
                Ok(text.len())
            })
            .context(WriteStringSnafu),
            Time(times) => encode_backslash_delimited(&mut to, times, |to, t| {
                let text = t.to_string();
                to.write_all(text.as_bytes())?;
                Ok(text.len())
            })
            .context(WriteStringSnafu),
            DateTime(dts) => encode_backslash_delimited(&mut to, dts, |to, dt| {
                let text = dt.to_string();
                to.write_all(text.as_bytes())?;
                Ok(text.len())
            })
            .context(WriteStringSnafu),
            U8(values) => {
                to.write_all(values).context(WriteBytesSnafu)?;
                Ok(values.len())
            }
            I16(values) => {
                for v in values {
                    self.encode_ss(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "I16" })?;
                }
                Ok(values.len() * 2)
            }
            U16(values) => {
                for v in values {
                    self.encode_us(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "U16" })?;
                }
                Ok(values.len() * 2)
            }
            I32(values) => {
                for v in values {
                    self.encode_sl(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "I32" })?;
                }
                Ok(values.len() * 4)
            }
            U32(values) => {
                for v in values {
                    self.encode_ul(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "U32" })?;
                }
                Ok(values.len() * 4)
            }
            I64(values) => {
                for v in values {
                    self.encode_sv(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "I64" })?;
                }
                Ok(values.len() * 8)
            }
            U64(values) => {
                for v in values {
                    self.encode_uv(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "U64" })?;
                }
                Ok(values.len() * 8)
            }
            F32(values) => {
                for v in values {
                    self.encode_fl(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "F32" })?;
                }
                Ok(values.len() * 4)
            }
            F64(values) => {
                for v in values {
                    self.encode_fd(&mut to, *v)
                        .context(WriteBinarySnafu { typ: "F64" })?;
                }
                Ok(values.len() * 8)
            }
            Tags(tags) => {
                for tag in tags {
                    self.encode_tag(&mut to, *tag).context(WriteBinarySnafu {
                        typ: "AttributeTag",
                    })?;
                }
                Ok(tags.len() * 4)
            }
            _ => unreachable!(),
        }
    }
}

fn encode_backslash_delimited<W, T, F>(to: &mut W, col: &[T], mut encode_one: F) -> io::Result<usize>
where
    W: ?Sized + Write,
    F: FnMut(&mut W, &T) -> io::Result<usize>,
{
    let mut acc = 0;
    for (i, v) in col.iter().enumerate() {
        acc += encode_one(to, v)?;
        if i + 1 < col.len() {
            to.write_all(b"\\")?;
            acc += 1;
        }
    }
    Ok(acc)
}

/// Encode DICOM data element headers to an arbitrary byte sink. The
/// specific behavior depends on the transfer syntax this encoder was built
/// for.
pub trait Encode {
    /// Encode and write an element tag.
    fn encode_tag<W: Write>(&self, to: W, tag: Tag) -> Result<()>;

    /// Encode and write a data element header. Returns the number of bytes
    /// written.
    fn encode_element_header<W: Write>(&self, to: W, de: DataElementHeader) -> Result<usize>;

    /// Encode and write a sequence item header with the given length.
    fn encode_item_header<W: Write>(&self, to: W, len: u32) -> Result<()>;

    /// Encode and write an item delimitation item.
    fn encode_item_delimiter<W: Write>(&self, mut to: W) -> Result<()> {
        self.encode_tag(&mut to, Tag(0xFFFE, 0xE00D))?;
        to.write_all(&[0u8; 4]).context(WriteItemDelimiterSnafu)?;
        Ok(())
    }

    /// Encode and write a sequence delimitation item.
    fn encode_sequence_delimiter<W: Write>(&self, mut to: W) -> Result<()> {
        self.encode_tag(&mut to, Tag(0xFFFE, 0xE0DD))?;
        to.write_all(&[0u8; 4])
            .context(WriteSequenceDelimiterSnafu)?;
        Ok(())
    }

    /// Encode and write a primitive value.
    fn encode_primitive<W: Write>(&self, to: W, value: &PrimitiveValue) -> Result<usize>;
}

/// Object-safe counterpart to [`Encode`], bound to a specific writer type.
///
/// Mirrors [`DecodeFrom`](crate::decode::DecodeFrom) on the decoding side,
/// letting a transfer syntax hand out a boxed encoder without requiring
/// the writer type to be known at the trait definition site.
pub trait EncodeFrom<W: ?Sized + Write> {
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()>;
    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize>;
    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()>;
    fn encode_item_delimiter(&self, to: &mut W) -> Result<()>;
    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()>;
    fn encode_primitive(&self, to: &mut W, value: &PrimitiveValue) -> Result<usize>;
}

impl<W: ?Sized, T: ?Sized> EncodeFrom<W> for T
where
    W: Write,
    T: Encode,
{
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()> {
        Encode::encode_tag(self, to, tag)
    }

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize> {
        Encode::encode_element_header(self, to, de)
    }

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()> {
        Encode::encode_item_header(self, to, len)
    }

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()> {
        Encode::encode_item_delimiter(self, to)
    }

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()> {
        Encode::encode_sequence_delimiter(self, to)
    }

    fn encode_primitive(&self, to: &mut W, value: &PrimitiveValue) -> Result<usize> {
        Encode::encode_primitive(self, to, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_encode<T: Encode>(_encoder: &T) {}

    #[allow(unused)]
    fn check_bounds<T>(encoder: T)
    where
        T: Encode,
    {
        is_encode(&encoder);
    }

    fn is_encode_from<T: EncodeFrom<dyn Write>>(_encoder: &T) {}

    #[allow(unused)]
    fn boxed_encode_from_is_encode_from<T>(encoder: T)
    where
        T: EncodeFrom<dyn Write>,
    {
        is_encode_from(&encoder);
        let boxed: Box<dyn EncodeFrom<dyn Write>> = Box::new(encoder);
        is_encode_from(&boxed);
    }
}
