//! Encoders for the fixed-width numeric primitives that make up a DICOM
//! value, in either Little Endian or Big Endian.

use super::BasicEncode;
use byteordered::{ByteOrdered, Endianness};
use std::io::{self, Write};

/// A basic encoder of DICOM primitive elements in little endian.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct LittleEndianBasicEncoder;

impl BasicEncode for LittleEndianBasicEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    fn encode_us<W: Write>(&self, to: W, value: u16) -> io::Result<()> {
        ByteOrdered::le(to).write_u16(value)
    }

    fn encode_ul<W: Write>(&self, to: W, value: u32) -> io::Result<()> {
        ByteOrdered::le(to).write_u32(value)
    }

    fn encode_uv<W: Write>(&self, to: W, value: u64) -> io::Result<()> {
        ByteOrdered::le(to).write_u64(value)
    }

    fn encode_ss<W: Write>(&self, to: W, value: i16) -> io::Result<()> {
        ByteOrdered::le(to).write_i16(value)
    }

    fn encode_sl<W: Write>(&self, to: W, value: i32) -> io::Result<()> {
        ByteOrdered::le(to).write_i32(value)
    }

    fn encode_sv<W: Write>(&self, to: W, value: i64) -> io::Result<()> {
        ByteOrdered::le(to).write_i64(value)
    }

    fn encode_fl<W: Write>(&self, to: W, value: f32) -> io::Result<()> {
        ByteOrdered::le(to).write_f32(value)
    }

    fn encode_fd<W: Write>(&self, to: W, value: f64) -> io::Result<()> {
        ByteOrdered::le(to).write_f64(value)
    }
}

/// A basic encoder of DICOM primitive elements in big endian.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct BigEndianBasicEncoder;

impl BasicEncode for BigEndianBasicEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Big
    }

    fn encode_us<W: Write>(&self, to: W, value: u16) -> io::Result<()> {
        ByteOrdered::be(to).write_u16(value)
    }

    fn encode_ul<W: Write>(&self, to: W, value: u32) -> io::Result<()> {
        ByteOrdered::be(to).write_u32(value)
    }

    fn encode_uv<W: Write>(&self, to: W, value: u64) -> io::Result<()> {
        ByteOrdered::be(to).write_u64(value)
    }

    fn encode_ss<W: Write>(&self, to: W, value: i16) -> io::Result<()> {
        ByteOrdered::be(to).write_i16(value)
    }

    fn encode_sl<W: Write>(&self, to: W, value: i32) -> io::Result<()> {
        ByteOrdered::be(to).write_i32(value)
    }

    fn encode_sv<W: Write>(&self, to: W, value: i64) -> io::Result<()> {
        ByteOrdered::be(to).write_i64(value)
    }

    fn encode_fl<W: Write>(&self, to: W, value: f32) -> io::Result<()> {
        ByteOrdered::be(to).write_f32(value)
    }

    fn encode_fd<W: Write>(&self, to: W, value: f64) -> io::Result<()> {
        ByteOrdered::be(to).write_f64(value)
    }
}

/// A basic encoder with support for either byte order, decided at
/// run-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicEncoder {
    /// Encode in Little Endian
    LE(LittleEndianBasicEncoder),
    /// Encode in Big Endian
    BE(BigEndianBasicEncoder),
}

use self::BasicEncoder::{BE, LE};

impl BasicEncoder {
    /// Create a basic encoder for the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => LE(LittleEndianBasicEncoder),
            Endianness::Big => BE(BigEndianBasicEncoder),
        }
    }
}

impl From<Endianness> for BasicEncoder {
    fn from(endianness: Endianness) -> Self {
        BasicEncoder::new(endianness)
    }
}

impl Default for BasicEncoder {
    fn default() -> Self {
        BasicEncoder::new(Endianness::Little)
    }
}

macro_rules! for_both {
    ($s: expr, |$e: ident| $f: expr) => {
        match *$s {
            LE(ref $e) => $f,
            BE(ref $e) => $f,
        }
    };
}

impl BasicEncode for BasicEncoder {
    fn endianness(&self) -> Endianness {
        match *self {
            LE(_) => Endianness::Little,
            BE(_) => Endianness::Big,
        }
    }

    fn encode_us<W: Write>(&self, to: W, value: u16) -> io::Result<()> {
        for_both!(self, |e| e.encode_us(to, value))
    }

    fn encode_ul<W: Write>(&self, to: W, value: u32) -> io::Result<()> {
        for_both!(self, |e| e.encode_ul(to, value))
    }

    fn encode_uv<W: Write>(&self, to: W, value: u64) -> io::Result<()> {
        for_both!(self, |e| e.encode_uv(to, value))
    }

    fn encode_ss<W: Write>(&self, to: W, value: i16) -> io::Result<()> {
        for_both!(self, |e| e.encode_ss(to, value))
    }

    fn encode_sl<W: Write>(&self, to: W, value: i32) -> io::Result<()> {
        for_both!(self, |e| e.encode_sl(to, value))
    }

    fn encode_sv<W: Write>(&self, to: W, value: i64) -> io::Result<()> {
        for_both!(self, |e| e.encode_sv(to, value))
    }

    fn encode_fl<W: Write>(&self, to: W, value: f32) -> io::Result<()> {
        for_both!(self, |e| e.encode_fl(to, value))
    }

    fn encode_fd<W: Write>(&self, to: W, value: f64) -> io::Result<()> {
        for_both!(self, |e| e.encode_fd(to, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_integers() {
        let mut buf = Vec::new();
        let le = LittleEndianBasicEncoder;
        le.encode_us(&mut buf, 0x3CC3).unwrap();
        assert_eq!(buf, vec![0xC3, 0x3C]);

        let mut buf = Vec::new();
        let be = BigEndianBasicEncoder;
        be.encode_us(&mut buf, 0x3CC3).unwrap();
        assert_eq!(buf, vec![0x3C, 0xC3]);
    }

    #[test]
    fn test_encode_tag_default_impl() {
        let mut buf = Vec::new();
        let le = LittleEndianBasicEncoder;
        le.encode_tag(&mut buf, dicom_core::Tag(0x0008, 0x0010))
            .unwrap();
        assert_eq!(buf, vec![0x08, 0x00, 0x10, 0x00]);
    }
}
