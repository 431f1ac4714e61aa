//! Explicit VR Big Endian header encoding.

use crate::encode::basic::BigEndianBasicEncoder;
use crate::encode::{
    BasicEncode, Encode, Result, WriteHeaderSnafu, WriteItemDelimiterSnafu, WriteItemHeaderSnafu,
    WriteSequenceDelimiterSnafu, WriteTagSnafu,
};
use byteordered::byteorder::{BigEndian, ByteOrder};
use byteordered::Endianness;
use dicom_core::header::{DataElementHeader, Header};
use dicom_core::value::PrimitiveValue;
use dicom_core::{Tag, VR};
use snafu::ResultExt;
use std::io::{self, Write};

/// A concrete encoder for the Explicit VR Big Endian transfer syntax.
#[derive(Debug, Default, Clone)]
pub struct ExplicitVRBigEndianEncoder {
    basic: BigEndianBasicEncoder,
}

impl BasicEncode for ExplicitVRBigEndianEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Big
    }

    fn encode_us<W: Write>(&self, to: W, value: u16) -> io::Result<()> {
        self.basic.encode_us(to, value)
    }

    fn encode_ul<W: Write>(&self, to: W, value: u32) -> io::Result<()> {
        self.basic.encode_ul(to, value)
    }

    fn encode_uv<W: Write>(&self, to: W, value: u64) -> io::Result<()> {
        self.basic.encode_uv(to, value)
    }

    fn encode_ss<W: Write>(&self, to: W, value: i16) -> io::Result<()> {
        self.basic.encode_ss(to, value)
    }

    fn encode_sl<W: Write>(&self, to: W, value: i32) -> io::Result<()> {
        self.basic.encode_sl(to, value)
    }

    fn encode_sv<W: Write>(&self, to: W, value: i64) -> io::Result<()> {
        self.basic.encode_sv(to, value)
    }

    fn encode_fl<W: Write>(&self, to: W, value: f32) -> io::Result<()> {
        self.basic.encode_fl(to, value)
    }

    fn encode_fd<W: Write>(&self, to: W, value: f64) -> io::Result<()> {
        self.basic.encode_fd(to, value)
    }
}

impl Encode for ExplicitVRBigEndianEncoder {
    fn encode_tag<W: Write>(&self, mut to: W, tag: Tag) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_u16(&mut buf[..], tag.group());
        BigEndian::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W: Write>(&self, mut to: W, de: DataElementHeader) -> Result<usize> {
        if de.vr().has_long_length() {
            let mut buf = [0u8; 12];
            BigEndian::write_u16(&mut buf[0..], de.tag().group());
            BigEndian::write_u16(&mut buf[2..], de.tag().element());
            let vr_bytes = de.vr().to_bytes();
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            BigEndian::write_u32(&mut buf[8..], de.len().0);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(12)
        } else {
            let mut buf = [0u8; 8];
            BigEndian::write_u16(&mut buf[0..], de.tag().group());
            BigEndian::write_u16(&mut buf[2..], de.tag().element());
            let vr_bytes = de.vr().to_bytes();
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            BigEndian::write_u16(&mut buf[6..], de.len().0 as u16);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(8)
        }
    }

    fn encode_item_header<W: Write>(&self, mut to: W, len: u32) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_u16(&mut buf, 0xFFFE);
        BigEndian::write_u16(&mut buf[2..], 0xE000);
        BigEndian::write_u32(&mut buf[4..], len);
        to.write_all(&buf).context(WriteItemHeaderSnafu)
    }

    fn encode_item_delimiter<W: Write>(&self, mut to: W) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_u16(&mut buf, 0xFFFE);
        BigEndian::write_u16(&mut buf[2..], 0xE00D);
        to.write_all(&buf).context(WriteItemDelimiterSnafu)
    }

    fn encode_sequence_delimiter<W: Write>(&self, mut to: W) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_u16(&mut buf, 0xFFFE);
        BigEndian::write_u16(&mut buf[2..], 0xE0DD);
        to.write_all(&buf).context(WriteSequenceDelimiterSnafu)
    }

    fn encode_primitive<W: Write>(&self, to: W, value: &PrimitiveValue) -> Result<usize> {
        self.basic.encode_primitive(to, value)
    }
}

#[cfg(test)]
mod tests {
    use super::ExplicitVRBigEndianEncoder;
    use crate::encode::Encode;
    use dicom_core::header::{DataElementHeader, Length};
    use dicom_core::{Tag, VR};
    use std::io::{Cursor, Write};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const RAW: &[u8; 62] = &[
        0x00, 0x02, 0x00, 0x02, 0x55, 0x49, 0x00, 0x1a, 0x31, 0x2e, 0x32, 0x2e, 0x38, 0x34, 0x30,
        0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x35, 0x2e, 0x31, 0x2e, 0x34, 0x2e, 0x31, 0x2e,
        0x31, 0x2e, 0x31, 0x00, 0x00, 0x02, 0x00, 0x10, 0x55, 0x49, 0x00, 0x14, 0x31, 0x2e, 0x32,
        0x2e, 0x38, 0x34, 0x30, 0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x31, 0x2e, 0x32, 0x2e,
        0x31, 0x00,
    ];

    #[test]
    fn encode_explicit_vr_be() {
        let mut buf = [0u8; 62];
        {
            let enc = ExplicitVRBigEndianEncoder::default();
            let mut writer = Cursor::new(&mut buf[..]);

            let de = DataElementHeader::new(Tag(0x0002, 0x0002), VR::UI, Length(26));
            let len = enc
                .encode_element_header(&mut writer, de)
                .expect("should write it fine");
            assert_eq!(len, 8);
            writer
                .write_all(b"1.2.840.10008.5.1.4.1.1.1\0".as_ref())
                .expect("should write the value fine");
        }
        assert_eq!(&buf[0..8], &RAW[0..8]);
        {
            let enc = ExplicitVRBigEndianEncoder::default();
            let mut writer = Cursor::new(&mut buf[34..]);

            let de = DataElementHeader::new(Tag(0x0002, 0x0010), VR::UI, Length(20));
            let len = enc
                .encode_element_header(&mut writer, de)
                .expect("should write it fine");
            assert_eq!(len, 8);
            writer
                .write_all(b"1.2.840.10008.1.2.1\0".as_ref())
                .expect("should write the value fine");
        }
        assert_eq!(&buf[34..42], &RAW[34..42]);
        assert_eq!(&buf[..], &RAW[..]);
    }

    const RAW_SEQUENCE_ITEMS: &[u8] = &[
        0x00, 0x08, 0x10, 0x3F, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xE0,
        0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xE0, 0x0D, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFE,
        0xE0, 0xDD, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn encode_items() -> TestResult {
        let enc = ExplicitVRBigEndianEncoder::default();
        let mut out = Vec::new();

        let bytes_written = enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x0008, 0x103F), VR::SQ, Length::UNDEFINED),
        )?;
        assert_eq!(bytes_written, 12);
        assert_eq!(out.len(), 12);

        enc.encode_item_header(&mut out, Length::UNDEFINED.0)?;
        assert_eq!(out.len(), 20);

        enc.encode_item_delimiter(&mut out)?;
        assert_eq!(out.len(), 28);

        enc.encode_sequence_delimiter(&mut out)?;

        assert_eq!(&out[..], RAW_SEQUENCE_ITEMS);

        Ok(())
    }
}
