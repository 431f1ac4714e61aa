//! Explicit VR Little Endian header encoding.

use crate::encode::basic::LittleEndianBasicEncoder;
use crate::encode::{
    BasicEncode, Encode, Result, WriteHeaderSnafu, WriteItemDelimiterSnafu, WriteItemHeaderSnafu,
    WriteSequenceDelimiterSnafu, WriteTagSnafu,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use byteordered::Endianness;
use dicom_core::header::{DataElementHeader, Header};
use dicom_core::value::PrimitiveValue;
use dicom_core::{Tag, VR};
use snafu::ResultExt;
use std::io::{self, Write};

/// A concrete encoder for the Explicit VR Little Endian transfer syntax.
#[derive(Debug, Default, Clone)]
pub struct ExplicitVRLittleEndianEncoder {
    basic: LittleEndianBasicEncoder,
}

impl BasicEncode for ExplicitVRLittleEndianEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Little
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

impl Encode for ExplicitVRLittleEndianEncoder {
    fn encode_tag<W: Write>(&self, mut to: W, tag: Tag) -> Result<()> {
        let mut buf = [0u8; 4];
        LittleEndian::write_u16(&mut buf[..], tag.group());
        LittleEndian::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W: Write>(&self, mut to: W, de: DataElementHeader) -> Result<usize> {
        // PS3.5 7.1.2: for VRs with a long length field, the two bytes after
        // the VR mnemonic are reserved and the length itself is 4 bytes.
        // Every other VR packs a 2-byte length directly after the mnemonic.
        if de.vr().has_long_length() {
            let mut buf = [0u8; 12];
            LittleEndian::write_u16(&mut buf[0..], de.tag().group());
            LittleEndian::write_u16(&mut buf[2..], de.tag().element());
            let vr_bytes = de.vr().to_bytes();
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            LittleEndian::write_u32(&mut buf[8..], de.len().0);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(12)
        } else {
            let mut buf = [0u8; 8];
            LittleEndian::write_u16(&mut buf[0..], de.tag().group());
            LittleEndian::write_u16(&mut buf[2..], de.tag().element());
            let vr_bytes = de.vr().to_bytes();
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            LittleEndian::write_u16(&mut buf[6..], de.len().0 as u16);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(8)
        }
    }

    fn encode_item_header<W: Write>(&self, mut to: W, len: u32) -> Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf, 0xFFFE);
        LittleEndian::write_u16(&mut buf[2..], 0xE000);
        LittleEndian::write_u32(&mut buf[4..], len);
        to.write_all(&buf).context(WriteItemHeaderSnafu)
    }

    fn encode_item_delimiter<W: Write>(&self, mut to: W) -> Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf, 0xFFFE);
        LittleEndian::write_u16(&mut buf[2..], 0xE00D);
        to.write_all(&buf).context(WriteItemDelimiterSnafu)
    }

    fn encode_sequence_delimiter<W: Write>(&self, mut to: W) -> Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf, 0xFFFE);
        LittleEndian::write_u16(&mut buf[2..], 0xE0DD);
        to.write_all(&buf).context(WriteSequenceDelimiterSnafu)
    }

    fn encode_primitive<W: Write>(&self, to: W, value: &PrimitiveValue) -> Result<usize> {
        self.basic.encode_primitive(to, value)
    }
}

#[cfg(test)]
mod tests {
    use super::ExplicitVRLittleEndianEncoder;
    use crate::encode::Encode;
    use dicom_core::header::{DataElementHeader, Length};
    use dicom_core::{Tag, VR};
    use std::io::{Cursor, Write};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[rustfmt::skip]
    const RAW: &[u8] = &[
        0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x1A, 0x00,
        b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
        b'5', b'.', b'1', b'.', b'4', b'.', b'1', b'.', b'1', b'.', b'1', 0x00,
        0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00,
        b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
        b'1', b'.', b'2', b'.', b'1', 0x00,
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x08, 0x00,
        b'D', b'o', b'e', b'^', b'J', b'o', b'h', b'n',
        0x08, 0x00, 0x41, 0x04, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x12, 0x34,
    ];

    #[test]
    fn encode_data_elements() -> TestResult {
        let mut buf = Vec::new();
        let enc = ExplicitVRLittleEndianEncoder::default();

        let de = DataElementHeader::new(Tag(0x0002, 0x0002), VR::UI, Length(26));
        let len = enc.encode_element_header(&mut buf, de)?;
        assert_eq!(len, 8);
        buf.write_all(b"1.2.840.10008.5.1.4.1.1.1\0")?;

        let de = DataElementHeader::new(Tag(0x0002, 0x0010), VR::UI, Length(20));
        let len = enc.encode_element_header(&mut buf, de)?;
        assert_eq!(len, 8);
        buf.write_all(b"1.2.840.10008.1.2.1\0")?;

        let de = DataElementHeader::new(Tag(0x0010, 0x0010), VR::PN, Length(8));
        enc.encode_element_header(&mut buf, de)?;
        buf.write_all(b"Doe^John")?;

        let de = DataElementHeader::new(Tag(0x0008, 0x0441), VR::OB, Length(2));
        let len = enc.encode_element_header(&mut buf, de)?;
        assert_eq!(len, 12);
        buf.write_all(&[0x12, 0x34])?;

        assert_eq!(&buf[..], RAW);
        Ok(())
    }

    // manually crafting some DICOM sequence/item delimiters
    //  Tag: (0008,103F) Series Description Code Sequence
    //  VR: SQ, Length: 0xFFFF_FFFF
    // --
    //  Tag: (FFFE,E000) Item, Length: 0xFFFF_FFFF (unspecified)
    //  Tag: (FFFE,E00D) Item Delimitation Item, Length: 0
    //  Tag: (FFFE,E0DD) Sequence Delimitation Item, Length: 0
    const RAW_SEQUENCE_ITEMS: &[u8] = &[
        0x08, 0x00, 0x3F, 0x10, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0x00,
        0xE0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00, 0xFE, 0xFF,
        0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn encode_items() -> TestResult {
        let enc = ExplicitVRLittleEndianEncoder::default();
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
