//! Types for interpreting DICOM data elements: the attribute tag, the
//! value representation, the element length, and element header shapes.

use crate::value::{DicomValueType, InMemFragment, PrimitiveValue, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::{from_utf8, FromStr};

/// A trait for a data type containing a DICOM element header.
#[allow(clippy::len_without_is_empty)]
pub trait Header {
    /// Retrieve the element's tag as a `(group, element)` pair.
    fn tag(&self) -> Tag;

    /// Retrieve the declared length of the value in bytes. May be
    /// [`Length::UNDEFINED`] for sequences and encapsulated pixel data.
    fn len(&self) -> Length;

    /// Whether this is the header of a sequence item.
    fn is_item(&self) -> bool {
        self.tag() == Tag(0xFFFE, 0xE000)
    }

    /// Whether this is the header of an item delimiter.
    fn is_item_delimiter(&self) -> bool {
        self.tag() == Tag(0xFFFE, 0xE00D)
    }

    /// Whether this is the header of a sequence delimiter.
    fn is_sequence_delimiter(&self) -> bool {
        self.tag() == Tag(0xFFFE, 0xE0DD)
    }
}

/// A trait for values (or value-shaped things) that know their own
/// encoded length.
pub trait HasLength {
    /// The length of this value as it would be declared on the wire.
    fn length(&self) -> Length;

    /// Whether the value is empty (zero length).
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// A data element that owns a tag, a value representation and a value,
/// where the value may itself contain nested datasets of type `I` and
/// pixel data fragments of type `P`.
#[derive(Debug, PartialEq, Clone)]
pub struct DataElement<I, P = InMemFragment> {
    header: DataElementHeader,
    value: Value<I, P>,
}

impl<I, P> Header for DataElement<I, P> {
    fn tag(&self) -> Tag {
        self.header.tag
    }
    fn len(&self) -> Length {
        self.header.len
    }
}

impl<I, P> DataElement<I, P>
where
    I: DicomValueType,
{
    /// Create an empty data element with the given tag and VR.
    pub fn empty(tag: Tag, vr: VR) -> Self {
        DataElement {
            header: DataElementHeader {
                tag,
                vr,
                len: Length(0),
            },
            value: PrimitiveValue::Empty.into(),
        }
    }

    /// Create a data element from its parts. The value's encoded length is
    /// recomputed from the value itself.
    pub fn new(tag: Tag, vr: VR, value: impl Into<Value<I, P>>) -> Self {
        let value = value.into();
        DataElement {
            header: DataElementHeader {
                tag,
                vr,
                len: value.length(),
            },
            value,
        }
    }

    /// Create a data element from its parts, keeping the given declared
    /// length instead of recomputing it from the value (e.g. to preserve
    /// an undefined length on a sequence).
    pub fn new_with_len(tag: Tag, vr: VR, len: Length, value: impl Into<Value<I, P>>) -> Self {
        DataElement {
            header: DataElementHeader { tag, vr, len },
            value: value.into(),
        }
    }

    /// Consume the element, returning its value.
    pub fn into_value(self) -> Value<I, P> {
        self.value
    }

    /// Retrieve the element header.
    pub fn header(&self) -> &DataElementHeader {
        &self.header
    }

    /// Retrieve the value.
    pub fn value(&self) -> &Value<I, P> {
        &self.value
    }

    /// Retrieve a mutable reference to the value.
    pub fn value_mut(&mut self) -> &mut Value<I, P> {
        &mut self.value
    }

    /// Replace the value, recomputing the header's declared length.
    pub fn set_value(&mut self, value: Value<I, P>) {
        self.header.len = value.length();
        self.value = value;
    }

    /// Consume the element, returning its header and value.
    pub fn into_parts(self) -> (DataElementHeader, Value<I, P>) {
        (self.header, self.value)
    }

    /// Retrieve the value as a single string, converting it if necessary.
    pub fn string(&self) -> std::result::Result<std::borrow::Cow<'_, str>, crate::value::ConvertValueError> {
        self.value.to_str()
    }

    /// Alias of [`string`](Self::string).
    pub fn to_str(&self) -> std::result::Result<std::borrow::Cow<'_, str>, crate::value::ConvertValueError> {
        self.string()
    }

    /// Retrieve the value as a single 16-bit unsigned integer, converting
    /// it from a textual representation if necessary.
    pub fn uint16(&self) -> std::result::Result<u16, crate::value::ConvertValueError> {
        self.to_int()
    }

    /// Retrieve the value as a single integer of the requested width,
    /// converting it from a textual representation if necessary.
    pub fn to_int<T>(&self) -> std::result::Result<T, crate::value::ConvertValueError>
    where
        T: TryFrom<i64>,
    {
        match &self.value {
            Value::Primitive(v) => v.to_int(),
            _ => Err(crate::value::ConvertValueError {
                requested: "int",
                original: self.value.value_type(),
                cause: None,
            }),
        }
    }

    /// Retrieve the value representation.
    pub fn vr(&self) -> VR {
        self.header.vr
    }
}

/// A data element header: tag, value representation and declared length,
/// without the value itself.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DataElementHeader {
    /// The element's attribute tag.
    pub tag: Tag,
    /// The element's value representation.
    pub vr: VR,
    /// The declared length of the value, in bytes.
    pub len: Length,
}

impl Header for DataElementHeader {
    fn tag(&self) -> Tag {
        self.tag
    }
    fn len(&self) -> Length {
        self.len
    }
}

impl DataElementHeader {
    /// Construct a new header from its parts.
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> DataElementHeader {
        DataElementHeader {
            tag: tag.into(),
            vr,
            len,
        }
    }

    /// Retrieve the value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }
}

impl From<SequenceItemHeader> for DataElementHeader {
    fn from(value: SequenceItemHeader) -> DataElementHeader {
        DataElementHeader {
            tag: value.tag(),
            vr: VR::UN,
            len: value.len(),
        }
    }
}

/// A placeholder type used where a nested dataset type parameter is not
/// applicable (e.g. file meta information, which never nests).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct EmptyObject;

impl HasLength for EmptyObject {
    fn length(&self) -> Length {
        Length(0)
    }
}

impl crate::value::DicomValueType for EmptyObject {
    fn value_type(&self) -> crate::value::ValueType {
        crate::value::ValueType::Empty
    }
    fn cardinality(&self) -> usize {
        0
    }
}

/// The header of a sequence item, item delimiter, or sequence delimiter.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SequenceItemHeader {
    /// The start of an item, with its declared length (possibly undefined).
    Item { len: Length },
    /// An item delimiter; always zero length.
    ItemDelimiter,
    /// A sequence delimiter; always zero length.
    SequenceDelimiter,
}

impl SequenceItemHeader {
    /// Build a sequence item header from its raw tag and length, verifying
    /// that the tag identifies one of the three item-level pseudo-elements.
    pub fn new<T: Into<Tag>>(tag: T, len: Length) -> crate::error::Result<SequenceItemHeader> {
        match tag.into() {
            Tag(0xFFFE, 0xE000) => Ok(SequenceItemHeader::Item { len }),
            Tag(0xFFFE, 0xE00D) => {
                if len != Length(0) {
                    Err(crate::error::Error::UnexpectedDataValueLength)
                } else {
                    Ok(SequenceItemHeader::ItemDelimiter)
                }
            }
            Tag(0xFFFE, 0xE0DD) => Ok(SequenceItemHeader::SequenceDelimiter),
            tag => Err(crate::error::Error::UnexpectedTag { tag }),
        }
    }
}

impl Header for SequenceItemHeader {
    fn tag(&self) -> Tag {
        match *self {
            SequenceItemHeader::Item { .. } => Tag(0xFFFE, 0xE000),
            SequenceItemHeader::ItemDelimiter => Tag(0xFFFE, 0xE00D),
            SequenceItemHeader::SequenceDelimiter => Tag(0xFFFE, 0xE0DD),
        }
    }
    fn len(&self) -> Length {
        match *self {
            SequenceItemHeader::Item { len } => len,
            SequenceItemHeader::ItemDelimiter | SequenceItemHeader::SequenceDelimiter => {
                Length(0)
            }
        }
    }
}

/// The set of value representations recognised by the standard.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
#[allow(missing_docs)]
pub enum VR {
    AE,
    AS,
    AT,
    CS,
    DA,
    DS,
    DT,
    FL,
    FD,
    IS,
    LO,
    LT,
    OB,
    OD,
    OF,
    OL,
    OV,
    OW,
    PN,
    SH,
    SL,
    SQ,
    SS,
    ST,
    SV,
    TM,
    UC,
    UI,
    UL,
    UN,
    UR,
    US,
    UT,
    UV,
}

impl VR {
    /// Decode a VR from its two-byte wire representation.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref()).ok().and_then(|s| VR::from_str(s).ok())
    }

    /// Render this VR as its two-character mnemonic.
    pub fn to_str(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE", AS => "AS", AT => "AT", CS => "CS", DA => "DA", DS => "DS", DT => "DT",
            FL => "FL", FD => "FD", IS => "IS", LO => "LO", LT => "LT", OB => "OB", OD => "OD",
            OF => "OF", OL => "OL", OV => "OV", OW => "OW", PN => "PN", SH => "SH", SL => "SL",
            SQ => "SQ", SS => "SS", ST => "ST", SV => "SV", TM => "TM", UC => "UC", UI => "UI",
            UL => "UL", UN => "UN", UR => "UR", US => "US", UT => "UT", UV => "UV",
        }
    }

    /// Render this VR as its two-byte wire representation.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.to_str().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// Whether this VR is textual (its raw bytes are meant to be decoded
    /// with the dataset's character set).
    pub fn is_stringy(self) -> bool {
        !matches!(
            self,
            VR::OB | VR::OD | VR::OF | VR::OL | VR::OV | VR::OW | VR::SQ | VR::UN | VR::FL
                | VR::FD | VR::SL | VR::SS | VR::UL | VR::US | VR::AT | VR::SV | VR::UV
        )
    }

    /// Whether this VR uses a 32-bit length field under explicit encoding
    /// (and therefore reserves two bytes after the VR mnemonic).
    pub fn has_long_length(self) -> bool {
        matches!(
            self,
            VR::OB | VR::OD | VR::OF | VR::OL | VR::OV | VR::OW | VR::SQ | VR::UC | VR::UR
                | VR::UT | VR::UN | VR::SV | VR::UV
        )
    }

    /// The padding byte used to bring an odd-length value to even length:
    /// space (0x20) for most textual VRs, null (0x00) otherwise.
    pub fn padding(self) -> u8 {
        match self {
            VR::UI | VR::OB | VR::OD | VR::OF | VR::OL | VR::OV | VR::OW | VR::SQ | VR::UN
            | VR::AT | VR::FL | VR::FD | VR::SL | VR::SS | VR::UL | VR::US | VR::SV | VR::UV => {
                0x00
            }
            _ => 0x20,
        }
    }

    /// The fixed per-element byte width for numeric VRs, if any.
    pub fn numeric_width(self) -> Option<u8> {
        match self {
            VR::SS | VR::US => Some(2),
            VR::SL | VR::UL | VR::FL | VR::AT => Some(4),
            VR::FD | VR::SV | VR::UV => Some(8),
            _ => None,
        }
    }
}

impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        use VR::*;
        match string {
            "AE" => Ok(AE), "AS" => Ok(AS), "AT" => Ok(AT), "CS" => Ok(CS), "DA" => Ok(DA),
            "DS" => Ok(DS), "DT" => Ok(DT), "FL" => Ok(FL), "FD" => Ok(FD), "IS" => Ok(IS),
            "LO" => Ok(LO), "LT" => Ok(LT), "OB" => Ok(OB), "OD" => Ok(OD), "OF" => Ok(OF),
            "OL" => Ok(OL), "OV" => Ok(OV), "OW" => Ok(OW), "PN" => Ok(PN), "SH" => Ok(SH),
            "SL" => Ok(SL), "SQ" => Ok(SQ), "SS" => Ok(SS), "ST" => Ok(ST), "SV" => Ok(SV),
            "TM" => Ok(TM), "UC" => Ok(UC), "UI" => Ok(UI), "UL" => Ok(UL), "UN" => Ok(UN),
            "UR" => Ok(UR), "US" => Ok(US), "UT" => Ok(UT), "UV" => Ok(UV),
            _ => Err("no such value representation"),
        }
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A tag's group number.
pub type GroupNumber = u16;
/// A tag's element number.
pub type ElementNumber = u16;

/// A DICOM attribute tag: a `(group, element)` pair of 16-bit integers.
/// Tags order lexicographically by group, then element.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// The tag's group number.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// The tag's element number.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// Whether this is a private tag (odd group number).
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 % 2 == 1
    }

    /// Whether this tag is a private creator declaration: an odd group
    /// with an element in `0x0010..=0x00FF`.
    #[inline]
    pub fn is_private_creator(self) -> bool {
        self.is_private() && (0x0010..=0x00FF).contains(&self.1)
    }

    /// The private "slot" byte (the low byte of the element part), used to
    /// attribute a private element to a creator declaration.
    #[inline]
    pub fn private_slot(self) -> u8 {
        (self.1 >> 8) as u8
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

/// The declared byte length of a value. `0xFFFF_FFFF` is reserved to mean
/// an undefined (sentinel-delimited) length.
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// The undefined-length sentinel.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Build a length from its raw wire value.
    pub fn new(len: u32) -> Self {
        Length(len)
    }

    /// Build a defined length.
    ///
    /// # Panics
    /// Panics if `len` is the undefined-length sentinel.
    pub fn defined(len: u32) -> Self {
        assert_ne!(len, UNDEFINED_LEN);
        Length(len)
    }

    /// Whether this length is the undefined-length sentinel.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Whether this length is a concrete, defined length.
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// The concrete length, or `None` if undefined.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }
}

impl From<u32> for Length {
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl PartialEq<Length> for Length {
    fn eq(&self, rhs: &Length) -> bool {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => false,
            (l1, l2) => l1 == l2,
        }
    }
}

impl Eq for Length {}

impl PartialOrd<Length> for Length {
    fn partial_cmp(&self, rhs: &Length) -> Option<Ordering> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => None,
            (l1, l2) => Some(l1.cmp(&l2)),
        }
    }
}

impl std::ops::Add<Length> for Length {
    type Output = Self;
    fn add(self, rhs: Length) -> Self::Output {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => Length::UNDEFINED,
            (l1, l2) => Length(l1 + l2),
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{l}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Length, Tag};

    #[test]
    fn tag_from_u16_pair() {
        let t = Tag::from((0x0010u16, 0x0020u16));
        assert_eq!(0x0010u16, t.group());
        assert_eq!(0x0020u16, t.element());
    }

    #[test]
    fn tag_private_detection() {
        assert!(Tag(0x0009, 0x0010).is_private());
        assert!(Tag(0x0009, 0x0010).is_private_creator());
        assert!(!Tag(0x0008, 0x0010).is_private());
        assert_eq!(Tag(0x0009, 0x1001).private_slot(), 0x10);
    }

    #[test]
    fn length_comparisons() {
        assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
        assert!(Length::defined(16) < Length::defined(64));
        assert!(!(Length::UNDEFINED < Length::defined(64)));
    }
}
