//! Value representations for DICOM data elements.
//!
//! A data element's value is either a primitive (string, numeric, date/time
//! or tag value), a sequence of nested items, or an encapsulated pixel data
//! fragment sequence. See [`Value`] and [`PrimitiveValue`].

pub mod partial;

pub use partial::{DicomDate, DicomDateTime, DicomTime};

use crate::header::{EmptyObject, HasLength, Length, Tag};
use smallvec::SmallVec;
use snafu::{IntoError, ResultExt, Snafu};
use std::borrow::Cow;
use std::fmt;

/// The inline-capacity container used throughout the value module: most
/// DICOM values hold one or a handful of items, so a small inline buffer
/// avoids an allocation in the common case.
pub type C<T> = SmallVec<[T; 2]>;

/// Build a [`PrimitiveValue`] of a given variant from one or more
/// components, without spelling out the inline container explicitly.
///
/// ```
/// # use dicom_core::dicom_value;
/// # use dicom_core::value::PrimitiveValue;
/// let single = dicom_value!(U32, 200);
/// let multi = dicom_value!(U8, [0, 1, 2]);
/// ```
#[macro_export]
macro_rules! dicom_value {
    ($variant:ident, [$($elem:expr),* $(,)?]) => {
        $crate::PrimitiveValue::$variant(
            $crate::value::C::from_vec(vec![$($elem.into()),*])
        )
    };
    ($variant:ident, $elem:expr) => {
        $crate::PrimitiveValue::$variant(
            $crate::value::C::from_vec(vec![$elem.into()])
        )
    };
}

/// The in-memory representation of a single encapsulated pixel data
/// fragment: its raw, possibly-compressed bytes, verbatim.
pub type InMemFragment = Vec<u8>;

/// A cheap discriminant for [`Value`] and [`PrimitiveValue`], used by
/// conversion errors to describe what a value actually is without cloning
/// or formatting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueType {
    /// No value (zero length).
    Empty,
    /// A single string value, expected where a value is used as a scalar.
    Str,
    /// A sequence of strings or a single string.
    Strs,
    /// A sequence of dates.
    Date,
    /// A sequence of times.
    Time,
    /// A sequence of date-times.
    DateTime,
    /// 8-bit unsigned integers (also used for OB/UN byte buffers).
    U8,
    /// 16-bit signed integers.
    I16,
    /// 16-bit unsigned integers.
    U16,
    /// 32-bit signed integers.
    I32,
    /// 32-bit unsigned integers.
    U32,
    /// 64-bit signed integers.
    I64,
    /// 64-bit unsigned integers.
    U64,
    /// 32-bit floating point numbers.
    F32,
    /// 64-bit floating point numbers.
    F64,
    /// Attribute tags (AT).
    Tags,
    /// A nested data set sequence.
    DataSetSequence,
    /// An encapsulated pixel data fragment sequence.
    PixelSequence,
}

/// An error raised when a [`PrimitiveValue`] cannot be reinterpreted,
/// pushed into, or otherwise modified as requested.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ModifyValueError {
    /// the value's current shape is incompatible with the requested
    /// interpretation or modification
    #[snafu(display("cannot use a value of type {from:?} as {to:?}"))]
    IncompatibleTypes {
        /// the value's actual type
        from: ValueType,
        /// the type it was requested as
        to: ValueType,
    },
}

pub use crate::error::ConvertValueError;

/// A trait implemented by types that can be held inside a [`Value`] as a
/// nested item (ordinarily `InMemDicomObject`).
pub trait DicomValueType: HasLength {
    /// This value's type discriminant.
    fn value_type(&self) -> ValueType;

    /// The number of immediate components of this value (e.g. the number
    /// of strings in a multi-valued string, or the number of items in a
    /// sequence).
    fn cardinality(&self) -> usize;
}

/// A nested data set sequence: an ordered list of items, each of type `I`,
/// together with the sequence's original declared length (which may be
/// [`Length::UNDEFINED`]).
#[derive(Debug, Clone, PartialEq)]
pub struct DataSetSequence<I> {
    items: C<I>,
    size: Length,
}

impl<I> DataSetSequence<I> {
    /// Build a sequence from its items and declared length.
    pub fn new<T>(items: T, size: Length) -> Self
    where
        T: Into<C<I>>,
    {
        DataSetSequence {
            items: items.into(),
            size,
        }
    }

    /// Build an empty sequence with an undefined declared length.
    pub fn empty() -> Self {
        DataSetSequence {
            items: C::new(),
            size: Length::UNDEFINED,
        }
    }

    /// The sequence's items.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Consume the sequence, returning its items.
    pub fn into_items(self) -> C<I> {
        self.items
    }

    /// The number of items in the sequence.
    pub fn multiplicity(&self) -> u32 {
        self.items.len() as u32
    }

    /// The number of items in the sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The sequence's originally declared length.
    pub fn size(&self) -> Length {
        self.size
    }
}

impl<I> From<Vec<I>> for DataSetSequence<I> {
    fn from(items: Vec<I>) -> Self {
        DataSetSequence::new(C::from_vec(items), Length::UNDEFINED)
    }
}

/// An encapsulated pixel data fragment sequence: a Basic Offset Table
/// followed by one or more compressed-frame fragments of type `P`
/// (ordinarily raw byte buffers).
#[derive(Debug, Clone, PartialEq)]
pub struct PixelFragmentSequence<P> {
    offset_table: C<u32>,
    fragments: C<P>,
}

impl<P> PixelFragmentSequence<P> {
    /// Build a fragment sequence from an offset table and its fragments.
    pub fn new(offset_table: C<u32>, fragments: C<P>) -> Self {
        PixelFragmentSequence {
            offset_table,
            fragments,
        }
    }

    /// Build a fragment sequence with an empty offset table.
    pub fn new_fragments<T>(fragments: T) -> Self
    where
        T: Into<C<P>>,
    {
        PixelFragmentSequence {
            offset_table: C::new(),
            fragments: fragments.into(),
        }
    }

    /// The Basic Offset Table, verbatim.
    pub fn offset_table(&self) -> &[u32] {
        &self.offset_table
    }

    /// The compressed pixel data fragments.
    pub fn fragments(&self) -> &[P] {
        &self.fragments
    }

    /// Whether there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Consume the sequence, returning the offset table and fragments.
    pub fn into_parts(self) -> (C<u32>, C<P>) {
        (self.offset_table, self.fragments)
    }
}

/// A data element's value: either a primitive value, a sequence of nested
/// data sets, or an encapsulated pixel data fragment sequence.
///
/// `I` is the type used for nested items, ordinarily `InMemDicomObject`.
/// `P` is the type used for pixel data fragments, ordinarily a raw byte
/// buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<I = EmptyObject, P = InMemFragment> {
    /// A primitive value.
    Primitive(PrimitiveValue),
    /// A sequence of nested data sets.
    Sequence(DataSetSequence<I>),
    /// An encapsulated pixel data fragment sequence.
    PixelSequence(PixelFragmentSequence<P>),
}

impl<I, P> From<PrimitiveValue> for Value<I, P> {
    fn from(value: PrimitiveValue) -> Self {
        Value::Primitive(value)
    }
}

impl<I, P> From<DataSetSequence<I>> for Value<I, P> {
    fn from(seq: DataSetSequence<I>) -> Self {
        Value::Sequence(seq)
    }
}

impl<I, P> From<PixelFragmentSequence<P>> for Value<I, P> {
    fn from(seq: PixelFragmentSequence<P>) -> Self {
        Value::PixelSequence(seq)
    }
}

impl<I, P> Value<I, P>
where
    I: HasLength,
{
    /// Build a primitive value.
    pub fn new(value: PrimitiveValue) -> Self {
        Value::Primitive(value)
    }

    /// Build a sequence value from a list of items, with a declared length.
    pub fn new_sequence<T>(items: T, size: Length) -> Self
    where
        T: Into<C<I>>,
    {
        Value::Sequence(DataSetSequence::new(items, size))
    }

    /// Access the value as a primitive, if it is one.
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Consume the value, returning the inner primitive, if it is one.
    pub fn into_primitive(self) -> Option<PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Access the value's items, if it is a sequence.
    pub fn items(&self) -> Option<&[I]> {
        match self {
            Value::Sequence(seq) => Some(seq.items()),
            _ => None,
        }
    }

    /// Access the value's pixel fragments, if it is a pixel sequence.
    pub fn fragments(&self) -> Option<&[P]> {
        match self {
            Value::PixelSequence(seq) => Some(seq.fragments()),
            _ => None,
        }
    }

    /// Retrieve this value as a single string, if it is a textual
    /// primitive.
    pub fn string(&self) -> Result<Cow<str>, ModifyValueError> {
        match self {
            Value::Primitive(v) => v.string(),
            _ => IncompatibleTypesSnafu {
                from: self.value_type(),
                to: ValueType::Str,
            }
            .fail(),
        }
    }

    /// Convert this value into a single string, failing with a
    /// [`ConvertValueError`] if it is not textual.
    pub fn to_str(&self) -> Result<Cow<str>, ConvertValueError> {
        self.string().map_err(|_| ConvertValueError {
            requested: "str",
            original: self.value_type(),
            cause: None,
        })
    }

    /// Convert this value into a byte slice, failing with a
    /// [`ConvertValueError`] if it is not a primitive value with a
    /// byte-compatible representation.
    pub fn to_bytes(&self) -> Result<Cow<[u8]>, ConvertValueError> {
        match self {
            Value::Primitive(v) => v.bytes().map(Cow::Borrowed).map_err(|_| ConvertValueError {
                requested: "bytes",
                original: self.value_type(),
                cause: None,
            }),
            _ => Err(ConvertValueError {
                requested: "bytes",
                original: self.value_type(),
                cause: None,
            }),
        }
    }
}

impl<I, P> HasLength for Value<I, P>
where
    I: HasLength,
{
    fn length(&self) -> Length {
        match self {
            Value::Primitive(v) => v.length(),
            Value::Sequence(seq) => seq.size(),
            Value::PixelSequence(_) => Length::UNDEFINED,
        }
    }
}

impl<I, P> DicomValueType for Value<I, P>
where
    I: HasLength,
{
    fn value_type(&self) -> ValueType {
        match self {
            Value::Primitive(v) => v.value_type(),
            Value::Sequence(_) => ValueType::DataSetSequence,
            Value::PixelSequence(_) => ValueType::PixelSequence,
        }
    }

    fn cardinality(&self) -> usize {
        match self {
            Value::Primitive(v) => v.cardinality(),
            Value::Sequence(seq) => seq.len(),
            Value::PixelSequence(seq) => seq.fragments().len(),
        }
    }
}

/// A primitive (non-nested) DICOM value, as parsed from the wire into a
/// representation independent of the originating value representation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PrimitiveValue {
    /// No value (zero length element).
    Empty,

    /// A sequence of strings, used for most textual VRs (LO, SH, PN, CS,
    /// UI, UC, UR, UT, LT, ST, IS, DS in unparsed form).
    Strs(C<String>),

    /// A sequence of partial dates (DA).
    Date(C<DicomDate>),
    /// A sequence of partial times (TM).
    Time(C<DicomTime>),
    /// A sequence of partial date-times (DT).
    DateTime(C<DicomDateTime>),

    /// Unsigned byte buffer (OB, UN, or pixel data in native form).
    U8(C<u8>),
    /// Signed 16-bit integers (SS).
    I16(C<i16>),
    /// Unsigned 16-bit integers (US, OW in decoded form).
    U16(C<u16>),
    /// Signed 32-bit integers (SL).
    I32(C<i32>),
    /// Unsigned 32-bit integers (UL, OL in decoded form).
    U32(C<u32>),
    /// Signed 64-bit integers (SV).
    I64(C<i64>),
    /// Unsigned 64-bit integers (UV).
    U64(C<u64>),
    /// 32-bit floating point numbers (FL, OF).
    F32(C<f32>),
    /// 64-bit floating point numbers (FD, OD).
    F64(C<f64>),
    /// Attribute tags (AT).
    Tags(C<Tag>),
}

impl Default for PrimitiveValue {
    fn default() -> Self {
        PrimitiveValue::Empty
    }
}

/// Implements the conversion from a core type into a single-element
/// [`PrimitiveValue`].
macro_rules! impl_from_for_primitive {
    ($typ:ty, $variant:ident) => {
        impl From<$typ> for PrimitiveValue {
            fn from(value: $typ) -> Self {
                PrimitiveValue::$variant(C::from_elem(value, 1))
            }
        }
    };
}

impl_from_for_primitive!(u8, U8);
impl_from_for_primitive!(u16, U16);
impl_from_for_primitive!(i16, I16);
impl_from_for_primitive!(u32, U32);
impl_from_for_primitive!(i32, I32);
impl_from_for_primitive!(u64, U64);
impl_from_for_primitive!(i64, I64);
impl_from_for_primitive!(f32, F32);
impl_from_for_primitive!(f64, F64);
impl_from_for_primitive!(Tag, Tags);
impl_from_for_primitive!(DicomDate, Date);
impl_from_for_primitive!(DicomTime, Time);
impl_from_for_primitive!(DicomDateTime, DateTime);

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        PrimitiveValue::Strs(C::from_elem(value, 1))
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Strs(C::from_elem(value.to_owned(), 1))
    }
}

impl From<Vec<u8>> for PrimitiveValue {
    fn from(value: Vec<u8>) -> Self {
        PrimitiveValue::U8(C::from_vec(value))
    }
}

impl From<&[u8]> for PrimitiveValue {
    fn from(value: &[u8]) -> Self {
        PrimitiveValue::U8(C::from_slice(value))
    }
}

impl<I, P> From<&str> for Value<I, P> {
    fn from(value: &str) -> Self {
        Value::Primitive(value.into())
    }
}

impl<I, P> From<String> for Value<I, P> {
    fn from(value: String) -> Self {
        Value::Primitive(value.into())
    }
}

impl PrimitiveValue {
    /// The number of individual components in a multi-valued primitive.
    pub fn multiplicity(&self) -> u32 {
        self.cardinality() as u32
    }

    /// Retrieve this value as a single string, if it holds exactly one
    /// string-shaped component.
    pub fn to_str(&self) -> crate::error::Result<Cow<str>> {
        match self {
            PrimitiveValue::Strs(c) if c.len() == 1 => Ok(Cow::Borrowed(c[0].as_str())),
            PrimitiveValue::Strs(c) if c.is_empty() => Ok(Cow::Borrowed("")),
            PrimitiveValue::Strs(c) => Ok(Cow::Owned(c.join("\\"))),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// Retrieve this value as a single string, for use by attribute
    /// operations that replace a scalar textual attribute.
    pub fn string(&self) -> Result<Cow<str>, ModifyValueError> {
        self.to_str().map_err(|_| {
            IncompatibleTypesSnafu {
                from: self.value_type(),
                to: ValueType::Str,
            }
            .into_error(snafu::NoneError)
        })
    }

    /// Retrieve the backslash-separated string components of a textual
    /// value.
    pub fn strings(&self) -> crate::error::Result<&[String]> {
        match self {
            PrimitiveValue::Strs(c) => Ok(c),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// Interpret this value as a sequence of signed 32-bit integers,
    /// converting from a textual representation (IS) if necessary.
    pub fn to_multi_int(&self) -> crate::error::Result<Vec<i32>> {
        match self {
            PrimitiveValue::I32(c) => Ok(c.iter().copied().collect()),
            PrimitiveValue::I16(c) => Ok(c.iter().map(|&v| v as i32).collect()),
            PrimitiveValue::U16(c) => Ok(c.iter().map(|&v| v as i32).collect()),
            PrimitiveValue::Strs(c) => c
                .iter()
                .map(|s| {
                    s.trim()
                        .parse::<i32>()
                        .context(crate::error::ParseIntegerSnafu)
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(Into::into),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// Interpret this value as a sequence of 64-bit floats, converting
    /// from a textual representation (DS) if necessary.
    pub fn to_multi_float64(&self) -> crate::error::Result<Vec<f64>> {
        match self {
            PrimitiveValue::F64(c) => Ok(c.iter().copied().collect()),
            PrimitiveValue::F32(c) => Ok(c.iter().map(|&v| v as f64).collect()),
            PrimitiveValue::Strs(c) => c
                .iter()
                .map(|s| {
                    s.trim()
                        .parse::<f64>()
                        .context(crate::error::ParseFloatSnafu)
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(Into::into),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// The raw bytes of this value, if it is a byte buffer (OB/UN/pixel
    /// data), without any padding assumptions.
    pub fn bytes(&self) -> crate::error::Result<&[u8]> {
        match self {
            PrimitiveValue::U8(c) => Ok(c),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// The raw bytes of this value, falling back to an empty buffer for
    /// value representations with no byte-compatible layout.
    pub fn to_bytes(&self) -> Cow<'_, [u8]> {
        match self.bytes() {
            Ok(b) => Cow::Borrowed(b),
            Err(_) => Cow::Owned(Vec::new()),
        }
    }

    /// Interpret this value as a single integer, converting from a
    /// textual representation (IS/DS) if necessary.
    pub fn to_int<T>(&self) -> Result<T, ConvertValueError>
    where
        T: TryFrom<i64>,
    {
        let fail = || ConvertValueError {
            requested: "int",
            original: self.value_type(),
            cause: None,
        };
        let i: i64 = match self {
            PrimitiveValue::I16(c) if c.len() == 1 => c[0] as i64,
            PrimitiveValue::U16(c) if c.len() == 1 => c[0] as i64,
            PrimitiveValue::I32(c) if c.len() == 1 => c[0] as i64,
            PrimitiveValue::U32(c) if c.len() == 1 => c[0] as i64,
            PrimitiveValue::I64(c) if c.len() == 1 => c[0],
            PrimitiveValue::U64(c) if c.len() == 1 => c[0] as i64,
            PrimitiveValue::Strs(c) if c.len() == 1 => {
                c[0].trim().parse::<i64>().map_err(|_| fail())?
            }
            _ => return Err(fail()),
        };
        T::try_from(i).map_err(|_| fail())
    }

    /// Interpret this value as a single 32-bit float, converting from a
    /// textual representation (DS) if necessary.
    pub fn to_float32(&self) -> Result<f32, ConvertValueError> {
        let fail = || ConvertValueError {
            requested: "float32",
            original: self.value_type(),
            cause: None,
        };
        match self {
            PrimitiveValue::F32(c) if c.len() == 1 => Ok(c[0]),
            PrimitiveValue::F64(c) if c.len() == 1 => Ok(c[0] as f32),
            PrimitiveValue::Strs(c) if c.len() == 1 => {
                c[0].trim().parse::<f32>().map_err(|_| fail())
            }
            _ => Err(fail()),
        }
    }

    /// Interpret this value as a single 64-bit float, converting from a
    /// textual representation (DS) if necessary.
    pub fn to_float64(&self) -> Result<f64, ConvertValueError> {
        let fail = || ConvertValueError {
            requested: "float64",
            original: self.value_type(),
            cause: None,
        };
        match self {
            PrimitiveValue::F64(c) if c.len() == 1 => Ok(c[0]),
            PrimitiveValue::F32(c) if c.len() == 1 => Ok(c[0] as f64),
            PrimitiveValue::Strs(c) if c.len() == 1 => {
                c[0].trim().parse::<f64>().map_err(|_| fail())
            }
            _ => Err(fail()),
        }
    }

    /// Interpret this value as a single partial date.
    pub fn to_date(&self) -> crate::error::Result<DicomDate> {
        match self {
            PrimitiveValue::Date(c) if !c.is_empty() => Ok(c[0]),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// Interpret this value as a single partial time.
    pub fn to_time(&self) -> crate::error::Result<DicomTime> {
        match self {
            PrimitiveValue::Time(c) if !c.is_empty() => Ok(c[0]),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// Interpret this value as a single partial date-time.
    pub fn to_datetime(&self) -> crate::error::Result<DicomDateTime> {
        match self {
            PrimitiveValue::DateTime(c) if !c.is_empty() => Ok(c[0]),
            _ => crate::error::NonPrimitiveTypeSnafu.fail().map_err(Into::into),
        }
    }

    /// Calculate the number of bytes this value would occupy on the wire,
    /// not including any header or padding byte.
    pub fn calculate_byte_len(&self) -> usize {
        match self {
            PrimitiveValue::Empty => 0,
            PrimitiveValue::Strs(c) => {
                let total: usize = c.iter().map(|s| s.len()).sum();
                total + c.len().saturating_sub(1)
            }
            PrimitiveValue::Date(c) => c.len() * 8,
            PrimitiveValue::Time(c) => c.len() * 6,
            PrimitiveValue::DateTime(c) => c.len() * 4,
            PrimitiveValue::U8(c) => c.len(),
            PrimitiveValue::I16(c) => c.len() * 2,
            PrimitiveValue::U16(c) => c.len() * 2,
            PrimitiveValue::I32(c) => c.len() * 4,
            PrimitiveValue::U32(c) => c.len() * 4,
            PrimitiveValue::I64(c) => c.len() * 8,
            PrimitiveValue::U64(c) => c.len() * 8,
            PrimitiveValue::F32(c) => c.len() * 4,
            PrimitiveValue::F64(c) => c.len() * 8,
            PrimitiveValue::Tags(c) => c.len() * 4,
        }
    }
}

impl HasLength for PrimitiveValue {
    fn length(&self) -> Length {
        Length(self.calculate_byte_len() as u32)
    }
}

impl DicomValueType for PrimitiveValue {
    fn value_type(&self) -> ValueType {
        match self {
            PrimitiveValue::Empty => ValueType::Empty,
            PrimitiveValue::Strs(_) => ValueType::Strs,
            PrimitiveValue::Date(_) => ValueType::Date,
            PrimitiveValue::Time(_) => ValueType::Time,
            PrimitiveValue::DateTime(_) => ValueType::DateTime,
            PrimitiveValue::U8(_) => ValueType::U8,
            PrimitiveValue::I16(_) => ValueType::I16,
            PrimitiveValue::U16(_) => ValueType::U16,
            PrimitiveValue::I32(_) => ValueType::I32,
            PrimitiveValue::U32(_) => ValueType::U32,
            PrimitiveValue::I64(_) => ValueType::I64,
            PrimitiveValue::U64(_) => ValueType::U64,
            PrimitiveValue::F32(_) => ValueType::F32,
            PrimitiveValue::F64(_) => ValueType::F64,
            PrimitiveValue::Tags(_) => ValueType::Tags,
        }
    }

    fn cardinality(&self) -> usize {
        match self {
            PrimitiveValue::Empty => 0,
            PrimitiveValue::Strs(c) => c.len(),
            PrimitiveValue::Date(c) => c.len(),
            PrimitiveValue::Time(c) => c.len(),
            PrimitiveValue::DateTime(c) => c.len(),
            PrimitiveValue::U8(c) => c.len(),
            PrimitiveValue::I16(c) => c.len(),
            PrimitiveValue::U16(c) => c.len(),
            PrimitiveValue::I32(c) => c.len(),
            PrimitiveValue::U32(c) => c.len(),
            PrimitiveValue::I64(c) => c.len(),
            PrimitiveValue::U64(c) => c.len(),
            PrimitiveValue::F32(c) => c.len(),
            PrimitiveValue::F64(c) => c.len(),
            PrimitiveValue::Tags(c) => c.len(),
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrimitiveValue::Empty => write!(f, ""),
            PrimitiveValue::Strs(c) => write!(f, "{}", c.join("\\")),
            PrimitiveValue::U8(c) => write!(f, "{} byte(s)", c.len()),
            other => write!(f, "{other:?}"),
        }
    }
}
