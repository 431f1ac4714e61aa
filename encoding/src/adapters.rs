//! The minimal pixel data surface shared between the object model and the
//! transfer syntax registry.
//!
//! This does not include a codec adapter registry: this crate only deals
//! with the Part-10 byte stream, never with decoding compressed pixel
//! data into images, so there is no `PixelDataReader`/`PixelDataWriter`
//! plugin mechanism here.

use dicom_core::value::C;

/// Either a byte slice/vector if native pixel data or byte fragments if
/// encapsulated, together with the fragment offset table.
#[derive(Debug, Clone, Default)]
pub struct RawPixelData {
    /// the pixel data fragments, one entry per fragment (or a single
    /// entry holding the whole buffer for native pixel data)
    pub fragments: C<Vec<u8>>,

    /// the offset table for the fragments, empty if there is none
    pub offset_table: C<u32>,
}

/// A DICOM object trait to be interpreted as pixel data.
///
/// This extends the concept of a DICOM object with the handful of
/// attributes and accessors needed to decode pixel data into images or
/// multi-dimensional arrays, without requiring a dependency on the
/// whole object model.
pub trait PixelDataObject {
    /// The transfer syntax UID that the encapsulated (or native) pixel
    /// data is encoded with.
    fn transfer_syntax_uid(&self) -> &str;

    /// Return the Rows attribute, or `None` if it is not found.
    fn rows(&self) -> Option<u16>;

    /// Return the Columns attribute, or `None` if it is not found.
    fn cols(&self) -> Option<u16>;

    /// Return the SamplesPerPixel attribute, or `None` if it is not found.
    fn samples_per_pixel(&self) -> Option<u16>;

    /// Return the BitsAllocated attribute, or `None` if it is not set.
    fn bits_allocated(&self) -> Option<u16>;

    /// Return the BitsStored attribute, or `None` if it is not set.
    fn bits_stored(&self) -> Option<u16>;

    /// Return the PhotometricInterpretation attribute, or `None` if it is
    /// not set.
    fn photometric_interpretation(&self) -> Option<&str>;

    /// Return the NumberOfFrames attribute, or `None` if it is not set.
    fn number_of_frames(&self) -> Option<u32>;

    /// Return the number of fragments, or `None` for native pixel data.
    fn number_of_fragments(&self) -> Option<u32>;

    /// Return a specific pixel data fragment by index, or `None` if no
    /// pixel data is found. Non-encapsulated pixel data can be retrieved
    /// as a whole by requesting fragment 0.
    fn fragment(&self, fragment: usize) -> Option<std::borrow::Cow<'_, [u8]>>;

    /// Return the basic offset table, or `None` for native pixel data.
    fn offset_table(&self) -> Option<std::borrow::Cow<'_, [u32]>>;

    /// Return the raw pixel data, whole native buffer or all fragments,
    /// together with the offset table. Returns `None` if no pixel data
    /// is found.
    fn raw_pixel_data(&self) -> Option<RawPixelData>;
}
