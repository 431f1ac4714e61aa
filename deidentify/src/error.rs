//! Error types for the de-identification subsystem.
//!
//! Mirrors the taxonomy `dicom-parser`/`dicom-object` use for the codec
//! half of this workspace: one `snafu` enum per concern, scoped to the
//! module that raises it.

use dicom_core::header::Tag;
use snafu::Snafu;

/// Errors raised by the identifier remap store.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum RemapError {
    /// the persistent store could not be opened or queried
    #[snafu(display("remap store I/O failed: {source}"))]
    StoreIo { source: rusqlite::Error },

    /// a synthetic identifier collided with the preservation prefix or
    /// otherwise could not be generated within the 64-character budget
    #[snafu(display("could not generate a synthetic identifier for {original}"))]
    Generation { original: String },

    /// writing the export document failed
    #[snafu(display("could not write remap export: {source}"))]
    ExportIo { source: std::io::Error },
}

/// Errors raised by the pixel-region redactor.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum RedactError {
    /// the dataset has no pixel data element to redact
    #[snafu(display("no pixel data present"))]
    NoPixelData,

    /// one of rows, columns, samples-per-pixel or bits-allocated is missing
    #[snafu(display("image dimensions are not fully specified"))]
    MissingDimensions,

    /// pixel data is encapsulated (compressed) and skip-if-compressed was
    /// not enabled
    #[snafu(display("pixel data is encapsulated; redaction requires native pixel data"))]
    IncompressiblePixelRedaction,

    /// the bits-allocated/samples-per-pixel combination is not supported
    #[snafu(display("unsupported pixel layout: {bits_allocated} bits, {samples_per_pixel} samples"))]
    UnsupportedLayout {
        bits_allocated: u16,
        samples_per_pixel: u16,
    },
}

/// A single non-fatal failure recorded while de-identifying one dataset.
///
/// Per-element failures do not abort the walk; they accumulate here and
/// are returned alongside the (possibly partially) de-identified dataset.
#[derive(Debug, Clone)]
pub struct Warning {
    pub tag: Tag,
    pub message: String,
}
