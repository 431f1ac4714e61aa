//! The pixel-region redactor (§4.15): overwrites rectangular regions of
//! native (non-encapsulated) pixel data with a configured fill value.

use crate::error::{
    IncompressiblePixelRedactionSnafu, MissingDimensionsSnafu, NoPixelDataSnafu, RedactError,
    UnsupportedLayoutSnafu,
};
use dicom_dictionary_std::tags;
use dicom_object::mem::InMemDicomObject;
use dicom_object::FileDicomObject;
use snafu::OptionExt;

/// A rectangular region to redact, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// The frame to redact, or `None` for every frame.
    pub frame: Option<u32>,
}

/// The pixel value to fill a redacted region with, interpreted per the
/// image's sample width and count (§4.15).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillValue(pub u32);

/// Whether to no-op (with a warning) instead of failing when the pixel
/// data is encapsulated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactOptions {
    pub skip_if_compressed: bool,
    pub set_burned_in_annotation: bool,
}

impl Default for FillValue {
    fn default() -> Self {
        FillValue(0)
    }
}

struct ImageLayout {
    rows: u32,
    columns: u32,
    samples_per_pixel: u16,
    bits_allocated: u16,
    bytes_per_sample: u32,
}

fn read_layout(obj: &InMemDicomObject) -> Result<ImageLayout, RedactError> {
    let rows: u16 = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int().ok())
        .context(MissingDimensionsSnafu)?;
    let columns: u16 = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int().ok())
        .context(MissingDimensionsSnafu)?;
    let samples_per_pixel: u16 = obj
        .get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int().ok())
        .context(MissingDimensionsSnafu)?;
    let bits_allocated: u16 = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int().ok())
        .context(MissingDimensionsSnafu)?;
    if bits_allocated == 0 || bits_allocated % 8 != 0 {
        return UnsupportedLayoutSnafu {
            bits_allocated,
            samples_per_pixel,
        }
        .fail();
    }
    Ok(ImageLayout {
        rows: rows as u32,
        columns: columns as u32,
        samples_per_pixel,
        bits_allocated,
        bytes_per_sample: (bits_allocated / 8) as u32,
    })
}

/// Redact `regions` of the given object's native pixel data in place.
///
/// Returns an error if pixel data is absent, its dimensions are not
/// fully specified, or it is encapsulated and `skip_if_compressed` is
/// not set (in which case this is a no-op).
pub fn redact_regions(
    obj: &mut FileDicomObject<InMemDicomObject>,
    regions: &[Region],
    fill: FillValue,
    options: RedactOptions,
) -> Result<(), RedactError> {
    use dicom_core::value::Value;

    let is_encapsulated = matches!(
        obj.get(tags::PIXEL_DATA).map(|e| e.value()),
        Some(Value::PixelSequence(_))
    );
    if is_encapsulated {
        if options.skip_if_compressed {
            tracing::warn!("skipping pixel redaction: pixel data is encapsulated");
            return Ok(());
        }
        return IncompressiblePixelRedactionSnafu.fail();
    }

    let layout = read_layout(obj)?;

    let element = obj.get(tags::PIXEL_DATA).context(NoPixelDataSnafu)?;
    let mut bytes: Vec<u8> = match element.value().to_bytes() {
        Ok(b) => b.into_owned(),
        Err(_) => Vec::new(),
    };

    let frame_stride =
        (layout.rows as u64) * (layout.columns as u64) * (layout.samples_per_pixel as u64) * (layout.bytes_per_sample as u64);
    let row_stride = (layout.columns as u64) * (layout.samples_per_pixel as u64) * (layout.bytes_per_sample as u64);
    let sample_stride = (layout.samples_per_pixel as u64) * (layout.bytes_per_sample as u64);

    let num_frames = if frame_stride == 0 {
        0
    } else {
        (bytes.len() as u64) / frame_stride
    };

    let mut modified = false;
    for region in regions {
        let x0 = region.x.min(layout.columns);
        let y0 = region.y.min(layout.rows);
        let x1 = (region.x + region.width).min(layout.columns);
        let y1 = (region.y + region.height).min(layout.rows);
        if x0 >= x1 || y0 >= y1 {
            // entirely outside image bounds; skip
            continue;
        }

        let frames: Vec<u64> = match region.frame {
            Some(f) => vec![f as u64],
            None => (0..num_frames.max(1)).collect(),
        };

        for frame in frames {
            let frame_offset = frame * frame_stride;
            if frame_offset >= bytes.len() as u64 {
                continue;
            }
            for row in y0..y1 {
                for col in x0..x1 {
                    let pixel_offset = frame_offset
                        + (row as u64) * row_stride
                        + (col as u64) * sample_stride;
                    fill_pixel(&mut bytes, pixel_offset, &layout, fill)?;
                }
            }
        }
        modified = true;
    }

    if modified {
        let (header, _) = element.clone().into_parts();
        let vr = header.vr;
        obj.put(dicom_core::DataElement::new(
            tags::PIXEL_DATA,
            vr,
            dicom_core::value::PrimitiveValue::from(bytes),
        ));
        if options.set_burned_in_annotation {
            obj.put_str(tags::BURNED_IN_ANNOTATION, dicom_core::VR::CS, "NO");
        }
    }

    Ok(())
}

fn fill_pixel(
    bytes: &mut [u8],
    offset: u64,
    layout: &ImageLayout,
    fill: FillValue,
) -> Result<(), RedactError> {
    let offset = offset as usize;
    match (layout.samples_per_pixel, layout.bits_allocated) {
        (1, 8) => {
            if let Some(b) = bytes.get_mut(offset) {
                *b = fill.0 as u8;
            }
        }
        (3, 8) => {
            let [r, g, b] = [
                (fill.0 & 0xFF) as u8,
                ((fill.0 >> 8) & 0xFF) as u8,
                ((fill.0 >> 16) & 0xFF) as u8,
            ];
            for (i, value) in [r, g, b].into_iter().enumerate() {
                if let Some(slot) = bytes.get_mut(offset + i) {
                    *slot = value;
                }
            }
        }
        (samples, 16) => {
            let lo = (fill.0 & 0xFFFF) as u16;
            let le = lo.to_le_bytes();
            for s in 0..samples as usize {
                let start = offset + s * 2;
                if start + 1 < bytes.len() {
                    bytes[start..start + 2].copy_from_slice(&le);
                }
            }
        }
        (samples, 32) => {
            let le = fill.0.to_le_bytes();
            for s in 0..samples as usize {
                let start = offset + s * 4;
                if start + 3 < bytes.len() {
                    bytes[start..start + 4].copy_from_slice(&le);
                }
            }
        }
        (samples, bits) => {
            return UnsupportedLayoutSnafu {
                bits_allocated: bits,
                samples_per_pixel: samples,
            }
            .fail()
        }
    }
    Ok(())
}
