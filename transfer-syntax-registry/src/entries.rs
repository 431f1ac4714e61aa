//! Well-known DICOM transfer syntax UIDs.
//!
//! The three base encoding rules (Implicit VR Little Endian, Explicit VR
//! Little Endian, Explicit VR Big Endian) are fully supported: their data
//! sets can be read and written by this crate's `dicom-encoding` codecs.
//!
//! The remaining entries are recognised by UID so that a transfer syntax
//! identifier found in a file's meta-information group can always be
//! resolved to a name, but their pixel data is encapsulated and this crate
//! does not attempt to decompress it; fragments are handed out as opaque
//! bytes by the parser.

use dicom_encoding::{Endianness, TransferSyntax as Ts};

pub const IMPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    "1.2.840.10008.1.2",
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    false,
);

pub const EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    "1.2.840.10008.1.2.1",
    "Explicit VR Little Endian",
    Endianness::Little,
    true,
    false,
);

pub const EXPLICIT_VR_BIG_ENDIAN: Ts = Ts::new(
    "1.2.840.10008.1.2.2",
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    false,
);

/// Deflated Explicit VR Little Endian. The data set bytes following the
/// meta-information group are zlib-deflated as a whole; this crate does not
/// inflate them, so the element-level codec below only applies once the
/// caller has decompressed the stream itself.
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    "1.2.840.10008.1.2.1.99",
    "Deflated Explicit VR Little Endian",
    Endianness::Little,
    true,
    false,
);

// --- transfer syntaxes with encapsulated (and, here, unsupported) pixel
// data compression. All of them encode their data set elements under
// Explicit VR Little Endian; only the pixel data stream itself is opaque.

pub const JPEG_BASELINE: Ts = encapsulated("1.2.840.10008.1.2.4.50", "JPEG Baseline (Process 1)");
pub const JPEG_EXTENDED: Ts = encapsulated(
    "1.2.840.10008.1.2.4.51",
    "JPEG Extended (Process 2 & 4)",
);
pub const JPEG_LOSSLESS_NON_HIERARCHICAL: Ts = encapsulated(
    "1.2.840.10008.1.2.4.57",
    "JPEG Lossless, Non-Hierarchical (Process 14)",
);
pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: Ts = encapsulated(
    "1.2.840.10008.1.2.4.70",
    "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
);
pub const JPEG_LS_LOSSLESS_IMAGE_COMPRESSION: Ts = encapsulated(
    "1.2.840.10008.1.2.4.80",
    "JPEG-LS Lossless Image Compression",
);
pub const JPEG_LS_LOSSY_IMAGE_COMPRESSION: Ts = encapsulated(
    "1.2.840.10008.1.2.4.81",
    "JPEG-LS Lossy (Near-Lossless) Image Compression",
);
pub const JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = encapsulated(
    "1.2.840.10008.1.2.4.90",
    "JPEG 2000 Image Compression (Lossless Only)",
);
pub const JPEG_2000_IMAGE_COMPRESSION: Ts =
    encapsulated("1.2.840.10008.1.2.4.91", "JPEG 2000 Image Compression");
pub const JPEG_2000_PART2_MULTI_COMPONENT_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = encapsulated(
    "1.2.840.10008.1.2.4.92",
    "JPEG 2000 Part 2 Multi-component Image Compression (Lossless Only)",
);
pub const JPEG_2000_PART2_MULTI_COMPONENT_IMAGE_COMPRESSION: Ts = encapsulated(
    "1.2.840.10008.1.2.4.93",
    "JPEG 2000 Part 2 Multi-component Image Compression",
);
pub const JPIP_REFERENCED: Ts = encapsulated("1.2.840.10008.1.2.4.94", "JPIP Referenced");
pub const JPIP_DEREFERENCED_DEFLATE: Ts = encapsulated(
    "1.2.840.10008.1.2.4.95",
    "JPIP Referenced Deflate",
);
pub const MPEG2_MAIN_PROFILE_MAIN_LEVEL: Ts = encapsulated(
    "1.2.840.10008.1.2.4.100",
    "MPEG2 Main Profile / Main Level",
);
pub const MPEG2_MAIN_PROFILE_HIGH_LEVEL: Ts = encapsulated(
    "1.2.840.10008.1.2.4.101",
    "MPEG2 Main Profile / High Level",
);
pub const MPEG4_AVC_H264_HIGH_PROFILE: Ts = encapsulated(
    "1.2.840.10008.1.2.4.102",
    "MPEG-4 AVC/H.264 High Profile / Level 4.1",
);
pub const MPEG4_AVC_H264_BD_COMPATIBLE_HIGH_PROFILE: Ts = encapsulated(
    "1.2.840.10008.1.2.4.103",
    "MPEG-4 AVC/H.264 BD-Compatible High Profile / Level 4.1",
);
pub const MPEG4_AVC_H264_HIGH_PROFILE_FOR_2D_VIDEO: Ts = encapsulated(
    "1.2.840.10008.1.2.4.104",
    "MPEG-4 AVC/H.264 High Profile / Level 4.2 For 2D Video",
);
pub const MPEG4_AVC_H264_HIGH_PROFILE_FOR_3D_VIDEO: Ts = encapsulated(
    "1.2.840.10008.1.2.4.105",
    "MPEG-4 AVC/H.264 High Profile / Level 4.2 For 3D Video",
);
pub const MPEG4_AVC_H264_STEREO_HIGH_PROFILE: Ts = encapsulated(
    "1.2.840.10008.1.2.4.106",
    "MPEG-4 AVC/H.264 Stereo High Profile / Level 4.2",
);
pub const HEVC_H265_MAIN_PROFILE: Ts = encapsulated(
    "1.2.840.10008.1.2.4.107",
    "HEVC/H.265 Main Profile / Level 5.1",
);
pub const HEVC_H265_MAIN_10_PROFILE: Ts = encapsulated(
    "1.2.840.10008.1.2.4.108",
    "HEVC/H.265 Main 10 Profile / Level 5.1",
);
pub const RLE_LOSSLESS: Ts = encapsulated("1.2.840.10008.1.2.5", "RLE Lossless");

const fn encapsulated(uid: &'static str, name: &'static str) -> Ts {
    Ts::new(uid, name, Endianness::Little, true, true)
}

/// All entries known to this registry, in declaration order.
pub(crate) const ALL: &[Ts] = &[
    IMPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_BIG_ENDIAN,
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    JPEG_BASELINE,
    JPEG_EXTENDED,
    JPEG_LOSSLESS_NON_HIERARCHICAL,
    JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
    JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
    JPEG_LS_LOSSY_IMAGE_COMPRESSION,
    JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
    JPEG_2000_IMAGE_COMPRESSION,
    JPEG_2000_PART2_MULTI_COMPONENT_IMAGE_COMPRESSION_LOSSLESS_ONLY,
    JPEG_2000_PART2_MULTI_COMPONENT_IMAGE_COMPRESSION,
    JPIP_REFERENCED,
    JPIP_DEREFERENCED_DEFLATE,
    MPEG2_MAIN_PROFILE_MAIN_LEVEL,
    MPEG2_MAIN_PROFILE_HIGH_LEVEL,
    MPEG4_AVC_H264_HIGH_PROFILE,
    MPEG4_AVC_H264_BD_COMPATIBLE_HIGH_PROFILE,
    MPEG4_AVC_H264_HIGH_PROFILE_FOR_2D_VIDEO,
    MPEG4_AVC_H264_HIGH_PROFILE_FOR_3D_VIDEO,
    MPEG4_AVC_H264_STEREO_HIGH_PROFILE,
    HEVC_H265_MAIN_PROFILE,
    HEVC_H265_MAIN_10_PROFILE,
    RLE_LOSSLESS,
];
