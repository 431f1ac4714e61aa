//! The standard DICOM attribute dictionary and related constants.
//!
//! - [`data_element`] looks up attributes by tag or keyword, as registered
//!   in DICOM PS3.6. This is the dictionary used by default wherever a
//!   data element dictionary is needed, such as when reading DICOM objects.
//! - [`tags`] maps attribute keywords to [`Tag`](dicom_core::Tag) constants
//!   at compile time, for the attributes this crate has actual use for.
//! - [`uids`] holds the transfer syntax and related UIDs this crate
//!   recognises.
pub mod data_element;
pub mod tags;
pub mod uids;

pub use data_element::{StandardDataDictionary, StandardDataDictionaryRegistry};

#[cfg(test)]
mod tests {
    use dicom_core::Tag;

    /// tests for just a few attributes to make sure that the tag constants
    /// were well installed into the crate
    #[test]
    fn tags_constants_available() {
        use crate::tags::*;
        assert_eq!(PATIENT_NAME, Tag(0x0010, 0x0010));
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(PIXEL_DATA, Tag(0x7FE0, 0x0010));
        assert_eq!(TRANSFER_SYNTAX_UID, Tag(0x0002, 0x0010));
    }

    /// tests for the presence of a few UID constants
    #[test]
    fn uids_constants_available() {
        use crate::uids::*;
        assert_eq!(EXPLICIT_VR_LITTLE_ENDIAN, "1.2.840.10008.1.2.1");
        assert_eq!(VERIFICATION, "1.2.840.10008.1.1");
        assert_eq!(
            SECONDARY_CAPTURE_IMAGE_STORAGE,
            "1.2.840.10008.5.1.4.1.1.7"
        );
    }
}
