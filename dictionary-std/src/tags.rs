//! Compile-time tag constants for the attributes this crate has a
//! standing use for (file meta information, patient/study/series
//! identification, dates and times subject to de-identification, and the
//! pixel data and overlay groups).
//!
//! This is a curated subset of DICOM PS3.6, not the full registry.

use dicom_core::dictionary::{DataDictionaryEntryRef, TagRange::*, VirtualVr};
use dicom_core::header::Tag;
use dicom_core::VR;

macro_rules! tag_consts {
    ($($(#[$doc:meta])* $name:ident: $group:literal, $elem:literal, $vr:ident, $alias:literal;)*) => {
        $(
            $(#[$doc])*
            pub const $name: Tag = Tag($group, $elem);
        )*

        /// Every standard, single-tag attribute entry this dictionary indexes.
        pub static ENTRIES: &[&DataDictionaryEntryRef<'static>] = &[
            $(&DataDictionaryEntryRef {
                tag: Single($name),
                alias: $alias,
                vr: VirtualVr::Exact(VR::$vr),
            },)*
            &OVERLAY_DATA_ENTRY,
            &CURVE_DATA_ENTRY,
            &PIXEL_DATA_ENTRY,
        ];
    };
}

tag_consts! {
    // File Meta Information (always explicit VR little endian)
    /// (0002,0000) File Meta Information Group Length
    FILE_META_INFORMATION_GROUP_LENGTH: 0x0002, 0x0000, UL, "FileMetaInformationGroupLength";
    /// (0002,0001) File Meta Information Version
    FILE_META_INFORMATION_VERSION: 0x0002, 0x0001, OB, "FileMetaInformationVersion";
    /// (0002,0002) Media Storage SOP Class UID
    MEDIA_STORAGE_SOP_CLASS_UID: 0x0002, 0x0002, UI, "MediaStorageSOPClassUID";
    /// (0002,0003) Media Storage SOP Instance UID
    MEDIA_STORAGE_SOP_INSTANCE_UID: 0x0002, 0x0003, UI, "MediaStorageSOPInstanceUID";
    /// (0002,0010) Transfer Syntax UID
    TRANSFER_SYNTAX_UID: 0x0002, 0x0010, UI, "TransferSyntaxUID";
    /// (0002,0012) Implementation Class UID
    IMPLEMENTATION_CLASS_UID: 0x0002, 0x0012, UI, "ImplementationClassUID";
    /// (0002,0013) Implementation Version Name
    IMPLEMENTATION_VERSION_NAME: 0x0002, 0x0013, SH, "ImplementationVersionName";
    /// (0002,0016) Source Application Entity Title
    SOURCE_APPLICATION_ENTITY_TITLE: 0x0002, 0x0016, AE, "SourceApplicationEntityTitle";
    /// (0002,0100) Private Information Creator UID
    PRIVATE_INFORMATION_CREATOR_UID: 0x0002, 0x0100, UI, "PrivateInformationCreatorUID";
    /// (0002,0102) Private Information
    PRIVATE_INFORMATION: 0x0002, 0x0102, OB, "PrivateInformation";

    // Identification / demographics
    /// (0008,0005) Specific Character Set
    SPECIFIC_CHARACTER_SET: 0x0008, 0x0005, CS, "SpecificCharacterSet";
    /// (0008,0016) SOP Class UID
    SOP_CLASS_UID: 0x0008, 0x0016, UI, "SOPClassUID";
    /// (0008,0018) SOP Instance UID
    SOP_INSTANCE_UID: 0x0008, 0x0018, UI, "SOPInstanceUID";
    /// (0008,0020) Study Date
    STUDY_DATE: 0x0008, 0x0020, DA, "StudyDate";
    /// (0008,0021) Series Date
    SERIES_DATE: 0x0008, 0x0021, DA, "SeriesDate";
    /// (0008,0022) Acquisition Date
    ACQUISITION_DATE: 0x0008, 0x0022, DA, "AcquisitionDate";
    /// (0008,0023) Content Date
    CONTENT_DATE: 0x0008, 0x0023, DA, "ContentDate";
    /// (0008,0030) Study Time
    STUDY_TIME: 0x0008, 0x0030, TM, "StudyTime";
    /// (0008,0031) Series Time
    SERIES_TIME: 0x0008, 0x0031, TM, "SeriesTime";
    /// (0008,0032) Acquisition Time
    ACQUISITION_TIME: 0x0008, 0x0032, TM, "AcquisitionTime";
    /// (0008,0033) Content Time
    CONTENT_TIME: 0x0008, 0x0033, TM, "ContentTime";
    /// (0008,0050) Accession Number
    ACCESSION_NUMBER: 0x0008, 0x0050, SH, "AccessionNumber";
    /// (0008,0060) Modality
    MODALITY: 0x0008, 0x0060, CS, "Modality";
    /// (0008,0080) Institution Name
    INSTITUTION_NAME: 0x0008, 0x0080, LO, "InstitutionName";
    /// (0008,0081) Institution Address
    INSTITUTION_ADDRESS: 0x0008, 0x0081, ST, "InstitutionAddress";
    /// (0008,0090) Referring Physician's Name
    REFERRING_PHYSICIAN_NAME: 0x0008, 0x0090, PN, "ReferringPhysicianName";
    /// (0008,0100) Code Value
    CODE_VALUE: 0x0008, 0x0100, SH, "CodeValue";
    /// (0008,1030) Study Description
    STUDY_DESCRIPTION: 0x0008, 0x1030, LO, "StudyDescription";
    /// (0008,103E) Series Description
    SERIES_DESCRIPTION: 0x0008, 0x103E, LO, "SeriesDescription";
    /// (0008,1040) Institutional Department Name
    INSTITUTIONAL_DEPARTMENT_NAME: 0x0008, 0x1040, LO, "InstitutionalDepartmentName";
    /// (0008,1050) Performing Physician's Name
    PERFORMING_PHYSICIAN_NAME: 0x0008, 0x1050, PN, "PerformingPhysicianName";
    /// (0008,1070) Operators' Name
    OPERATORS_NAME: 0x0008, 0x1070, PN, "OperatorsName";
    /// (0008,1090) Manufacturer's Model Name
    MANUFACTURER_MODEL_NAME: 0x0008, 0x1090, LO, "ManufacturerModelName";

    /// (0010,0010) Patient's Name
    PATIENT_NAME: 0x0010, 0x0010, PN, "PatientName";
    /// (0010,0020) Patient ID
    PATIENT_ID: 0x0010, 0x0020, LO, "PatientID";
    /// (0010,0030) Patient's Birth Date
    PATIENT_BIRTH_DATE: 0x0010, 0x0030, DA, "PatientBirthDate";
    /// (0010,0032) Patient's Birth Time
    PATIENT_BIRTH_TIME: 0x0010, 0x0032, TM, "PatientBirthTime";
    /// (0010,0040) Patient's Sex
    PATIENT_SEX: 0x0010, 0x0040, CS, "PatientSex";
    /// (0010,1010) Patient's Age
    PATIENT_AGE: 0x0010, 0x1010, AS, "PatientAge";
    /// (0010,1030) Patient's Weight
    PATIENT_WEIGHT: 0x0010, 0x1030, DS, "PatientWeight";
    /// (0010,1040) Patient's Address
    PATIENT_ADDRESS: 0x0010, 0x1040, LO, "PatientAddress";
    /// (0010,2160) Ethnic Group
    ETHNIC_GROUP: 0x0010, 0x2160, SH, "EthnicGroup";
    /// (0010,2180) Occupation
    OCCUPATION: 0x0010, 0x2180, SH, "Occupation";
    /// (0010,4000) Patient Comments
    PATIENT_COMMENTS: 0x0010, 0x4000, LT, "PatientComments";

    /// (0020,000D) Study Instance UID
    STUDY_INSTANCE_UID: 0x0020, 0x000D, UI, "StudyInstanceUID";
    /// (0020,000E) Series Instance UID
    SERIES_INSTANCE_UID: 0x0020, 0x000E, UI, "SeriesInstanceUID";
    /// (0020,0010) Study ID
    STUDY_ID: 0x0020, 0x0010, SH, "StudyID";
    /// (0020,0011) Series Number
    SERIES_NUMBER: 0x0020, 0x0011, IS, "SeriesNumber";
    /// (0020,0013) Instance Number
    INSTANCE_NUMBER: 0x0020, 0x0013, IS, "InstanceNumber";
    /// (0020,0052) Frame of Reference UID
    FRAME_OF_REFERENCE_UID: 0x0020, 0x0052, UI, "FrameOfReferenceUID";
    /// (0020,4000) Image Comments
    IMAGE_COMMENTS: 0x0020, 0x4000, LT, "ImageComments";

    // Image pixel module
    /// (0028,0002) Samples per Pixel
    SAMPLES_PER_PIXEL: 0x0028, 0x0002, US, "SamplesPerPixel";
    /// (0028,0004) Photometric Interpretation
    PHOTOMETRIC_INTERPRETATION: 0x0028, 0x0004, CS, "PhotometricInterpretation";
    /// (0028,0008) Number of Frames
    NUMBER_OF_FRAMES: 0x0028, 0x0008, IS, "NumberOfFrames";
    /// (0028,0010) Rows
    ROWS: 0x0028, 0x0010, US, "Rows";
    /// (0028,0011) Columns
    COLUMNS: 0x0028, 0x0011, US, "Columns";
    /// (0028,0100) Bits Allocated
    BITS_ALLOCATED: 0x0028, 0x0100, US, "BitsAllocated";
    /// (0028,0101) Bits Stored
    BITS_STORED: 0x0028, 0x0101, US, "BitsStored";
    /// (0028,0103) Pixel Representation
    PIXEL_REPRESENTATION: 0x0028, 0x0103, US, "PixelRepresentation";
    /// (0028,0301) Burned In Annotation
    BURNED_IN_ANNOTATION: 0x0028, 0x0301, CS, "BurnedInAnnotation";
    /// (0028,0303) Longitudinal Temporal Information Modified
    LONGITUDINAL_TEMPORAL_INFORMATION_MODIFIED: 0x0028, 0x0303, CS,
        "LongitudinalTemporalInformationModified";

    // De-identification-related attributes (PS3.3 C.12.1, PS3.15)
    /// (0012,0062) Patient Identity Removed
    PATIENT_IDENTITY_REMOVED: 0x0012, 0x0062, CS, "PatientIdentityRemoved";
    /// (0012,0063) De-identification Method
    DE_IDENTIFICATION_METHOD: 0x0012, 0x0063, LO, "DeidentificationMethod";
    /// (0012,0064) De-identification Method Code Sequence
    DE_IDENTIFICATION_METHOD_CODE_SEQUENCE: 0x0012, 0x0064, SQ,
        "DeidentificationMethodCodeSequence";

    /// (0040,A168) Concept Code Sequence
    CONCEPT_CODE_SEQUENCE: 0x0040, 0xA168, SQ, "ConceptCodeSequence";
}

/// (60xx,3000) Overlay Data, repeating across groups 0x6000..=0x60FE
pub const OVERLAY_DATA: Tag = Tag(0x6000, 0x3000);
/// (50xx,3000) Curve Data, repeating across groups 0x5000..=0x50FF (retired)
pub const CURVE_DATA: Tag = Tag(0x5000, 0x3000);
/// (7FE0,0010) Pixel Data
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

static OVERLAY_DATA_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: Group100(OVERLAY_DATA),
    alias: "OverlayData",
    vr: VirtualVr::Ox,
};

static CURVE_DATA_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: Group100(CURVE_DATA),
    alias: "CurveData",
    vr: VirtualVr::Ox,
};

static PIXEL_DATA_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: Single(PIXEL_DATA),
    alias: "PixelData",
    vr: VirtualVr::Px,
};
