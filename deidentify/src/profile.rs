//! The de-identification profile table (§4.9): a static mapping from
//! attribute identifier to a profile action, qualified by the caller's
//! enabled retention options.
//!
//! Grounded on the attribute-action vocabulary of [`dicom_core::ops`]
//! (the table's terminal actions collapse onto
//! [`crate::resolver::ConcreteAction`], which in turn produces
//! `AttributeAction` values for [`dicom_core::ops::ApplyOp`]) and on the
//! curated identifier/date/demographic subset already present in
//! `dicom-dictionary-std::tags`.

use dicom_core::header::Tag;
use dicom_dictionary_std::tags;

/// Retention options a caller may enable to relax specific removal rules.
///
/// Named directly after the ten options enumerated by the basic
/// confidentiality profile; unset by default (the strictest profile).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionOptions {
    pub retain_safe_private: bool,
    pub retain_identifiers: bool,
    pub retain_device_identity: bool,
    pub retain_institution_identity: bool,
    pub retain_patient_characteristics: bool,
    pub retain_full_dates: bool,
    pub retain_modified_dates: bool,
    pub clean_descriptors: bool,
    pub clean_structured_content: bool,
    pub clean_graphics: bool,
}

impl RetentionOptions {
    /// A human-readable, backslash-joined label naming every enabled
    /// option, for use in the (0012,0063) conformance marker.
    pub fn enabled_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.retain_safe_private {
            labels.push("retain-safe-private");
        }
        if self.retain_identifiers {
            labels.push("retain-identifiers");
        }
        if self.retain_device_identity {
            labels.push("retain-device-identity");
        }
        if self.retain_institution_identity {
            labels.push("retain-institution-identity");
        }
        if self.retain_patient_characteristics {
            labels.push("retain-patient-characteristics");
        }
        if self.retain_full_dates {
            labels.push("retain-full-dates");
        }
        if self.retain_modified_dates {
            labels.push("retain-modified-dates");
        }
        if self.clean_descriptors {
            labels.push("clean-descriptors");
        }
        if self.clean_structured_content {
            labels.push("clean-structured-content");
        }
        if self.clean_graphics {
            labels.push("clean-graphics");
        }
        labels
    }
}

/// One of the five conditional compound codes from §4.10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compound {
    /// dummy / empty / empty
    ZOrD,
    /// remove / empty / remove
    XOrZ,
    /// dummy / remove / remove
    XOrD,
    /// dummy / empty / remove
    XOrZOrD,
    /// remap-id / empty / remove
    XOrZOrU,
}

/// The action a profile table entry yields for a given attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    Keep,
    Remove,
    ReplaceWithEmpty,
    ReplaceWithDummy,
    Clean,
    RemapIdentifier,
    Compound(Compound),
}

/// The standard's required/optional classification of an attribute
/// within its defining IOD, used to resolve conditional profile actions.
///
/// The curated dictionary this repository ships does not carry a
/// per-IOD conformance-class table (that classification is defined
/// per-IOD, not per-attribute, by the standard); [`conformance_class`]
/// assigns a reasonable default per attribute instead. See the
/// `deidentify` entry in `DESIGN.md` for the open-question resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConformanceClass {
    /// Type 1 / 1C: required, must not be empty.
    Required,
    /// Type 2 / 2C: required, may be empty.
    RequiredEmptyAllowed,
    /// Type 3: optional.
    Optional,
}

/// Look up the conformance class assumed for `tag`.
///
/// Identifiers central to file/instance/series/study identity are
/// treated as required-non-empty; common type-2 demographic attributes
/// as required-empty-allowed; everything else as optional.
pub fn conformance_class(tag: Tag) -> ConformanceClass {
    match tag {
        t if t == tags::SOP_CLASS_UID
            || t == tags::SOP_INSTANCE_UID
            || t == tags::STUDY_INSTANCE_UID
            || t == tags::SERIES_INSTANCE_UID
            || t == tags::MODALITY => ConformanceClass::Required,
        t if t == tags::PATIENT_NAME
            || t == tags::PATIENT_ID
            || t == tags::PATIENT_BIRTH_DATE
            || t == tags::PATIENT_SEX
            || t == tags::ACCESSION_NUMBER
            || t == tags::STUDY_DATE
            || t == tags::STUDY_TIME
            || t == tags::REFERRING_PHYSICIAN_NAME => ConformanceClass::RequiredEmptyAllowed,
        _ => ConformanceClass::Optional,
    }
}

/// Look up the profile action for `tag` under the given retention
/// options. Returns `None` for attributes this table does not govern
/// (the engine's default is to leave those untouched).
pub fn action_for(tag: Tag, options: &RetentionOptions) -> Option<ProfileAction> {
    use ProfileAction::*;

    // Unique identifiers: remapped for cross-file consistency unless the
    // caller explicitly asked to keep real identifiers.
    if tag == tags::STUDY_INSTANCE_UID
        || tag == tags::SERIES_INSTANCE_UID
        || tag == tags::SOP_INSTANCE_UID
        || tag == tags::FRAME_OF_REFERENCE_UID
    {
        return Some(if options.retain_identifiers {
            Keep
        } else {
            RemapIdentifier
        });
    }

    if tag == tags::PATIENT_NAME {
        return Some(Compound(Compound::ZOrD));
    }
    if tag == tags::PATIENT_ID {
        return Some(if options.retain_identifiers {
            Keep
        } else {
            ReplaceWithDummy
        });
    }

    // Dates and times: the profile table only decides whether a value
    // survives the walk at all. If it survives (kept under a retention
    // option), the post-walk date shifter is free to modify it further.
    if is_date_or_time(tag) {
        if options.retain_full_dates || options.retain_modified_dates {
            return Some(Keep);
        }
        return Some(Compound(Compound::XOrD));
    }

    if tag == tags::ACCESSION_NUMBER || tag == tags::REFERRING_PHYSICIAN_NAME {
        return Some(Compound(Compound::XOrZ));
    }

    if tag == tags::PATIENT_BIRTH_TIME {
        return Some(if options.retain_patient_characteristics {
            Keep
        } else {
            ReplaceWithEmpty
        });
    }
    if tag == tags::PATIENT_SEX || tag == tags::PATIENT_AGE || tag == tags::PATIENT_WEIGHT {
        return Some(if options.retain_patient_characteristics {
            Keep
        } else {
            ReplaceWithEmpty
        });
    }
    if tag == tags::ETHNIC_GROUP
        || tag == tags::OCCUPATION
        || tag == tags::PATIENT_ADDRESS
    {
        return Some(if options.retain_patient_characteristics {
            Keep
        } else {
            Remove
        });
    }
    if tag == tags::PATIENT_COMMENTS || tag == tags::IMAGE_COMMENTS {
        return Some(if options.clean_structured_content {
            Clean
        } else {
            Remove
        });
    }

    if tag == tags::STUDY_DESCRIPTION || tag == tags::SERIES_DESCRIPTION {
        return Some(if options.clean_descriptors { Clean } else { Remove });
    }

    if tag == tags::INSTITUTION_NAME || tag == tags::INSTITUTION_ADDRESS {
        return Some(if options.retain_institution_identity {
            Keep
        } else {
            Compound(Compound::XOrZ)
        });
    }
    if tag == tags::INSTITUTIONAL_DEPARTMENT_NAME {
        return Some(if options.retain_institution_identity {
            Keep
        } else {
            Remove
        });
    }

    if tag == tags::PERFORMING_PHYSICIAN_NAME {
        return Some(Compound(Compound::XOrZ));
    }
    if tag == tags::OPERATORS_NAME {
        return Some(Remove);
    }

    if tag == tags::MANUFACTURER_MODEL_NAME {
        return Some(if options.retain_device_identity {
            Keep
        } else {
            Remove
        });
    }

    if tag == tags::CONCEPT_CODE_SEQUENCE {
        return Some(if options.clean_structured_content {
            Clean
        } else {
            Remove
        });
    }

    None
}

fn is_date_or_time(tag: Tag) -> bool {
    tag == tags::STUDY_DATE
        || tag == tags::SERIES_DATE
        || tag == tags::ACQUISITION_DATE
        || tag == tags::CONTENT_DATE
        || tag == tags::STUDY_TIME
        || tag == tags::SERIES_TIME
        || tag == tags::ACQUISITION_TIME
        || tag == tags::CONTENT_TIME
}
