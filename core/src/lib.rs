#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]
#![recursion_limit = "60"]

//! Core data types for working with DICOM content: attribute tags, value
//! representations, lengths, data elements and their values, and the
//! attribute dictionary trait implemented by `dicom-dictionary-std`.

pub mod dictionary;
pub mod error;
pub mod header;
pub mod ops;
pub mod value;

pub use dictionary::DataDictionary;
pub use error::{Error, Result};
pub use header::{DataElement, DataElementHeader, HasLength, Header, Length, Tag, VR};
pub use value::{DicomValueType, PrimitiveValue, Value, Value as DicomValue};

/// Commonly used traits and types, for glob import.
pub mod prelude {
    pub use crate::header::{DataElement, DataElementHeader, HasLength, Header, Length, Tag, VR};
    pub use crate::value::{DicomValueType, PrimitiveValue, Value};
}
