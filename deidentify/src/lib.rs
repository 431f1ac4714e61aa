//! De-identification of DICOM objects.
//!
//! This crate layers a profile-driven anonymization engine on top of
//! [`dicom_object`]: a static attribute profile table (§4.9), a resolver
//! that turns a profile entry plus an attribute's value representation
//! and emptiness into one concrete operation (§4.10), an identifier
//! remap store for consistent UID substitution across a batch (§4.11), a
//! date shifter (§4.13), a pixel-region redactor (§4.15), and the engine
//! that drives all of the above over a whole dataset (§4.14).
//!
//! ```
//! use dicom_deidentify::{deidentify, EngineOptions, MemoryRemapStore};
//! use dicom_object::mem::InMemDicomObject;
//! use dicom_object::FileMetaTableBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut obj = InMemDicomObject::new_empty().with_meta(
//!     FileMetaTableBuilder::new()
//!         .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.7")
//!         .media_storage_sop_instance_uid("1.2.3.4")
//!         .transfer_syntax("1.2.840.10008.1.2.1"),
//! )?;
//! let remap = MemoryRemapStore::new();
//! let report = deidentify(&mut obj, &EngineOptions::default(), &remap);
//! assert_eq!(report.warnings.len(), 0);
//! # Ok(())
//! # }
//! ```

pub mod date_shift;
pub mod engine;
pub mod error;
pub mod profile;
pub mod redact;
pub mod remap;
pub mod resolver;

pub use date_shift::{DateShiftConfig, DateShiftStrategy, DateShifter, ShiftReport};
pub use engine::{deidentify, EngineOptions, EngineReport, PrivateTagDefault};
pub use error::{RedactError, RemapError, Warning};
pub use profile::{Compound, ConformanceClass, ProfileAction, RetentionOptions};
pub use redact::{redact_regions, FillValue, Region, RedactOptions};
pub use remap::{Mapping, MemoryRemapStore, RemapStore, SqliteRemapStore};
pub use resolver::{resolve, ConcreteAction};
