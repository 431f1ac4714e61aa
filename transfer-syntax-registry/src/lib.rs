#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]
//! This crate contains the DICOM transfer syntax registry.
//!
//! The transfer syntax registry maps a DICOM UID of a transfer syntax (TS)
//! into the respective transfer syntax specifier. The specifier defines the
//! byte order, the VR encoding rule, and whether pixel data is stored as an
//! encapsulated fragment stream.
//!
//! _Implicit VR Little Endian_, _Explicit VR Little Endian_, and _Explicit
//! VR Big Endian_ are fully supported: their data sets can be both read and
//! written. Every other well-known transfer syntax UID is still recognised
//! so that it can be reported back by name, but its pixel data is
//! encapsulated and this crate does not attempt to decompress it; fragments
//! are handed out as opaque bytes.
//!
//! All registered TSes are available through the [`TransferSyntaxRegistry`]
//! type, which is the canonical [`TransferSyntaxIndex`] used across this
//! DICOM implementation.

use dicom_encoding::transfer_syntax::TransferSyntaxIndex;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

pub use dicom_encoding::TransferSyntax;
pub mod entries;

/// Main implementation of a registry of DICOM transfer syntaxes.
///
/// Consumers would generally use [`TransferSyntaxRegistry`] instead.
pub struct TransferSyntaxRegistryImpl {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistryImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: HashMap<&str, &str> =
            self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistryImpl")
            .field("m", &entries)
            .finish()
    }
}

impl TransferSyntaxRegistryImpl {
    /// Obtain an iterator of all registered transfer syntaxes.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }

    /// Obtain a transfer syntax specifier by UID, tolerating a trailing
    /// padding character as found in some DICOM string values.
    fn get<U: AsRef<str>>(&self, uid: U) -> Option<&TransferSyntax> {
        let ts_uid = uid
            .as_ref()
            .trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
        self.m.get(ts_uid)
    }

    fn register(&mut self, ts: TransferSyntax) {
        self.m.insert(ts.uid(), ts);
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistryImpl {
    #[inline]
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        Self::get(self, uid)
    }
}

/// Zero-sized representative of the main transfer syntax registry.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TransferSyntaxRegistry;

impl TransferSyntaxRegistry {
    /// Obtain an iterator of all registered transfer syntaxes.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        get_registry().iter()
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    #[inline]
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        get_registry().get(uid)
    }
}

lazy_static! {
    static ref REGISTRY: TransferSyntaxRegistryImpl = {
        let mut registry = TransferSyntaxRegistryImpl {
            m: HashMap::with_capacity(entries::ALL.len()),
        };
        for ts in entries::ALL {
            registry.register(*ts);
        }
        registry
    };
}

/// Retrieve a reference to the global transfer syntax registry.
#[inline]
pub(crate) fn get_registry() -> &'static TransferSyntaxRegistryImpl {
    &REGISTRY
}

/// Retrieve the default transfer syntax: Implicit VR Little Endian, assumed
/// whenever a data set carries no declared transfer syntax of its own.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}

#[cfg(test)]
mod tests {
    use dicom_encoding::transfer_syntax::TransferSyntaxIndex;

    use crate::TransferSyntaxRegistry;

    #[test]
    fn has_mandatory_tss() {
        let implicit_vr_le = TransferSyntaxRegistry
            .get("1.2.840.10008.1.2")
            .expect("transfer syntax registry should provide Implicit VR Little Endian");
        assert_eq!(implicit_vr_le.uid(), "1.2.840.10008.1.2");
        assert!(implicit_vr_le.is_codec_free());

        // should also work with trailing null character
        let implicit_vr_le_2 = TransferSyntaxRegistry.get("1.2.840.10008.1.2\0").expect(
            "transfer syntax registry should provide Implicit VR Little Endian with padded TS UID",
        );
        assert_eq!(implicit_vr_le_2.uid(), implicit_vr_le.uid());

        let explicit_vr_le = TransferSyntaxRegistry
            .get("1.2.840.10008.1.2.1")
            .expect("transfer syntax registry should provide Explicit VR Little Endian");
        assert_eq!(explicit_vr_le.uid(), "1.2.840.10008.1.2.1");
        assert!(explicit_vr_le.is_codec_free());

        let explicit_vr_be = TransferSyntaxRegistry
            .get("1.2.840.10008.1.2.2")
            .expect("transfer syntax registry should provide Explicit VR Big Endian");
        assert!(explicit_vr_be.is_codec_free());
    }

    #[test]
    fn recognises_encapsulated_transfer_syntaxes_by_name() {
        let jpeg_baseline = TransferSyntaxRegistry
            .get("1.2.840.10008.1.2.4.50")
            .expect("transfer syntax registry should recognise JPEG Baseline by UID");
        assert_eq!(jpeg_baseline.name(), "JPEG Baseline (Process 1)");
        assert!(jpeg_baseline.is_encapsulated());
        // the data set surrounding the pixel fragments is still readable
        assert!(jpeg_baseline.decoder().is_some());

        let rle_lossless = TransferSyntaxRegistry
            .get("1.2.840.10008.1.2.5")
            .expect("transfer syntax registry should recognise RLE Lossless by UID");
        assert!(rle_lossless.is_encapsulated());
    }

    #[test]
    fn unknown_uid_is_absent() {
        assert!(TransferSyntaxRegistry.get("1.2.3.4.5.6.7.8.9").is_none());
    }

    #[test]
    fn provides_iter() {
        let all_tss: Vec<_> = TransferSyntaxRegistry.iter().collect();

        assert!(all_tss.len() >= 3);
        assert!(all_tss.iter().any(|ts| ts.uid() == "1.2.840.10008.1.2"));
        assert!(all_tss.iter().any(|ts| ts.uid() == "1.2.840.10008.1.2.1"));
    }

    #[test]
    fn default_is_implicit_vr_little_endian() {
        assert_eq!(crate::default().uid(), "1.2.840.10008.1.2");
    }
}
