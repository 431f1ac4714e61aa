//! Module containing the DICOM Transfer Syntax data structure and related methods.
//!
//! A [`TransferSyntax`] describes how a data set's elements are laid out on
//! the wire: byte order, whether the value representation is written
//! explicitly, and whether pixel data is encapsulated in fragments rather
//! than stored as a single native value. It does not carry a pixel data
//! compression codec; fragments of an encapsulated transfer syntax are
//! handed to callers as opaque bytes.
//!
//! This crate does not host the catalog of known transfer syntaxes.
//! See the `dicom-transfer-syntax-registry` crate for a concrete
//! [`TransferSyntaxIndex`] populated with the ones defined by the standard.

use crate::decode::{
    basic::BasicDecoder, explicit_be::ExplicitVRBigEndianDecoder,
    explicit_le::ExplicitVRLittleEndianDecoder, implicit_le::ImplicitVRLittleEndianDecoder,
    DecodeFrom,
};
use crate::encode::{
    basic::BasicEncoder, explicit_be::ExplicitVRBigEndianEncoder,
    explicit_le::ExplicitVRLittleEndianEncoder, implicit_le::ImplicitVRLittleEndianEncoder,
    EncodeFrom,
};
use std::io::{Read, Write};

pub use byteordered::Endianness;

/// A decoder with its type erased.
pub type DynDecoder<S> = Box<dyn DecodeFrom<S>>;

/// An encoder with its type erased.
pub type DynEncoder<'w, W> = Box<dyn EncodeFrom<W> + 'w>;

/// A DICOM transfer syntax specifier.
///
/// Describes how the elements of a data set are encoded on the wire. The
/// three transfer syntaxes defined by the standard's base encoding rules
/// (Implicit VR Little Endian, Explicit VR Little Endian, Explicit VR Big
/// Endian) are fully described by a byte order and an explicit-VR flag; a
/// transfer syntax whose pixel data is encapsulated (compressed) is marked
/// as such, but this type does not attempt to decode or encode the
/// compressed fragments themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// Whether pixel data (if present) is encapsulated into fragments
    /// instead of being stored as a single native value.
    encapsulated: bool,
}

/// Trait for a container/repository of transfer syntax specifiers.
///
/// Types implementing this trait are held responsible for populating
/// themselves with the set of transfer syntaxes a program wants to support.
/// Usually, only one implementation of this trait is used for the entire
/// program, the most common one being `TransferSyntaxRegistry` from
/// `dicom-transfer-syntax-registry`.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing null characters (`\0`) in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    ///
    /// Only transfer syntax implementers are expected to construct
    /// descriptors from scratch; most programs should look one up by UID
    /// in a [`TransferSyntaxIndex`].
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        encapsulated: bool,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            encapsulated,
        }
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Check whether this transfer syntax uses an explicit value
    /// representation for its data elements.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Check whether this transfer syntax encapsulates pixel data into
    /// fragments rather than storing it as a single native value.
    pub const fn is_encapsulated(&self) -> bool {
        self.encapsulated
    }

    /// Check whether this crate provides a data element codec for this
    /// transfer syntax. All three base encoding rules are supported;
    /// anything else (deflated or otherwise adapted data sets) is not.
    pub const fn is_codec_free(&self) -> bool {
        matches!(
            (self.byte_order, self.explicit_vr),
            (Endianness::Little, false) | (Endianness::Little, true) | (Endianness::Big, true)
        )
    }

    /// Retrieve the appropriate data element decoder for this transfer syntax.
    /// Returns `None` if this crate does not implement this transfer syntax'
    /// encoding rules.
    ///
    /// The resulting decoder does not unwrap encapsulated pixel data
    /// fragments; that is the parser's responsibility.
    pub fn decoder<'s>(&self) -> Option<DynDecoder<dyn Read + 's>> {
        self.decoder_for()
    }

    /// Retrieve the appropriate data element decoder for this transfer syntax
    /// and given reader type (this method is not object safe).
    pub fn decoder_for<S>(&self) -> Option<DynDecoder<S>>
    where
        S: ?Sized + Read,
    {
        match (self.byte_order, self.explicit_vr) {
            (Endianness::Little, false) => Some(Box::<ImplicitVRLittleEndianDecoder<_>>::default()),
            (Endianness::Little, true) => Some(Box::<ExplicitVRLittleEndianDecoder>::default()),
            (Endianness::Big, true) => Some(Box::<ExplicitVRBigEndianDecoder>::default()),
            _ => None,
        }
    }

    /// Retrieve the appropriate data element encoder for this transfer syntax.
    /// Returns `None` if this crate does not implement this transfer syntax'
    /// encoding rules.
    pub fn encoder<'w>(&self) -> Option<DynEncoder<'w, dyn Write + 'w>> {
        self.encoder_for()
    }

    /// Retrieve the appropriate data element encoder for this transfer syntax
    /// and the given writer type (this method is not object safe).
    pub fn encoder_for<'w, W: 'w>(&self) -> Option<DynEncoder<'w, W>>
    where
        W: ?Sized + Write,
    {
        match (self.byte_order, self.explicit_vr) {
            (Endianness::Little, false) => {
                Some(Box::new(ImplicitVRLittleEndianEncoder::default()))
            }
            (Endianness::Little, true) => Some(Box::new(ExplicitVRLittleEndianEncoder::default())),
            (Endianness::Big, true) => Some(Box::new(ExplicitVRBigEndianEncoder::default())),
            _ => None,
        }
    }

    /// Obtain a dynamic basic decoder, based on this transfer syntax' expected endianness.
    pub fn basic_decoder(&self) -> BasicDecoder {
        BasicDecoder::from(self.endianness())
    }

    /// Obtain a dynamic basic encoder, based on this transfer syntax' expected endianness.
    pub fn basic_encoder(&self) -> BasicEncoder {
        BasicEncoder::from(self.endianness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IVRLE: TransferSyntax =
        TransferSyntax::new("1.2.840.10008.1.2", "Implicit VR Little Endian", Endianness::Little, false, false);

    const EVRLE: TransferSyntax = TransferSyntax::new(
        "1.2.840.10008.1.2.1",
        "Explicit VR Little Endian",
        Endianness::Little,
        true,
        false,
    );

    const JPEG_BASELINE: TransferSyntax = TransferSyntax::new(
        "1.2.840.10008.1.2.4.50",
        "JPEG Baseline",
        Endianness::Little,
        true,
        true,
    );

    #[test]
    fn implicit_vr_le_has_decoder_and_encoder() {
        assert!(IVRLE.decoder().is_some());
        assert!(IVRLE.encoder::<Vec<u8>>().is_some());
        assert!(!IVRLE.is_explicit_vr());
        assert!(!IVRLE.is_encapsulated());
    }

    #[test]
    fn explicit_vr_le_has_decoder_and_encoder() {
        assert!(EVRLE.decoder().is_some());
        assert!(EVRLE.encoder::<Vec<u8>>().is_some());
        assert!(EVRLE.is_explicit_vr());
    }

    #[test]
    fn encapsulated_transfer_syntax_still_has_a_dataset_codec() {
        // the dataset itself is still explicit VR little endian;
        // only the pixel data fragments are opaque to this crate.
        assert!(JPEG_BASELINE.decoder().is_some());
        assert!(JPEG_BASELINE.is_encapsulated());
    }
}
