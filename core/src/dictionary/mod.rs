//! The attribute dictionary abstraction: a lookup from tags (or tag
//! ranges) to their registered name and value representation.
//!
//! This crate only defines the trait and the supporting types; the actual
//! table of standard attributes lives in `dicom-dictionary-std`, kept
//! separate so that alternative or private dictionaries can implement the
//! same trait.

use crate::header::{Tag, VR};
use std::fmt;

/// A VR that is only fully resolved once the attribute's context (its
/// transfer syntax, or a sibling attribute's value) is known. A handful of
/// standard attributes are declared this way rather than with one fixed VR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualVr {
    /// the VR is fixed for every tag in the entry's range
    Exact(VR),
    /// Pixel Data: `OB` or `OW` depending on the transfer syntax and bits
    /// allocated
    Px,
    /// Overlay Data: `OB` or `OW`
    Ox,
    /// ambiguous between `US` and `SS`, resolved via Pixel Representation
    Xs,
    /// the VR is not known ahead of time and must be resolved by the
    /// caller
    Unresolved,
}

impl VirtualVr {
    /// Resolve to a concrete VR, if possible without extra information.
    pub fn relative_vr(&self) -> Option<VR> {
        match self {
            VirtualVr::Exact(vr) => Some(*vr),
            _ => None,
        }
    }
}

impl From<VR> for VirtualVr {
    fn from(vr: VR) -> Self {
        VirtualVr::Exact(vr)
    }
}

/// The range of tags that a dictionary entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRange {
    /// a single, specific tag
    Single(Tag),
    /// a repeating group: the element is fixed, the group's high byte
    /// varies (e.g. Overlay Data across groups `0x6000`..=`0x60FE`)
    Group100(Tag),
    /// a repeating element: the group is fixed, the element's high byte
    /// varies
    Element100(Tag),
    /// the generic group length pseudo-attribute present in every group
    GroupLength,
    /// a private creator declaration (odd group, element in
    /// `0x0010..=0x00FF`)
    PrivateCreator,
}

impl TagRange {
    /// The representative tag for this range. For the two generic
    /// variants this has no meaningful value and should not be used as a
    /// lookup key.
    pub fn inner(&self) -> Tag {
        match *self {
            TagRange::Single(t) | TagRange::Group100(t) | TagRange::Element100(t) => t,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0001, 0x0010),
        }
    }

    /// Whether this range covers the given tag.
    pub fn covers(&self, tag: Tag) -> bool {
        match *self {
            TagRange::Single(t) => t == tag,
            TagRange::Group100(t) => {
                (tag.group() & 0xFF00) == (t.group() & 0xFF00) && tag.element() == t.element()
            }
            TagRange::Element100(t) => {
                tag.group() == t.group() && (tag.element() & 0xFF00) == (t.element() & 0xFF00)
            }
            TagRange::GroupLength => tag.element() == 0x0000,
            TagRange::PrivateCreator => tag.is_private_creator(),
        }
    }
}

/// A dictionary entry: the attribute's registered name and its value
/// representation (or range of acceptable representations).
pub trait DataDictionaryEntry {
    /// The attribute's keyword/name, as registered by the standard
    /// (e.g. `"PatientName"`).
    fn name(&self) -> &str;

    /// The range of tags this entry describes.
    fn tag_range(&self) -> TagRange;

    /// The entry's value representation.
    fn vr(&self) -> VirtualVr;
}

/// A borrowed handle to a dictionary entry, as returned by
/// [`DataDictionary::by_tag`] and [`DataDictionary::by_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataDictionaryEntryRef<'a> {
    /// the attribute's registered keyword
    pub alias: &'a str,
    /// the range of tags this entry applies to
    pub tag: TagRange,
    /// the entry's value representation
    pub vr: VirtualVr,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn name(&self) -> &str {
        self.alias
    }
    fn tag_range(&self) -> TagRange {
        self.tag
    }
    fn vr(&self) -> VirtualVr {
        self.vr
    }
}

impl<'a> fmt::Display for DataDictionaryEntryRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.alias)
    }
}

/// A trait for looking up attribute metadata by tag or by keyword.
///
/// Implemented by `dicom-dictionary-std`'s standard registry, and usable
/// with a private or merged dictionary for applications that need to
/// resolve non-standard attributes (for instance, to recognise a private
/// creator's block for de-identification purposes).
pub trait DataDictionary {
    /// The concrete entry type returned by this dictionary.
    type Entry: DataDictionaryEntry;

    /// Fetch the entry for a specific tag, if registered.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch the entry for an attribute keyword, if registered.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Parse a tag expression in either `(gggg,eeee)`, `gggg,eeee` or
    /// `ggggeeee` hexadecimal form, or as a registered keyword.
    fn parse_tag(&self, s: &str) -> Option<Tag> {
        let s = s.trim();
        let hex = s.trim_start_matches('(').trim_end_matches(')');
        if let Some((g, e)) = hex.split_once(',') {
            let g = u16::from_str_radix(g.trim(), 16).ok()?;
            let e = u16::from_str_radix(e.trim(), 16).ok()?;
            return Some(Tag(g, e));
        }
        if hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let g = u16::from_str_radix(&hex[0..4], 16).ok()?;
            let e = u16::from_str_radix(&hex[4..8], 16).ok()?;
            return Some(Tag(g, e));
        }
        match self.by_name(s)?.tag_range() {
            TagRange::Single(t) => Some(t),
            _ => None,
        }
    }

    /// Resolve a tag or keyword expression to its dictionary entry.
    fn by_expr(&self, s: &str) -> Option<&Self::Entry> {
        self.by_name(s).or_else(|| self.by_tag(self.parse_tag(s)?))
    }
}

impl<'a, T: ?Sized> DataDictionary for &'a T
where
    T: DataDictionary,
{
    type Entry = T::Entry;

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }
}
