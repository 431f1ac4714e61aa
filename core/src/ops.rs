//! Attribute-level mutation operations.
//!
//! [`AttributeOp`] describes a single edit to apply to a data set by tag:
//! remove it, blank it, replace its value, or push an additional component
//! onto a multi-valued one. This is the vocabulary that higher-level
//! consumers (notably a de-identification engine) use to describe what they
//! want done without depending on the concrete dataset type, via the
//! [`ApplyOp`] trait that a dataset implements.

use crate::header::{Tag, VR};
use crate::value::{PrimitiveValue, ValueType};
use snafu::Snafu;
use std::borrow::Cow;

/// A single step of a path into a (possibly nested) data set: either a
/// top-level tag, or a tag within the `n`th item of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSelectorStep {
    /// a top-level (or final) tag
    Tag(Tag),
    /// a tag naming a sequence, descending into one of its items
    Nested {
        /// the sequence's tag
        tag: Tag,
        /// the item index to descend into
        item: u32,
    },
}

impl AttributeSelectorStep {
    /// The tag named by this step.
    pub fn tag(&self) -> Tag {
        match *self {
            AttributeSelectorStep::Tag(tag) => tag,
            AttributeSelectorStep::Nested { tag, .. } => tag,
        }
    }
}

impl From<Tag> for AttributeSelectorStep {
    fn from(tag: Tag) -> Self {
        AttributeSelectorStep::Tag(tag)
    }
}

/// A path identifying a single attribute, possibly nested inside one or
/// more sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector(pub Vec<AttributeSelectorStep>);

impl AttributeSelector {
    /// Build a selector naming a single top-level attribute.
    pub fn single(tag: Tag) -> Self {
        AttributeSelector(vec![tag.into()])
    }

    /// The first step in the path.
    pub fn first_step(&self) -> AttributeSelectorStep {
        self.0[0]
    }

    /// The final tag in the path.
    pub fn last_tag(&self) -> Option<Tag> {
        self.0.last().map(|s| s.tag())
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            match step {
                AttributeSelectorStep::Tag(tag) => write!(f, "{tag}")?,
                AttributeSelectorStep::Nested { tag, item } => write!(f, "{tag}[{item}]")?,
            }
        }
        Ok(())
    }
}

use std::fmt;

impl From<Tag> for AttributeSelector {
    fn from(tag: Tag) -> Self {
        AttributeSelector::single(tag)
    }
}

/// The kind of edit to perform on a matched attribute.
#[derive(Clone)]
#[non_exhaustive]
pub enum AttributeAction {
    /// Remove the attribute entirely.
    Remove,
    /// Replace the value with an empty value, keeping the attribute and
    /// its VR.
    Empty,
    /// Truncate a multi-valued attribute down to the given number of
    /// components, if it holds more.
    Truncate(usize),
    /// Change the attribute's value representation, keeping its value.
    SetVr(VR),
    /// Replace the value with a specific string (re-encoded per the
    /// attribute's VR), inserting the attribute if it did not exist.
    SetStr(Cow<'static, str>),
    /// Replace the value with a specific string only if the attribute is
    /// not already present.
    SetStrIfMissing(Cow<'static, str>),
    /// Replace the value with a freshly generated UID string.
    SetUid(Cow<'static, str>),
    /// Replace the value outright, inserting the attribute if it did not
    /// exist.
    Set(PrimitiveValue),
    /// Replace the value outright only if the attribute is not already
    /// present.
    SetIfMissing(PrimitiveValue),
    /// Replace the value of an attribute that is already present,
    /// failing (or being ignored) if it is not.
    Replace(PrimitiveValue),
    /// Replace the textual value of an attribute that is already present.
    ReplaceStr(Cow<'static, str>),
    /// Append an additional string component to a multi-valued attribute.
    PushStr(Cow<'static, str>),
    /// Append an additional signed 32-bit integer component.
    PushI32(i32),
    /// Append an additional unsigned 32-bit integer component.
    PushU32(u32),
    /// Append an additional signed 16-bit integer component.
    PushI16(i16),
    /// Append an additional unsigned 16-bit integer component.
    PushU16(u16),
    /// Append an additional 32-bit floating point component.
    PushF32(f32),
    /// Append an additional 64-bit floating point component.
    PushF64(f64),
    /// Apply a caller-supplied transformation to the existing primitive
    /// value, leaving the attribute in place if the closure declines to
    /// change it (returns `None`).
    MapValue(std::sync::Arc<dyn Fn(&PrimitiveValue) -> Option<PrimitiveValue> + Send + Sync>),
}

impl AttributeAction {
    /// A short, stable name for this action kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeAction::Remove => "remove",
            AttributeAction::Empty => "empty",
            AttributeAction::Truncate(_) => "truncate",
            AttributeAction::SetVr(_) => "set-vr",
            AttributeAction::SetStr(_) => "set-str",
            AttributeAction::SetStrIfMissing(_) => "set-str-if-missing",
            AttributeAction::SetUid(_) => "set-uid",
            AttributeAction::Set(_) => "set",
            AttributeAction::SetIfMissing(_) => "set-if-missing",
            AttributeAction::Replace(_) => "replace",
            AttributeAction::ReplaceStr(_) => "replace-str",
            AttributeAction::PushStr(_) => "push-str",
            AttributeAction::PushI32(_) => "push-i32",
            AttributeAction::PushU32(_) => "push-u32",
            AttributeAction::PushI16(_) => "push-i16",
            AttributeAction::PushU16(_) => "push-u16",
            AttributeAction::PushF32(_) => "push-f32",
            AttributeAction::PushF64(_) => "push-f64",
            AttributeAction::MapValue(_) => "map-value",
        }
    }
}

impl fmt::Display for AttributeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

impl fmt::Debug for AttributeAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeAction::Remove => write!(f, "Remove"),
            AttributeAction::Empty => write!(f, "Empty"),
            AttributeAction::Truncate(n) => f.debug_tuple("Truncate").field(n).finish(),
            AttributeAction::SetVr(vr) => f.debug_tuple("SetVr").field(vr).finish(),
            AttributeAction::SetStr(s) => f.debug_tuple("SetStr").field(s).finish(),
            AttributeAction::SetStrIfMissing(s) => {
                f.debug_tuple("SetStrIfMissing").field(s).finish()
            }
            AttributeAction::SetUid(s) => f.debug_tuple("SetUid").field(s).finish(),
            AttributeAction::Set(v) => f.debug_tuple("Set").field(v).finish(),
            AttributeAction::SetIfMissing(v) => f.debug_tuple("SetIfMissing").field(v).finish(),
            AttributeAction::Replace(v) => f.debug_tuple("Replace").field(v).finish(),
            AttributeAction::ReplaceStr(s) => f.debug_tuple("ReplaceStr").field(s).finish(),
            AttributeAction::PushStr(s) => f.debug_tuple("PushStr").field(s).finish(),
            AttributeAction::PushI32(v) => f.debug_tuple("PushI32").field(v).finish(),
            AttributeAction::PushU32(v) => f.debug_tuple("PushU32").field(v).finish(),
            AttributeAction::PushI16(v) => f.debug_tuple("PushI16").field(v).finish(),
            AttributeAction::PushU16(v) => f.debug_tuple("PushU16").field(v).finish(),
            AttributeAction::PushF32(v) => f.debug_tuple("PushF32").field(v).finish(),
            AttributeAction::PushF64(v) => f.debug_tuple("PushF64").field(v).finish(),
            AttributeAction::MapValue(_) => write!(f, "MapValue(..)"),
        }
    }
}

impl PartialEq for AttributeAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeAction::Remove, AttributeAction::Remove) => true,
            (AttributeAction::Empty, AttributeAction::Empty) => true,
            (AttributeAction::Truncate(a), AttributeAction::Truncate(b)) => a == b,
            (AttributeAction::SetVr(a), AttributeAction::SetVr(b)) => a == b,
            (AttributeAction::SetStr(a), AttributeAction::SetStr(b)) => a == b,
            (AttributeAction::SetStrIfMissing(a), AttributeAction::SetStrIfMissing(b)) => a == b,
            (AttributeAction::SetUid(a), AttributeAction::SetUid(b)) => a == b,
            (AttributeAction::Set(a), AttributeAction::Set(b)) => a == b,
            (AttributeAction::SetIfMissing(a), AttributeAction::SetIfMissing(b)) => a == b,
            (AttributeAction::Replace(a), AttributeAction::Replace(b)) => a == b,
            (AttributeAction::ReplaceStr(a), AttributeAction::ReplaceStr(b)) => a == b,
            (AttributeAction::PushStr(a), AttributeAction::PushStr(b)) => a == b,
            (AttributeAction::PushI32(a), AttributeAction::PushI32(b)) => a == b,
            (AttributeAction::PushU32(a), AttributeAction::PushU32(b)) => a == b,
            (AttributeAction::PushI16(a), AttributeAction::PushI16(b)) => a == b,
            (AttributeAction::PushU16(a), AttributeAction::PushU16(b)) => a == b,
            (AttributeAction::PushF32(a), AttributeAction::PushF32(b)) => a == b,
            (AttributeAction::PushF64(a), AttributeAction::PushF64(b)) => a == b,
            (AttributeAction::MapValue(a), AttributeAction::MapValue(b)) => {
                std::sync::Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

/// A single attribute operation: where to apply it, and what to do.
#[derive(Debug, Clone)]
pub struct AttributeOp {
    /// the attribute (or nested attribute) to act on
    pub selector: AttributeSelector,
    /// the action to perform
    pub action: AttributeAction,
}

impl AttributeOp {
    /// Build an operation targeting a single top-level tag.
    pub fn new(tag: Tag, action: AttributeAction) -> Self {
        AttributeOp {
            selector: AttributeSelector::single(tag),
            action,
        }
    }
}

/// The result type used by [`ApplyOp`].
pub type ApplyResult<T = (), E = ApplyError> = std::result::Result<T, E>;

/// An error raised while applying an [`AttributeOp`] to a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ApplyError {
    /// the selector named an attribute that is mandatory in this context
    /// and cannot be removed or emptied
    #[snafu(display("attribute is mandatory and cannot be removed"))]
    Mandatory,

    /// the action is not supported for the attribute's current VR
    #[snafu(display("action is not supported for this attribute"))]
    UnsupportedAction,

    /// the selector named an attribute that does not exist in the data
    /// set and the action requires one to already be present
    #[snafu(display("no such attribute"))]
    UnsupportedAttribute,

    /// a sequence selector step tried to extend a sequence past its
    /// current item count, which is not permitted by this operation
    #[snafu(display("illegal extension of a fixed-cardinality attribute"))]
    IllegalExtend,

    /// the replacement value's shape is incompatible with the
    /// attribute's declared value type
    #[snafu(display("cannot replace attribute (currently {current:?}) with a value of type {replacement:?}"))]
    IncompatibleTypes {
        /// the attribute's current value type
        current: ValueType,
        /// the replacement's value type
        replacement: ValueType,
    },
}

/// A trait implemented by data set types that can have [`AttributeOp`]s
/// applied to them in place.
pub trait ApplyOp {
    /// The error type raised when an operation cannot be applied.
    type Err;

    /// Apply a single attribute operation, in place.
    fn apply(&mut self, op: AttributeOp) -> Result<(), Self::Err>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_single_roundtrip() {
        let tag = Tag(0x0010, 0x0010);
        let sel = AttributeSelector::single(tag);
        assert_eq!(sel.last_tag(), Some(tag));
        assert_eq!(sel.first_step().tag(), tag);
    }

    #[test]
    fn action_kind_names() {
        assert_eq!(AttributeAction::Remove.kind_name(), "remove");
        assert_eq!(AttributeAction::Empty.kind_name(), "empty");
    }
}
