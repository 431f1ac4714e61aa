//! The action resolver (§4.10): turns a profile action plus the element's
//! conformance class, value representation, and emptiness into one
//! concrete operation the engine can apply.

use crate::profile::{Compound, ConformanceClass, ProfileAction};
use dicom_core::header::VR;

/// A concrete, unconditional operation to apply to a matched attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcreteAction {
    Keep,
    Remove,
    ReplaceWithEmpty,
    ReplaceWithDummy,
    Clean,
    RemapIdentifier,
}

/// Resolve `action` into a [`ConcreteAction`], applying the compound
/// conditional table and the two post-rules from §4.10.
pub fn resolve(
    action: ProfileAction,
    class: ConformanceClass,
    vr: VR,
    has_value: bool,
) -> ConcreteAction {
    let resolved = match action {
        ProfileAction::Keep => ConcreteAction::Keep,
        ProfileAction::Remove => ConcreteAction::Remove,
        ProfileAction::ReplaceWithEmpty => ConcreteAction::ReplaceWithEmpty,
        ProfileAction::ReplaceWithDummy => ConcreteAction::ReplaceWithDummy,
        ProfileAction::Clean => ConcreteAction::Clean,
        ProfileAction::RemapIdentifier => ConcreteAction::RemapIdentifier,
        ProfileAction::Compound(c) => resolve_compound(c, class),
    };

    apply_post_rules(resolved, vr, has_value)
}

fn resolve_compound(compound: Compound, class: ConformanceClass) -> ConcreteAction {
    use ConcreteAction::*;
    use ConformanceClass::*;
    match (compound, class) {
        (Compound::ZOrD, Required) => ReplaceWithDummy,
        (Compound::ZOrD, RequiredEmptyAllowed) => ReplaceWithEmpty,
        (Compound::ZOrD, Optional) => ReplaceWithEmpty,

        (Compound::XOrZ, Required) => Remove,
        (Compound::XOrZ, RequiredEmptyAllowed) => ReplaceWithEmpty,
        (Compound::XOrZ, Optional) => Remove,

        (Compound::XOrD, Required) => ReplaceWithDummy,
        (Compound::XOrD, RequiredEmptyAllowed) => Remove,
        (Compound::XOrD, Optional) => Remove,

        (Compound::XOrZOrD, Required) => ReplaceWithDummy,
        (Compound::XOrZOrD, RequiredEmptyAllowed) => ReplaceWithEmpty,
        (Compound::XOrZOrD, Optional) => Remove,

        (Compound::XOrZOrU, Required) => RemapIdentifier,
        (Compound::XOrZOrU, RequiredEmptyAllowed) => ReplaceWithEmpty,
        (Compound::XOrZOrU, Optional) => Remove,
    }
}

fn apply_post_rules(resolved: ConcreteAction, vr: VR, has_value: bool) -> ConcreteAction {
    match resolved {
        // a remap-identifier resolution against a non-identifier VR
        // downgrades to replace-with-dummy.
        ConcreteAction::RemapIdentifier if vr != VR::UI => ConcreteAction::ReplaceWithDummy,
        // a replace-with-empty resolution against an already-empty value
        // downgrades to keep.
        ConcreteAction::ReplaceWithEmpty if !has_value => ConcreteAction::Keep,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_or_d_table_row() {
        assert_eq!(
            resolve_compound(Compound::ZOrD, ConformanceClass::Required),
            ConcreteAction::ReplaceWithDummy
        );
        assert_eq!(
            resolve_compound(Compound::ZOrD, ConformanceClass::RequiredEmptyAllowed),
            ConcreteAction::ReplaceWithEmpty
        );
        assert_eq!(
            resolve_compound(Compound::ZOrD, ConformanceClass::Optional),
            ConcreteAction::ReplaceWithEmpty
        );
    }

    #[test]
    fn x_or_z_or_u_table_row() {
        assert_eq!(
            resolve_compound(Compound::XOrZOrU, ConformanceClass::Required),
            ConcreteAction::RemapIdentifier
        );
        assert_eq!(
            resolve_compound(Compound::XOrZOrU, ConformanceClass::Optional),
            ConcreteAction::Remove
        );
    }

    #[test]
    fn remap_identifier_on_non_ui_downgrades_to_dummy() {
        let action = resolve(
            ProfileAction::RemapIdentifier,
            ConformanceClass::Required,
            VR::LO,
            true,
        );
        assert_eq!(action, ConcreteAction::ReplaceWithDummy);
    }

    #[test]
    fn remap_identifier_on_ui_stays_remap() {
        let action = resolve(
            ProfileAction::RemapIdentifier,
            ConformanceClass::Required,
            VR::UI,
            true,
        );
        assert_eq!(action, ConcreteAction::RemapIdentifier);
    }

    #[test]
    fn empty_replacement_on_already_empty_value_keeps() {
        let action = resolve(
            ProfileAction::ReplaceWithEmpty,
            ConformanceClass::Optional,
            VR::LO,
            false,
        );
        assert_eq!(action, ConcreteAction::Keep);
    }
}
