//! The de-identification engine (§4.14): walks a dataset in identifier
//! order, resolves and applies the profile table's action to every
//! element, enforces the private-tag policy, runs the date shifter, and
//! inserts the standard conformance markers.

use std::collections::{HashMap, HashSet};
use std::ops::DerefMut;

use dicom_core::header::{DataElement, Length, Tag, VR};
use dicom_core::value::{DataSetSequence, PrimitiveValue, Value};
use dicom_dictionary_std::tags;
use dicom_object::mem::InMemDicomObject;
use dicom_object::FileDicomObject;

use crate::date_shift::{DateShiftConfig, DateShiftStrategy, DateShifter, ShiftReport};
use crate::error::Warning;
use crate::profile::{self, ProfileAction, RetentionOptions};
use crate::remap::RemapStore;
use crate::resolver::{self, ConcreteAction};

const BASE_PROFILE_LABEL: &str = "Basic Application Confidentiality Profile";
const BASE_PROFILE_CODE_VALUE: &str = "113100";
const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
const CODE_MEANING: Tag = Tag(0x0008, 0x0104);

/// What to do with elements attributed to a private creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateTagDefault {
    Remove,
    Keep,
}

/// Options controlling one run of the de-identification engine.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub retention: RetentionOptions,
    /// Per-identifier overrides, consulted before the static profile
    /// table.
    pub overrides: HashMap<Tag, ProfileAction>,
    pub safe_creators: Vec<String>,
    pub private_default: PrivateTagDefault,
    pub date_shift: Option<DateShiftConfig>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            retention: RetentionOptions::default(),
            overrides: HashMap::new(),
            safe_creators: Vec::new(),
            private_default: PrivateTagDefault::Remove,
            date_shift: None,
        }
    }
}

/// Totals and non-fatal warnings produced by one engine run.
#[derive(Debug, Default)]
pub struct EngineReport {
    pub attributes_removed: usize,
    pub attributes_replaced: usize,
    pub identifiers_remapped: usize,
    pub shift_report: ShiftReport,
    pub warnings: Vec<Warning>,
}

/// De-identify `obj` in place under `options`, using `remap` for
/// identifier remapping.
pub fn deidentify(
    obj: &mut FileDicomObject<InMemDicomObject>,
    options: &EngineOptions,
    remap: &dyn RemapStore,
) -> EngineReport {
    let subject = subject_identifier(obj);
    let mut report = EngineReport::default();

    walk_object(obj.deref_mut(), options, remap, &subject, &mut report);

    let shifter_ran = match &options.date_shift {
        Some(cfg) if cfg.strategy != DateShiftStrategy::None => {
            let shifter = DateShifter::new(*cfg);
            shift_dates_recursive(obj.deref_mut(), &shifter, &subject, &mut report.shift_report);
            true
        }
        _ => false,
    };

    insert_conformance_markers(obj.deref_mut(), options, shifter_ran);
    report
}

fn subject_identifier(obj: &FileDicomObject<InMemDicomObject>) -> String {
    obj.get(tags::PATIENT_ID)
        .and_then(|e| e.to_str().ok())
        .map(|s| s.into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

fn is_value_empty<I, P>(value: &Value<I, P>) -> bool {
    match value {
        Value::Primitive(p) => matches!(p, PrimitiveValue::Empty),
        _ => false,
    }
}

fn walk_object(
    obj: &mut InMemDicomObject,
    options: &EngineOptions,
    remap: &dyn RemapStore,
    subject: &str,
    report: &mut EngineReport,
) {
    let mut removed_creator_blocks: HashSet<u16> = HashSet::new();
    let ordered_tags: Vec<Tag> = obj.tags().collect();

    for tag in ordered_tags {
        let is_private = tag.group() % 2 == 1 && tag.group() != 0x0001;
        if is_private {
            apply_private_tag_policy(obj, tag, options, &mut removed_creator_blocks, report);
            continue;
        }

        let vr = match obj.get(tag) {
            Some(elt) => elt.vr(),
            None => continue,
        };

        if vr == VR::SQ {
            recurse_into_sequence(obj, tag, options, remap, subject, report);
            continue;
        }

        let profile_action = options
            .overrides
            .get(&tag)
            .copied()
            .or_else(|| profile::action_for(tag, &options.retention));
        let Some(profile_action) = profile_action else {
            continue;
        };

        let class = profile::conformance_class(tag);
        let has_value = obj
            .get(tag)
            .map(|elt| !is_value_empty(elt.value()))
            .unwrap_or(false);
        let concrete = resolver::resolve(profile_action, class, vr, has_value);
        apply_concrete(obj, tag, vr, concrete, remap, subject, report);
    }
}

fn recurse_into_sequence(
    obj: &mut InMemDicomObject,
    tag: Tag,
    options: &EngineOptions,
    remap: &dyn RemapStore,
    subject: &str,
    report: &mut EngineReport,
) {
    let Ok(elt) = obj.take_element(tag) else {
        return;
    };
    let (header, value) = elt.into_parts();
    let Value::Sequence(seq) = value else {
        obj.put(DataElement::new(tag, header.vr, value));
        return;
    };
    let size = seq.size();
    let mut items = seq.into_items();
    for item in items.iter_mut() {
        walk_object(item, options, remap, subject, report);
    }
    obj.put(DataElement::new(
        tag,
        header.vr,
        Value::Sequence(DataSetSequence::new(items, size)),
    ));
}

fn apply_private_tag_policy(
    obj: &mut InMemDicomObject,
    tag: Tag,
    options: &EngineOptions,
    removed_creator_blocks: &mut HashSet<u16>,
    report: &mut EngineReport,
) {
    let element = tag.element();

    if (0x0010..=0x00FF).contains(&element) {
        // private creator declaration
        let creator_str = obj.get(tag).and_then(|e| e.to_str().ok()).map(|s| s.into_owned());
        let safe = options.retention.retain_safe_private
            && creator_str
                .as_deref()
                .map(|c| options.safe_creators.iter().any(|s| s == c))
                .unwrap_or(false);
        if !safe && options.private_default == PrivateTagDefault::Remove {
            obj.remove_element(tag);
            removed_creator_blocks.insert(element);
            report.attributes_removed += 1;
        }
        return;
    }

    let block = element >> 8;
    if removed_creator_blocks.contains(&block) {
        if obj.remove_element(tag) {
            report.attributes_removed += 1;
        }
        return;
    }

    let creator_tag = Tag(tag.group(), block);
    let creator_str = obj
        .get(creator_tag)
        .and_then(|e| e.to_str().ok())
        .map(|s| s.into_owned());
    let safe = options.retention.retain_safe_private
        && creator_str
            .as_deref()
            .map(|c| options.safe_creators.iter().any(|s| s == c))
            .unwrap_or(false);
    if safe {
        return;
    }
    if options.private_default == PrivateTagDefault::Remove {
        if obj.remove_element(tag) {
            report.attributes_removed += 1;
        }
    }
}

fn apply_concrete(
    obj: &mut InMemDicomObject,
    tag: Tag,
    vr: VR,
    action: ConcreteAction,
    remap: &dyn RemapStore,
    subject: &str,
    report: &mut EngineReport,
) {
    match action {
        ConcreteAction::Keep => {}
        ConcreteAction::Remove => {
            if obj.remove_element(tag) {
                report.attributes_removed += 1;
            }
        }
        ConcreteAction::ReplaceWithEmpty => {
            obj.put(DataElement::empty(tag, vr));
            report.attributes_replaced += 1;
        }
        ConcreteAction::ReplaceWithDummy | ConcreteAction::Clean => {
            obj.put(DataElement::new(tag, vr, dummy_value_for(vr)));
            report.attributes_replaced += 1;
        }
        ConcreteAction::RemapIdentifier => {
            let original = obj.get(tag).and_then(|e| e.to_str().ok()).map(|s| s.into_owned());
            match original {
                Some(original) => match remap.get_or_create(&original, subject) {
                    Ok(synthetic) => {
                        obj.put_str(tag, vr, synthetic);
                        report.identifiers_remapped += 1;
                    }
                    Err(e) => report.warnings.push(Warning {
                        tag,
                        message: e.to_string(),
                    }),
                },
                None => {}
            }
        }
    }
}

/// The VR-specific canonical dummy literal from §4.14's replacement rules.
fn dummy_value_for(vr: VR) -> PrimitiveValue {
    match vr {
        VR::PN => PrimitiveValue::from("ANONYMOUS"),
        VR::LT | VR::UT | VR::ST => PrimitiveValue::from("ANONYMIZED"),
        VR::CS => PrimitiveValue::from("ANON"),
        VR::DS | VR::IS => PrimitiveValue::from("0"),
        VR::DA => PrimitiveValue::from("19000101"),
        VR::TM => PrimitiveValue::from("000000.000000"),
        VR::UI => PrimitiveValue::from("2.25.0"),
        VR::UR => PrimitiveValue::from("http://example.com"),
        VR::AS => PrimitiveValue::from("000Y"),
        VR::US => PrimitiveValue::from(0u16),
        VR::SS => PrimitiveValue::from(0i16),
        VR::UL => PrimitiveValue::from(0u32),
        VR::SL => PrimitiveValue::from(0i32),
        VR::FL => PrimitiveValue::from(0f32),
        VR::FD => PrimitiveValue::from(0f64),
        _ => PrimitiveValue::from("ANONYMOUS"),
    }
}

fn shift_dates_recursive(
    obj: &mut InMemDicomObject,
    shifter: &DateShifter,
    subject: &str,
    report: &mut ShiftReport,
) {
    let ordered_tags: Vec<Tag> = obj.tags().collect();
    for tag in ordered_tags {
        let vr = match obj.get(tag) {
            Some(elt) => elt.vr(),
            None => continue,
        };
        match vr {
            VR::SQ => {
                if let Ok(elt) = obj.take_element(tag) {
                    let (header, value) = elt.into_parts();
                    if let Value::Sequence(seq) = value {
                        let size = seq.size();
                        let mut items = seq.into_items();
                        for item in items.iter_mut() {
                            shift_dates_recursive(item, shifter, subject, report);
                        }
                        obj.put(DataElement::new(
                            tag,
                            header.vr,
                            Value::Sequence(DataSetSequence::new(items, size)),
                        ));
                    } else {
                        obj.put(DataElement::new(tag, header.vr, value));
                    }
                }
            }
            VR::DA => {
                if let Some(raw) = obj.get(tag).and_then(|e| e.to_str().ok()).map(|s| s.into_owned()) {
                    let (new_val, changed) = shifter.shift_date(&raw, subject);
                    if changed {
                        obj.put_str(tag, VR::DA, new_val);
                        report.dates_modified += 1;
                    }
                }
            }
            VR::TM => {
                if let Some(raw) = obj.get(tag).and_then(|e| e.to_str().ok()).map(|s| s.into_owned()) {
                    let (new_val, changed) = shifter.shift_time(&raw, subject);
                    if changed {
                        obj.put_str(tag, VR::TM, new_val);
                        report.times_modified += 1;
                    }
                }
            }
            VR::DT => {
                if let Some(raw) = obj.get(tag).and_then(|e| e.to_str().ok()).map(|s| s.into_owned()) {
                    let (new_val, changed) = shifter.shift_date_time(&raw, subject);
                    if changed {
                        obj.put_str(tag, VR::DT, new_val);
                        report.date_times_modified += 1;
                    }
                }
            }
            _ => {}
        }
    }
}

fn insert_conformance_markers(
    obj: &mut InMemDicomObject,
    options: &EngineOptions,
    shifter_ran: bool,
) {
    obj.put_str(tags::PATIENT_IDENTITY_REMOVED, VR::CS, "YES");

    let mut labels = vec![BASE_PROFILE_LABEL.to_string()];
    labels.extend(options.retention.enabled_labels().into_iter().map(String::from));
    obj.put_str(tags::DE_IDENTIFICATION_METHOD, VR::LO, labels.join("\\"));

    let mut coded_item = InMemDicomObject::new_empty();
    coded_item.put_str(tags::CODE_VALUE, VR::SH, BASE_PROFILE_CODE_VALUE);
    coded_item.put_str(CODING_SCHEME_DESIGNATOR, VR::SH, "DCM");
    coded_item.put_str(CODE_MEANING, VR::LO, BASE_PROFILE_LABEL);
    let seq = DataSetSequence::new(vec![coded_item], Length::UNDEFINED);
    obj.put(DataElement::new(
        tags::DE_IDENTIFICATION_METHOD_CODE_SEQUENCE,
        VR::SQ,
        Value::Sequence(seq),
    ));

    let status = if options.retention.retain_full_dates {
        "UNMODIFIED"
    } else if options.retention.retain_modified_dates || shifter_ran {
        "MODIFIED"
    } else {
        "REMOVED"
    };
    obj.put_str(tags::LONGITUDINAL_TEMPORAL_INFORMATION_MODIFIED, VR::CS, status);
}
