//! The date shifter (§4.13): offsets DA/TM/DT values by a per-subject or
//! fixed number of days, or replaces them with dummy placeholders.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

const DUMMY_DATE: &str = "19000101";
const DUMMY_TIME: &str = "000000.000000";
const DUMMY_DATE_TIME: &str = "19000101000000.000000";

static TZ_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[&+-]\d{4}$").unwrap());

/// Which of the five date-shifting behaviours to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateShiftStrategy {
    /// Leave date/time values unchanged.
    #[default]
    None,
    /// Apply `fixed_offset_days` to every date.
    Fixed,
    /// Draw an offset once per subject from `[min_offset_days,
    /// max_offset_days]`, deterministically from `seed`, and reuse it.
    RandomPerSubject,
    /// Shift the date as under `Fixed`, but zero out any time component.
    RemoveTime,
    /// Replace date/time values with the dummy placeholder constants.
    Remove,
}

/// Configuration for a [`DateShifter`], matching the date-shift fields of
/// the configuration surface in §6.
#[derive(Debug, Clone, Copy)]
pub struct DateShiftConfig {
    pub strategy: DateShiftStrategy,
    pub fixed_offset_days: i64,
    pub min_offset_days: i64,
    pub max_offset_days: i64,
    pub seed: u64,
}

impl Default for DateShiftConfig {
    fn default() -> Self {
        DateShiftConfig {
            strategy: DateShiftStrategy::None,
            fixed_offset_days: 0,
            min_offset_days: -365,
            max_offset_days: 365,
            seed: 0,
        }
    }
}

/// Tally of values touched by one pass of the date shifter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftReport {
    pub dates_modified: usize,
    pub times_modified: usize,
    pub date_times_modified: usize,
}

/// Applies a [`DateShiftConfig`] to DA/TM/DT values, caching
/// per-subject offsets under `random-per-subject`.
///
/// The cache exists only to avoid recomputing the hash on every call;
/// the offset itself is a pure function of `(seed, subject)`, so it is
/// stable across process restarts without needing to persist the cache
/// (invariant 7).
pub struct DateShifter {
    config: DateShiftConfig,
    subject_offsets: Mutex<HashMap<String, i64>>,
}

impl DateShifter {
    pub fn new(config: DateShiftConfig) -> Self {
        DateShifter {
            config,
            subject_offsets: Mutex::new(HashMap::new()),
        }
    }

    fn offset_for_subject(&self, subject: &str) -> i64 {
        match self.config.strategy {
            DateShiftStrategy::RandomPerSubject => {
                let mut cache = self.subject_offsets.lock().expect("lock poisoned");
                *cache
                    .entry(subject.to_string())
                    .or_insert_with(|| deterministic_offset(self.config.seed, subject, self.config.min_offset_days, self.config.max_offset_days))
            }
            _ => self.config.fixed_offset_days,
        }
    }

    /// Shift a DA (date) value, which may be multi-valued
    /// (backslash-separated). Returns the new value and whether it
    /// differs from the input.
    pub fn shift_date(&self, raw: &str, subject: &str) -> (String, bool) {
        if self.config.strategy == DateShiftStrategy::None {
            return (raw.to_string(), false);
        }
        let offset = self.offset_for_subject(subject);
        let shifted = raw
            .split('\\')
            .map(|component| shift_date_component(component, self.config.strategy, offset))
            .collect::<Vec<_>>()
            .join("\\");
        let changed = shifted != raw;
        (shifted, changed)
    }

    /// Shift a TM (time) value. Time-only shifting is unsupported; only
    /// `remove`/`remove-time` change the value (to the dummy constant).
    pub fn shift_time(&self, raw: &str, _subject: &str) -> (String, bool) {
        match self.config.strategy {
            DateShiftStrategy::None => (raw.to_string(), false),
            DateShiftStrategy::RemoveTime | DateShiftStrategy::Remove => {
                let shifted = raw
                    .split('\\')
                    .map(|_| DUMMY_TIME)
                    .collect::<Vec<_>>()
                    .join("\\");
                let changed = shifted != raw;
                (shifted, changed)
            }
            DateShiftStrategy::Fixed | DateShiftStrategy::RandomPerSubject => {
                (raw.to_string(), false)
            }
        }
    }

    /// Shift a DT (date-time) value.
    pub fn shift_date_time(&self, raw: &str, subject: &str) -> (String, bool) {
        if self.config.strategy == DateShiftStrategy::None {
            return (raw.to_string(), false);
        }
        let offset = self.offset_for_subject(subject);
        let shifted = raw
            .split('\\')
            .map(|component| shift_date_time_component(component, self.config.strategy, offset))
            .collect::<Vec<_>>()
            .join("\\");
        let changed = shifted != raw;
        (shifted, changed)
    }
}

fn deterministic_offset(seed: u64, subject: &str, min_days: i64, max_days: i64) -> i64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    subject.hash(&mut hasher);
    let h = hasher.finish();
    let span = (max_days - min_days + 1).max(1) as u64;
    min_days + (h % span) as i64
}

fn shift_date_component(raw: &str, strategy: DateShiftStrategy, offset: i64) -> String {
    if strategy == DateShiftStrategy::Remove {
        return DUMMY_DATE.to_string();
    }
    if raw.len() < 8 {
        return raw.to_string();
    }
    match NaiveDate::parse_from_str(&raw[..8], "%Y%m%d") {
        Ok(date) => (date + Duration::days(offset)).format("%Y%m%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn shift_date_time_component(raw: &str, strategy: DateShiftStrategy, offset: i64) -> String {
    if strategy == DateShiftStrategy::Remove {
        return DUMMY_DATE_TIME.to_string();
    }
    let (core, tz) = match TZ_SUFFIX.find(raw) {
        Some(m) => (&raw[..m.start()], &raw[m.start()..]),
        None => (raw, ""),
    };
    if core.len() < 8 {
        return raw.to_string();
    }
    let date_part = &core[..8];
    let rest = &core[8..];
    let shifted_date = shift_date_component(date_part, strategy, offset);
    if strategy == DateShiftStrategy::RemoveTime {
        format!("{shifted_date}{DUMMY_TIME}{tz}")
    } else {
        format!("{shifted_date}{rest}{tz}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifter(strategy: DateShiftStrategy, fixed_offset_days: i64) -> DateShifter {
        DateShifter::new(DateShiftConfig {
            strategy,
            fixed_offset_days,
            ..Default::default()
        })
    }

    #[test]
    fn fixed_offset_shifts_date() {
        let s = shifter(DateShiftStrategy::Fixed, -100);
        let (value, changed) = s.shift_date("20240115", "PAT1");
        assert!(changed);
        assert_eq!(value, "20231007");
    }

    #[test]
    fn remove_time_zeroes_time_and_shifts_date() {
        let s = shifter(DateShiftStrategy::RemoveTime, -100);
        assert_eq!(s.shift_date("20240116", "PAT1").0, "20231008");
        assert_eq!(s.shift_time("143015.000000", "PAT1").0, "000000.000000");
    }

    #[test]
    fn scenario_s4_date_shift_remove_time() {
        let s = shifter(DateShiftStrategy::RemoveTime, -100);
        assert_eq!(s.shift_date("20240115", "PAT1").0, "20231007");
        assert_eq!(s.shift_time("143015.000000", "PAT1").0, "000000.000000");
        assert_eq!(s.shift_date("20240116", "PAT1").0, "20231008");
    }

    #[test]
    fn random_per_subject_is_stable_for_fixed_seed() {
        let s = DateShifter::new(DateShiftConfig {
            strategy: DateShiftStrategy::RandomPerSubject,
            seed: 42,
            min_offset_days: -30,
            max_offset_days: 30,
            ..Default::default()
        });
        let first = s.shift_date("20240101", "PAT1").0;
        let second = s.shift_date("20240101", "PAT1").0;
        assert_eq!(first, second);

        let other_process = DateShifter::new(DateShiftConfig {
            strategy: DateShiftStrategy::RandomPerSubject,
            seed: 42,
            min_offset_days: -30,
            max_offset_days: 30,
            ..Default::default()
        });
        assert_eq!(other_process.shift_date("20240101", "PAT1").0, first);
    }

    #[test]
    fn malformed_component_left_as_is_while_siblings_shift() {
        let s = shifter(DateShiftStrategy::Fixed, 1);
        let (value, changed) = s.shift_date("20240101\\bogus", "PAT1");
        assert!(changed);
        assert_eq!(value, "20240102\\bogus");
    }

    #[test]
    fn date_time_preserves_timezone_suffix() {
        let s = shifter(DateShiftStrategy::Fixed, 1);
        let (value, _) = s.shift_date_time("20240101120000.000000+0100", "PAT1");
        assert_eq!(value, "20240102120000.000000+0100");
    }

    #[test]
    fn none_strategy_never_changes_values() {
        let s = shifter(DateShiftStrategy::None, -100);
        assert_eq!(s.shift_date("20240101", "PAT1"), ("20240101".to_string(), false));
    }
}
