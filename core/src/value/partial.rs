//! Partial-precision date, time and date-time values.
//!
//! DICOM permits DA/TM/DT values to omit trailing components (a date may
//! give only a year, a time may give only hours and minutes). These types
//! retain that precision instead of eagerly assuming the earliest or latest
//! possible instant.

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use std::fmt;

/// A calendar date with possibly-missing day and/or month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DicomDate {
    /// year only
    Year(u16),
    /// year and month
    Month(u16, u8),
    /// year, month and day
    Day(u16, u8, u8),
}

impl DicomDate {
    /// The year component.
    pub fn year(self) -> u16 {
        match self {
            DicomDate::Year(y) | DicomDate::Month(y, _) | DicomDate::Day(y, _, _) => y,
        }
    }

    /// Whether this value names a full calendar date (year, month and day).
    pub fn is_precise(self) -> bool {
        matches!(self, DicomDate::Day(..))
    }

    /// The earliest calendar date consistent with this partial value.
    pub fn to_naive_date_lower(self) -> Option<NaiveDate> {
        match self {
            DicomDate::Year(y) => NaiveDate::from_ymd_opt(y as i32, 1, 1),
            DicomDate::Month(y, m) => NaiveDate::from_ymd_opt(y as i32, m as u32, 1),
            DicomDate::Day(y, m, d) => NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32),
        }
    }

    /// The latest calendar date consistent with this partial value.
    pub fn to_naive_date_upper(self) -> Option<NaiveDate> {
        match self {
            DicomDate::Day(..) => self.to_naive_date_lower(),
            DicomDate::Month(y, m) => {
                let next = if m == 12 {
                    NaiveDate::from_ymd_opt(y as i32 + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(y as i32, m as u32 + 1, 1)
                }?;
                next.pred_opt()
            }
            DicomDate::Year(y) => NaiveDate::from_ymd_opt(y as i32, 12, 31),
        }
    }

    /// Parse a `DA` value: `YYYY`, `YYYYMM` or `YYYYMMDD`.
    pub fn parse(text: &str) -> crate::error::Result<Self> {
        let text = text.trim();
        let digits = |s: &str| -> crate::error::Result<i64> {
            s.parse::<i64>()
                .map_err(|_| crate::error::InvalidValueReadError::ParseDateTime {
                    got: -1,
                    expected: "numeric date component",
                })
                .map_err(Into::into)
        };
        match text.len() {
            4 => Ok(DicomDate::Year(digits(text)? as u16)),
            6 => Ok(DicomDate::Month(
                digits(&text[0..4])? as u16,
                digits(&text[4..6])? as u8,
            )),
            8 => Ok(DicomDate::Day(
                digits(&text[0..4])? as u16,
                digits(&text[4..6])? as u8,
                digits(&text[6..8])? as u8,
            )),
            _ => Err(crate::error::InvalidValueReadError::ParseDateTime {
                got: text.len() as i64,
                expected: "YYYY, YYYYMM or YYYYMMDD",
            }
            .into()),
        }
    }
}

impl fmt::Display for DicomDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DicomDate::Year(y) => write!(f, "{y:04}"),
            DicomDate::Month(y, m) => write!(f, "{y:04}{m:02}"),
            DicomDate::Day(y, m, d) => write!(f, "{y:04}{m:02}{d:02}"),
        }
    }
}

/// A time of day with possibly-missing minute, second and/or fraction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum DicomTime {
    /// hour only
    Hour(u8),
    /// hour and minute
    Minute(u8, u8),
    /// hour, minute and second
    Second(u8, u8, u8),
    /// hour, minute, second and fractional second (as a numerator over
    /// `10^precision`)
    Fraction(u8, u8, u8, u32, u8),
}

impl DicomTime {
    /// The hour component.
    pub fn hour(self) -> u8 {
        match self {
            DicomTime::Hour(h)
            | DicomTime::Minute(h, _)
            | DicomTime::Second(h, _, _)
            | DicomTime::Fraction(h, _, _, _, _) => h,
        }
    }

    /// The earliest time of day consistent with this partial value.
    pub fn to_naive_time_lower(self) -> Option<NaiveTime> {
        match self {
            DicomTime::Hour(h) => NaiveTime::from_hms_opt(h as u32, 0, 0),
            DicomTime::Minute(h, m) => NaiveTime::from_hms_opt(h as u32, m as u32, 0),
            DicomTime::Second(h, m, s) => NaiveTime::from_hms_opt(h as u32, m as u32, s as u32),
            DicomTime::Fraction(h, m, s, frac, precision) => {
                let nanos = (frac as u64) * 10u64.pow(9 - precision as u32);
                NaiveTime::from_hms_nano_opt(h as u32, m as u32, s as u32, nanos as u32)
            }
        }
    }

    /// Parse a `TM` value: `HH`, `HHMM`, `HHMMSS` or `HHMMSS.FFFFFF`.
    pub fn parse(text: &str) -> crate::error::Result<Self> {
        let text = text.trim();
        let two = |s: &str| -> crate::error::Result<u8> {
            s.parse::<u8>()
                .map_err(|_| crate::error::InvalidValueReadError::ParseDateTime {
                    got: -1,
                    expected: "numeric time component",
                })
                .map_err(Into::into)
        };
        let (main, frac) = match text.split_once('.') {
            Some((m, f)) => (m, Some(f)),
            None => (text, None),
        };
        let base = match main.len() {
            2 => DicomTime::Hour(two(main)?),
            4 => DicomTime::Minute(two(&main[0..2])?, two(&main[2..4])?),
            6 => DicomTime::Second(two(&main[0..2])?, two(&main[2..4])?, two(&main[4..6])?),
            _ => {
                return Err(crate::error::InvalidValueReadError::ParseDateTime {
                    got: main.len() as i64,
                    expected: "HH, HHMM or HHMMSS",
                }
                .into())
            }
        };
        match (base, frac) {
            (DicomTime::Second(h, m, s), Some(f)) if !f.is_empty() => {
                let precision = f.len().min(6) as u8;
                let f = &f[..precision as usize];
                let numerator = f
                    .parse::<u32>()
                    .map_err(|_| crate::error::InvalidValueReadError::ParseDateTime {
                        got: -1,
                        expected: "fractional second digits",
                    })?;
                Ok(DicomTime::Fraction(h, m, s, numerator, precision))
            }
            (base, _) => Ok(base),
        }
    }
}

impl fmt::Display for DicomTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DicomTime::Hour(h) => write!(f, "{h:02}"),
            DicomTime::Minute(h, m) => write!(f, "{h:02}{m:02}"),
            DicomTime::Second(h, m, s) => write!(f, "{h:02}{m:02}{s:02}"),
            DicomTime::Fraction(h, m, s, frac, precision) => {
                write!(f, "{h:02}{m:02}{s:02}.{frac:0width$}", width = precision as usize)
            }
        }
    }
}

/// A combined partial date and time, with an optional UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DicomDateTime {
    /// the partial date component
    pub date: DicomDate,
    /// the partial time component, if present
    pub time: Option<DicomTime>,
    /// the UTC offset, if present
    pub offset: Option<FixedOffset>,
}

impl DicomDateTime {
    /// Build a date-time value from a date alone.
    pub fn from_date(date: DicomDate) -> Self {
        DicomDateTime {
            date,
            time: None,
            offset: None,
        }
    }

    /// Parse a `DT` value: a `DicomDate` optionally followed by a
    /// `DicomTime` and a `&ZZZZ` UTC offset suffix.
    pub fn parse(text: &str) -> crate::error::Result<Self> {
        let text = text.trim();
        let (body, offset) = match text.len() {
            n if n >= 5 && (text.as_bytes()[n - 5] == b'+' || text.as_bytes()[n - 5] == b'-') => {
                let (b, o) = text.split_at(n - 5);
                let sign = if &o[0..1] == "-" { -1 } else { 1 };
                let hours: i32 = o[1..3]
                    .parse()
                    .map_err(|_| crate::error::InvalidValueReadError::DateTimeZone)?;
                let minutes: i32 = o[3..5]
                    .parse()
                    .map_err(|_| crate::error::InvalidValueReadError::DateTimeZone)?;
                let secs = sign * (hours * 3600 + minutes * 60);
                let offset = FixedOffset::east_opt(secs)
                    .ok_or(crate::error::InvalidValueReadError::DateTimeZone)?;
                (b, Some(offset))
            }
            _ => (text, None),
        };
        let date_len = body.len().min(8);
        let date = DicomDate::parse(&body[..date_len])?;
        let time = if body.len() > date_len {
            Some(DicomTime::parse(&body[date_len..])?)
        } else {
            None
        };
        Ok(DicomDateTime { date, time, offset })
    }
}

impl fmt::Display for DicomDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(time) = self.time {
            write!(f, "{time}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, "{}", offset.to_string().replace(':', ""))?;
        }
        Ok(())
    }
}
