// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick and tooltip value formatting.

use alloc::format;
use alloc::string::String;

use crate::config::FieldType;
use crate::data::{ColumnMeta, Value};
use crate::float::FloatExt as _;

/// Formats a number with magnitude-adaptive decimal places.
///
/// Integers print without decimals. Otherwise the number of decimals depends
/// on magnitude: `< 0.01` → 4, `< 0.1` → 3, `< 1` → 2, `< 100` → 1, larger →
/// 0. Trailing zeros (and a trailing point) are always trimmed.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let decimals = if v == v.round() {
        0
    } else {
        let magnitude = v.abs();
        if magnitude < 0.01 {
            4
        } else if magnitude < 0.1 {
            3
        } else if magnitude < 1.0 {
            2
        } else if magnitude < 100.0 {
            1
        } else {
            0
        }
    };
    let mut out = format!("{v:.decimals$}");
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out == "-0" {
        out.truncate(1);
        out.remove(0);
        out.push('0');
    }
    out
}

/// Tick label granularity for temporal scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    /// Hours and minutes.
    TimeOfDay,
    /// Day of month, with month names at month boundaries.
    Day,
    /// Month name, with the year at January.
    Month,
    /// Year.
    Year,
}

impl Granularity {
    /// Picks a granularity from a domain span in seconds.
    pub fn for_span(span_seconds: f64) -> Self {
        const DAY: f64 = 86_400.0;
        if span_seconds <= 2.0 * DAY {
            Self::TimeOfDay
        } else if span_seconds <= 60.0 * DAY {
            Self::Day
        } else if span_seconds <= 730.0 * DAY {
            Self::Month
        } else {
            Self::Year
        }
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A civil date plus time of day, derived from a Unix timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CivilDateTime {
    /// Calendar year.
    pub year: i64,
    /// Month, 1–12.
    pub month: u32,
    /// Day of month, 1–31.
    pub day: u32,
    /// Hour, 0–23.
    pub hour: u32,
    /// Minute, 0–59.
    pub minute: u32,
}

impl CivilDateTime {
    /// Converts seconds since the Unix epoch (UTC) to a civil date and time.
    pub fn from_timestamp(seconds: f64) -> Self {
        let total = seconds.floor() as i64;
        let days = total.div_euclid(86_400);
        let secs_of_day = total.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (secs_of_day / 3600) as u32,
            minute: (secs_of_day % 3600 / 60) as u32,
        }
    }
}

/// Days-since-epoch to (year, month, day) for the proleptic Gregorian
/// calendar.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// Formats a timestamp tick at the given granularity.
///
/// Day granularity labels month boundaries with the month name instead of
/// the day number, so month starts stand out along the axis.
pub fn format_time(seconds: f64, granularity: Granularity) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let dt = CivilDateTime::from_timestamp(seconds);
    match granularity {
        Granularity::TimeOfDay => format!("{:02}:{:02}", dt.hour, dt.minute),
        Granularity::Day => {
            if dt.day == 1 {
                String::from(MONTHS[(dt.month - 1) as usize])
            } else {
                format!("{}", dt.day)
            }
        }
        Granularity::Month => {
            if dt.month == 1 {
                format!("{} {}", MONTHS[0], dt.year)
            } else {
                String::from(MONTHS[(dt.month - 1) as usize])
            }
        }
        Granularity::Year => format!("{}", dt.year),
    }
}

/// Formats a timestamp as a full date, used by tooltips.
pub fn format_date(seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let dt = CivilDateTime::from_timestamp(seconds);
    format!("{:04}-{:02}-{:02}", dt.year, dt.month, dt.day)
}

/// Formats a value for display, deferring to column metadata when present.
pub fn format_value(value: &Value, meta: Option<&ColumnMeta>) -> String {
    match (value, meta) {
        (Value::Number(v), Some(meta)) if meta.field_type == FieldType::Temporal => {
            format_date(*v)
        }
        (Value::Number(v), Some(meta)) => match &meta.unit {
            Some(unit) => format!("{} {unit}", format_number(*v)),
            None => format_number(*v),
        },
        (Value::Number(v), None) => format_number(*v),
        (Value::Timestamp(v), _) => format_date(*v),
        (Value::Text(_) | Value::Bool(_) | Value::Null, _) => value.category(),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn adaptive_decimals() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.0049), "0.0049");
        assert_eq!(format_number(123.456), "123");
        assert_eq!(format_number(0.05), "0.05");
        assert_eq!(format_number(12.34), "12.3");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn civil_dates_round_trip_known_values() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
        // 2000-02-29 is day 11_016.
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        let dt = CivilDateTime::from_timestamp(951_826_020.0);
        assert_eq!((dt.year, dt.month, dt.day), (2000, 2, 29));
        assert_eq!((dt.hour, dt.minute), (12, 7));
    }

    #[test]
    fn granularity_tracks_domain_span() {
        assert_eq!(Granularity::for_span(3_600.0), Granularity::TimeOfDay);
        assert_eq!(Granularity::for_span(86_400.0 * 10.0), Granularity::Day);
        assert_eq!(Granularity::for_span(86_400.0 * 200.0), Granularity::Month);
        assert_eq!(Granularity::for_span(86_400.0 * 4_000.0), Granularity::Year);
    }

    #[test]
    fn day_ticks_mark_month_boundaries() {
        // 2021-03-01 and 2021-03-02.
        let march_first = 1_614_556_800.0;
        assert_eq!(format_time(march_first, Granularity::Day), "Mar");
        assert_eq!(format_time(march_first + 86_400.0, Granularity::Day), "2");
    }

    #[test]
    fn metadata_overrides_generic_formatting() {
        let meta = ColumnMeta {
            field: "lat".to_string(),
            field_type: FieldType::Quantitative,
            unit: Some("ms".to_string()),
        };
        assert_eq!(format_value(&Value::Number(12.0), Some(&meta)), "12 ms");
        assert_eq!(format_value(&Value::from("east"), Some(&meta)), "east");
    }
}
