//! Value normalization helpers
//!
//! Timestamp parsing, label formatting, and frequency normalization used by
//! SDK callers when preparing samples for upload.

use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, TimeZone};
use std::str::FromStr;

use crate::error::{Result, TabwatchError};

/// Timestamp input accepted by [`parse_timestamp`]
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampValue {
    /// Seconds since the Unix epoch
    Epoch(i64),
    /// Timezone-aware instant, passed through unchanged
    Instant(DateTime<FixedOffset>),
    /// Timezone-naive instant, interpreted as local time
    Naive(NaiveDateTime),
    /// RFC 3339 string
    Text(String),
}

/// Parse a timestamp into a timezone-aware instant.
///
/// Integer epochs and naive instants are interpreted in the local timezone;
/// a wall-clock time repeated by a DST fold resolves to the earlier offset.
/// Strings must be RFC 3339; anything else fails with
/// [`TabwatchError::InvalidTimestamp`].
pub fn parse_timestamp(value: TimestampValue) -> Result<DateTime<FixedOffset>> {
    match value {
        TimestampValue::Epoch(seconds) => Local
            .timestamp_opt(seconds, 0)
            .single()
            .map(|dt| dt.fixed_offset())
            .ok_or_else(|| {
                TabwatchError::InvalidTimestamp(format!("epoch out of range: {seconds}"))
            }),
        TimestampValue::Instant(instant) => Ok(instant),
        TimestampValue::Naive(naive) => {
            earliest_local(Local.from_local_datetime(&naive))
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| {
                    TabwatchError::InvalidTimestamp(format!("invalid local time: {naive}"))
                })
        }
        TimestampValue::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map_err(|_| TabwatchError::InvalidTimestamp(text)),
    }
}

/// A wall-clock time skipped by a DST gap has no instant; one repeated by a
/// DST fold has two, and the earlier offset wins
fn earliest_local<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Tz>> {
    match result {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// A classification label value
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Convert a label to its canonical string form.
///
/// Missing and NaN labels become `None`. Integral floats render without a
/// decimal point, so `3.0` and `3` format identically.
pub fn format_label(label: Option<Label>) -> Option<String> {
    match label? {
        Label::Int(value) => Some(value.to_string()),
        Label::Float(value) => {
            if value.is_nan() {
                None
            } else if value.fract() == 0.0 && value.is_finite() {
                // exact for magnitudes beyond the i64 range
                if value == 0.0 {
                    Some("0".to_string())
                } else {
                    Some(format!("{value:.0}"))
                }
            } else {
                Some(value.to_string())
            }
        }
        Label::Text(value) => Some(value),
    }
}

/// Monitoring window frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Hour,
    Day,
    Week,
    Month,
}

impl Frequency {
    /// Canonical uppercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Hour => "HOUR",
            Frequency::Day => "DAY",
            Frequency::Week => "WEEK",
            Frequency::Month => "MONTH",
        }
    }

    /// Map a window length in seconds to a frequency
    pub fn from_seconds(seconds: i64) -> Result<Self> {
        match seconds {
            3_600 => Ok(Frequency::Hour),
            86_400 => Ok(Frequency::Day),
            604_800 => Ok(Frequency::Week),
            2_592_000 => Ok(Frequency::Month),
            other => Err(TabwatchError::UnsupportedFrequency(other.to_string())),
        }
    }
}

impl FromStr for Frequency {
    type Err = TabwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(Frequency::Hour),
            "day" => Ok(Frequency::Day),
            "week" => Ok(Frequency::Week),
            "month" => Ok(Frequency::Month),
            other => Err(TabwatchError::UnsupportedFrequency(other.to_string())),
        }
    }
}

/// Frequency input accepted by [`normalize_frequency`]
#[derive(Debug, Clone, PartialEq)]
pub enum FrequencyValue<'a> {
    Seconds(i64),
    Name(&'a str),
}

/// Normalize a frequency literal to its canonical uppercase tag
pub fn normalize_frequency(value: FrequencyValue<'_>) -> Result<&'static str> {
    let frequency = match value {
        FrequencyValue::Seconds(seconds) => Frequency::from_seconds(seconds)?,
        FrequencyValue::Name(name) => name.parse()?,
    };
    Ok(frequency.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_epoch() {
        let parsed = parse_timestamp(TimestampValue::Epoch(0)).unwrap();
        assert_eq!(parsed.timestamp(), 0);
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed =
            parse_timestamp(TimestampValue::Text("2024-05-01T12:30:00+02:00".to_string()))
                .unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_parse_naive_keeps_wall_clock() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let parsed = parse_timestamp(TimestampValue::Naive(naive)).unwrap();
        assert_eq!(parsed.naive_local(), naive);
    }

    #[test]
    fn test_dst_fold_resolves_to_earlier_offset() {
        let naive = NaiveDate::from_ymd_opt(2024, 10, 27)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let earlier = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .from_local_datetime(&naive)
            .unwrap();
        let later = FixedOffset::east_opt(3600)
            .unwrap()
            .from_local_datetime(&naive)
            .unwrap();

        let folded = LocalResult::Ambiguous(earlier, later);
        assert_eq!(earliest_local(folded), Some(earlier));

        let gap: LocalResult<DateTime<FixedOffset>> = LocalResult::None;
        assert_eq!(earliest_local(gap), None);
    }

    #[test]
    fn test_parse_rejects_non_rfc3339() {
        let err = parse_timestamp(TimestampValue::Text("01/05/2024".to_string())).unwrap_err();
        assert!(matches!(err, TabwatchError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_format_label_integral_float() {
        assert_eq!(format_label(Some(Label::Float(3.0))), Some("3".to_string()));
        assert_eq!(format_label(Some(Label::Int(7))), Some("7".to_string()));
    }

    #[test]
    fn test_format_label_huge_integral_float() {
        assert_eq!(
            format_label(Some(Label::Float(1e20))),
            Some("100000000000000000000".to_string())
        );
        assert_eq!(
            format_label(Some(Label::Float(-1e20))),
            Some("-100000000000000000000".to_string())
        );
    }

    #[test]
    fn test_format_label_zero() {
        assert_eq!(format_label(Some(Label::Float(0.0))), Some("0".to_string()));
        assert_eq!(
            format_label(Some(Label::Float(-0.0))),
            Some("0".to_string())
        );
    }

    #[test]
    fn test_format_label_fractional_float() {
        assert_eq!(
            format_label(Some(Label::Float(2.5))),
            Some("2.5".to_string())
        );
    }

    #[test]
    fn test_format_label_missing() {
        assert_eq!(format_label(None), None);
        assert_eq!(format_label(Some(Label::Float(f64::NAN))), None);
    }

    #[test]
    fn test_format_label_text() {
        assert_eq!(
            format_label(Some(Label::Text("cat".to_string()))),
            Some("cat".to_string())
        );
    }

    #[test]
    fn test_normalize_frequency_seconds() {
        assert_eq!(
            normalize_frequency(FrequencyValue::Seconds(86_400)).unwrap(),
            "DAY"
        );
        assert_eq!(
            normalize_frequency(FrequencyValue::Seconds(3_600)).unwrap(),
            "HOUR"
        );
        assert!(normalize_frequency(FrequencyValue::Seconds(42)).is_err());
    }

    #[test]
    fn test_normalize_frequency_names() {
        assert_eq!(
            normalize_frequency(FrequencyValue::Name("week")).unwrap(),
            "WEEK"
        );
        assert_eq!(
            normalize_frequency(FrequencyValue::Name("Month")).unwrap(),
            "MONTH"
        );
        assert!(normalize_frequency(FrequencyValue::Name("year")).is_err());
    }
}
