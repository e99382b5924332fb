use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

const MAX_HOURS: u32 = 24;
const MAX_MINUTES: u32 = 60;
const MAX_SECONDS: u32 = 60;
const MAX_MILLIS: u32 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },
    #[error("malformed timestamp: {0:?}")]
    Malformed(String),
    #[error("range start {start} is not before end {end}")]
    EmptyRange { start: Timestamp, end: Timestamp },
}

/// A time of day with millisecond precision, as found in subtitle timings.
///
/// Field order matters: the derived ordering compares hours, then minutes,
/// seconds and millis, which is chronological because every field is range
/// checked on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    hours: u32,
    minutes: u32,
    seconds: u32,
    millis: u32,
}

fn check(field: &'static str, value: u32, max: u32) -> Result<u32, TimestampError> {
    if value < max {
        Ok(value)
    } else {
        Err(TimestampError::OutOfRange { field, value })
    }
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp {
        hours: 0,
        minutes: 0,
        seconds: 0,
        millis: 0,
    };

    pub fn new(
        hours: u32,
        minutes: u32,
        seconds: u32,
        millis: u32,
    ) -> Result<Timestamp, TimestampError> {
        Ok(Timestamp {
            hours: check("hours", hours, MAX_HOURS)?,
            minutes: check("minutes", minutes, MAX_MINUTES)?,
            seconds: check("seconds", seconds, MAX_SECONDS)?,
            millis: check("milliseconds", millis, MAX_MILLIS)?,
        })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
    pub fn seconds(&self) -> u32 {
        self.seconds
    }
    pub fn millis(&self) -> u32 {
        self.millis
    }

    /// Whole seconds since midnight, ignoring the millisecond remainder
    pub fn whole_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.whole_seconds()) + Duration::from_millis(u64::from(self.millis))
    }
}

/// Formats as `HH:MM:SS.mmm`, the form ffmpeg accepts for `-ss`/`-to`.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Accepts `HH:MM:SS,mmm` (subtitle form) or `HH:MM:SS.mmm`.
impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimestampError::Malformed(s.to_owned());
        let (hms, millis) = s.split_once([',', '.']).ok_or_else(malformed)?;
        let mut parts = hms.split(':');
        let mut next = || -> Result<u32, TimestampError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(malformed)
        };
        let (hours, minutes, seconds) = (next()?, next()?, next()?);
        if parts.next().is_some() || millis.len() != 3 {
            return Err(malformed());
        }
        let millis = millis.parse().map_err(|_| malformed())?;
        Timestamp::new(hours, minutes, seconds, millis)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A `[start, end)` window in the source media. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<TimeRange, TimestampError> {
        if start < end {
            Ok(TimeRange { start, end })
        } else {
            Err(TimestampError::EmptyRange { start, end })
        }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end.as_duration() - self.start.as_duration()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32, s: u32, ms: u32) -> Timestamp {
        Timestamp::new(h, m, s, ms).unwrap()
    }

    #[test]
    fn display_uses_ffmpeg_form() {
        assert_eq!(ts(0, 1, 2, 500).to_string(), "00:01:02.500");
        assert_eq!(ts(23, 59, 59, 9).to_string(), "23:59:59.009");
    }

    #[test]
    fn parse_subtitle_and_dotted_forms() {
        assert_eq!("00:01:02,500".parse::<Timestamp>().unwrap(), ts(0, 1, 2, 500));
        assert_eq!("01:00:00.042".parse::<Timestamp>().unwrap(), ts(1, 0, 0, 42));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "00:00:00", "00:00,000", "00:00:00:00,000", "aa:00:00,000", "00:00:00,5"] {
            assert!(
                matches!(bad.parse::<Timestamp>(), Err(TimestampError::Malformed(_))),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn fields_are_range_checked() {
        assert_eq!(
            Timestamp::new(0, 60, 0, 0),
            Err(TimestampError::OutOfRange {
                field: "minutes",
                value: 60
            })
        );
        assert!(Timestamp::new(24, 0, 0, 0).is_err());
        assert!(Timestamp::new(0, 0, 60, 0).is_err());
        assert!(Timestamp::new(0, 0, 0, 1000).is_err());
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(ts(0, 0, 59, 999) < ts(0, 1, 0, 0));
        assert!(ts(1, 0, 0, 0) > ts(0, 59, 59, 999));
        assert!(Timestamp::ZERO < ts(0, 0, 0, 1));
    }

    #[test]
    fn range_requires_start_before_end() {
        let r = TimeRange::new(ts(0, 1, 0, 0), ts(0, 1, 15, 500)).unwrap();
        assert_eq!(r.duration(), Duration::from_millis(15_500));
        assert!(TimeRange::new(ts(0, 1, 0, 0), ts(0, 1, 0, 0)).is_err());
        assert!(TimeRange::new(ts(0, 2, 0, 0), ts(0, 1, 0, 0)).is_err());
    }

    #[test]
    fn serializes_as_string() {
        let r = TimeRange::new(ts(0, 0, 10, 0), ts(0, 0, 20, 0)).unwrap();
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"start":"00:00:10.000","end":"00:00:20.000"}"#
        );
        let back: Timestamp = serde_json::from_str(r#""00:00:10,000""#).unwrap();
        assert_eq!(back, ts(0, 0, 10, 0));
    }
}
