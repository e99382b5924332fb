//! Pull `start --> end` timing pairs out of SubRip subtitle text.
//!
//! Only the timing lines matter here. The parser does not try to understand
//! sequence numbers or cue text, it scans the whole body for arrows, which
//! makes it tolerant of blank-line and numbering mistakes in hand edited files.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::timestamp::{TimeRange, Timestamp, TimestampError};

static TIMING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})\s-->\s([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})",
    )
    .expect("timing pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    #[error("could not read subtitles from {path:?}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid timing in entry {entry} ({text:?})")]
    InvalidEntry {
        entry: usize,
        text: String,
        #[source]
        source: TimestampError,
    },
}

/// Which leading entry counts as an intro placeholder to be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderRule {
    /// First start has zero hours and minutes
    #[default]
    HourMinute,
    /// First start has zero hours, minutes and milliseconds
    HourMinuteMillis,
    /// Never drop anything
    Keep,
}

impl PlaceholderRule {
    pub fn is_placeholder(&self, start: Timestamp) -> bool {
        match self {
            PlaceholderRule::HourMinute => start.hours() == 0 && start.minutes() == 0,
            PlaceholderRule::HourMinuteMillis => {
                start.hours() == 0 && start.minutes() == 0 && start.millis() == 0
            }
            PlaceholderRule::Keep => false,
        }
    }
}

fn group(caps: &Captures<'_>, idx: usize) -> Result<u32, TimestampError> {
    let text = &caps[idx];
    text.parse()
        .map_err(|_| TimestampError::Malformed(text.to_owned()))
}

fn timestamp_at(caps: &Captures<'_>, first: usize) -> Result<Timestamp, TimestampError> {
    Timestamp::new(
        group(caps, first)?,
        group(caps, first + 1)?,
        group(caps, first + 2)?,
        group(caps, first + 3)?,
    )
}

/// Extract every timing pair in `content`, in the order they appear.
///
/// If the first pair starts at what `rule` considers a placeholder it is
/// dropped. An empty result is not an error here; callers decide whether
/// having nothing to cut is fatal.
pub fn parse_time_ranges(
    content: &str,
    rule: PlaceholderRule,
) -> Result<Vec<TimeRange>, TimingError> {
    let mut ranges = Vec::new();
    for (idx, caps) in TIMING_LINE.captures_iter(content).enumerate() {
        let invalid = |source| TimingError::InvalidEntry {
            entry: idx + 1,
            text: caps[0].to_owned(),
            source,
        };
        let start = timestamp_at(&caps, 1).map_err(invalid)?;
        let end = timestamp_at(&caps, 5).map_err(invalid)?;

        if idx == 0 && rule.is_placeholder(start) {
            log::debug!("dropping leading placeholder entry: {}", &caps[0]);
            continue;
        }
        ranges.push(TimeRange::new(start, end).map_err(invalid)?);
    }
    log::trace!("parsed {} time ranges", ranges.len());
    Ok(ranges)
}
