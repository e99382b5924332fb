use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

pub const DEFAULT_FRAME_RATE: u32 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimecodeError {
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    #[error("frame {frames} does not fit in a second at {rate} fps")]
    FrameOverflow { frames: u32, rate: FrameRate },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },
}

/// Whole frames per second used when converting clock time to timecode.
///
/// EDL timecodes are only as accurate as this value: when the media was shot
/// at a different rate the frame field is approximate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FrameRate(u32);

impl FrameRate {
    pub fn new(fps: u32) -> Result<FrameRate, TimecodeError> {
        if fps == 0 {
            Err(TimecodeError::ZeroFrameRate)
        } else {
            Ok(FrameRate(fps))
        }
    }

    pub fn fps(&self) -> u32 {
        self.0
    }

    /// Frame within the current second for a millisecond remainder.
    ///
    /// `floor(millis / 1000 * fps)`, done in integers so `500ms @ 30` is
    /// exactly frame 15.
    pub fn frame_for_millis(&self, millis: u32) -> u32 {
        (u64::from(millis) * u64::from(self.0) / 1000) as u32
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(DEFAULT_FRAME_RATE)
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = TimecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        FrameRate::new(value)
    }
}

impl From<FrameRate> for u32 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-drop-frame `HH:MM:SS:FF` timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode {
    hours: u32,
    minutes: u32,
    seconds: u32,
    frames: u32,
}

impl Timecode {
    pub const ZERO: Timecode = Timecode {
        hours: 0,
        minutes: 0,
        seconds: 0,
        frames: 0,
    };

    /// Build a timecode from its fields. A frame count that would spill into
    /// the next second is rejected rather than carried.
    pub fn new(
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u32,
        rate: FrameRate,
    ) -> Result<Timecode, TimecodeError> {
        if minutes >= 60 {
            return Err(TimecodeError::OutOfRange {
                field: "minutes",
                value: minutes,
            });
        }
        if seconds >= 60 {
            return Err(TimecodeError::OutOfRange {
                field: "seconds",
                value: seconds,
            });
        }
        if frames >= rate.fps() {
            return Err(TimecodeError::FrameOverflow { frames, rate });
        }
        Ok(Timecode {
            hours,
            minutes,
            seconds,
            frames,
        })
    }

    /// Convert a subtitle timestamp. The millisecond remainder is truncated
    /// to a whole frame; this can never overflow because `millis < 1000`.
    pub fn from_timestamp(ts: Timestamp, rate: FrameRate) -> Timecode {
        Timecode {
            hours: ts.hours(),
            minutes: ts.minutes(),
            seconds: ts.seconds(),
            frames: rate.frame_for_millis(ts.millis()),
        }
    }

    pub fn from_frames(total: u64, rate: FrameRate) -> Timecode {
        let fps = u64::from(rate.fps());
        let secs = total / fps;
        Timecode {
            hours: (secs / 3600) as u32,
            minutes: (secs / 60 % 60) as u32,
            seconds: (secs % 60) as u32,
            frames: (total % fps) as u32,
        }
    }

    pub fn to_frames(&self, rate: FrameRate) -> u64 {
        let secs = u64::from(self.hours) * 3600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds);
        secs * u64::from(rate.fps()) + u64::from(self.frames)
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
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}
