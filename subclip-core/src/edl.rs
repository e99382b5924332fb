//! CMX3600 style edit decision lists.
//!
//! Only cut events on a single video track are produced. Every event uses the
//! same reel name, editors relink the reel to the extracted media on import.

use std::{fmt, io};

use serde::{Deserialize, Serialize};

use crate::{
    segment::Segment,
    timecode::{FrameRate, Timecode},
    timestamp::TimeRange,
};

pub const DEFAULT_TITLE: &str = "Extracted Segments EDL";
pub const DEFAULT_REEL: &str = "AX";

const FRAME_CODE_MODE: &str = "NON-DROP FRAME";

/// How the record (timeline) side of each event is filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    /// Record in/out repeat the source in/out, placing each clip at its
    /// original position.
    #[default]
    Source,
    /// Clips are laid end to end from `00:00:00:00`, as they would be after
    /// concatenation.
    Timeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Video,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Track::Video => "V",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Cut,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Transition::Cut => "C",
        })
    }
}

#[derive(Debug, Clone)]
pub struct EdlSettings {
    pub title: String,
    pub reel: String,
    pub frame_rate: FrameRate,
    pub record_mode: RecordMode,
}

impl Default for EdlSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            reel: DEFAULT_REEL.to_owned(),
            frame_rate: FrameRate::default(),
            record_mode: RecordMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdlEvent {
    pub number: usize,
    pub reel: String,
    pub track: Track,
    pub transition: Transition,
    pub source_in: Timecode,
    pub source_out: Timecode,
    pub record_in: Timecode,
    pub record_out: Timecode,
}

impl fmt::Display for EdlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}  {:<8} {:<5} {:<8} {} {} {} {}",
            self.number,
            self.reel,
            self.track,
            self.transition,
            self.source_in,
            self.source_out,
            self.record_in,
            self.record_out
        )
    }
}

#[derive(Debug, Clone)]
pub struct Edl {
    pub title: String,
    pub events: Vec<EdlEvent>,
}

impl Edl {
    pub fn from_ranges<'a, I>(ranges: I, settings: &EdlSettings) -> Edl
    where
        I: IntoIterator<Item = &'a TimeRange>,
    {
        let rate = settings.frame_rate;
        let mut timeline = 0u64;
        let events = ranges
            .into_iter()
            .enumerate()
            .map(|(idx, range)| {
                let source_in = Timecode::from_timestamp(range.start(), rate);
                let source_out = Timecode::from_timestamp(range.end(), rate);
                let (record_in, record_out) = match settings.record_mode {
                    RecordMode::Source => (source_in, source_out),
                    RecordMode::Timeline => {
                        let length = source_out
                            .to_frames(rate)
                            .saturating_sub(source_in.to_frames(rate));
                        let record_in = timeline;
                        timeline += length;
                        (
                            Timecode::from_frames(record_in, rate),
                            Timecode::from_frames(timeline, rate),
                        )
                    }
                };
                EdlEvent {
                    number: idx + 1,
                    reel: settings.reel.clone(),
                    track: Track::Video,
                    transition: Transition::Cut,
                    source_in,
                    source_out,
                    record_in,
                    record_out,
                }
            })
            .collect();
        Edl {
            title: settings.title.clone(),
            events,
        }
    }

    pub fn from_segments(segments: &[Segment], settings: &EdlSettings) -> Edl {
        Edl::from_ranges(segments.iter().map(|s| &s.range), settings)
    }

    pub fn write_to<W: io::Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{}", self)?;
        w.flush()
    }
}

impl fmt::Display for Edl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TITLE: {}", self.title)?;
        writeln!(f, "FCM: {}", FRAME_CODE_MODE)?;
        writeln!(f)?;
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    fn example() -> Vec<TimeRange> {
        vec![
            range("00:00:10,000", "00:00:20,000"),
            range("00:01:00,000", "00:01:15,500"),
        ]
    }

    #[test]
    fn source_mode_document() {
        let edl = Edl::from_ranges(&example(), &EdlSettings::default());
        let expected = "TITLE: Extracted Segments EDL\n\
            FCM: NON-DROP FRAME\n\
            \n\
            001  AX       V     C        00:00:10:00 00:00:20:00 00:00:10:00 00:00:20:00\n\
            002  AX       V     C        00:01:00:00 00:01:15:15 00:01:00:00 00:01:15:15\n";
        assert_eq!(edl.to_string(), expected);
    }

    #[test]
    fn second_event_ends_on_frame_fifteen() {
        let edl = Edl::from_ranges(&example(), &EdlSettings::default());
        assert_eq!(edl.events.len(), 2);
        let last = edl.events[1].to_string();
        assert!(last.ends_with(":15"), "{}", last);
        assert_eq!(edl.events[1].source_out.frames(), 15);
    }

    #[test]
    fn timeline_mode_accumulates() {
        let settings = EdlSettings {
            record_mode: RecordMode::Timeline,
            ..Default::default()
        };
        let edl = Edl::from_ranges(&example(), &settings);
        let records: Vec<_> = edl
            .events
            .iter()
            .map(|e| (e.record_in.to_string(), e.record_out.to_string()))
            .collect();
        assert_eq!(
            records,
            vec![
                ("00:00:00:00".to_owned(), "00:00:10:00".to_owned()),
                ("00:00:10:00".to_owned(), "00:00:25:15".to_owned()),
            ]
        );
        // source side is untouched
        assert_eq!(edl.events[1].source_in.to_string(), "00:01:00:00");
    }

    #[test]
    fn custom_title_reel_and_rate() {
        let settings = EdlSettings {
            title: "Cuts".to_owned(),
            reel: "001".to_owned(),
            frame_rate: FrameRate::new(24).unwrap(),
            record_mode: RecordMode::Source,
        };
        let edl = Edl::from_ranges(&example(), &settings);
        let text = edl.to_string();
        assert!(text.starts_with("TITLE: Cuts\nFCM: NON-DROP FRAME\n\n"));
        assert!(text.contains("002  001      V     C        00:01:00:00 00:01:15:12"));
    }

    #[test]
    fn segments_use_their_ranges() {
        let segments: Vec<Segment> = example()
            .into_iter()
            .enumerate()
            .map(|(idx, range)| Segment {
                index: idx + 1,
                path: crate::segment::segment_file_name(idx + 1, "mov").into(),
                range,
            })
            .collect();
        let from_segments = Edl::from_segments(&segments, &EdlSettings::default());
        let from_ranges = Edl::from_ranges(&example(), &EdlSettings::default());
        assert_eq!(from_segments.events, from_ranges.events);
    }

    #[test]
    fn empty_list_is_header_only() {
        let empty: Vec<TimeRange> = Vec::new();
        let edl = Edl::from_ranges(&empty, &EdlSettings::default());
        assert_eq!(
            edl.to_string(),
            "TITLE: Extracted Segments EDL\nFCM: NON-DROP FRAME\n\n"
        );
    }

    #[test]
    fn write_to_buffer() {
        let edl = Edl::from_ranges(&example(), &EdlSettings::default());
        let mut out = Vec::new();
        edl.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), edl.to_string());
    }
}
