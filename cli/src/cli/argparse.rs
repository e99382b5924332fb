use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlaceholderArg {
    /// Drop the first entry when it starts at 00:00
    HourMinute,
    /// Drop the first entry when it starts at 00:00:ss,000
    HourMinuteMillis,
    /// Never drop the first entry
    Keep,
}

impl PlaceholderArg {
    pub fn to_app(self) -> subclip_core::PlaceholderRule {
        match self {
            PlaceholderArg::HourMinute => subclip_core::PlaceholderRule::HourMinute,
            PlaceholderArg::HourMinuteMillis => subclip_core::PlaceholderRule::HourMinuteMillis,
            PlaceholderArg::Keep => subclip_core::PlaceholderRule::Keep,
        }
    }

    /// The name the configuration layer knows this rule by.
    pub fn config_value(self) -> &'static str {
        match self {
            PlaceholderArg::HourMinute => "hour_minute",
            PlaceholderArg::HourMinuteMillis => "hour_minute_millis",
            PlaceholderArg::Keep => "keep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordModeArg {
    /// Record timecodes repeat the source timecodes
    Source,
    /// Record timecodes follow the clips laid end to end from zero
    Timeline,
}

impl RecordModeArg {
    pub fn config_value(self) -> &'static str {
        match self {
            RecordModeArg::Source => "source",
            RecordModeArg::Timeline => "timeline",
        }
    }
}

/// Settings shared by every command that loads the full configuration.
///
/// Each flag left unset falls back to the config file, then `SUBCLIP_*`
/// environment variables, then the built-in default.
#[derive(Parser, Debug)]
pub struct AppConfigOpts {
    /// Config file to load instead of the one in the user config directory
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Source video to cut segments from
    #[clap(long)]
    pub video: Option<PathBuf>,

    /// Subtitle file providing the time ranges
    #[clap(long)]
    pub subtitles: Option<PathBuf>,

    /// Directory the numbered segments are written to
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Container extension for segment files
    #[clap(long)]
    pub extension: Option<String>,

    /// Frames per second used for EDL timecodes
    #[clap(long)]
    pub frame_rate: Option<u32>,

    /// How to recognize a leading placeholder subtitle
    #[clap(long, value_enum)]
    pub placeholder: Option<PlaceholderArg>,

    /// Number of ffmpeg processes to run at once
    #[clap(long)]
    pub jobs: Option<usize>,

    /// Path to the ffmpeg executable
    #[clap(long)]
    pub ffmpeg: Option<PathBuf>,
}
