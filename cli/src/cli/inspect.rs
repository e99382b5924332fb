use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use subclip_core::{FrameRate, Timecode, Timestamp};

use super::{argparse, helpers};

#[derive(Parser, Debug)]
pub struct RangesOpts {
    /// The subtitle file to read
    pub subtitles: PathBuf,

    /// How to recognize a leading placeholder subtitle
    #[clap(long, value_enum, default_value_t = argparse::PlaceholderArg::HourMinute)]
    pub placeholder: argparse::PlaceholderArg,

    /// Print the ranges as JSON
    #[clap(long)]
    pub json: bool,
}

impl RangesOpts {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let ranges = app::subtitles::load_time_ranges(&self.subtitles, self.placeholder.to_app())?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&ranges)?);
            return Ok(());
        }
        for (idx, range) in ranges.iter().enumerate() {
            println!(
                "{:03}  {}  {:.3}s",
                idx + 1,
                range,
                range.duration().as_secs_f64()
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct TimecodeOpts {
    /// A subtitle timestamp, `HH:MM:SS,mmm`
    pub timestamp: String,

    #[clap(long, default_value_t = subclip_core::timecode::DEFAULT_FRAME_RATE)]
    pub frame_rate: u32,
}

impl TimecodeOpts {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let ts: Timestamp = self
            .timestamp
            .parse()
            .with_context(|| format!("`{}` is not a valid timestamp", self.timestamp))?;
        let rate = FrameRate::new(self.frame_rate)?;
        println!("{}", Timecode::from_timestamp(ts, rate));
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ShowConfig {
    #[clap(flatten)]
    pub config: argparse::AppConfigOpts,
}

impl ShowConfig {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let app = helpers::get_app(&self.config, Ok)?;
        println!("{}", serde_json::to_string_pretty(&app.config)?);
        Ok(())
    }
}
