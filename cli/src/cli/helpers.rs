use anyhow::Context;
use app::{app::ConfigBuilder, SubclipApp, SubclipBuilder};

use super::argparse;

/// Layer the shared command line flags over file and environment settings.
///
/// `extra` applies the overrides only a particular subcommand knows about.
pub fn get_app(
    args: &argparse::AppConfigOpts,
    extra: impl FnOnce(ConfigBuilder) -> Result<ConfigBuilder, app::app::ConfigError>,
) -> anyhow::Result<SubclipApp> {
    SubclipBuilder::new()
        .context("could not create app builder")?
        .config_file(args.config.as_deref())
        .context("could not set config file")?
        .update(|c| {
            c.source_video(args.video.as_deref())?
                .subtitles(args.subtitles.as_deref())?
                .output_dir(args.output_dir.as_deref())?
                .extension(args.extension.as_deref())?
                .frame_rate(args.frame_rate)?
                .placeholder(args.placeholder.map(|p| p.config_value()))?
                .jobs(args.jobs)?
                .ffmpeg_override(args.ffmpeg.as_deref())
        })
        .context("could not apply command line settings")?
        .update(extra)
        .context("could not apply command line settings")?
        .build()
        .context("could not build app config")
}
