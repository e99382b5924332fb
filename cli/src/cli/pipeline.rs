use std::path::PathBuf;

use clap::Parser;

use super::{argparse, helpers};

#[derive(Parser, Debug)]
pub struct ExtractOpts {
    #[clap(flatten)]
    pub config: argparse::AppConfigOpts,

    /// Where to write the EDL
    #[clap(long)]
    pub edl: Option<PathBuf>,

    /// Title line of the EDL
    #[clap(long)]
    pub edl_title: Option<String>,

    /// How record timecodes are assigned
    #[clap(long, value_enum)]
    pub record_mode: Option<argparse::RecordModeArg>,
}

impl ExtractOpts {
    pub(crate) async fn run(&self) -> anyhow::Result<()> {
        let app = helpers::get_app(&self.config, |c| {
            c.edl_path(self.edl.as_deref())?
                .edl_title(self.edl_title.as_deref())?
                .record_mode(self.record_mode.map(|m| m.config_value()))
        })?;
        let outcome = app::pipeline::extract_with_edl(&app).await?;
        log::info!("extracted {} segments", outcome.segments.len());
        println!("EDL file created at {}", outcome.edl_path.display());
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct AssembleOpts {
    #[clap(flatten)]
    pub config: argparse::AppConfigOpts,

    /// Where to write the concat demuxer file list
    #[clap(long)]
    pub manifest: Option<PathBuf>,

    /// The merged output video
    #[clap(long)]
    pub out: Option<PathBuf>,
}

impl AssembleOpts {
    pub(crate) async fn run(&self) -> anyhow::Result<()> {
        let app = helpers::get_app(&self.config, |c| {
            c.concat_manifest(self.manifest.as_deref())?
                .final_video(self.out.as_deref())
        })?;
        let outcome = app::pipeline::extract_and_concatenate(&app).await?;
        log::info!(
            "joined {} segments using {:?}",
            outcome.segments.len(),
            outcome.manifest_path
        );
        println!("Final video created at {}", outcome.final_video.display());
        Ok(())
    }
}
