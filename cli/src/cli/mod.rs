use clap::Parser;

pub mod argparse;
mod helpers;
mod inspect;
mod pipeline;

pub fn get_args() -> CliOpts {
    CliOpts::parse()
}

#[derive(Parser, Debug)]
#[clap(version = clap::crate_version!(), about = "Cut subtitle-timed segments out of a video")]
pub struct CliOpts {
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

impl CliOpts {
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.subcmd {
            SubCommand::Extract(opts) => opts.run().await,
            SubCommand::Assemble(opts) => opts.run().await,
            SubCommand::Ranges(opts) => opts.run(),
            SubCommand::Timecode(opts) => opts.run(),
            SubCommand::ShowConfig(opts) => opts.run(),
        }
    }
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    /// Cut one clip per subtitle and write an EDL describing them
    Extract(pipeline::ExtractOpts),

    /// Cut one clip per subtitle and join them into a single video
    Assemble(pipeline::AssembleOpts),

    /// Print the time ranges found in a subtitle file
    Ranges(inspect::RangesOpts),

    /// Convert a subtitle timestamp to an EDL timecode
    Timecode(inspect::TimecodeOpts),

    /// Show the configuration resolved from files, environment and flags
    ShowConfig(inspect::ShowConfig),
}
