use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use subclip_core::{segment_file_name, Segment, TimeRange};

use crate::ffmpeg::{run_checked, trim::FFMpegTrim, CommandRunner, FFMpegBinary, FFmpegError};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("could not create output directory {path:?}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not extract segment {index} ({range})")]
    Segment {
        index: usize,
        range: TimeRange,
        #[source]
        source: FFmpegError,
    },
    #[error(transparent)]
    Tokio(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub extension: String,
    /// How many trims may run at once; anything below 1 is treated as 1
    pub jobs: usize,
}

#[derive(Debug, Clone)]
pub struct SegmentExtractor {
    runner: Arc<dyn CommandRunner>,
    ffmpeg: FFMpegBinary,
    settings: ExtractSettings,
}

impl SegmentExtractor {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        ffmpeg: FFMpegBinary,
        settings: ExtractSettings,
    ) -> SegmentExtractor {
        SegmentExtractor {
            runner,
            ffmpeg,
            settings,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.settings.output_dir.as_path()
    }

    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.settings
            .output_dir
            .join(segment_file_name(index, &self.settings.extension))
    }

    /// Cut one segment per range, returned in the same order as `ranges`.
    ///
    /// The first failing trim ends the whole extraction: nothing after it is
    /// started, anything still running is killed, and files that were already
    /// written stay on disk.
    pub async fn extract(&self, ranges: &[TimeRange]) -> Result<Vec<Segment>, ExtractError> {
        let output_dir = self.output_dir();
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| ExtractError::OutputDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let jobs = self.settings.jobs.max(1);
        let mut pending = ranges.iter().copied().enumerate();
        let mut running = tokio::task::JoinSet::new();
        let mut done: Vec<Option<Segment>> = vec![None; ranges.len()];

        loop {
            while running.len() < jobs {
                let (idx, range) = match pending.next() {
                    Some(next) => next,
                    None => break,
                };
                let index = idx + 1;
                let path = self.segment_path(index);
                log::info!("extracting segment {}: {}", index, range);

                let cmd = FFMpegTrim::new(
                    &self.ffmpeg,
                    self.settings.source.as_os_str(),
                    range,
                    path.clone(),
                )
                .into_command();
                let runner = self.runner.clone();
                running.spawn(async move {
                    match run_checked(runner.as_ref(), cmd).await {
                        Ok(()) => Ok(Segment { index, path, range }),
                        Err(source) => Err(ExtractError::Segment {
                            index,
                            range,
                            source,
                        }),
                    }
                });
            }

            match running.join_next().await {
                Some(res) => {
                    let segment = res??;
                    log::debug!("segment {} written to {:?}", segment.index, segment.path);
                    let slot = segment.index - 1;
                    done[slot] = Some(segment);
                }
                None => break,
            }
        }

        Ok(done.into_iter().flatten().collect())
    }
}
