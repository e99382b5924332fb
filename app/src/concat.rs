use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use subclip_core::Segment;

use crate::ffmpeg::{concat::FFMpegConcat, run_checked, CommandRunner, FFMpegBinary, FFmpegError};

#[derive(Debug, thiserror::Error)]
pub enum ConcatError {
    #[error("could not resolve segment paths against the working directory")]
    CurrentDir(#[source] io::Error),
    #[error("could not write concat manifest {path:?}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not concatenate segments into {path:?}")]
    FFMpeg {
        path: PathBuf,
        #[source]
        source: FFmpegError,
    },
}

/// Quote a path for a concat-demuxer `file` directive.
///
/// Single quotes can not be escaped inside a quoted string, so each one
/// closes the string, adds an escaped quote, and reopens it: `'\''`.
pub fn quote_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("'{}'", raw.replace('\'', r"'\''"))
}

/// The ordered list of files handed to ffmpeg's concat demuxer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    /// Relative entries are joined onto `base`. The demuxer resolves relative
    /// entries against the manifest's own directory, not ours.
    pub fn with_base<I, P>(base: &Path, paths: I) -> ConcatManifest
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let entries = paths
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    base.join(p)
                }
            })
            .collect();
        ConcatManifest { entries }
    }

    pub fn for_segments(segments: &[Segment]) -> Result<ConcatManifest, ConcatError> {
        let cwd = std::env::current_dir().map_err(ConcatError::CurrentDir)?;
        Ok(ConcatManifest::with_base(
            &cwd,
            segments.iter().map(|s| s.path()),
        ))
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(w, "file {}", quote_path(entry))?;
        }
        w.flush()
    }

    pub fn write(&self, path: &Path) -> Result<(), ConcatError> {
        let manifest_err = |source| ConcatError::Manifest {
            path: path.to_path_buf(),
            source,
        };
        let f = std::fs::File::create(path).map_err(manifest_err)?;
        self.write_to(io::BufWriter::new(f)).map_err(manifest_err)?;
        log::info!("created concatenation list at {:?}", path);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Concatenator {
    runner: Arc<dyn CommandRunner>,
    ffmpeg: FFMpegBinary,
    manifest: PathBuf,
    output: PathBuf,
}

impl Concatenator {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        ffmpeg: FFMpegBinary,
        manifest: PathBuf,
        output: PathBuf,
    ) -> Concatenator {
        Concatenator {
            runner,
            ffmpeg,
            manifest,
            output,
        }
    }

    pub fn output(&self) -> &Path {
        self.output.as_path()
    }

    /// Write the manifest for `segments` and merge them into the output file.
    pub async fn concatenate(&self, segments: &[Segment]) -> Result<(), ConcatError> {
        ConcatManifest::for_segments(segments)?.write(&self.manifest)?;

        log::info!("concatenating {} segments into {:?}", segments.len(), self.output);
        let cmd = FFMpegConcat::new(
            &self.ffmpeg,
            self.manifest.as_os_str(),
            self.output.as_path(),
        )
        .into_command();
        run_checked(self.runner.as_ref(), cmd)
            .await
            .map_err(|source| ConcatError::FFMpeg {
                path: self.output.clone(),
                source,
            })
    }
}
