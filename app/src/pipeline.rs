use std::{
    io,
    path::{Path, PathBuf},
};

use subclip_core::{edl::Edl, timings::TimingError, Segment, TimeRange};

use crate::{
    app::SubclipApp,
    concat::ConcatError,
    extract::ExtractError,
};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no {0} configured")]
    NotConfigured(&'static str),
    #[error("{kind} not found: {path:?}")]
    MissingInput { kind: &'static str, path: PathBuf },
    #[error("no time ranges found in {path:?}")]
    NoRanges { path: PathBuf },
    #[error("could not write EDL {path:?}")]
    EdlWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Timing(#[from] TimingError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Concat(#[from] ConcatError),
}

#[derive(Debug)]
pub struct ExtractOutcome {
    pub segments: Vec<Segment>,
    pub edl_path: PathBuf,
}

#[derive(Debug)]
pub struct AssembleOutcome {
    pub segments: Vec<Segment>,
    pub manifest_path: PathBuf,
    pub final_video: PathBuf,
}

/// The configured source video and subtitle file, both confirmed to exist.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub video: PathBuf,
    pub subtitles: PathBuf,
}

fn require_file(kind: &'static str, path: Option<&Path>) -> Result<PathBuf, PipelineError> {
    let path = path.ok_or(PipelineError::NotConfigured(kind))?;
    if !path.is_file() {
        return Err(PipelineError::MissingInput {
            kind,
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

/// Check the inputs before anything is parsed or spawned.
pub fn check_inputs(app: &SubclipApp) -> Result<Inputs, PipelineError> {
    let video = require_file("source video", app.config.source_video.as_deref())?;
    let subtitles = require_file("subtitle file", app.config.subtitles.as_deref())?;
    Ok(Inputs { video, subtitles })
}

/// Parse the subtitle timings. A file with no usable ranges is an error.
pub fn load_ranges(app: &SubclipApp, subtitles: &Path) -> Result<Vec<TimeRange>, PipelineError> {
    let ranges = crate::subtitles::load_time_ranges(subtitles, app.config.placeholder)?;
    if ranges.is_empty() {
        return Err(PipelineError::NoRanges {
            path: subtitles.to_path_buf(),
        });
    }
    log::info!("found {} time ranges in {:?}", ranges.len(), subtitles);
    Ok(ranges)
}

pub fn write_edl(app: &SubclipApp, segments: &[Segment]) -> Result<PathBuf, PipelineError> {
    let path = app.config.edl_path.clone();
    let edl = Edl::from_segments(segments, &app.config.edl_settings());
    let write = || -> io::Result<()> {
        let f = std::fs::File::create(&path)?;
        edl.write_to(io::BufWriter::new(f))
    };
    write().map_err(|source| PipelineError::EdlWrite {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote {} EDL events to {:?}", edl.events.len(), path);
    Ok(path)
}

async fn extract_segments(app: &SubclipApp) -> Result<Vec<Segment>, PipelineError> {
    let inputs = check_inputs(app)?;
    let ranges = load_ranges(app, &inputs.subtitles)?;
    let segments = app.extractor(inputs.video).extract(&ranges).await?;
    Ok(segments)
}

/// Cut every subtitle range out of the source video and describe the cuts in
/// an EDL.
pub async fn extract_with_edl(app: &SubclipApp) -> Result<ExtractOutcome, PipelineError> {
    let segments = extract_segments(app).await?;
    let edl_path = write_edl(app, &segments)?;
    Ok(ExtractOutcome { segments, edl_path })
}

/// Cut every subtitle range out of the source video and join the cuts back
/// together into one file.
pub async fn extract_and_concatenate(app: &SubclipApp) -> Result<AssembleOutcome, PipelineError> {
    let segments = extract_segments(app).await?;
    let concat = app.concatenator();
    concat.concatenate(&segments).await?;
    Ok(AssembleOutcome {
        segments,
        manifest_path: app.config.concat_manifest.clone(),
        final_video: concat.output().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::tests::{subclip_test_app, SubclipTestApp},
        ffmpeg::tests::FakeRunner,
    };

    const SRT: &str = "1\n00:00:00,000 --> 00:00:00,000\n\n\
                       2\n00:00:10,000 --> 00:00:20,000\nfirst\n\n\
                       3\n00:01:00,000 --> 00:01:15,500\nsecond\n";

    fn with_inputs(runner: FakeRunner, srt: &str) -> SubclipTestApp {
        let test_app = subclip_test_app(runner);
        std::fs::write(test_app.dir.path().join("IMG_0106.mov"), b"not really a video").unwrap();
        std::fs::write(test_app.dir.path().join("IMG_0106.srt"), srt).unwrap();
        test_app
    }

    #[tokio::test]
    async fn extract_writes_edl() {
        let test_app = with_inputs(FakeRunner::default(), SRT);
        let outcome = extract_with_edl(&test_app.app).await.unwrap();

        assert_eq!(outcome.segments.len(), 2);
        assert_eq!(test_app.runner.calls().len(), 2);
        assert!(test_app.runner.calls()[0].contains("segment_001.mov"));

        let edl = std::fs::read_to_string(&outcome.edl_path).unwrap();
        assert!(edl.starts_with("TITLE: Extracted Segments EDL\nFCM: NON-DROP FRAME\n\n"));
        let events: Vec<&str> = edl.lines().filter(|l| l.starts_with("00")).collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].starts_with("001  AX"));
        assert!(events[1].ends_with(":15"));
        assert!(events[1].contains("00:01:00:00 00:01:15:15"));
    }

    #[tokio::test]
    async fn assemble_writes_manifest_and_concats() {
        let test_app = with_inputs(FakeRunner::default(), SRT);
        let outcome = extract_and_concatenate(&test_app.app).await.unwrap();

        assert_eq!(outcome.segments.len(), 2);
        let calls = test_app.runner.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[2].contains("concat"));

        let manifest = std::fs::read_to_string(&outcome.manifest_path).unwrap();
        let lines: Vec<&str> = manifest.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("file '/"));
        assert!(lines[1].ends_with("segment_002.mov'"));
        assert_eq!(outcome.final_video, test_app.dir.path().join("final_video.mov"));
    }

    #[tokio::test]
    async fn tool_failure_aborts_before_edl() {
        let srt = "1\n00:00:10,000 --> 00:00:20,000\n\n\
                   2\n00:01:00,000 --> 00:01:15,500\n\n\
                   3\n00:02:00,000 --> 00:02:15,000\n";
        let test_app = with_inputs(FakeRunner::failing_on("segment_002"), srt);
        let err = extract_with_edl(&test_app.app).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Extract(ExtractError::Segment { index: 2, .. })
        ));
        assert_eq!(test_app.runner.calls().len(), 2);
        assert!(!test_app.dir.path().join("segments.edl").exists());
    }

    #[tokio::test]
    async fn trims_cut_the_checked_video() {
        let test_app = with_inputs(FakeRunner::default(), SRT);
        extract_with_edl(&test_app.app).await.unwrap();

        let video = test_app.dir.path().join("IMG_0106.mov");
        let video = video.display().to_string();
        let calls = test_app.runner.calls();
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert!(call.contains(&video), "{}", call);
        }
    }

    #[tokio::test]
    async fn missing_video_is_checked_first() {
        let test_app = subclip_test_app(FakeRunner::default());
        std::fs::write(test_app.dir.path().join("IMG_0106.srt"), SRT).unwrap();
        let err = extract_with_edl(&test_app.app).await.unwrap_err();
        match err {
            PipelineError::MissingInput { kind, path } => {
                assert_eq!(kind, "source video");
                assert_eq!(path, test_app.dir.path().join("IMG_0106.mov"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(test_app.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_subtitles_is_checked_first() {
        let test_app = subclip_test_app(FakeRunner::default());
        std::fs::write(test_app.dir.path().join("IMG_0106.mov"), b"").unwrap();
        let err = extract_and_concatenate(&test_app.app).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingInput {
                kind: "subtitle file",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn only_a_placeholder_is_an_error() {
        let test_app = with_inputs(
            FakeRunner::default(),
            "1\n00:00:00,000 --> 00:00:00,000\nnothing here\n",
        );
        let err = extract_with_edl(&test_app.app).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoRanges { .. }));
        assert!(test_app.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn bad_timing_is_a_parse_error() {
        let test_app = with_inputs(
            FakeRunner::default(),
            "1\n00:05:00,000 --> 00:05:10,000\nfine\n\n\
             2\n00:06:30,000 --> 00:06:10,000\nbackwards\n",
        );
        let err = extract_with_edl(&test_app.app).await.unwrap_err();
        assert!(
            matches!(
                err,
                PipelineError::Timing(TimingError::InvalidEntry { entry: 2, .. })
            ),
            "{:?}",
            err
        );
        // parsing fails before any trim is started
        assert!(test_app.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_inputs() {
        let config = crate::app::ConfigBuilder::isolated()
            .unwrap()
            .build()
            .unwrap();
        let app = SubclipApp::with_runner(config, std::sync::Arc::new(FakeRunner::default()));
        let err = extract_with_edl(&app).await.unwrap_err();
        assert!(matches!(err, PipelineError::NotConfigured("source video")));
    }
}
