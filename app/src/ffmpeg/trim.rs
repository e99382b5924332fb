use std::{ffi::OsString, path::PathBuf};

use subclip_core::TimeRange;

use super::{FFMpegBinary, FFmpegArg, FFmpegCommand};

/// A stream-copy cut of `[start, end]` out of one source file.
///
/// Nothing is re-encoded, so ffmpeg snaps the cut to the nearest keyframe and
/// the clip boundaries are only as exact as the source's GOP structure.
#[derive(Debug)]
pub struct FFMpegTrim {
    cmd: FFmpegCommand,
}

impl FFMpegTrim {
    pub fn new<P: Into<OsString>, O: Into<PathBuf>>(
        bin: &FFMpegBinary,
        src: P,
        range: TimeRange,
        output: O,
    ) -> FFMpegTrim {
        let output: PathBuf = output.into();
        let mut cmd = bin.build_command();

        cmd.args.push(FFmpegArg::plain("-y"));
        cmd.args.push(FFmpegArg::plain("-i"));
        cmd.args.push(FFmpegArg::plain(src));
        cmd.args.push(FFmpegArg::plain("-ss"));
        cmd.args.push(FFmpegArg::plain(range.start().to_string()));
        cmd.args.push(FFmpegArg::plain("-to"));
        cmd.args.push(FFmpegArg::plain(range.end().to_string()));
        cmd.args.push(FFmpegArg::plain("-c"));
        cmd.args.push(FFmpegArg::plain("copy"));

        let display_name = output
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| output.clone().into_os_string());
        cmd.args.push(FFmpegArg::replaced(display_name, output));

        FFMpegTrim { cmd }
    }

    pub fn into_command(self) -> FFmpegCommand {
        self.cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    #[test]
    fn ffmpeg_trim_command() {
        let trim = FFMpegTrim::new(
            &FFMpegBinary::default(),
            "IMG_0106.mov",
            range("00:01:00,000", "00:01:15,500"),
            "/tmp/out/segments/segment_002.mov",
        );
        let actual = format!("{:?}", trim.cmd.test_display());
        assert_eq!(
            actual,
            r##"FFMpegTestFormat { bin: "ffmpeg", args: ["-y", "-i", "IMG_0106.mov", "-ss", "00:01:00.000", "-to", "00:01:15.500", "-c", "copy", "segment_002.mov"] }"##,
        )
    }

    #[test]
    fn custom_binary_and_awkward_names() {
        let trim = FFMpegTrim::new(
            &FFMpegBinary::new("/usr/local/bin/ffmpeg"),
            "my video; rm -rf.mov",
            range("01:00:00,001", "01:00:01,000"),
            "segment_001.mkv",
        );
        let actual = format!("{:?}", trim.into_command().test_display());
        assert_eq!(
            actual,
            r##"FFMpegTestFormat { bin: "/usr/local/bin/ffmpeg", args: ["-y", "-i", "my video; rm -rf.mov", "-ss", "01:00:00.001", "-to", "01:00:01.000", "-c", "copy", "segment_001.mkv"] }"##,
        )
    }
}
