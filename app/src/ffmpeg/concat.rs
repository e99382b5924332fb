use std::{ffi::OsString, path::PathBuf};

use super::{FFMpegBinary, FFmpegArg, FFmpegCommand};

/// Join the files listed in a concat-demuxer manifest without re-encoding.
#[derive(Debug)]
pub struct FFMpegConcat {
    cmd: FFmpegCommand,
}

impl FFMpegConcat {
    pub fn new<M: Into<OsString>, O: Into<PathBuf>>(
        bin: &FFMpegBinary,
        manifest: M,
        output: O,
    ) -> FFMpegConcat {
        let output: PathBuf = output.into();
        let mut cmd = bin.build_command();

        cmd.args.push(FFmpegArg::plain("-y"));
        cmd.args.push(FFmpegArg::plain("-f"));
        cmd.args.push(FFmpegArg::plain("concat"));
        // manifest entries are absolute paths, which the demuxer only
        // accepts in unsafe mode
        cmd.args.push(FFmpegArg::plain("-safe"));
        cmd.args.push(FFmpegArg::plain("0"));
        cmd.args.push(FFmpegArg::plain("-i"));
        cmd.args.push(FFmpegArg::plain(manifest));
        cmd.args.push(FFmpegArg::plain("-c"));
        cmd.args.push(FFmpegArg::plain("copy"));
        cmd.args.push(FFmpegArg::plain(output));

        FFMpegConcat { cmd }
    }

    pub fn into_command(self) -> FFmpegCommand {
        self.cmd
    }
}
