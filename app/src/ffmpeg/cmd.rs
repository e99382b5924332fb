use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
    process::Stdio,
};

use tokio::process::Command;

struct TestArgFormat<'a>(&'a FFmpegArg);

impl<'a> std::fmt::Debug for TestArgFormat<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0.as_test())
    }
}

/// A single argument. `Replaced` shows its first value in test output and
/// passes the second to the process, which keeps scratch paths out of
/// assertions.
#[derive(Debug)]
pub(crate) enum FFmpegArg {
    Plain(OsString),
    Replaced(OsString, OsString),
}

impl FFmpegArg {
    pub(crate) fn plain<S: Into<OsString>>(s: S) -> FFmpegArg {
        FFmpegArg::Plain(s.into())
    }
    pub(crate) fn replaced<U: Into<OsString>, S: Into<OsString>>(u: U, s: S) -> FFmpegArg {
        FFmpegArg::Replaced(u.into(), s.into())
    }
    fn into_exec(self) -> OsString {
        match self {
            FFmpegArg::Plain(s) => s,
            FFmpegArg::Replaced(_, s) => s,
        }
    }
    fn as_test(&self) -> &OsStr {
        match self {
            FFmpegArg::Plain(s) => s.as_os_str(),
            FFmpegArg::Replaced(s, _) => s.as_os_str(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FFMpegBinary {
    path: Option<PathBuf>,
}

impl From<Option<PathBuf>> for FFMpegBinary {
    fn from(path: Option<PathBuf>) -> Self {
        FFMpegBinary { path }
    }
}

impl FFMpegBinary {
    pub fn new<P: Into<PathBuf>>(p: P) -> FFMpegBinary {
        FFMpegBinary {
            path: Some(p.into()),
        }
    }
    pub fn executable_path(&self) -> &std::path::Path {
        if let Some(p) = &self.path {
            p.as_path()
        } else {
            std::path::Path::new("ffmpeg")
        }
    }
    pub(crate) fn build_command(&self) -> FFmpegCommand {
        FFmpegCommand {
            bin: self.clone(),
            args: Vec::new(),
        }
    }
}

/// What we keep from a finished ffmpeg run: the exit code (`None` when it was
/// killed by a signal) and everything it printed to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub code: Option<i32>,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Low level interface over calling ffmpeg
#[derive(Debug)]
pub struct FFmpegCommand {
    pub(crate) bin: FFMpegBinary,
    pub(crate) args: Vec<FFmpegArg>,
}

pub struct TestFormat<'a>(&'a FFmpegCommand);

impl<'a> std::fmt::Debug for TestFormat<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args = self.0.args.iter().map(TestArgFormat).collect::<Vec<_>>();
        f.debug_struct("FFMpegTestFormat")
            .field("bin", &self.0.bin.executable_path())
            .field("args", &args)
            .finish()
    }
}

impl FFmpegCommand {
    pub fn test_display(&self) -> TestFormat<'_> {
        TestFormat(self)
    }

    fn spawn(self) -> Result<tokio::process::Child, std::io::Error> {
        log::trace!("spawn {:?}", &self);
        let mut st = Command::new(self.bin.executable_path());
        for arg in self.args {
            st.arg(arg.into_exec());
        }

        // no stdin so ffmpeg can not block on its interactive prompt,
        // stderr is kept for the failure report
        st.stdin(Stdio::null());
        st.stdout(Stdio::null());
        st.stderr(Stdio::piped());

        // an aborted extraction must not leave ffmpeg writing in the background
        st.kill_on_drop(true);

        st.spawn()
    }

    /// Run to completion, collecting stderr for diagnostics.
    pub async fn output(self) -> Result<CommandOutcome, std::io::Error> {
        let child = self.spawn()?;
        let out = child.wait_with_output().await?;
        let outcome = CommandOutcome {
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        log::trace!("ffmpeg complete: {:?}", out.status);
        if cfg!(feature = "ffmpeg-debug") {
            log::debug!("ffmpeg stderr:\n{}", outcome.stderr);
        }
        Ok(outcome)
    }
}
