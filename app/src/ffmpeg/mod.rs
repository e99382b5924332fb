mod cmd;
pub mod concat;
pub mod trim;

pub use cmd::{CommandOutcome, FFMpegBinary, FFmpegCommand, TestFormat};
use cmd::FFmpegArg;

#[derive(Debug, thiserror::Error)]
pub enum FFmpegError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("ffmpeg exited with status {}:\n{}", display_code(.code), .stderr.trim_end())]
    Exit { code: Option<i32>, stderr: String },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "<killed by signal>".to_owned(),
    }
}

/// Seam between building an ffmpeg invocation and executing it.
#[async_trait::async_trait]
pub trait CommandRunner: std::fmt::Debug + Send + Sync {
    async fn run(&self, cmd: FFmpegCommand) -> Result<CommandOutcome, std::io::Error>;
}

/// Runs commands as real child processes, no shell involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, cmd: FFmpegCommand) -> Result<CommandOutcome, std::io::Error> {
        cmd.output().await
    }
}

/// Run `cmd`, turning a non-zero exit into an error carrying ffmpeg's stderr.
pub async fn run_checked(
    runner: &dyn CommandRunner,
    cmd: FFmpegCommand,
) -> Result<(), FFmpegError> {
    let outcome = runner.run(cmd).await?;
    if outcome.success() {
        Ok(())
    } else {
        Err(FFmpegError::Exit {
            code: outcome.code,
            stderr: outcome.stderr,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records every command it is handed and fails the ones whose rendered
    /// arguments contain `fail_on`.
    #[derive(Debug, Default)]
    pub(crate) struct FakeRunner {
        pub(crate) fail_on: Option<String>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl FakeRunner {
        pub(crate) fn failing_on<S: Into<String>>(needle: S) -> FakeRunner {
            FakeRunner {
                fail_on: Some(needle.into()),
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, cmd: FFmpegCommand) -> Result<CommandOutcome, std::io::Error> {
            let rendered = format!("{:?}", cmd.test_display());
            let fail = self
                .fail_on
                .as_deref()
                .map(|needle| rendered.contains(needle))
                .unwrap_or(false);
            self.calls.lock().unwrap().push(rendered);
            Ok(if fail {
                CommandOutcome {
                    code: Some(1),
                    stderr: "Invalid data found when processing input\n".to_owned(),
                }
            } else {
                CommandOutcome {
                    code: Some(0),
                    stderr: String::new(),
                }
            })
        }
    }

    #[tokio::test]
    async fn checked_run_passes_success() {
        let runner = FakeRunner::default();
        let cmd = FFMpegBinary::default().build_command();
        run_checked(&runner, cmd).await.unwrap();
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn checked_run_relays_stderr() {
        let runner = FakeRunner::failing_on("ffmpeg");
        let cmd = FFMpegBinary::default().build_command();
        let err = run_checked(&runner, cmd).await.unwrap_err();
        assert!(matches!(err, FFmpegError::Exit { code: Some(1), .. }));
        assert_eq!(
            err.to_string(),
            "ffmpeg exited with status 1:\nInvalid data found when processing input"
        );
    }
}
