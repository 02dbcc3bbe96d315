use std::{io::ErrorKind, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{process::Command, time};
use tracing::debug;

use super::error::CommandError;

/// Captured result of one external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// Raw stdout bytes
    pub stdout: Vec<u8>,
    /// Raw stderr bytes
    pub stderr: Vec<u8>,
    /// Process exit code
    pub exit_code: i32,
}

impl RawOutput {
    /// Wraps stdout text as a successful invocation result.
    ///
    /// Intended for tests and stub runners that script process output.
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
            exit_code: 0,
        }
    }
}

/// Runs external commands and captures their output.
///
/// The real implementation spawns processes; tests swap in a stub so the
/// configuration flow can be exercised without an audio server present.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` passed as a discrete argument vector.
    ///
    /// Arguments are never concatenated into a shell string, even when one
    /// of them is a caller-supplied device id.
    ///
    /// # Errors
    /// Returns [`CommandError::NotFound`] when the executable is missing,
    /// [`CommandError::NonZeroExit`] when the process exits non-zero, and
    /// [`CommandError::Timeout`] when it exceeds the wall-clock limit.
    async fn run(&self, program: &str, args: &[&str]) -> Result<RawOutput, CommandError>;
}

/// [`CommandRunner`] backed by [`tokio::process::Command`].
///
/// Spawns exactly one child process per call and enforces a bounded
/// wall-clock timeout so a wedged audio server can never block the caller
/// indefinitely. Retry policy lives with the caller, not here.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Creates a runner with the given per-invocation timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<RawOutput, CommandError> {
        debug!(program, ?args, "spawning audio control command");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                return Err(CommandError::Timeout {
                    limit: self.timeout,
                });
            }
            Ok(Err(err)) if err.kind() == ErrorKind::NotFound => {
                return Err(CommandError::NotFound {
                    program: program.to_owned(),
                });
            }
            Ok(Err(err)) => {
                return Err(CommandError::Launch {
                    details: err.to_string(),
                });
            }
            Ok(Ok(output)) => output,
        };

        let exit_code = output.status.code().unwrap_or(-1);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            debug!(program, exit_code, "audio control command failed");
            return Err(CommandError::NonZeroExit {
                code: exit_code,
                stderr,
            });
        }

        Ok(RawOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
        })
    }
}
