//! External command execution with per-command timeouts.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;

/// A program invocation: executable name plus its argument vector.
///
/// Arguments are passed to the OS verbatim (no shell), so values such as
/// `interface=Wi-Fi 2` stay a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program to execute (resolved through `PATH`).
    pub program: String,
    /// Arguments in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Creates a command line with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Renders the command for logging with every argument equal to
    /// `secret` replaced by a placeholder.
    #[must_use]
    pub fn redacted(&self, secret: &str) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            if !secret.is_empty() && arg == secret {
                rendered.push_str(super::Credentials::REDACTED);
            } else {
                rendered.push_str(arg);
            }
        }
        rendered
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl CommandOutput {
    /// Creates an output with the given stdout and empty stderr.
    #[must_use]
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Error type for external command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started (missing binary, permissions).
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within its time limit and was killed.
    #[error("'{program}' timed out after {}s", timeout.as_secs())]
    TimedOut {
        /// Program that timed out
        program: String,
        /// Time limit that was exceeded
        timeout: Duration,
    },

    /// The process exited unsuccessfully.
    #[error("'{program}' exited with {}: {stderr}", code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    Failed {
        /// Program that failed
        program: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },
}

impl CommandError {
    /// Returns true if this error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

/// Trait for running external programs.
///
/// # Design
///
/// - Production code uses [`SystemRunner`]
/// - Tests inject scripted runners to assert the exact argument vectors
///   and to simulate failures and timeouts without touching the host
pub trait CommandRunner: Send + Sync {
    /// Runs `command`, waiting at most `timeout` for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the process cannot be spawned,
    /// exceeds `timeout`, or exits with a non-zero status.
    fn run(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<CommandOutput, CommandError>> + Send;
}

/// Production runner backed by [`tokio::process::Command`].
///
/// A child that exceeds its timeout is killed when its future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let mut process = tokio::process::Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(timeout, process.output())
            .await
            .map_err(|_| CommandError::TimedOut {
                program: command.program.clone(),
                timeout,
            })?
            .map_err(|source| CommandError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            // nmcli and netsh report most failures on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(CommandError::Failed {
                program: command.program.clone(),
                code: output.status.code(),
                stderr: detail.to_string(),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
