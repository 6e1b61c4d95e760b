//! Neighbor table sources.
//!
//! A [`TableSource`] produces the raw text of the host's neighbor table.
//! [`CommandSource`] runs the platform's neighbor command (`ip neigh`,
//! `arp -a`, ...) directly, without an intermediate shell, so arguments
//! never need quoting.
//!
//! # Example
//!
//! ```ignore
//! use sonic_arpcache::source::{CommandSource, TableSource};
//!
//! let source = CommandSource::new("ip", ["neigh"]);
//! let raw = source.fetch().await?;
//! ```

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::SourceError;

/// Produces the raw neighbor table text.
///
/// Implementations must be safe to call repeatedly; the cache calls
/// `fetch` once per refresh and never retries on its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Returns the raw table output, or the reason it could not be read.
    async fn fetch(&self) -> Result<String, SourceError>;
}

/// Result of a neighbor command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// The exit code of the command (0 = success, -1 = killed by signal).
    pub exit_code: i32,
    /// The captured stdout output.
    pub stdout: String,
    /// The captured stderr output.
    pub stderr: String,
}

impl ExecResult {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns the combined output (stdout + stderr) for error messages.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Table source backed by an external command
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSource {
    /// Creates a source running `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    /// Bounds every invocation by `timeout`; the child is killed when it expires.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The command line as it appears in errors and logs.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Runs the command once and captures its output.
    ///
    /// Only spawn failures and timeouts are errors here; a non-zero exit
    /// is reported through [`ExecResult::exit_code`].
    pub async fn exec(&self) -> Result<ExecResult, SourceError> {
        let command = self.command_line();
        tracing::debug!(command = %command, "Executing neighbor command");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| SourceError::Timeout {
                    command: command.clone(),
                    secs: limit.as_secs(),
                })?,
            None => cmd.output().await,
        }
        .map_err(|e| SourceError::Spawn {
            command: command.clone(),
            source: e,
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let result = ExecResult {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        tracing::trace!(
            command = %command,
            exit_code,
            bytes = result.stdout.len(),
            "Neighbor command finished"
        );

        Ok(result)
    }
}

#[async_trait]
impl TableSource for CommandSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        let result = self.exec().await?;
        if result.success() {
            Ok(result.stdout)
        } else {
            Err(SourceError::CommandFailed {
                command: self.command_line(),
                exit_code: result.exit_code,
                output: result.combined_output(),
            })
        }
    }
}
