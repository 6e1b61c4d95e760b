//! Error types for the ARP neighbor cache
//!
//! # NIST 800-53 Rev 5 Control Mappings
//! - SI-11: Error Handling - Structured error types with contextual information
//! - AU-3: Content of Audit Records - Errors carry the failing command or key

use std::io;
use thiserror::Error;

/// Errors raised by a neighbor table source
///
/// # NIST Controls
/// - SI-11(a): Generate error messages providing information necessary for corrective actions
#[derive(Debug, Error)]
pub enum SourceError {
    /// The neighbor command could not be spawned
    #[error("Failed to execute '{command}': {source}")]
    Spawn {
        /// The command line that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The neighbor command returned a non-zero exit code
    #[error("Command failed: '{command}' (exit code {exit_code}): {output}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// The exit code, -1 when terminated by a signal.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// The neighbor command did not finish in time
    #[error("Command '{command}' timed out after {secs} seconds")]
    Timeout {
        /// The command line that timed out.
        command: String,
        /// Configured timeout.
        secs: u64,
    },

    /// The source could not produce a table for any other reason
    #[error("Neighbor table unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Creates an unavailable-source error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors that can occur in the ARP cache
///
/// # NIST Controls
/// - SI-11(b): Reveal only information necessary for error handling
#[derive(Debug, Error)]
pub enum ArpCacheError {
    /// Refreshing the table from its source failed
    /// NIST: SI-4 - Neighbor table monitoring failures are surfaced verbatim
    #[error("ARP table refresh failed: {0}")]
    Source(#[from] SourceError),

    /// No hardware address is bound to the queried network address
    #[error("Could not find MAC for {0}")]
    MacNotFound(String),

    /// No network address is bound to the queried hardware address
    #[error("Could not find IP for {0}")]
    IpNotFound(String),

    /// Profile validation failed
    /// NIST: CM-6 (Configuration Settings) - Configuration validation
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// The extractor pattern did not compile
    #[error("Invalid ARP table pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Profile file could not be decoded
    #[error("Profile decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArpCacheError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error is an ordinary missing binding rather
    /// than a system fault. Callers may retry with a forced refresh.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MacNotFound(_) | Self::IpNotFound(_))
    }

    /// Returns true if the error came from the neighbor table source.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

/// Result type alias for ARP cache operations
pub type Result<T> = std::result::Result<T, ArpCacheError>;
