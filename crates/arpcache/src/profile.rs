//! Neighbor table profiles
//!
//! A profile bundles how to read the host's neighbor table (command and
//! arguments) with how to parse it (pattern and field positions). Built-in
//! profiles cover Linux, macOS and Windows; anything else can be described
//! in a JSON profile file:
//!
//! ```json
//! {
//!   "command": "ip",
//!   "args": ["neigh"],
//!   "pattern": "^([\\d\\.]+)\\s+dev\\s+(\\w+)\\s+\\w+\\s+([a-f0-9:]{17})\\s+.+$",
//!   "tokens": 4,
//!   "address_index": 1,
//!   "hw_address_index": 3,
//!   "interface_index": 2,
//!   "timeout_secs": 5
//! }
//! ```
//!
//! # NIST 800-53 Rev 5 Control Mappings
//! - CM-6: Configuration Settings - Validated parser configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ArpCacheError, Result};
use crate::extractor::{FieldLayout, RegexExtractor};
use crate::source::CommandSource;

/// Linux `ip neigh` line, e.g. `10.0.0.1 dev eth0 lladdr 00:11:22:33:44:55 REACHABLE`
pub const LINUX_PATTERN: &str = r"^([\d\.]+)\s+dev\s+(\w+)\s+\w+\s+([a-f0-9:]{17})\s+.+$";

/// macOS `arp -a -n` line, e.g. `? (10.0.0.1) at 0:11:22:33:44:55 on en0 ifscope [ethernet]`
pub const MACOS_PATTERN: &str =
    r"^[\w\-\.\?]+\s+\(([\d\.]+)\)\s+at\s+([a-fA-F0-9:]+)\s+on\s+([a-zA-Z0-9]+)(?:\s+.*)?$";

/// Windows `arp -a` line, e.g. `  10.0.0.1    00-11-22-33-44-55     dynamic`
pub const WINDOWS_PATTERN: &str = r"^[^\d\.]+([\d\.]+).+\s+([a-f0-9\-]{11,17})\s+.+$";

/// How to read and parse one platform's neighbor table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArpProfile {
    /// Program to run
    pub command: String,
    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
    /// Line pattern; capture group 0 counts as a token
    pub pattern: String,
    /// Number of tokens a matching line yields
    pub tokens: usize,
    pub address_index: usize,
    pub hw_address_index: usize,
    /// Absent when the output does not name the interface
    #[serde(default)]
    pub interface_index: Option<usize>,
    /// Kill the command if it runs longer than this
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ArpProfile {
    /// `ip neigh`
    pub fn linux() -> Self {
        Self {
            command: "ip".to_string(),
            args: vec!["neigh".to_string()],
            pattern: LINUX_PATTERN.to_string(),
            tokens: 4,
            address_index: 1,
            hw_address_index: 3,
            interface_index: Some(2),
            timeout_secs: None,
        }
    }

    /// `arp -a -n`
    pub fn macos() -> Self {
        Self {
            command: "arp".to_string(),
            args: vec!["-a".to_string(), "-n".to_string()],
            pattern: MACOS_PATTERN.to_string(),
            tokens: 4,
            address_index: 1,
            hw_address_index: 2,
            interface_index: Some(3),
            timeout_secs: None,
        }
    }

    /// `arp -a`; the output carries no interface column.
    pub fn windows() -> Self {
        Self {
            command: "arp".to_string(),
            args: vec!["-a".to_string()],
            pattern: WINDOWS_PATTERN.to_string(),
            tokens: 3,
            address_index: 1,
            hw_address_index: 2,
            interface_index: None,
            timeout_secs: None,
        }
    }

    /// Profile for the platform this binary was built for
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Self::macos()
        } else if cfg!(target_os = "windows") {
            Self::windows()
        } else {
            Self::linux()
        }
    }

    /// Read a profile from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let profile: Self = serde_json::from_str(&data)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn layout(&self) -> FieldLayout {
        FieldLayout {
            tokens: self.tokens,
            address: self.address_index,
            hw_address: self.hw_address_index,
            interface: self.interface_index,
        }
    }

    /// Check the profile without compiling its pattern
    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            return Err(ArpCacheError::invalid_config("command", "must not be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(ArpCacheError::invalid_config(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        self.layout().validate()
    }

    pub fn build_source(&self) -> CommandSource {
        let source = CommandSource::new(self.command.as_str(), self.args.iter().cloned());
        match self.timeout_secs {
            Some(secs) => source.with_timeout(Duration::from_secs(secs)),
            None => source,
        }
    }

    pub fn build_extractor(&self) -> Result<RegexExtractor> {
        RegexExtractor::new(&self.pattern, self.layout())
    }
}

impl Default for ArpProfile {
    fn default() -> Self {
        Self::native()
    }
}
