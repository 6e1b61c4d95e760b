//! Line extraction for neighbor table output
//!
//! Each OS prints its neighbor table differently, so the cache never
//! parses text itself. A [`LineExtractor`] turns one line into an ordered
//! list of fields and a [`FieldLayout`] says where the address, hardware
//! address and (optionally) the owning interface sit in that list.

use regex::Regex;

use crate::error::{ArpCacheError, Result};

/// Expected shape of a successful extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Number of fields a matching line yields
    pub tokens: usize,
    /// Position of the network address
    pub address: usize,
    /// Position of the hardware address
    pub hw_address: usize,
    /// Position of the owning interface, `None` when the output does not
    /// name one and the requested interface is assumed
    pub interface: Option<usize>,
}

impl FieldLayout {
    /// Check every configured position falls inside `0..tokens`
    pub fn validate(&self) -> Result<()> {
        if self.tokens == 0 {
            return Err(ArpCacheError::invalid_config(
                "tokens",
                "must be greater than zero",
            ));
        }

        let positions = [
            ("address_index", Some(self.address)),
            ("hw_address_index", Some(self.hw_address)),
            ("interface_index", self.interface),
        ];
        for (field, position) in positions {
            if let Some(index) = position {
                if index >= self.tokens {
                    return Err(ArpCacheError::invalid_config(
                        field,
                        format!("position {} out of range for {} tokens", index, self.tokens),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Splits one line of neighbor table output into fields
pub trait LineExtractor: Send + Sync {
    /// Returns the ordered fields of `line`, or `None` if it does not match.
    fn extract(&self, line: &str) -> Option<Vec<String>>;

    /// Field positions for lines this extractor matches.
    fn layout(&self) -> FieldLayout;
}

/// Regex-backed extractor
///
/// The fields are the capture groups of the pattern with group 0 (the whole
/// match) first, so a pattern with three groups yields four tokens.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    regex: Regex,
    layout: FieldLayout,
}

impl RegexExtractor {
    /// Compiles `pattern` and checks it against `layout`.
    pub fn new(pattern: &str, layout: FieldLayout) -> Result<Self> {
        layout.validate()?;
        let regex = Regex::new(pattern)?;

        let groups = regex.captures_len();
        if groups != layout.tokens {
            return Err(ArpCacheError::invalid_config(
                "tokens",
                format!(
                    "pattern yields {} tokens but layout expects {}",
                    groups, layout.tokens
                ),
            ));
        }

        Ok(Self { regex, layout })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl LineExtractor for RegexExtractor {
    fn extract(&self, line: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(line)?;
        Some(
            caps.iter()
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    fn layout(&self) -> FieldLayout {
        self.layout
    }
}
