//! Core types for the ARP neighbor cache
//!
//! # NIST 800-53 Rev 5 Control Mappings
//! - CM-8: System Component Inventory - Neighbor bindings as network components
//! - IA-3: Device Identification - Hardware addresses identify neighbors

use serde::{Deserialize, Serialize};

#[cfg(not(feature = "perf-fxhash"))]
use std::collections::HashMap;

// Use FxHashMap when perf-fxhash feature is enabled for faster lookups
#[cfg(feature = "perf-fxhash")]
use rustc_hash::FxHashMap as HashMap;

/// Network address -> hardware address, both in the textual form the
/// neighbor command printed them in.
pub type ArpTable = HashMap<String, String>;

/// One (address, hardware address) pair from the neighbor table
///
/// Neither field is validated here; the extractor grammar decides what a
/// well-formed address looks like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborBinding {
    /// Network address (e.g. "192.168.1.1")
    pub address: String,
    /// Hardware address (e.g. "aa:bb:cc:dd:ee:ff")
    pub hw_address: String,
}

impl NeighborBinding {
    pub fn new(address: impl Into<String>, hw_address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            hw_address: hw_address.into(),
        }
    }
}

impl std::fmt::Display for NeighborBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.address, self.hw_address)
    }
}

/// List the bindings of a table, sorted by address
pub fn bindings(table: &ArpTable) -> Vec<NeighborBinding> {
    let mut out: Vec<NeighborBinding> = table
        .iter()
        .map(|(address, hw)| NeighborBinding::new(address.as_str(), hw.as_str()))
        .collect();
    out.sort_by(|a, b| a.address.cmp(&b.address));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binding_display() {
        let binding = NeighborBinding::new("192.168.1.1", "aa:bb:cc:dd:ee:ff");
        assert_eq!(binding.to_string(), "192.168.1.1 -> aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_bindings_sorted() {
        let mut table = ArpTable::default();
        table.insert("10.0.0.2".to_string(), "00:00:00:00:00:02".to_string());
        table.insert("10.0.0.1".to_string(), "00:00:00:00:00:01".to_string());

        assert_eq!(
            bindings(&table),
            vec![
                NeighborBinding::new("10.0.0.1", "00:00:00:00:00:01"),
                NeighborBinding::new("10.0.0.2", "00:00:00:00:00:02"),
            ]
        );
    }

    #[test]
    fn test_bindings_empty() {
        assert!(bindings(&ArpTable::default()).is_empty());
    }
}
