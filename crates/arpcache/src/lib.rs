//! ARP Neighbor Cache for SONiC
//!
//! This crate caches the host's IPv4 neighbor (ARP) table for one interface
//! and answers address -> MAC and MAC -> address queries against it. The
//! table is read by running the platform's neighbor command and parsing its
//! text output, which is slow, so refreshes only happen on the first lookup
//! or when a caller forces one.
//!
//! # Features
//!
//! - **default**: `std::collections::HashMap` address table
//! - **perf-fxhash**: `FxHashMap` address table
//!
//! # NIST 800-53 Rev 5 Control Mappings
//!
//! | Control | Description | Implementation |
//! |---------|-------------|----------------|
//! | CM-6 | Configuration Settings | Validated neighbor table profiles |
//! | CM-8 | System Component Inventory | Track network neighbors |
//! | IA-3 | Device Identification | MAC address lookups |
//! | SC-5 | DoS Protection | No implicit refresh once populated |
//! | SI-4 | System Monitoring | Neighbor table snapshots |
//! | SI-11 | Error Handling | Structured error types |
//!
//! # Architecture
//!
//! ```text
//! +-----------------+     +---------------------------+
//! |  Host neighbor  |     |       NeighborCache       |
//! |  table          |     |                           |
//! |                 |     |  TableSource (ip neigh)   |
//! |  ip neigh       |---->|         |                 |
//! |  arp -a         |     |         v                 |
//! |                 |     |  LineExtractor (regex)    |
//! +-----------------+     |         |                 |
//!                         |         v                 |
//!                         |  RwLock<ArpTable>  <------+--- lookup / inverse_lookup
//!                         +---------------------------+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sonic_arpcache::{ArpProfile, NeighborCache};
//!
//! let cache = NeighborCache::from_profile(&ArpProfile::native())?;
//! let mac = cache.lookup("eth0", "192.168.1.1", false).await?;
//! ```

pub mod cache;
pub mod error;
pub mod extractor;
pub mod profile;
pub mod source;
pub mod types;

pub use cache::{NeighborCache, parse_table};
pub use error::{ArpCacheError, Result, SourceError};
pub use extractor::{FieldLayout, LineExtractor, RegexExtractor};
pub use profile::ArpProfile;
pub use source::{CommandSource, ExecResult, TableSource};
pub use types::{ArpTable, NeighborBinding, bindings};
