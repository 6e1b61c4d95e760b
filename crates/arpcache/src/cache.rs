//! NeighborCache - cached view of the host ARP table
//!
//! # NIST 800-53 Rev 5 Control Mappings
//! - SI-4: System Monitoring - Neighbor table monitoring
//! - CM-8: System Component Inventory - Track network neighbors
//! - SC-5: DoS Protection - No implicit refresh once populated
//!
//! # Concurrency
//!
//! The table and the populated flag live behind one `RwLock`. A refresh
//! holds the write side for its whole duration (command invocation and
//! parse) and swaps in a fully built table, so readers see either the old
//! table or the new one. Lookups that do not refresh share the read side.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

use crate::error::{ArpCacheError, Result};
use crate::extractor::LineExtractor;
use crate::profile::ArpProfile;
use crate::source::TableSource;
use crate::types::ArpTable;

#[derive(Debug, Default)]
struct CacheState {
    table: Arc<ArpTable>,
    /// Set at the start of the first refresh attempt, never cleared
    populated: bool,
}

/// Cache of address -> hardware address bindings for one interface scope
///
/// Refreshes only when asked to, or on the first lookup. A failed refresh
/// keeps the previous table and does not make later lookups retry on their
/// own; callers that want fresh data pass `force_refresh`.
pub struct NeighborCache {
    source: Box<dyn TableSource>,
    extractor: Box<dyn LineExtractor>,
    state: RwLock<CacheState>,
}

impl NeighborCache {
    /// Create an empty, unpopulated cache
    pub fn new(
        source: impl TableSource + 'static,
        extractor: impl LineExtractor + 'static,
    ) -> Self {
        Self {
            source: Box::new(source),
            extractor: Box::new(extractor),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Create a cache reading the table described by `profile`
    pub fn from_profile(profile: &ArpProfile) -> Result<Self> {
        profile.validate()?;
        let extractor = profile.build_extractor()?;
        Ok(Self::new(profile.build_source(), extractor))
    }

    /// Re-read the neighbor table and keep the bindings owned by `iface`
    ///
    /// On success the new table replaces the cached one and is returned.
    /// On failure the cached table is left untouched (see [`Self::snapshot`])
    /// and the source error is returned. Either way the cache counts as
    /// populated afterwards.
    #[instrument(skip(self))]
    pub async fn refresh(&self, iface: &str) -> Result<Arc<ArpTable>> {
        let mut state = self.state.write().await;
        state.populated = true;

        let raw = self.source.fetch().await?;
        let table = Arc::new(parse_table(&raw, iface, self.extractor.as_ref()));

        debug!(bindings = table.len(), "ARP table refreshed");
        state.table = Arc::clone(&table);

        Ok(table)
    }

    /// Hardware address bound to `address`
    ///
    /// Refreshes first if the cache was never populated or `force_refresh`
    /// is set; a refresh error is returned without attempting the lookup.
    #[instrument(skip(self))]
    pub async fn lookup(&self, iface: &str, address: &str, force_refresh: bool) -> Result<String> {
        self.ensure_populated(iface, force_refresh).await?;

        let state = self.state.read().await;
        state
            .table
            .get(address)
            .cloned()
            .ok_or_else(|| ArpCacheError::MacNotFound(address.to_string()))
    }

    /// Network address bound to `hw_address`
    ///
    /// Several addresses may share one hardware address; which of them is
    /// returned then depends on table iteration order.
    #[instrument(skip(self))]
    pub async fn inverse_lookup(
        &self,
        iface: &str,
        hw_address: &str,
        force_refresh: bool,
    ) -> Result<String> {
        self.ensure_populated(iface, force_refresh).await?;

        let state = self.state.read().await;
        state
            .table
            .iter()
            .find(|(_, hw)| hw.as_str() == hw_address)
            .map(|(address, _)| address.clone())
            .ok_or_else(|| ArpCacheError::IpNotFound(hw_address.to_string()))
    }

    /// Whether a refresh was ever attempted
    pub async fn has_been_populated(&self) -> bool {
        self.state.read().await.populated
    }

    /// Current table, without refreshing
    pub async fn snapshot(&self) -> Arc<ArpTable> {
        Arc::clone(&self.state.read().await.table)
    }

    async fn ensure_populated(&self, iface: &str, force_refresh: bool) -> Result<()> {
        if force_refresh || !self.has_been_populated().await {
            self.refresh(iface).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for NeighborCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeighborCache")
            .field("layout", &self.extractor.layout())
            .finish_non_exhaustive()
    }
}

/// Build a table from raw neighbor output, keeping only bindings on `iface`
///
/// Lines that do not match, or match with the wrong number of fields, are
/// skipped. A later line for the same address overwrites an earlier one.
pub fn parse_table(raw: &str, iface: &str, extractor: &dyn LineExtractor) -> ArpTable {
    let layout = extractor.layout();
    let mut table = ArpTable::default();

    for line in raw.lines() {
        let Some(fields) = extractor.extract(line) else {
            continue;
        };
        if fields.len() != layout.tokens {
            trace!(
                line,
                tokens = fields.len(),
                "Skipping line with unexpected token count"
            );
            continue;
        }

        let (Some(address), Some(hw_address)) =
            (fields.get(layout.address), fields.get(layout.hw_address))
        else {
            continue;
        };
        let owner = match layout.interface {
            Some(index) => fields.get(index).map(String::as_str),
            None => Some(iface),
        };
        if owner != Some(iface) {
            continue;
        }

        table.insert(address.clone(), hw_address.clone());
    }

    table
}
