//! In-memory snapshots of orders parked across lifecycle events
//!
//! A screen that is about to be torn down saves its order under a key and
//! restores it when it comes back. Snapshots are held in transfer form, so
//! a restored order is always a fresh decode, never a shared reference.

use std::sync::Arc;

use coinswap_core::ExchangeOrder;
use dashmap::DashMap;
use log::{debug, warn};
use uuid::Uuid;

use crate::codec::Encoding;
use crate::error::CodecError;
use crate::messages::Envelope;
use crate::transport::Subjects;

/// Concurrent keyed store of order snapshots; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: Arc<DashMap<String, Envelope>>,
    encoding: Encoding,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            snapshots: Arc::new(DashMap::new()),
            encoding,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Save `order` under `key`, replacing any earlier snapshot
    ///
    /// Returns the id of the stored envelope.
    pub fn save(
        &self,
        key: impl Into<String>,
        order: &ExchangeOrder,
    ) -> Result<Uuid, CodecError> {
        let key = key.into();
        let envelope = Envelope::seal(Subjects::ORDER_RESTORE, order, self.encoding)?;
        let id = envelope.id;

        if self.snapshots.insert(key.clone(), envelope).is_some() {
            debug!("Replaced snapshot {} for order {}", key, order.order_id());
        } else {
            debug!("Saved snapshot {} for order {}", key, order.order_id());
        }
        Ok(id)
    }

    /// Decode the snapshot under `key`, leaving it in place
    pub fn restore(&self, key: &str) -> Result<Option<ExchangeOrder>, CodecError> {
        match self.snapshots.get(key) {
            Some(entry) => {
                let order = entry.open().inspect_err(|e| {
                    warn!("Snapshot {} is unreadable: {}", key, e);
                })?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Decode and remove the snapshot under `key`
    ///
    /// An unreadable snapshot is removed as well and reported as an error.
    pub fn take(&self, key: &str) -> Result<Option<ExchangeOrder>, CodecError> {
        match self.snapshots.remove(key) {
            Some((_, envelope)) => {
                let order = envelope.open().inspect_err(|e| {
                    warn!("Snapshot {} is unreadable: {}", key, e);
                })?;
                debug!("Took snapshot {}", key);
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Drop the snapshot under `key`; true if one existed
    pub fn discard(&self, key: &str) -> bool {
        self.snapshots.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.snapshots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&self) {
        self.snapshots.clear();
    }

    #[cfg(test)]
    fn corrupt(&self, key: &str) {
        if let Some(mut entry) = self.snapshots.get_mut(key) {
            entry.payload.truncate(3);
        }
    }
}
