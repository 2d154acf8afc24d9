//! Persistent client store with change notification.
//!
//! The store is the sole durable owner of the cart and wishlist
//! collections and the session snapshot; in-memory aggregates are
//! disposable caches of it.
//! `load` never fails the caller: an absent or malformed value reads as
//! the empty collection. Every successful `save` publishes a
//! [`StoreEvent`] keyed by storage key on a broadcast channel, which is
//! how aggregates in other execution contexts learn to reload. Two
//! writers racing on the same key resolve last-write-wins; the event
//! channel is the only mitigation, as in the storage-event design this
//! models.

mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::broadcast;

/// Capacity of the change-event channel. A slow subscriber that lags
/// this far behind misses events and should do a full reload.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Errors from store writes. Reads never produce errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A change notification: the named key was overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Storage key whose value changed.
    pub key: String,
}

/// String-keyed JSON collection storage shared by all aggregates.
///
/// Cloning produces a handle to the same backend and the same event
/// channel, so every clone observes every other clone's writes.
#[derive(Clone)]
pub struct ClientStore {
    backend: Arc<dyn StorageBackend>,
    events: broadcast::Sender<StoreEvent>,
}

impl ClientStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { backend, events }
    }

    /// Convenience constructor over an in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Constructor over a file backend rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn file_backed(dir: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(FileBackend::new(dir)?)))
    }

    /// Load the collection stored under `key`.
    ///
    /// Absent and malformed values both read as empty; malformed content
    /// is logged and left in place for the next overwrite to fix.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.backend.read(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored collection, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the collection stored under `key` and publish a change
    /// event for it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the backend write fails;
    /// no event is published in that case.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.backend.write(key, &raw)?;
        // No subscribers is fine; the event is dropped.
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });
        Ok(())
    }

    /// Load the single value stored under `key`. Unlike [`load`], this is
    /// for keys holding one object (the session snapshot) rather than a
    /// collection; absent and malformed values both read as `None`.
    ///
    /// [`load`]: Self::load
    #[must_use]
    pub fn load_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored value, treating as absent");
                None
            }
        }
    }

    /// Overwrite the single value stored under `key` and publish a
    /// change event for it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the backend write fails;
    /// no event is published in that case.
    pub fn save_object<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)?;
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });
        Ok(())
    }

    /// Subscribe to change events for all keys. Callers filter by the
    /// key they watch.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
