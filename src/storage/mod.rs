//! Local persistence boundary for user-defined virtues.
//!
//! The custom virtue set is the only state this crate writes to disk. It is
//! held as a single JSON document, the client-side analog of one
//! local-storage key: read once when the registry is constructed, rewritten
//! whole on every mutation.

mod json_file;

pub use json_file::JsonFileStore;

use std::sync::{Arc, Mutex};

use crate::error::StorageResult;
use crate::virtues::Virtue;

/// Load/save boundary the registry is constructed over.
///
/// Implementations persist the full custom virtue set as one unit; there is
/// no per-record access. Injected at registry construction so tests can
/// substitute [`MemoryStore`].
pub trait VirtueStore: Send {
    /// Read the custom virtue set. An empty store loads as an empty set.
    fn load(&self) -> StorageResult<Vec<Virtue>>;

    /// Replace the stored custom virtue set.
    fn save(&self, virtues: &[Virtue]) -> StorageResult<()>;
}

/// In-memory store substitute.
///
/// Clones share the same underlying set, so a test can keep a handle and
/// inspect what the registry persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    virtues: Arc<Mutex<Vec<Virtue>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with custom virtues.
    pub fn with_virtues(virtues: Vec<Virtue>) -> Self {
        Self {
            virtues: Arc::new(Mutex::new(virtues)),
        }
    }

    /// Snapshot of the currently stored set.
    pub fn stored(&self) -> Vec<Virtue> {
        self.virtues.lock().unwrap().clone()
    }
}

impl VirtueStore for MemoryStore {
    fn load(&self) -> StorageResult<Vec<Virtue>> {
        Ok(self.virtues.lock().unwrap().clone())
    }

    fn save(&self, virtues: &[Virtue]) -> StorageResult<()> {
        *self.virtues.lock().unwrap() = virtues.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let virtues = vec![Virtue::custom("custom-1", "Patience", "Calm endurance.")];
        store.save(&virtues).unwrap();
        assert_eq!(store.load().unwrap(), virtues);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store
            .save(&[Virtue::custom("custom-1", "Patience", "Calm endurance.")])
            .unwrap();
        assert_eq!(handle.stored().len(), 1);
    }
}
