use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::virtues::Virtue;

use super::VirtueStore;

/// File-backed virtue store.
///
/// Persists the custom set as one JSON array. Writes land in a sibling temp
/// file first and are renamed into place, so an interrupted write never
/// leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given path.
    ///
    /// The file does not need to exist yet; a missing file loads as the
    /// empty set and is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VirtueStore for JsonFileStore {
    fn load(&self) -> StorageResult<Vec<Virtue>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No custom virtue document yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
            message: e.to_string(),
        })
    }

    fn save(&self, virtues: &[Virtue]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(virtues).map_err(|e| StorageError::Corrupt {
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            path = %self.path.display(),
            count = virtues.len(),
            "Saved custom virtues"
        );
        Ok(())
    }
}
