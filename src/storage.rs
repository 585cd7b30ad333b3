//! Persisted monitor form state.
//!
//! The monitor remembers the last endpoint, the auto-connect toggle and the
//! message draft between sessions. The state is one JSON document stored
//! under the key [`SOCKET_MONITOR_SAVE_KEY`].
//!
//! # Example
//!
//! ```no_run
//! use socket_monitor::{MonitorRecord, RecordStore};
//!
//! # fn example() -> socket_monitor::Result<()> {
//! let store = RecordStore::new("./state")?;
//!
//! store.save(&MonitorRecord {
//!     socket_url: Some("wss://example.test/socket".into()),
//!     is_auto_connect: Some(true),
//!     message: None,
//! })?;
//!
//! let restored = store.load()?;
//! assert!(restored.is_some());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Key the monitor form state is saved under.
pub const SOCKET_MONITOR_SAVE_KEY: &str = "socket_monitor_sk";

// ============================================================================
// MonitorRecord
// ============================================================================

/// Saved monitor form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorRecord {
    /// Last endpoint typed into the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_url: Option<String>,

    /// Auto-connect toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auto_connect: Option<bool>,

    /// Message draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// RecordStore
// ============================================================================

/// File-backed store for a [`MonitorRecord`].
///
/// Writes `<dir>/socket_monitor_sk.json`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Creates a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            debug!(path = %dir.display(), "Created state directory");
        }

        Ok(Self {
            path: dir.join(format!("{SOCKET_MONITOR_SAVE_KEY}.json")),
        })
    }

    /// Returns the record file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved record.
    ///
    /// Returns `None` when nothing was saved or the saved content is blank.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Io`] if the file exists but cannot be read
    /// - [`crate::Error::Json`] if the content is not a record
    pub fn load(&self) -> Result<Option<MonitorRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let record = serde_json::from_str(content)?;
        debug!(path = %self.path.display(), "Loaded monitor record");
        Ok(Some(record))
    }

    /// Saves `record`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be written.
    pub fn save(&self, record: &MonitorRecord) -> Result<()> {
        let content = serde_json::to_string(record)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Saved monitor record");
        Ok(())
    }

    /// Deletes the saved record. Missing files are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn store() -> (TempDir, RecordStore) {
        let dir = TempDir::with_prefix("socket-monitor-").expect("temp dir");
        let store = RecordStore::new(dir.path()).expect("store");
        (dir, store)
    }

    #[test]
    fn test_missing_record_loads_none() {
        let (_dir, store) = store();
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_blank_record_loads_none() {
        let (_dir, store) = store();
        fs::write(store.path(), "  \n\t").expect("write");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        let record = MonitorRecord {
            socket_url: Some("wss://example.test/socket".into()),
            is_auto_connect: Some(false),
            message: Some(r#"{"type":"ping"}"#.into()),
        };

        store.save(&record).expect("save");
        assert_eq!(store.load().expect("load"), Some(record));
    }

    #[test]
    fn test_uses_camel_case_keys() {
        let (_dir, store) = store();
        store
            .save(&MonitorRecord {
                socket_url: Some("ws://a".into()),
                is_auto_connect: Some(true),
                message: None,
            })
            .expect("save");

        let raw = fs::read_to_string(store.path()).expect("read");
        assert_eq!(raw, r#"{"socketUrl":"ws://a","isAutoConnect":true}"#);
        assert!(store.path().ends_with("socket_monitor_sk.json"));
    }

    #[test]
    fn test_partial_record_loads() {
        let (_dir, store) = store();
        fs::write(store.path(), r#" {"message":"hi"} "#).expect("write");
        let record = store.load().expect("load").expect("record");
        assert_eq!(record.message.as_deref(), Some("hi"));
        assert_eq!(record.socket_url, None);
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let (_dir, store) = store();
        fs::write(store.path(), "not json").expect("write");
        assert!(matches!(store.load(), Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_clear() {
        let (_dir, store) = store();
        store.clear().expect("clear missing");
        store.save(&MonitorRecord::default()).expect("save");
        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = TempDir::new().expect("temp dir");
        let nested = dir.path().join("a").join("b");
        let store = RecordStore::new(&nested).expect("store");
        assert!(nested.is_dir());
        store.save(&MonitorRecord::default()).expect("save");
    }
}
