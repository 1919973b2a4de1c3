//! Activity history persistence
//!
//! The history log is a single JSON document in the user's data directory
//! holding an ordered list of [`HistoryEntry`] records. Appends read the
//! current list, prepend the new entry, and write the whole list back;
//! reads always return entries most-recent-first regardless of on-disk
//! order. Appends are not transactional: a crash between read and write
//! loses that one append.

use crate::error::{NexusError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use std::path::PathBuf;

pub mod types;
pub use types::{HistoryEntry, KindFilter, ToolKind};

/// Environment variable overriding the history file location
pub const HISTORY_FILE_ENV: &str = "NEXUS_HISTORY_FILE";

/// File-backed history log
pub struct HistoryLog {
    file_path: PathBuf,
}

impl HistoryLog {
    /// Create a log backed by the default location
    ///
    /// The file lives in the user's data directory. The
    /// `NEXUS_HISTORY_FILE` environment variable overrides the path, which
    /// makes it easy to point the binary at a test file without changing
    /// the user's application data dir.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var(HISTORY_FILE_ENV) {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "xbcsmith", "nexus")
            .ok_or_else(|| NexusError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| NexusError::Storage(e.to_string()))?;

        Ok(Self {
            file_path: data_dir.join("history.json"),
        })
    }

    /// Create a log backed by the specified file path
    ///
    /// This is primarily useful for tests where the default application
    /// data directory is not desirable (for example, a temporary directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus::history::HistoryLog;
    ///
    /// let log = HistoryLog::new_with_path("/tmp/test_history.json").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(file_path: P) -> Result<Self> {
        let file_path = file_path.into();

        // Ensure parent directory exists so the first write succeeds.
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create parent directory for history file")
                    .map_err(|e| NexusError::Storage(e.to_string()))?;
            }
        }

        Ok(Self { file_path })
    }

    /// Append a new entry to the front of the log
    ///
    /// Mints a fresh id and timestamp, prepends the entry to the persisted
    /// list, and writes the whole list back. Returns the minted entry.
    pub fn append(
        &self,
        kind: ToolKind,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<HistoryEntry> {
        let mut entries = self.load();
        let entry = HistoryEntry::new(kind, title, content);
        entries.insert(0, entry.clone());
        self.write(&entries)?;
        tracing::debug!("Appended {} history entry {}", entry.kind, entry.id);
        Ok(entry)
    }

    /// Read all entries, most recent first
    pub fn read_all(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Remove every entry
    ///
    /// Destructive and irreversible; callers must obtain explicit user
    /// confirmation before invoking this.
    pub fn clear_all(&self) -> Result<()> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NexusError::Storage(format!(
                "Failed to clear history: {}",
                e
            ))
            .into()),
        }
    }

    /// Read the persisted list, treating a missing or unreadable file as empty
    fn load(&self) -> Vec<HistoryEntry> {
        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "History file {} is unreadable ({}), starting fresh",
                    self.file_path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Write the full list back to disk
    fn write(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.file_path, json)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))
            .map_err(|e| NexusError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Filter entries by kind; [`KindFilter::All`] is the identity
pub fn filter_by_kind(entries: &[HistoryEntry], filter: KindFilter) -> Vec<HistoryEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}
