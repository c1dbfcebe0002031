use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, TarjomanError};
use crate::language::Direction;
use crate::translate::TranslationKind;

/// A submitted phrase and the answer it received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub text: String,
    pub translation: String,
    pub direction: Direction,
    pub kind: TranslationKind,
    pub timestamp: DateTime<Utc>,
}

/// Translation history persisted as JSON, oldest first
#[derive(Debug)]
pub struct TranslationHistory {
    path: PathBuf,
    max_entries: usize,
    entries: Vec<HistoryEntry>,
}

impl TranslationHistory {
    /// In-memory history bound to `path`; nothing is read
    pub fn new<P: AsRef<Path>>(path: P, max_entries: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_entries: max_entries.max(1),
            entries: Vec::new(),
        }
    }

    /// Load history from `path`; a missing file is an empty history
    pub fn load<P: AsRef<Path>>(path: P, max_entries: usize) -> Result<Self> {
        let mut history = Self::new(path, max_entries);

        if !history.path.exists() {
            debug!("No history at {}, starting empty", history.path.display());
            return Ok(history);
        }

        let content = std::fs::read_to_string(&history.path)?;
        if !content.trim().is_empty() {
            history.entries = serde_json::from_str(&content).map_err(|e| {
                TarjomanError::History(format!(
                    "Failed to parse history file {}: {}",
                    history.path.display(),
                    e
                ))
            })?;
        }
        history.enforce_limit();

        debug!("Loaded {} history entries", history.entries.len());
        Ok(history)
    }

    /// Append an entry, dropping the oldest beyond the size limit
    pub fn record(&mut self, text: &str, translation: &str, direction: Direction) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            id: Uuid::new_v4(),
            text: text.to_string(),
            translation: translation.to_string(),
            direction,
            kind: TranslationKind::classify(translation),
            timestamp: Utc::now(),
        });
        self.enforce_limit();

        // Just pushed, so never empty
        &self.entries[self.entries.len() - 1]
    }

    fn enforce_limit(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Up to `n` most recent entries, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(n)
    }

    /// The `n`th most recent entry, counting from 1 for the newest
    pub fn nth_recent(&self, n: usize) -> Option<&HistoryEntry> {
        n.checked_sub(1).and_then(|back| self.entries.iter().rev().nth(back))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the history atomically (temp file in the same directory, then rename)
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(&self.entries)?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|e| TarjomanError::History(format!("Failed to write {}: {}", self.path.display(), e)))?;

        info!("Saved {} history entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}
