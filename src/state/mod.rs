//! Persistent step-completion state
//!
//! A flat JSON object mapping step identifier → RFC 3339 completion timestamp,
//! stored at `<state-dir>/state.json`. Absence of the file is an empty
//! mapping; absence of a key means the step has not completed. The map keeps
//! insertion order so reports read in the order steps actually finished.
//!
//! A store that cannot persist (state directory not creatable or writable)
//! degrades to "no tracking": `is_complete` reports false for everything and
//! `mark_complete` is a no-op. Smart Mode then behaves like Force Mode, the
//! conservative direction; it must never look like "everything complete".

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;

use crate::error::{BotstrapError, Result};

/// State file name inside the state directory
pub const STATE_FILE: &str = "state.json";

/// Persistent identifier → timestamp map with atomic writes
#[derive(Debug)]
pub struct StateStore {
    dir: PathBuf,
    entries: IndexMap<String, String>,
    degraded: bool,
    load_warning: Option<String>,
}

impl StateStore {
    /// Open (and if needed create) the store under `dir`. Never fails:
    /// an unusable directory yields a degraded store, an unreadable or
    /// corrupt state file yields an empty one with a load warning.
    pub fn open(dir: &Path) -> Self {
        if let Err(e) = fs::create_dir_all(dir) {
            return Self {
                dir: dir.to_path_buf(),
                entries: IndexMap::new(),
                degraded: true,
                load_warning: Some(format!(
                    "cannot create state directory {}: {e}",
                    dir.display()
                )),
            };
        }

        let path = dir.join(STATE_FILE);
        let (entries, load_warning) = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<IndexMap<String, String>>(&content) {
                Ok(entries) => (entries, None),
                Err(e) => (
                    IndexMap::new(),
                    Some(format!(
                        "state file {} is not valid JSON ({e}); treating every step as not done",
                        path.display()
                    )),
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (IndexMap::new(), None),
            Err(e) => (
                IndexMap::new(),
                Some(format!(
                    "cannot read state file {} ({e}); treating every step as not done",
                    path.display()
                )),
            ),
        };

        Self {
            dir: dir.to_path_buf(),
            entries,
            degraded: false,
            load_warning,
        }
    }

    /// True iff a completion record exists for `identifier`
    pub fn is_complete(&self, identifier: &str) -> bool {
        !self.degraded && self.entries.contains_key(identifier)
    }

    /// Record that `identifier` completed now
    pub fn mark_complete(&mut self, identifier: &str) -> Result<()> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.mark_complete_at(identifier, &timestamp)
    }

    /// Record that `identifier` completed at `timestamp`
    pub fn mark_complete_at(&mut self, identifier: &str, timestamp: &str) -> Result<()> {
        if self.degraded {
            return Ok(());
        }

        self.entries
            .insert(identifier.to_string(), timestamp.to_string());
        self.persist()
    }

    /// Empty the store back to `{}`
    pub fn reset(&mut self) -> Result<()> {
        self.entries.clear();
        if self.degraded {
            return Ok(());
        }
        self.persist()
    }

    /// Completed entries in insertion order
    pub fn completed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Completion timestamp for one step, if recorded
    pub fn timestamp(&self, identifier: &str) -> Option<&str> {
        if self.degraded {
            return None;
        }
        self.entries.get(identifier).map(String::as_str)
    }

    /// Number of completed entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True when the store cannot persist and tracking is disabled
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Warning produced while opening the store, if any
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Location of the backing file
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Persist the whole map with an atomic write (temp file + rename) so a
    /// concurrent reader sees either the pre- or post-write state, never a
    /// truncated one.
    fn persist(&self) -> Result<()> {
        let path = self.file_path();
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = self.dir.join(format!("{STATE_FILE}.tmp"));

        fs::write(&tmp_path, &content).map_err(|e| BotstrapError::FileWriteFailed {
            path: tmp_path.display().to_string(),
            reason: e.to_string(),
        })?;

        fs::rename(&tmp_path, &path).map_err(|e| BotstrapError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
