//! Pool persistence: whole-file JSON load and atomic save.

use crate::error::{BotError, Result};
use crate::policy::pool::Pool;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves the problem pool as a single JSON document.
///
/// Every selection is one load, mutate, save unit. The store itself does no
/// locking: callers whose triggers can overlap must serialize access to the
/// pool, or accept at-most-one-concurrent-invocation semantics. The bot
/// holds its store behind a mutex for this reason.
pub struct PoolStore {
    path: PathBuf,
}

impl PoolStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the full pool state.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Pool`] when the file cannot be read or its
    /// content is not a valid pool document. The caller should log and skip
    /// the current delivery; prior persisted state is untouched.
    pub fn load(&self) -> Result<Pool> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            BotError::Pool(format!("cannot read {}: {e}", self.path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            BotError::Pool(format!("cannot parse {}: {e}", self.path.display()))
        })
    }

    /// Writes the full pool state as one atomic overwrite.
    ///
    /// The document is serialized completely in memory, written to a sibling
    /// temp file, and renamed over the target, so a failed write never
    /// leaves partial state behind.
    pub fn save(&self, pool: &Pool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    BotError::Pool(format!("cannot create pool dir: {e}"))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(pool)
            .map_err(|e| BotError::Pool(format!("cannot serialize pool: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| {
            BotError::Pool(format!("cannot write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            BotError::Pool(format!("cannot replace {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), "pool state saved");
        Ok(())
    }
}
