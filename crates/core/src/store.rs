use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::model::Task;

/// Failure while writing the store blob. Reads never fail: an absent or
/// malformed store degrades to an empty list.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Adapter over the single `todos.json` blob in the data directory. The
/// whole task list is rewritten on every save; there is no delta or
/// versioned format.
#[derive(Debug, Clone)]
pub struct TaskStore {
    store_path: PathBuf,
}

impl TaskStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store_path: config.store_path().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Load the stored task list. An absent file or a blob that fails to
    /// parse yields an empty list rather than an error.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Vec<Task> {
        let raw = match fs::read_to_string(&self.store_path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(
                        file = %self.store_path.display(),
                        error = %err,
                        "failed reading store, treating as empty"
                    );
                }
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks from store");
                tasks
            }
            Err(err) => {
                warn!(
                    file = %self.store_path.display(),
                    error = %err,
                    "malformed store, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Serialize the full list and atomically replace the store blob.
    #[tracing::instrument(skip(self, tasks))]
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        debug!(file = %self.store_path.display(), count = tasks.len(), "saving tasks");
        let serialized = serde_json::to_string(tasks)?;

        let dir = self
            .store_path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir).map_err(|source| StoreError::Write {
            path: self.store_path.clone(),
            source,
        })?;
        temp.write_all(serialized.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|source| StoreError::Write {
                path: self.store_path.clone(),
                source,
            })?;

        temp.persist(&self.store_path)
            .map_err(|err| StoreError::Write {
                path: self.store_path.clone(),
                source: err.error,
            })?;
        Ok(())
    }
}
