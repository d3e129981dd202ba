//! Snapshot persistence.
//!
//! The store itself lives in memory. Between runs its content is kept by a
//! [`SnapshotStore`]: either a JSON file on disk, or a process-lifetime copy
//! when persistence is turned off.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::storage::Snapshot;

/// Where snapshots are kept between sessions.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Short human-readable description (e.g. the file path).
    fn describe(&self) -> String;

    /// Last saved snapshot, `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<Snapshot>>;

    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Forget the saved snapshot.
    async fn clear(&self) -> Result<()>;
}

/// Snapshot kept as a JSON file.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load(&self) -> Result<Option<Snapshot>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read snapshot: {}", self.path.display()));
            }
        };

        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create snapshot directory: {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;

        // Write then rename so a crash never leaves a truncated snapshot
        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .with_context(|| format!("Failed to write snapshot: {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace snapshot: {}", self.path.display()))?;

        info!("Saved {} rows to {}", snapshot.row_count(), self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove snapshot: {}", self.path.display())),
        }
    }
}

/// Snapshot kept in memory for the current session only.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<Snapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    fn describe(&self) -> String {
        "session memory".to_string()
    }

    async fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.slot.lock().await = Some(snapshot.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}

/// Snapshot store selected by the storage configuration
pub fn open_store(config: &Config) -> Result<Box<dyn SnapshotStore>> {
    if config.storage.persist {
        Ok(Box::new(FileSnapshotStore::new(config.snapshot_path()?)))
    } else {
        Ok(Box::new(MemorySnapshotStore::new()))
    }
}
