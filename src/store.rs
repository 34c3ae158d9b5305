use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::Result;
use crate::record::ContentItem;

pub const DEFAULT_RECORD_LIMIT: usize = 500;

/// JSON-file store for analyzed records, newest first.
pub struct RecordStore {
    path: PathBuf,
    limit: usize,
    records: Mutex<Vec<ContentItem>>,
}

impl RecordStore {
    pub async fn load(path: PathBuf, limit: usize) -> Result<Self> {
        let records = if path.exists() {
            let data = tokio::fs::read_to_string(&path).await?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data).map_err(std::io::Error::from)?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            limit: limit.max(1),
            records: Mutex::new(records),
        })
    }

    pub async fn list(&self) -> Vec<ContentItem> {
        let guard = self.records.lock().await;
        guard.clone()
    }

    pub async fn get(&self, record_id: &str) -> Option<ContentItem> {
        let guard = self.records.lock().await;
        guard.iter().find(|record| record.id == record_id).cloned()
    }

    /// Inserts `record` at the front, dropping any older record with the same
    /// content fingerprint.
    pub async fn add(&self, record: ContentItem) -> Result<ContentItem> {
        let mut guard = self.records.lock().await;
        guard.retain(|existing| existing.fingerprint != record.fingerprint);
        guard.insert(0, record.clone());
        if guard.len() > self.limit {
            guard.truncate(self.limit);
        }
        self.persist(&guard).await?;
        info!(id = %record.id, url = %record.url, "stored content record");
        Ok(record)
    }

    pub async fn delete(&self, record_id: &str) -> Result<bool> {
        let mut guard = self.records.lock().await;
        let before = guard.len();
        guard.retain(|record| record.id != record_id);
        let removed = guard.len() != before;
        if removed {
            self.persist(&guard).await?;
        }
        Ok(removed)
    }

    async fn persist(&self, records: &[ContentItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(records).map_err(std::io::Error::from)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
