//! Append-only JSON file adapter for ResultStore
//!
//! The whole history lives in one JSON array on disk. Reads and writes
//! share one in-process mutex, and a rewrite lands as a temp file plus
//! rename, so a reader only ever observes a complete document and a
//! crash mid-write cannot truncate the history.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::ResultBatch;
use crate::domain::ports::ResultStore;
use crate::error::DomainError;

/// File-backed implementation of ResultStore
pub struct JsonFileResultStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonFileResultStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_lock: Mutex::new(()),
        }
    }

    // Callers must hold file_lock.
    async fn read_all(&self) -> Result<Vec<ResultBatch>, DomainError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| DomainError::Storage(format!("corrupt result file: {}", e))),
            // A missing file is an empty history.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DomainError::Storage(e.to_string())),
        }
    }

    // Write the new document to a sibling temp file and rename it into
    // place, so the visible file flips from one complete array to the
    // next. Callers must hold file_lock.
    async fn write_all(&self, history: &[ResultBatch]) -> Result<(), DomainError> {
        let rendered = serde_json::to_vec_pretty(history)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, rendered)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ResultStore for JsonFileResultStore {
    async fn append(&self, batch: &ResultBatch) -> Result<(), DomainError> {
        let _guard = self.file_lock.lock().await;

        let mut history = self.read_all().await?;
        history.push(batch.clone());
        self.write_all(&history).await
    }

    async fn history(&self) -> Result<Vec<ResultBatch>, DomainError> {
        let _guard = self.file_lock.lock().await;
        self.read_all().await
    }
}
