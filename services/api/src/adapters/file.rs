//! services/api/src/adapters/file.rs
//!
//! Shared read/write helpers for the JSON-file stores. Documents are written
//! pretty-printed with 2-space indent so they stay hand-editable. Failure
//! detail is logged here; callers only see a generic storage error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use techpro_core::ports::{PortError, PortResult};
use tracing::error;

pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> PortResult<T> {
    let data = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        PortError::Storage(format!("failed to read {}", path.display()))
    })?;
    serde_json::from_str(&data).map_err(|e| {
        error!("Failed to parse {}: {}", path.display(), e);
        PortError::Storage(format!("failed to parse {}", path.display()))
    })
}

pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> PortResult<()> {
    let pretty = serde_json::to_string_pretty(value).map_err(|e| {
        error!("Failed to serialize {}: {}", path.display(), e);
        PortError::Storage(format!("failed to serialize {}", path.display()))
    })?;
    tokio::fs::write(path, pretty).await.map_err(|e| {
        error!("Failed to write {}: {}", path.display(), e);
        PortError::Storage(format!("failed to write {}", path.display()))
    })
}
