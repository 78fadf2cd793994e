use async_trait::async_trait;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::debug;

use super::MenuRepository;
use crate::error::MenuError;
use crate::types::{ItemId, MenuItem, NewMenuItem};

/// On-device store: the whole collection lives as one JSON array under a
/// single storage key (`<dir>/<key>.json`). Every call reads the full array,
/// changes it in memory and writes it back. There is no locking, so two
/// overlapping writes end with whichever finished last.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    path: PathBuf,
}

impl LocalRepository {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self { path: dir.as_ref().join(format!("{key}.json")) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<MenuItem>, MenuError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, items: &[MenuItem]) -> Result<(), MenuError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), count = items.len(), "wrote menu");
        Ok(())
    }
}

/// Millisecond timestamp, bumped past the largest existing id if the clock
/// would hand out a duplicate. When the largest id is already `i64::MAX`,
/// the smallest unused positive id is taken instead.
fn next_id(items: &[MenuItem]) -> ItemId {
    let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as ItemId;
    match items.iter().map(|i| i.id).max() {
        Some(max) if max >= now => max.checked_add(1).unwrap_or_else(|| smallest_unused(items)),
        _ => now,
    }
}

fn smallest_unused(items: &[MenuItem]) -> ItemId {
    let used: HashSet<ItemId> = items.iter().map(|i| i.id).collect();
    (1..).find(|id| !used.contains(id)).unwrap_or_default()
}

#[async_trait]
impl MenuRepository for LocalRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, MenuError> {
        let items = self.read_all().await?;
        debug!(path = %self.path.display(), count = items.len(), "read menu");
        Ok(items)
    }

    async fn create(&self, item: &NewMenuItem) -> Result<(), MenuError> {
        let mut items = self.read_all().await?;
        let id = next_id(&items);
        items.push(MenuItem::from_new(id, item));
        self.write_all(&items).await
    }

    async fn update(&self, id: ItemId, item: &NewMenuItem) -> Result<(), MenuError> {
        let mut items = self.read_all().await?;
        let existing = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(MenuError::NotFound(id))?;
        existing.replace_fields(item);
        self.write_all(&items).await
    }

    async fn delete(&self, id: ItemId) -> Result<(), MenuError> {
        let mut items = self.read_all().await?;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(MenuError::NotFound(id));
        }
        self.write_all(&items).await
    }
}
