//! Page persistence collaborators.
//!
//! A store keeps the boundary form of each page (`Vec<BlockRecord>`). The
//! editor never waits on a store: sessions read a snapshot, release the
//! editor, then await the store.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use kumitate_types::{BlockRecord, PageId};

use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Where pages live.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    async fn load(&self, page: PageId) -> StoreResult<Vec<BlockRecord>>;

    /// Overwrite the stored page.
    async fn save(&self, page: PageId, blocks: &[BlockRecord]) -> StoreResult<()>;

    /// IDs of every stored page, sorted.
    async fn list(&self) -> StoreResult<Vec<PageId>>;
}

// ============================================================================
// Memory
// ============================================================================

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<HashMap<PageId, Vec<BlockRecord>>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing pages.
    pub fn with_pages(pages: impl IntoIterator<Item = (PageId, Vec<BlockRecord>)>) -> Self {
        Self {
            pages: RwLock::new(pages.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self, page: PageId) -> StoreResult<Vec<BlockRecord>> {
        self.pages
            .read()
            .get(&page)
            .cloned()
            .ok_or(StoreError::NotFound(page))
    }

    async fn save(&self, page: PageId, blocks: &[BlockRecord]) -> StoreResult<()> {
        self.pages.write().insert(page, blocks.to_vec());
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<PageId>> {
        let mut ids: Vec<PageId> = self.pages.read().keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

// ============================================================================
// JSON files
// ============================================================================

/// One `<page-id>.json` file per page under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFilePageStore {
    root: PathBuf,
}

impl JsonFilePageStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn page_path(&self, page: PageId) -> PathBuf {
        self.root.join(format!("{page}.json"))
    }
}

#[async_trait]
impl PageStore for JsonFilePageStore {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn load(&self, page: PageId) -> StoreResult<Vec<BlockRecord>> {
        let bytes = match tokio::fs::read(self.page_path(page)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(page)),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, page: PageId, blocks: &[BlockRecord]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(blocks)?;
        // Readers only ever see a complete file.
        let path = self.page_path(page);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<PageId>> {
        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match PageId::parse(stem) {
                Ok(id) => ids.push(id),
                Err(_) => tracing::debug!(path = %path.display(), "skipping non-page file"),
            }
        }
        ids.sort();
        Ok(ids)
    }
}
