//! Session configuration (RON).
//!
//! ```ron
//! (
//!     history_limit: Some(50),
//!     unknown_keys: accept,
//!     store_dir: Some("/var/lib/kumitate/pages"),
//! )
//! ```
//!
//! Every field is optional; omitted fields take their defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use kumitate_doc::{DEFAULT_HISTORY_LIMIT, EditorConfig, UnknownKeyPolicy};

use crate::error::ConfigError;
use crate::store::{JsonFilePageStore, MemoryPageStore, PageStore, StoreResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum undo steps; `None` keeps everything.
    pub history_limit: Option<usize>,
    pub unknown_keys: UnknownKeyPolicy,
    /// Root directory for the JSON-file page store. `None` keeps pages in memory.
    pub store_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            unknown_keys: UnknownKeyPolicy::default(),
            store_dir: None,
        }
    }
}

impl SessionConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Read a config file. A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let config = Self::from_ron_str(&text)?;
                tracing::info!(path = %path.display(), "loaded session config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no session config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The part of the config the editor itself cares about.
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
            unknown_keys: self.unknown_keys,
        }
    }

    /// Open the page store this config names.
    pub async fn open_store(&self) -> StoreResult<Arc<dyn PageStore>> {
        match &self.store_dir {
            Some(dir) => {
                let store = JsonFilePageStore::open(dir).await?;
                tracing::debug!(root = %dir.display(), "opened json-file page store");
                Ok(Arc::new(store))
            }
            None => {
                tracing::debug!("no store_dir configured, pages are kept in memory");
                Ok(Arc::new(MemoryPageStore::new()))
            }
        }
    }
}
