//! Whole-collection JSON persistence.
//!
//! Every operation reads the full document and, if it mutates, rewrites the
//! full document. Reads are lenient: a missing, empty or corrupt document is
//! treated as an empty collection.

use crate::models::Post;
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write post document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize posts: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save contract the post service is built on.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Never fails; unreadable documents yield an empty collection.
    async fn load(&self) -> Vec<Post>;

    async fn save(&self, posts: &[Post]) -> Result<(), StoreError>;
}

/// Stores the collection as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
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
            .unwrap_or_else(|| "posts.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PostStore for JsonFileStore {
    async fn load(&self) -> Vec<Post> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice(&raw) {
            Ok(posts) => posts,
            // One bad record rejects the whole document.
            Err(e) => {
                warn!(
                    "Ignoring unparseable post document {}: {}; the next write will replace every post in it",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(posts)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Write beside the target, then swap it in with a rename.
        let tmp = self.temp_path();
        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!("Saved {} posts to {}", posts.len(), self.path.display());
        Ok(())
    }
}
