//! Uploaded attachments on the local filesystem.

use std::{io::ErrorKind, path::PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// URL prefix every media reference starts with.
pub const MEDIA_PREFIX: &str = "/uploads/";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media file not found")]
    NotFound,

    #[error("media io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Deleted,
    AlreadyAbsent,
    /// Logged and swallowed.
    Failed,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Writes the payload under its sanitized name and returns its reference.
    /// An absent payload, or one without a file name, stores nothing.
    ///
    /// Uploads sharing a sanitized name overwrite each other.
    pub async fn store(&self, upload: Option<Upload>) -> Result<Option<String>, MediaError> {
        let Some(upload) = upload.filter(|u| !u.file_name.is_empty()) else {
            return Ok(None);
        };

        let mut file_name = sanitize_filename(&upload.file_name);
        if file_name.is_empty() {
            file_name = format!("upload-{}", Uuid::new_v4());
        }

        self.ensure_dir().await?;
        fs::write(self.dir.join(&file_name), &upload.bytes).await?;

        info!("Stored upload {} ({} bytes)", file_name, upload.bytes.len());
        Ok(Some(format!("{MEDIA_PREFIX}{file_name}")))
    }

    /// Best-effort delete of the file behind `reference`. Never fails the caller.
    pub async fn remove(&self, reference: &str) -> RemoveOutcome {
        let Some(path) = self.resolve_reference(reference) else {
            return RemoveOutcome::AlreadyAbsent;
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed media file {}", path.display());
                RemoveOutcome::Deleted
            }
            Err(e) if e.kind() == ErrorKind::NotFound => RemoveOutcome::AlreadyAbsent,
            Err(e) => {
                warn!("Could not delete file {}: {}", path.display(), e);
                RemoveOutcome::Failed
            }
        }
    }

    pub async fn serve(&self, name: &str) -> Result<Vec<u8>, MediaError> {
        if !is_plain_file_name(name) {
            return Err(MediaError::NotFound);
        }

        match fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(MediaError::NotFound),
            Err(e) if e.kind() == ErrorKind::IsADirectory => Err(MediaError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_reference(&self, reference: &str) -> Option<PathBuf> {
        let name = reference.strip_prefix(MEDIA_PREFIX)?;
        is_plain_file_name(name).then(|| self.dir.join(name))
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && sanitize_filename(name) == name
}

/// Reduces a client-supplied file name to `[A-Za-z0-9_.-]`, with no path
/// components and no leading or trailing `.`/`_`. Accented letters fold to
/// their ASCII base (`café` becomes `cafe`).
pub fn sanitize_filename(name: &str) -> String {
    let spaced: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "ogg" => "video/ogg",
        _ => "application/octet-stream",
    }
}
