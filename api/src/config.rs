use std::{env, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub posts_file: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            posts_file: PathBuf::from("posts.json"),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "MAX_UPLOAD_BYTES",
                    value,
                })?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            posts_file: lookup("POSTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.posts_file),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes,
        })
    }
}
