//! Filesystem storage.
//!
//! Handles reading and writing the local data directory:
//! - Profile and game records as JSONL files
//! - Picture attachments in the media directory

mod jsonl;
pub mod media;
mod repository;

pub use jsonl::*;
pub use repository::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::GameValidationError;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid game: {0}")]
    Validation(#[from] GameValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl StorageError {
    pub fn game_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "Game",
            id: id.to_string(),
        }
    }

    pub fn profile_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "Profile",
            id: id.to_string(),
        }
    }
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join("records")
    }

    pub fn media_dir(&self) -> PathBuf {
        self.data_dir.join("media")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.records_dir(), PathBuf::from("/data/records"));
        assert_eq!(config.media_dir(), PathBuf::from("/data/media"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_not_found_message() {
        let err = StorageError::game_not_found("abc");
        assert_eq!(err.to_string(), "Game not found: abc");
    }
}
