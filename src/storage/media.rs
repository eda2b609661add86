//! Picture attachments stored in the media directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::EntityId;

/// Copy a picture into the media directory and return its stored path.
///
/// The stored name is derived from the source path and import time, so
/// importing the same file twice yields two attachments.
pub fn import_picture(config: &StorageConfig, source: &Path) -> Result<PathBuf, StorageError> {
    if !source.is_file() {
        return Err(StorageError::InvalidPath(source.display().to_string()));
    }

    let media_dir = config.media_dir();
    fs::create_dir_all(&media_dir)?;

    let source_str = source.to_string_lossy();
    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string();
    let id = EntityId::generate(&[&source_str, &stamp]);
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "jpg".to_string());

    let destination = media_dir.join(format!("{}.{}", id, extension));
    fs::copy(source, &destination)?;

    info!("Imported picture {:?} as {:?}", source, destination);
    Ok(destination)
}

/// Whether `path` names a file directly inside the media directory.
///
/// Only plain file names are accepted after the media prefix, so `..`
/// and nested directories cannot escape it.
pub fn is_media_path(config: &StorageConfig, path: &Path) -> bool {
    let media_dir = config.media_dir();
    let Ok(rest) = path.strip_prefix(&media_dir) else {
        return false;
    };
    let mut components = rest.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Delete stored pictures. Paths outside the media directory are left
/// alone; failures are logged and skipped.
pub fn delete_pictures(config: &StorageConfig, paths: &[String]) -> usize {
    let mut deleted = 0;

    for path in paths {
        let path = Path::new(path);
        if !is_media_path(config, path) {
            warn!("Not deleting {:?}: outside media directory", path);
            continue;
        }
        if !path.exists() {
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => deleted += 1,
            Err(e) => warn!("Failed to delete picture {:?}: {}", path, e),
        }
    }

    if deleted > 0 {
        debug!("Deleted {} pictures", deleted);
    }
    deleted
}
