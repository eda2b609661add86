//! Record files in JSON Lines format, one record per line.
//!
//! New records are appended; edits and deletes rewrite the whole file
//! through a sibling temp file that is renamed into place.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// The kinds of record the store keeps, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Profile,
    Game,
}

impl RecordKind {
    pub fn file_name(self) -> &'static str {
        match self {
            RecordKind::Profile => "profiles.jsonl",
            RecordKind::Game => "games.jsonl",
        }
    }

    pub fn path(self, config: &StorageConfig) -> PathBuf {
        config.records_dir().join(self.file_name())
    }
}

/// A typed handle on one JSONL file.
pub struct RecordFile<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> RecordFile<T> {
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn of(config: &StorageConfig, kind: RecordKind) -> Self {
        Self::at(kind.path(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_parent(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(dir) => Ok(fs::create_dir_all(dir)?),
            None => Ok(()),
        }
    }
}

impl<T: DeserializeOwned> RecordFile<T> {
    /// Load every record. A missing file is empty; lines that fail to
    /// parse are logged and dropped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping {:?} line {}: {}", self.path, number + 1, e),
            }
        }

        debug!("Loaded {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

impl<T: Serialize> RecordFile<T> {
    pub fn append(&self, record: &T) -> Result<(), StorageError> {
        self.create_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        file.write_all(&line)?;
        Ok(())
    }

    /// Replace the file's contents with `records`.
    pub fn write_all(&self, records: &[T]) -> Result<usize, StorageError> {
        self.create_parent()?;
        let staging = self.path.with_extension("jsonl.tmp");

        let mut out = BufWriter::new(File::create(&staging)?);
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.into_inner().map_err(|e| e.into_error())?.sync_all()?;

        fs::rename(&staging, &self.path)?;
        debug!("Rewrote {:?} with {} records", self.path, records.len());
        Ok(records.len())
    }
}
