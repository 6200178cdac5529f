//! Storage layer for spendtrack
//!
//! The whole tracker lives in one JSON file. Saves go through a temp file in
//! the same directory and a rename, so a failed write leaves the previous
//! file intact.

pub mod snapshot;

pub use snapshot::{CategoryEntry, RecordEntry, TrackerFile};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::services::{CategoryRegistry, RecordStore};

/// Reads and writes the tracker file under the configured data directory
pub struct Storage {
    paths: TrackerPaths,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TrackerPaths) -> TrackerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load the registry and store; a missing file yields an empty tracker
    pub fn load(&self) -> TrackerResult<(CategoryRegistry, RecordStore)> {
        let (registry, store) = self.read_tracker_file()?.restore()?;
        info!(
            path = %self.paths.tracker_file().display(),
            categories = registry.len(),
            records = store.len(),
            "loaded tracker"
        );
        Ok((registry, store))
    }

    /// Persist the registry and store
    pub fn save(&self, registry: &CategoryRegistry, store: &RecordStore) -> TrackerResult<()> {
        self.write_tracker_file(&TrackerFile::capture(registry, store))?;
        info!(
            path = %self.paths.tracker_file().display(),
            records = store.len(),
            "saved tracker"
        );
        Ok(())
    }

    fn read_tracker_file(&self) -> TrackerResult<TrackerFile> {
        let path = self.paths.tracker_file();
        if !path.exists() {
            return Ok(TrackerFile::default());
        }

        let file = File::open(&path).map_err(|e| {
            TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn write_tracker_file(&self, file: &TrackerFile) -> TrackerResult<()> {
        self.paths.ensure_directories()?;
        let path = self.paths.tracker_file();
        let temp_path = temp_path_for(&path);

        let result = write_synced(&temp_path, file).and_then(|()| {
            fs::rename(&temp_path, &path).map_err(|e| {
                TrackerError::Storage(format!("Failed to replace {}: {}", path.display(), e))
            })
        });
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

fn write_synced(path: &Path, file: &TrackerFile) -> TrackerResult<()> {
    let handle = File::create(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(handle);
    serde_json::to_writer_pretty(&mut writer, file)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize tracker: {}", e)))?;
    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush tracker: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync tracker: {}", e)))
}
