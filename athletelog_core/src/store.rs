//! Whole-file JSON persistence for the workout log.
//!
//! The log lives in a single pretty-printed JSON array. Every append reads the
//! whole file, pushes the new entry, and rewrites the file through a temp file
//! that is renamed over the original, so readers only ever see a complete log.
//!
//! There is no cross-process serialisation of appends: two `add` invocations
//! racing on the same file can lose one of the entries.

use crate::{Error, Result, Workout, WorkoutLog};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the log inside the data directory
pub const STORE_FILE_NAME: &str = "workouts.json";

/// Persistent workout log backed by one JSON file
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at `<data_dir>/workouts.json`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(STORE_FILE_NAME))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full log with shared locking.
    ///
    /// A missing or zero-byte file is an empty log. Anything else that does
    /// not decode is reported as [`Error::CorruptStore`].
    pub fn load(&self) -> Result<WorkoutLog> {
        if !self.path.exists() {
            tracing::debug!("No workout log at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        if contents.is_empty() {
            tracing::debug!("Workout log at {:?} is empty", self.path);
            return Ok(Vec::new());
        }

        let log: WorkoutLog =
            serde_json::from_str(&contents).map_err(|source| Error::CorruptStore {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Loaded {} workouts from {:?}", log.len(), self.path);
        Ok(log)
    }

    /// Read-only view of the log
    pub fn list(&self) -> Result<WorkoutLog> {
        self.load()
    }

    /// Append one workout and rewrite the whole file
    pub fn append(&self, workout: Workout) -> Result<()> {
        let mut log = self.load()?;
        log.push(workout);
        self.save(&log)?;
        tracing::info!("Appended workout #{} to {:?}", log.len(), self.path);
        Ok(())
    }

    /// Atomically replace the file contents with `log`:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    fn save(&self, log: &[Workout]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let contents = serde_json::to_string_pretty(log).map_err(Error::Encode)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} workouts to {:?}", log.len(), self.path);
        Ok(())
    }
}
