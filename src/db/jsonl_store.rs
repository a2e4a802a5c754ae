use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{EventStore, StoreError};
use crate::models::tracking_event::TrackingEvent;

pub const LOG_FILE_NAME: &str = "events.jsonl";

/// Newline-delimited JSON log, one event per line, append only
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        // An unusable directory only shows up as failed appends later on
        if let Err(e) = fs::create_dir_all(dir) {
            log::warn!("Could not create data directory {}: {}", dir.display(), e);
        }

        Self {
            path: dir.join(LOG_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonlStore {
    fn append(&self, event: &TrackingEvent) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Single write so a record never interleaves with another
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TrackingEvent>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    log::debug!("Skipping non UTF-8 line {} in {}", idx + 1, self.path.display());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<TrackingEvent>(&line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    log::debug!("Skipping malformed line {} in {}: {}", idx + 1, self.path.display(), e);
                }
            }
        }

        Ok(events)
    }

    fn ping(&self) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let meta = fs::metadata(dir)?;
        if !meta.is_dir() {
            return Err(StoreError::Io(std::io::Error::other(format!(
                "{} is not a directory",
                dir.display()
            ))));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("jsonl:{}", self.path().display())
    }
}
