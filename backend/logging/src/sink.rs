//! The on-disk log file: append, measure, rotate.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rotalog_core::{LogError, Result};
use tracing::{debug, info, warn};

use crate::archive::remove_with_retry;
use crate::config::LogPaths;

/// Result of a single append.
#[derive(Debug)]
pub struct Appended {
    /// Size of the active file after the write; `0` when persistence is disabled.
    pub size: u64,
    /// Set when this append pushed the file over the threshold and it was renamed.
    pub rotation: Option<Rotation>,
}

/// A rotated backup awaiting compression.
///
/// While a `Rotation` is alive no further rotation happens, so the backup cannot be
/// overwritten mid-archive. Dropping it re-enables rotation.
#[derive(Debug)]
pub struct Rotation {
    pub backup: PathBuf,
    _in_flight: InFlight,
}

#[derive(Debug)]
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Default)]
struct SinkState {
    file: Option<File>,
}

pub struct FileSink {
    paths: LogPaths,
    threshold: u64,
    state: Mutex<SinkState>,
    archiving: Arc<AtomicBool>,
}

impl FileSink {
    /// `threshold` in bytes; `0` turns every append into a no-op.
    pub fn new(paths: LogPaths, threshold: u64) -> Self {
        Self {
            paths,
            threshold,
            state: Mutex::new(SinkState::default()),
            archiving: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn paths(&self) -> &LogPaths {
        &self.paths
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn is_enabled(&self) -> bool {
        self.threshold > 0
    }

    /// Whether a rotated backup is still being archived.
    pub fn archive_in_flight(&self) -> bool {
        self.archiving.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `line` plus a newline. Renames the file to the backup name once it
    /// grows past the threshold; the caller is responsible for archiving the
    /// returned [`Rotation`].
    pub fn append(&self, line: &str) -> Result<Appended> {
        if !self.is_enabled() {
            return Ok(Appended {
                size: 0,
                rotation: None,
            });
        }

        let mut state = self.lock();
        let mut file = match state.file.take() {
            Some(file) => file,
            None => open_active(&self.paths.active)?,
        };

        file.write_all(line.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .map_err(|source| LogError::Write {
                path: self.paths.active.clone(),
                source,
            })?;

        let size = match file.metadata() {
            Ok(meta) => meta.len(),
            Err(source) => {
                state.file = Some(file);
                return Err(LogError::Stat {
                    path: self.paths.active.clone(),
                    source,
                });
            }
        };

        if size <= self.threshold {
            state.file = Some(file);
            return Ok(Appended {
                size,
                rotation: None,
            });
        }

        if self.archiving.swap(true, Ordering::AcqRel) {
            debug!(size, "Previous archive still running; deferring rotation");
            state.file = Some(file);
            return Ok(Appended {
                size,
                rotation: None,
            });
        }
        let in_flight = InFlight(Arc::clone(&self.archiving));

        drop(file);
        let rotation = self.rotate(size, in_flight)?;
        Ok(Appended {
            size,
            rotation: Some(rotation),
        })
    }

    /// Hand back an archived [`Rotation`].
    ///
    /// Appends made while the archive ran may have pushed the active file past the
    /// threshold without rotating it. In that case the file is rotated now and the
    /// new backup is returned under the same guard, so no oversized file is left
    /// behind once archiving stops.
    pub fn release(&self, rotation: Rotation) -> Result<Option<Rotation>> {
        let Rotation { _in_flight: in_flight, .. } = rotation;
        let mut state = self.lock();

        // The flag must be cleared before the lock is released.
        let size = match fs::metadata(&self.paths.active) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(source) => {
                drop(in_flight);
                return Err(LogError::Stat {
                    path: self.paths.active.clone(),
                    source,
                });
            }
        };
        if size <= self.threshold {
            drop(in_flight);
            return Ok(None);
        }

        debug!(size, "Rotating records deferred during archive");
        state.file = None;
        self.rotate(size, in_flight).map(Some)
    }

    /// Rename the active file to the backup name. The active handle must already be
    /// closed and the sink lock held.
    fn rotate(&self, size: u64, in_flight: InFlight) -> Result<Rotation> {
        if self.paths.backup.exists() {
            warn!(
                backup = %self.paths.backup.display(),
                "Replacing a backup that was never archived"
            );
        }
        fs::rename(&self.paths.active, &self.paths.backup).map_err(|source| LogError::Rename {
            from: self.paths.active.clone(),
            to: self.paths.backup.clone(),
            source,
        })?;
        info!(
            size,
            threshold = self.threshold,
            backup = %self.paths.backup.display(),
            "Rotated log file"
        );

        Ok(Rotation {
            backup: self.paths.backup.clone(),
            _in_flight: in_flight,
        })
    }

    /// Delete the active, backup and archive files left by a previous run.
    ///
    /// Every file is attempted; the first failure is returned.
    pub fn remove_stale_files(&self, retries: u32) -> Result<()> {
        let mut state = self.lock();
        state.file = None;

        let mut first_error = None;
        for path in self.paths.all() {
            if let Err(e) = remove_with_retry(path, retries) {
                warn!(error = %e, "Could not remove stale log file");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Open the active file for appending, creating it when it does not exist yet.
fn open_active(path: &Path) -> Result<File> {
    match OpenOptions::new().append(true).open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            }),
        Err(source) => Err(LogError::Open {
            path: path.to_path_buf(),
            source,
        }),
    }
}
