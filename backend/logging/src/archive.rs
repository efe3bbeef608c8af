//! Compression of rotated log files into single-entry zip archives.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use rotalog_core::{LogError, Result};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::archive_path_for;

/// Delay between attempts to delete a file that is still in use.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Retries when clearing the previous archive or the archived backup.
pub const ARCHIVE_REMOVE_RETRIES: u32 = 5;

/// Delete `path`, retrying up to `retries` more times. A missing file counts as removed.
pub fn remove_with_retry(path: &Path, retries: u32) -> Result<()> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) if attempts > retries => {
                return Err(LogError::Remove {
                    path: path.to_path_buf(),
                    attempts,
                    source,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), attempts, error = %e, "Remove failed; retrying");
                thread::sleep(RETRY_BACKOFF);
            }
        }
    }
}

/// Compress `path` into `<path>.zip` and delete `path`.
///
/// Any archive already at that name is removed first. The zip holds one deflated
/// entry named after the file. Returns the archive path.
pub fn archive_file(path: &Path) -> Result<PathBuf> {
    let archive_path = archive_path_for(path);
    remove_with_retry(&archive_path, ARCHIVE_REMOVE_RETRIES)?;

    let mut source = File::open(path).map_err(|source| LogError::Archive {
        path: path.to_path_buf(),
        source,
    })?;
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let fail = |source: io::Error| LogError::Archive {
        path: archive_path.clone(),
        source,
    };

    let out = File::create(&archive_path).map_err(fail)?;
    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(entry_name, options)
        .map_err(|e| fail(io::Error::other(e)))?;
    let copied = io::copy(&mut source, &mut zip).map_err(fail)?;
    zip.finish()
        .map_err(|e| fail(io::Error::other(e)))?
        .sync_all()
        .map_err(fail)?;
    drop(source);

    debug!(path = %path.display(), archive = %archive_path.display(), bytes = copied, "Archived log file");
    remove_with_retry(path, ARCHIVE_REMOVE_RETRIES)?;
    Ok(archive_path)
}
