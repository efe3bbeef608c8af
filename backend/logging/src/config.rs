//! Logger configuration and the on-disk artifact layout derived from it.

use std::path::{PathBuf, MAIN_SEPARATOR};

use rotalog_core::{Persistence, Severity};
use serde::{Deserialize, Serialize};

/// Base name used when none is configured.
pub const DEFAULT_NAME: &str = "errors";

/// Bytes per configured megabyte.
pub const BYTES_PER_MB: u64 = 1_000_000;

const BACKUP_SUFFIX: &str = "_bkp";
const LOG_EXTENSION: &str = "log";
const ARCHIVE_EXTENSION: &str = "zip";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Base file name, without extension.
    pub name: String,
    /// Directory holding the log files. Empty means the current directory.
    pub directory: String,
    /// Most verbose severity admitted. Alerts always pass.
    pub level: Severity,
    /// Rotation threshold in megabytes. `0` disables file output entirely.
    pub size_mb: u64,
    pub persistence: Persistence,
    /// Whether Info records carry their call site.
    pub info_location: bool,
    /// ANSI colors on console copies.
    pub color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            directory: String::new(),
            level: Severity::Debug,
            size_mb: 0,
            persistence: Persistence::Urgent,
            info_location: true,
            color: false,
        }
    }
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_size_mb(mut self, size_mb: u64) -> Self {
        self.size_mb = size_mb;
        self
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Fill in the default name and directory and make the directory end with a
    /// path separator.
    pub fn normalized(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = DEFAULT_NAME.to_string();
        }
        if self.directory.is_empty() {
            self.directory = format!(".{MAIN_SEPARATOR}");
        } else if !self.directory.ends_with(['/', MAIN_SEPARATOR]) {
            self.directory.push(MAIN_SEPARATOR);
        }
        self
    }

    pub fn threshold_bytes(&self) -> u64 {
        self.size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn paths(&self) -> LogPaths {
        LogPaths::new(&self.directory, &self.name)
    }
}

/// Locations of the active log, its rotated backup and the backup's archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPaths {
    pub active: PathBuf,
    pub backup: PathBuf,
    pub archive: PathBuf,
}

impl LogPaths {
    pub fn new(directory: &str, name: &str) -> Self {
        let base = PathBuf::from(directory);
        let backup = base.join(format!("{name}{BACKUP_SUFFIX}.{LOG_EXTENSION}"));
        Self {
            active: base.join(format!("{name}.{LOG_EXTENSION}")),
            archive: archive_path_for(&backup),
            backup,
        }
    }

    pub fn all(&self) -> [&PathBuf; 3] {
        [&self.active, &self.backup, &self.archive]
    }
}

/// `<file>.zip` next to `file`.
pub fn archive_path_for(path: &std::path::Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}
