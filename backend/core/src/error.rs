use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the file-facing operations of the logger.
///
/// Logging calls themselves never return these; only `append`, `archive` and the
/// stale-file cleanup do.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("cannot open log file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot write log file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot stat log file {path}: {source}")]
    Stat { path: PathBuf, source: io::Error },

    #[error("cannot rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("cannot remove {path} after {attempts} attempts: {source}")]
    Remove {
        path: PathBuf,
        attempts: u32,
        source: io::Error,
    },

    #[error("cannot archive {path}: {source}")]
    Archive { path: PathBuf, source: io::Error },
}

impl LogError {
    /// Path of the file the failing operation was working on.
    pub fn path(&self) -> &PathBuf {
        match self {
            LogError::Open { path, .. }
            | LogError::Write { path, .. }
            | LogError::Stat { path, .. }
            | LogError::Remove { path, .. }
            | LogError::Archive { path, .. } => path,
            LogError::Rename { from, .. } => from,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_cause() {
        let err = LogError::Remove {
            path: PathBuf::from("logs/errors.log"),
            attempts: 3,
            source: io::Error::new(io::ErrorKind::PermissionDenied, "busy"),
        };
        let text = err.to_string();
        assert!(text.contains("logs/errors.log"));
        assert!(text.contains("3 attempts"));
        assert!(text.contains("busy"));
    }

    #[test]
    fn rename_reports_source_path() {
        let err = LogError::Rename {
            from: PathBuf::from("a.log"),
            to: PathBuf::from("a_bkp.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.path(), &PathBuf::from("a.log"));
    }
}
