//! `rotalog cleanup`: remove the files a logger with this configuration would own.

use std::path::PathBuf;

use anyhow::Result;
use rotalog::{FileSink, LoggerConfig};

pub async fn run(config: LoggerConfig, retries: u32) -> Result<()> {
    for (path, existed) in cleanup(config, retries)? {
        let outcome = if existed { "removed" } else { "absent" };
        println!("  {outcome:<8} {}", path.display());
    }
    Ok(())
}

/// Remove the active, backup and archive files, reporting which of them existed.
fn cleanup(config: LoggerConfig, retries: u32) -> Result<Vec<(PathBuf, bool)>> {
    let config = config.normalized();
    let sink = FileSink::new(config.paths(), config.threshold_bytes());
    let found: Vec<(PathBuf, bool)> = sink
        .paths()
        .all()
        .into_iter()
        .map(|path| (path.clone(), path.exists()))
        .collect();

    sink.remove_stale_files(retries)?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reports_only_existing_files_as_removed() {
        let dir = std::env::temp_dir().join(format!("rotalog-cli-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let config = LoggerConfig::new("errors", dir.to_string_lossy());
        fs::write(dir.join("errors.log"), b"old").unwrap();

        let report = cleanup(config, 1).unwrap();

        let existed: Vec<bool> = report.iter().map(|(_, existed)| *existed).collect();
        assert_eq!(existed, vec![true, false, false]);
        assert!(report.iter().all(|(path, _)| !path.exists()));
        fs::remove_dir_all(dir).unwrap();
    }
}
