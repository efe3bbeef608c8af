use std::path::Path;

use anyhow::{Context, Result};
use rotalog::{Logger, LoggerConfig};

/// `rotalog archive <path>`: compress a single file on demand. The resulting Alert
/// goes through a logger built from `config`, which leaves existing log files alone.
pub async fn run(config: LoggerConfig, path: &Path) -> Result<()> {
    let logger = Logger::builder(config).keep_existing_files().build();
    let owned = path.to_path_buf();
    let archive = tokio::task::spawn_blocking(move || logger.archive(&owned))
        .await
        .context("archive task panicked")?
        .with_context(|| format!("Failed to archive {}", path.display()))?;

    println!("Archived {} -> {}", path.display(), archive.display());
    Ok(())
}
