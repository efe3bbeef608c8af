//! `rotalog stress`: fill the log past its threshold and report the result.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use rotalog::{log_alert, Logger, LoggerConfig};
use tracing::info;

const ARCHIVE_WAIT: Duration = Duration::from_secs(30);

pub async fn run(config: LoggerConfig, count: u64, workers: u64) -> Result<()> {
    if workers == 0 {
        bail!("--workers must be at least 1");
    }
    let config = if config.size_mb == 0 {
        config.with_size_mb(1)
    } else {
        config
    };
    let logger = Logger::new(config);
    let started = Instant::now();

    let per_worker = count / workers;
    let mut handles = Vec::new();
    for worker in 0..workers {
        let logger = logger.clone();
        let first = worker * per_worker;
        let last = if worker + 1 == workers { count } else { first + per_worker };
        handles.push(tokio::task::spawn_blocking(move || {
            for n in first..last {
                log_alert!(logger, "x%d", n);
            }
        }));
    }
    for handle in handles {
        handle.await.context("writer task panicked")?;
    }
    info!(count, workers, elapsed_ms = started.elapsed().as_millis() as u64, "Writers finished");

    let deadline = Instant::now() + ARCHIVE_WAIT;
    while logger.archive_in_flight() {
        if Instant::now() > deadline {
            bail!("archive still running after {}s", ARCHIVE_WAIT.as_secs());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let paths = logger.paths();
    println!();
    println!("Stress run: {count} records, {workers} writer(s), {:.2?}", started.elapsed());
    println!("  {:<8} {}", "active", describe(&paths.active));
    println!("  {:<8} {}", "backup", describe(&paths.backup));
    println!("  {:<8} {}", "archive", describe(&paths.archive));
    Ok(())
}

fn describe(path: &Path) -> String {
    match fs::metadata(path) {
        Ok(meta) => format!("{} ({} bytes)", path.display(), meta.len()),
        Err(_) => format!("{} (absent)", path.display()),
    }
}
