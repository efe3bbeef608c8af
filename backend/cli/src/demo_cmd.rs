//! `rotalog demo`: one record of each kind through the process-wide logger.

use anyhow::{Context, Result};
use rotalog::{
    global, install, log_alert, log_debug, log_info, log_print, log_warning, Logger, LoggerConfig,
};

pub async fn run(config: LoggerConfig) -> Result<()> {
    install(Logger::new(config));
    let logger = global().context("global logger not installed")?;

    log_print!(logger, "input text");
    log_debug!(logger, "hello test %s", "one");
    log_info!(logger, "hello test %s", "two");
    log_info!(logger, "value=%d ratio=%.2f", 7, 0.25);
    log_warning!(logger, "hello test %s", "three");
    log_warning!(logger, "disk at %d%%", 91);
    log_alert!(logger, "hello test %s", "four");
    log_alert!(logger, "%s failed after %d attempts", "upload", 3);

    let active = &logger.paths().active;
    if active.exists() {
        println!();
        println!("Persisted records: {}", active.display());
    }
    Ok(())
}
