//! Logger facade
//!
//! Wires the severity gate, formatter, console and file sink together and hands
//! rotated backups to the archiver on a background task.

use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use rotalog_core::{CallerResolver, ConsoleWriter, LogValue, Result, Severity};
use tracing::{error, warn};

use crate::archive::archive_file;
use crate::caller::TrackedCallerResolver;
use crate::config::{LogPaths, LoggerConfig};
use crate::console::{colorize, StdoutConsole};
use crate::formatter::Formatter;
use crate::gate::Gate;
use crate::sink::{FileSink, Rotation};

/// Retries used when clearing files from a previous run at startup.
pub const STARTUP_REMOVE_RETRIES: u32 = 3;

static GLOBAL: RwLock<Option<Logger>> = RwLock::new(None);

/// Cheaply clonable handle to a logger instance.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    config: LoggerConfig,
    gate: Gate,
    formatter: Formatter,
    console: Arc<dyn ConsoleWriter>,
    sink: FileSink,
}

pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Arc<dyn ConsoleWriter>,
    resolver: Arc<dyn CallerResolver>,
    clear_stale: bool,
}

impl LoggerBuilder {
    pub fn with_console(mut self, console: Arc<dyn ConsoleWriter>) -> Self {
        self.console = console;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Leave files from a previous run in place instead of deleting them on build.
    pub fn keep_existing_files(mut self) -> Self {
        self.clear_stale = false;
        self
    }

    /// Build the logger and, unless [`keep_existing_files`](Self::keep_existing_files)
    /// was called, clear log, backup and archive files left by a previous run. Cleanup
    /// failures are reported through `tracing` and do not prevent construction.
    pub fn build(self) -> Logger {
        let config = self.config.normalized();
        let sink = FileSink::new(config.paths(), config.threshold_bytes());

        if sink.is_enabled() {
            if let Err(e) = fs::create_dir_all(&config.directory) {
                warn!(directory = %config.directory, error = %e, "Cannot create log directory");
            }
        }
        if self.clear_stale {
            if let Err(e) = sink.remove_stale_files(STARTUP_REMOVE_RETRIES) {
                warn!(error = %e, "Stale log files left in place");
            }
        }

        Logger {
            inner: Arc::new(Inner {
                gate: Gate::new(config.level, config.persistence),
                formatter: Formatter::new(self.resolver, config.info_location),
                console: self.console,
                sink,
                config,
            }),
        }
    }
}

impl Logger {
    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder {
            config,
            console: Arc::new(StdoutConsole),
            resolver: Arc::new(TrackedCallerResolver),
            clear_stale: true,
        }
    }

    pub fn new(config: LoggerConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.inner.config
    }

    pub fn paths(&self) -> &LogPaths {
        self.inner.sink.paths()
    }

    /// Untagged output, shown at Debug verbosity and never written to file.
    #[track_caller]
    pub fn print(&self, template: &str, args: &[LogValue]) {
        self.emit(None, Location::caller(), template, args);
    }

    #[track_caller]
    pub fn debug(&self, template: &str, args: &[LogValue]) {
        self.emit(Some(Severity::Debug), Location::caller(), template, args);
    }

    #[track_caller]
    pub fn info(&self, template: &str, args: &[LogValue]) {
        self.emit(Some(Severity::Info), Location::caller(), template, args);
    }

    #[track_caller]
    pub fn warning(&self, template: &str, args: &[LogValue]) {
        self.emit(Some(Severity::Warning), Location::caller(), template, args);
    }

    /// Urgent record; emitted whatever the configured level.
    #[track_caller]
    pub fn alert(&self, template: &str, args: &[LogValue]) {
        self.emit(Some(Severity::Alert), Location::caller(), template, args);
    }

    #[track_caller]
    pub fn log(&self, severity: Severity, template: &str, args: &[LogValue]) {
        self.emit(Some(severity), Location::caller(), template, args);
    }

    fn emit(
        &self,
        severity: Option<Severity>,
        site: &'static Location<'static>,
        template: &str,
        args: &[LogValue],
    ) {
        let inner = &self.inner;
        let admitted = match severity {
            Some(severity) => inner.gate.console(severity),
            None => inner.gate.print(),
        };
        if !admitted {
            return;
        }

        let line = inner.formatter.format(severity, site, template, args);
        if inner.config.color {
            inner.console.write_line(&colorize(severity, &line));
        } else {
            inner.console.write_line(&line);
        }

        if let Some(severity) = severity {
            if inner.gate.persist(severity) {
                self.persist(&line);
            }
        }
    }

    fn persist(&self, line: &str) {
        match self.inner.sink.append(line) {
            Ok(appended) => {
                if let Some(rotation) = appended.rotation {
                    self.dispatch_archive(rotation);
                }
            }
            Err(e) => warn!(error = %e, "Log record not persisted"),
        }
    }

    /// Archive a rotated backup without blocking the caller. Uses the blocking
    /// pool of the current Tokio runtime when there is one, a detached thread
    /// otherwise. The outcome is only visible through this logger's alerts.
    fn dispatch_archive(&self, rotation: Rotation) {
        let logger = self.clone();
        let job = move || logger.finish_rotation(rotation);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                if let Err(e) = thread::Builder::new()
                    .name("rotalog-archive".into())
                    .spawn(job)
                {
                    error!(error = %e, "Cannot start archive thread");
                }
            }
        }
    }

    /// Archive `rotation`, then keep archiving while records deferred during the
    /// previous archive leave the active file over the threshold.
    fn finish_rotation(&self, rotation: Rotation) {
        let mut pending = Some(rotation);
        while let Some(rotation) = pending.take() {
            if let Err(e) = self.archive(&rotation.backup) {
                error!(error = %e, "Archiving rotated log failed");
                self.alert("archive of %s failed: %v", &[
                    LogValue::display(&rotation.backup.display()),
                    LogValue::display(&e),
                ]);
            }
            pending = match self.inner.sink.release(rotation) {
                Ok(next) => next,
                Err(e) => {
                    warn!(error = %e, "Deferred rotation not performed");
                    None
                }
            };
        }
    }

    /// Compress `path` into `<path>.zip`, delete `path` and announce the archive
    /// with an Alert record.
    pub fn archive(&self, path: &Path) -> Result<PathBuf> {
        let archive = archive_file(path)?;
        self.alert("log archived to %s", &[LogValue::display(&archive.display())]);
        Ok(archive)
    }

    /// Delete this logger's active, backup and archive files.
    pub fn remove_stale_files(&self, retries: u32) -> Result<()> {
        self.inner.sink.remove_stale_files(retries)
    }

    /// Whether a rotated backup is still being compressed in the background.
    pub fn archive_in_flight(&self) -> bool {
        self.inner.sink.archive_in_flight()
    }
}

/// Build a logger from the classic positional settings and install it as the
/// process-wide instance, replacing any previous one.
///
/// `level` is clamped into `1..=4`; `size_mb == 0` disables file output.
pub fn create_logger(name: &str, directory: &str, level: u8, size_mb: u64) -> Logger {
    let config = LoggerConfig::new(name, directory)
        .with_level(Severity::clamp_level(level))
        .with_size_mb(size_mb);
    let logger = Logger::new(config);
    install(logger.clone());
    logger
}

/// Make `logger` the process-wide instance returned by [`global`].
pub fn install(logger: Logger) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Some(logger);
}

pub fn global() -> Option<Logger> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;

    fn scratch_config(size_mb: u64) -> (PathBuf, LoggerConfig) {
        let dir = std::env::temp_dir().join(format!("rotalog-logger-{}", uuid::Uuid::new_v4()));
        let config = LoggerConfig::new("errors", dir.to_string_lossy()).with_size_mb(size_mb);
        (dir, config)
    }

    fn with_memory(config: LoggerConfig) -> (Logger, Arc<MemoryConsole>) {
        let console = Arc::new(MemoryConsole::new());
        let logger = Logger::builder(config)
            .with_console(console.clone())
            .build();
        (logger, console)
    }

    #[test]
    fn gate_decides_console_emission() {
        let (dir, config) = scratch_config(0);
        let (logger, console) = with_memory(config.with_level(Severity::Warning));

        logger.print("input text", &[]);
        logger.debug("hidden", &[]);
        logger.info("hello test %s", &["one".into()]);
        logger.warning("hello test %s", &["three".into()]);
        logger.alert("hello test %s", &["five".into()]);

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("WARNING hello test three"));
        assert!(lines[1].ends_with("ALERT hello test five"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn print_is_console_only() {
        let (dir, config) = scratch_config(1);
        let (logger, console) = with_memory(config);

        logger.print("input text", &[]);
        logger.info("two", &[]);

        assert_eq!(console.lines().len(), 2);
        assert!(!logger.paths().active.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn warning_and_alert_reach_the_file() {
        let (dir, config) = scratch_config(1);
        let (logger, _console) = with_memory(config);

        logger.warning("four", &[]);
        logger.alert("six", &[]);
        logger.debug("not stored", &[]);

        let stored = fs::read_to_string(&logger.paths().active).unwrap();
        let lines: Vec<&str> = stored.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("WARNING four"));
        assert!(lines[1].ends_with("ALERT six"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn persisting_all_levels_keeps_info_and_debug() {
        let (dir, config) = scratch_config(1);
        let config = config.with_persistence(rotalog_core::Persistence::All);
        let (logger, _console) = with_memory(config);

        logger.info("two", &[]);
        logger.debug("three", &[]);
        logger.print("never stored", &[]);

        let stored = fs::read_to_string(&logger.paths().active).unwrap();
        assert_eq!(stored.lines().count(), 2);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn colored_console_leaves_file_plain() {
        let (dir, mut config) = scratch_config(1);
        config.color = true;
        let (logger, console) = with_memory(config);

        logger.alert("red", &[]);

        assert!(console.lines()[0].contains("\x1b["));
        let stored = fs::read_to_string(&logger.paths().active).unwrap();
        assert!(!stored.contains('\x1b'));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unwritable_directory_keeps_console_working() {
        let (dir, config) = scratch_config(1);
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("file-not-dir");
        fs::write(&blocker, b"").unwrap();
        let config = LoggerConfig {
            directory: blocker.to_string_lossy().into_owned(),
            ..config
        };
        let (logger, console) = with_memory(config);

        logger.alert("still visible", &[]);

        assert_eq!(console.lines().len(), 1);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn kept_files_survive_build() {
        let (dir, config) = scratch_config(1);
        fs::create_dir_all(&dir).unwrap();
        let paths = config.clone().normalized().paths();
        fs::write(&paths.active, b"previous run\n").unwrap();

        let logger = Logger::builder(config)
            .with_console(Arc::new(MemoryConsole::new()))
            .keep_existing_files()
            .build();
        logger.alert("appended", &[]);

        let stored = fs::read_to_string(&paths.active).unwrap();
        assert!(stored.starts_with("previous run\n"));
        assert!(stored.ends_with("ALERT appended\n"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn direct_archive_announces_itself() {
        let (dir, config) = scratch_config(0);
        let (logger, console) = with_memory(config);
        fs::create_dir_all(&dir).unwrap();
        let target = dir.join("manual.log");
        fs::write(&target, "payload\n").unwrap();

        let archive = logger.archive(&target).unwrap();

        assert!(archive.exists());
        assert!(!target.exists());
        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ALERT log archived to"));
        assert!(lines[0].contains("manual.log.zip"));
        fs::remove_dir_all(dir).unwrap();
    }
}
