//! Leveled application logger.
//!
//! Records are gated by severity, formatted with a timestamp and call site, echoed to
//! the console and, for the persisted severities, appended to a log file. A file that
//! outgrows its size threshold is renamed to a backup and compressed into a zip
//! archive in the background while logging continues into a fresh file.

pub mod archive;
pub mod caller;
pub mod config;
pub mod console;
pub mod diagnostics;
pub mod formatter;
pub mod gate;
pub mod logger;
mod macros;
pub mod sink;

pub use archive::{archive_file, remove_with_retry};
pub use caller::{NoCallerResolver, TrackedCallerResolver};
pub use config::{LogPaths, LoggerConfig};
pub use console::{MemoryConsole, StdoutConsole};
pub use diagnostics::{init_diagnostics, DiagnosticsFormat};
pub use formatter::Formatter;
pub use gate::Gate;
pub use logger::{create_logger, global, install, Logger, LoggerBuilder};
pub use sink::{Appended, FileSink, Rotation};

pub use rotalog_core::{
    sprintf, CallSite, CallerResolver, ConsoleWriter, LogError, LogValue, Persistence, Severity,
};
