mod archive_cmd;
mod cleanup_cmd;
mod config;
mod demo_cmd;
mod stress_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rotalog::{init_diagnostics, DiagnosticsFormat, LoggerConfig, Persistence, Severity};

#[derive(Parser)]
#[command(name = "rotalog")]
#[command(about = "Leveled logger with size-based rotation and zip archiving")]
#[command(version)]
struct Cli {
    /// YAML file with logger settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base name of the log file
    #[arg(long, global = true)]
    name: Option<String>,

    /// Directory holding the log, backup and archive files
    #[arg(long, global = true)]
    dir: Option<String>,

    /// Maximum severity shown: alert, warning, info, debug or 1..4
    #[arg(long, global = true)]
    level: Option<Severity>,

    /// Rotation threshold in MB; 0 disables the log file
    #[arg(long, global = true)]
    size_mb: Option<u64>,

    /// Store Info and Debug records as well as Warning and Alert
    #[arg(long, global = true)]
    persist_all: bool,

    /// Colorize console output
    #[arg(long, global = true)]
    color: bool,

    /// Filter for the logger's own diagnostics when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    diagnostics: String,

    /// Emit diagnostics as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record per severity plus an untagged print
    Demo,
    /// Write numbered alerts until the file rotates, then report what is on disk
    Stress {
        /// Number of records to write
        #[arg(short, long, default_value_t = 60_000)]
        count: u64,
        /// Concurrent writers
        #[arg(short, long, default_value_t = 1)]
        workers: u64,
    },
    /// Delete the log, backup and archive files
    Cleanup {
        #[arg(long, default_value_t = 3)]
        retries: u32,
    },
    /// Compress a file into <file>.zip and delete the original
    Archive { path: PathBuf },
}

impl Cli {
    fn logger_config(&self) -> Result<LoggerConfig> {
        let mut config = config::load(self.config.as_deref())?;
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(dir) = &self.dir {
            config.directory = dir.clone();
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(size_mb) = self.size_mb {
            config.size_mb = size_mb;
        }
        if self.persist_all {
            config.persistence = Persistence::All;
        }
        if self.color {
            config.color = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        DiagnosticsFormat::Json
    } else {
        DiagnosticsFormat::Text
    };
    init_diagnostics(&cli.diagnostics, format);

    let config = cli.logger_config()?;
    match cli.command {
        Commands::Demo => demo_cmd::run(config).await?,
        Commands::Stress { count, workers } => stress_cmd::run(config, count, workers).await?,
        Commands::Cleanup { retries } => cleanup_cmd::run(config, retries).await?,
        Commands::Archive { path } => archive_cmd::run(config, &path).await?,
    }

    Ok(())
}
