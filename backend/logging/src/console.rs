//! Console destinations and per-severity ANSI coloring.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use rotalog_core::{ConsoleWriter, Severity};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const DIM: &str = "\x1b[2m";

/// Writes each record to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl ConsoleWriter for StdoutConsole {
    fn write_line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// Keeps console output in memory; handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<String>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ConsoleWriter for MemoryConsole {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

/// Wrap a formatted line in the color for its severity. `None` is a `Print` record.
pub fn colorize(severity: Option<Severity>, line: &str) -> String {
    let style = match severity {
        Some(Severity::Alert) => format!("{RED}{BOLD}"),
        Some(Severity::Warning) => YELLOW.to_string(),
        Some(Severity::Info) => CYAN.to_string(),
        Some(Severity::Debug) => DIM.to_string(),
        None => return line.to_string(),
    };
    format!("{style}{line}{RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_console_keeps_order() {
        let console = MemoryConsole::new();
        console.write_line("one");
        console.write_line("two");
        assert_eq!(console.lines(), vec!["one", "two"]);
        console.clear();
        assert!(console.lines().is_empty());
    }

    #[test]
    fn alerts_are_red_and_print_is_plain() {
        let colored = colorize(Some(Severity::Alert), "boom");
        assert!(colored.starts_with(RED));
        assert!(colored.ends_with(RESET));
        assert_eq!(colorize(None, "plain"), "plain");
    }
}
