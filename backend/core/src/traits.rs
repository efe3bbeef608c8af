use std::fmt;
use std::panic::Location;

/// Source position of the code that issued a log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Maps the compiler-supplied location of a logging call to the caller to report.
///
/// Implementations return `None` when no location should be shown, for example when
/// the call originates inside the logger itself.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, site: &'static Location<'static>) -> Option<CallSite>;
}

/// Destination for console copies of emitted records.
pub trait ConsoleWriter: Send + Sync {
    fn write_line(&self, line: &str);
}
