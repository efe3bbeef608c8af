//! Builds the textual log line:
//! `<YYYY.MM.DD_HH:MM:SS> <file:line>\t<TAG> <message>`.

use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Local};
use rotalog_core::{sprintf, CallerResolver, LogValue, Severity};

pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d_%H:%M:%S";

/// Column width reserved for the call site; blanks fill it when there is none.
pub const LOCATION_WIDTH: usize = 24;

pub struct Formatter {
    resolver: Arc<dyn CallerResolver>,
    info_location: bool,
}

impl Formatter {
    pub fn new(resolver: Arc<dyn CallerResolver>, info_location: bool) -> Self {
        Self {
            resolver,
            info_location,
        }
    }

    /// Format a record stamped with the current local time. `severity` is `None`
    /// for untagged `Print` records.
    pub fn format(
        &self,
        severity: Option<Severity>,
        site: &'static Location<'static>,
        template: &str,
        args: &[LogValue],
    ) -> String {
        self.format_at(Local::now(), severity, site, template, args)
    }

    pub fn format_at(
        &self,
        now: DateTime<Local>,
        severity: Option<Severity>,
        site: &'static Location<'static>,
        template: &str,
        args: &[LogValue],
    ) -> String {
        let timestamp = now.format(TIMESTAMP_FORMAT);
        let location = self
            .location(severity, site)
            .unwrap_or_default();
        let message = sprintf(template, args);

        match severity {
            Some(severity) => format!(
                "{timestamp} {location:<LOCATION_WIDTH$}\t{} {message}",
                severity.tag()
            ),
            None => format!("{timestamp} {location:<LOCATION_WIDTH$}\t{message}"),
        }
    }

    fn location(
        &self,
        severity: Option<Severity>,
        site: &'static Location<'static>,
    ) -> Option<String> {
        if severity == Some(Severity::Info) && !self.info_location {
            return None;
        }
        self.resolver.resolve(site).map(|call| call.to_string())
    }
}
