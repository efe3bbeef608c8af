use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Urgency of a log record.
///
/// Lower ordinal means more urgent. A configured level `N` admits every record whose
/// ordinal is `<= N`; `Alert` is admitted regardless.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "SeverityRepr")]
#[repr(u8)]
pub enum Severity {
    Alert = 1,
    Warning = 2,
    Info = 3,
    #[default]
    Debug = 4,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Alert,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Severity::Alert),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Map any configured number onto a level: 0 means alerts only, anything above
    /// 4 means everything.
    pub fn clamp_level(ordinal: u8) -> Self {
        Self::from_ordinal(ordinal.clamp(1, 4)).unwrap_or(Severity::Debug)
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn tag(self) -> &'static str {
        match self {
            Severity::Alert => "ALERT",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Whether a record of this severity passes a gate configured at `max`.
    pub fn is_enabled(self, max: Severity) -> bool {
        self == Severity::Alert || self <= max
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}'; use alert, warning, info, debug or 1-4")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u8>() {
            return Severity::from_ordinal(ordinal).ok_or_else(|| ParseSeverityError(s.into()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "alert" => Ok(Severity::Alert),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(ParseSeverityError(s.into())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Ordinal(u8),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = ParseSeverityError;

    fn try_from(repr: SeverityRepr) -> Result<Self, Self::Error> {
        match repr {
            SeverityRepr::Ordinal(n) => {
                Severity::from_ordinal(n).ok_or_else(|| ParseSeverityError(n.to_string()))
            }
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}

/// Which admitted records are also written to the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// Warning and Alert only.
    #[default]
    Urgent,
    /// Every admitted severity. `Print` output is still console-only.
    All,
}

impl Persistence {
    pub fn stores(self, severity: Severity) -> bool {
        match self {
            Persistence::Urgent => severity <= Severity::Warning,
            Persistence::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_passes_every_level() {
        for max in Severity::ALL {
            assert!(Severity::Alert.is_enabled(max));
        }
    }

    #[test]
    fn gate_matches_ordinals() {
        for s in Severity::ALL {
            for max in Severity::ALL {
                let expected = s == Severity::Alert || s.ordinal() <= max.ordinal();
                assert_eq!(s.is_enabled(max), expected, "{s} at {max}");
            }
        }
    }

    #[test]
    fn clamp_out_of_range_levels() {
        assert_eq!(Severity::clamp_level(0), Severity::Alert);
        assert_eq!(Severity::clamp_level(3), Severity::Info);
        assert_eq!(Severity::clamp_level(200), Severity::Debug);
    }

    #[test]
    fn parse_names_and_ordinals() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("DEBUG".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("1".parse::<Severity>().unwrap(), Severity::Alert);
        assert!("7".parse::<Severity>().is_err());
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn urgent_persistence_keeps_warning_and_alert() {
        assert!(Persistence::Urgent.stores(Severity::Alert));
        assert!(Persistence::Urgent.stores(Severity::Warning));
        assert!(!Persistence::Urgent.stores(Severity::Info));
        assert!(Persistence::All.stores(Severity::Debug));
    }

    #[test]
    fn deserializes_from_name_or_ordinal() {
        let by_name: Severity = serde_json::from_str("\"warning\"").unwrap();
        let by_number: Severity = serde_json::from_str("3").unwrap();
        assert_eq!(by_name, Severity::Warning);
        assert_eq!(by_number, Severity::Info);
        assert!(serde_json::from_str::<Severity>("9").is_err());
    }
}
