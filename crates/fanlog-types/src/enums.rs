//! Common enumerations used throughout fanlog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{FanlogError, Result};

/// Severity of a log event.
///
/// The order is fixed and total:
/// `Verbose < Debug < Info < Warning < Error < Fatal < Wtf`.
/// Every value has a distinct [`rank`](LogLevel::rank), and the derived
/// `Ord` agrees with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very fine-grained tracing output
    #[default]
    Verbose,
    /// Diagnostic output useful while developing
    Debug,
    /// Normal progress messages
    Info,
    /// Something unexpected that the application can recover from
    Warning,
    /// An operation failed
    Error,
    /// The application cannot continue its current work
    Fatal,
    /// A condition that should never happen
    Wtf,
}

/// Color tag attached to each level, consumed by presentation sinks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelColor {
    /// Dimmed output
    Grey,
    /// Blue
    Blue,
    /// Green
    Green,
    /// Yellow
    Yellow,
    /// Red
    Red,
    /// Bright red
    BrightRed,
    /// Magenta
    Magenta,
}

impl LogLevel {
    /// Every level, lowest severity first.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Wtf,
    ];

    /// Integer severity used for ordering and filtering.
    pub const fn rank(self) -> u8 {
        match self {
            LogLevel::Verbose => 0,
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warning => 3,
            LogLevel::Error => 4,
            LogLevel::Fatal => 5,
            LogLevel::Wtf => 6,
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Wtf => "wtf",
        }
    }

    /// Fixed-width uppercase tag for aligned output.
    pub const fn short_label(self) -> &'static str {
        match self {
            LogLevel::Verbose => "VERB",
            LogLevel::Debug => "DEBG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERRO",
            LogLevel::Fatal => "FATL",
            LogLevel::Wtf => "WTF!",
        }
    }

    /// Rendering hint for presentation sinks.
    pub const fn color(self) -> LevelColor {
        match self {
            LogLevel::Verbose => LevelColor::Grey,
            LogLevel::Debug => LevelColor::Blue,
            LogLevel::Info => LevelColor::Green,
            LogLevel::Warning => LevelColor::Yellow,
            LogLevel::Error => LevelColor::Red,
            LogLevel::Fatal => LevelColor::BrightRed,
            LogLevel::Wtf => LevelColor::Magenta,
        }
    }

    /// Whether an event at this level passes a filter set at `threshold`.
    pub const fn meets_threshold(self, threshold: LogLevel) -> bool {
        self.rank() >= threshold.rank()
    }
}

/// Free-function form of [`LogLevel::meets_threshold`].
pub const fn meets_threshold(candidate: LogLevel, threshold: LogLevel) -> bool {
    candidate.meets_threshold(threshold)
}

impl FromStr for LogLevel {
    type Err = FanlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "trace" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "wtf" => Ok(LogLevel::Wtf),
            _ => Err(FanlogError::Validation(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_level() -> impl Strategy<Value = LogLevel> {
        prop::sample::select(LogLevel::ALL.to_vec())
    }

    #[test]
    fn test_ranks_are_unique_and_ordered() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_threshold_examples() {
        assert!(meets_threshold(LogLevel::Error, LogLevel::Warning));
        assert!(!meets_threshold(LogLevel::Warning, LogLevel::Error));
        assert!(meets_threshold(LogLevel::Info, LogLevel::Info));
        assert!(LogLevel::Wtf.meets_threshold(LogLevel::Verbose));

        // The default threshold lets everything through
        assert_eq!(LogLevel::default(), LogLevel::Verbose);
        assert!(LogLevel::ALL.iter().all(|l| l.meets_threshold(LogLevel::default())));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!(" wtf ".parse::<LogLevel>().unwrap(), LogLevel::Wtf);
        assert!("loud".parse::<LogLevel>().is_err());

        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LogLevel::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let level: LogLevel = serde_yaml::from_str("fatal").unwrap();
        assert_eq!(level, LogLevel::Fatal);
    }

    proptest! {
        #[test]
        fn prop_threshold_matches_order(a in any_level(), b in any_level()) {
            if a < b {
                prop_assert!(meets_threshold(b, a));
                prop_assert!(!meets_threshold(a, b));
            }
            prop_assert_eq!(meets_threshold(a, b), a >= b);
        }
    }
}
