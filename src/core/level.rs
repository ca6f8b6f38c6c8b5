//! Log event level definitions
//!
//! Levels are encoded as nested bitmasks: each level's mask is a strict
//! superset of every more severe level's mask, so "is this level enabled
//! under that threshold" is a single mask containment check rather than an
//! ordinal comparison.

use crate::core::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum LogEventLevel {
    Off = 0b000000,
    Fatal = 0b000001,
    Error = 0b000011,
    Warning = 0b000111,
    #[default]
    Information = 0b001111,
    Debug = 0b011111,
    Verbose = 0b111111,
}

/// Checks whether `level` passes the given `threshold`.
///
/// True exactly when `level`'s bit pattern is a subset of `threshold`'s.
/// An `Off` threshold (empty mask) disables every real level; an `Off`
/// level (mask 0) is trivially contained in any threshold.
pub fn is_enabled(threshold: LogEventLevel, level: LogEventLevel) -> bool {
    (level as u8) & (threshold as u8) == level as u8
}

impl LogEventLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogEventLevel::Off => "OFF",
            LogEventLevel::Fatal => "FATAL",
            LogEventLevel::Error => "ERROR",
            LogEventLevel::Warning => "WARN",
            LogEventLevel::Information => "INFO",
            LogEventLevel::Debug => "DEBUG",
            LogEventLevel::Verbose => "VERBOSE",
        }
    }
}

impl fmt::Display for LogEventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogEventLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(LogEventLevel::Off),
            "FATAL" => Ok(LogEventLevel::Fatal),
            "ERROR" => Ok(LogEventLevel::Error),
            "WARN" | "WARNING" => Ok(LogEventLevel::Warning),
            "INFO" | "INFORMATION" => Ok(LogEventLevel::Information),
            "DEBUG" => Ok(LogEventLevel::Debug),
            "VERBOSE" | "TRACE" => Ok(LogEventLevel::Verbose),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
