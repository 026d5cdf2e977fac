//! # Severity
//!
//! The closed set of log levels and the per-level facts the pipeline needs:
//! the bracketed tag, the console color, and the file sink (if any).
//!
//! Two variant sets are supported through [`SeverityScheme`]. They share the
//! same four tiers and differ only in how the informational tier is tagged.

use std::fmt;
use std::str::FromStr;

use nu_ansi_term::Color;

use crate::error::LogError;

/// File that receives every WARNING line.
pub const WARNING_LOG_FILE: &str = "warning_log.txt";
/// File that receives every ERROR line.
pub const ERROR_LOG_FILE: &str = "error_log.txt";

/// Log severity
///
/// The discriminants are bit values so a severity can round-trip through a
/// raw `u8` (see [`Severity::from_bits`]). Ordering follows importance, not
/// the discriminant.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity
{
    /// Debug level, only active when the facility is built with debug enabled
    Debug = 1 << 0,
    /// Error level
    Error = 1 << 1,
    /// Warning level
    Warning = 1 << 2,
    /// Info level (`NORMAL` under [`SeverityScheme::Normal`])
    Info = 1 << 3,
}

impl Severity
{
    /// All severities, least important first.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warning, Self::Error];

    /// Decode a raw bit value. Anything that isn't exactly one known bit yields `None`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self>
    {
        match bits {
            0b0001 => Some(Self::Debug),
            0b0010 => Some(Self::Error),
            0b0100 => Some(Self::Warning),
            0b1000 => Some(Self::Info),
            _ => None,
        }
    }

    /// The raw bit value.
    #[must_use]
    pub const fn bits(self) -> u8
    {
        self as u8
    }

    const fn rank(self) -> u8
    {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }

    /// Uppercase tag token under the given scheme, without brackets.
    #[must_use]
    pub const fn tag(self, scheme: SeverityScheme) -> &'static str
    {
        match (self, scheme) {
            (Self::Debug, _) => "DEBUG",
            (Self::Info, SeverityScheme::Standard) => "INFO",
            (Self::Info, SeverityScheme::Normal) => "NORMAL",
            (Self::Warning, _) => "WARNING",
            (Self::Error, _) => "ERROR",
        }
    }

    /// Console color, if this level is colored at all.
    #[must_use]
    pub const fn color(self) -> Option<Color>
    {
        match self {
            Self::Error => Some(Color::Red),
            Self::Warning => Some(Color::Yellow),
            Self::Debug | Self::Info => None,
        }
    }

    /// Name of the append-only file this level is mirrored to, if any.
    #[must_use]
    pub const fn file_name(self) -> Option<&'static str>
    {
        match self {
            Self::Warning => Some(WARNING_LOG_FILE),
            Self::Error => Some(ERROR_LOG_FILE),
            Self::Debug | Self::Info => None,
        }
    }
}

impl PartialOrd for Severity
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering>
    {
        Some(self.cmp(other))
    }
}

impl Ord for Severity
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering
    {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Severity
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.tag(SeverityScheme::Standard))
    }
}

impl FromStr for Severity
{
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(Self::Debug),
            "info" | "normal" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            _ => Err(LogError::InvalidSeverity(s.to_string())),
        }
    }
}

/// Which label set the informational tier uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityScheme
{
    /// `DEBUG`, `INFO`, `WARNING`, `ERROR`
    #[default]
    Standard,
    /// `DEBUG`, `NORMAL`, `WARNING`, `ERROR`
    Normal,
}

impl FromStr for SeverityScheme
{
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "standard" | "info" => Ok(Self::Standard),
            "normal" => Ok(Self::Normal),
            _ => Err(LogError::InvalidScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_from_bits_round_trip()
    {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_bits(severity.bits()), Some(severity));
        }
        assert_eq!(Severity::from_bits(0), None);
        assert_eq!(Severity::from_bits(0b0011), None);
        assert_eq!(Severity::from_bits(16), None);
    }

    #[test]
    fn test_ordering_follows_importance()
    {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_tags_per_scheme()
    {
        assert_eq!(Severity::Info.tag(SeverityScheme::Standard), "INFO");
        assert_eq!(Severity::Info.tag(SeverityScheme::Normal), "NORMAL");
        assert_eq!(Severity::Error.tag(SeverityScheme::Normal), "ERROR");
    }

    #[test]
    fn test_only_warning_and_error_have_files()
    {
        assert_eq!(Severity::Warning.file_name(), Some("warning_log.txt"));
        assert_eq!(Severity::Error.file_name(), Some("error_log.txt"));
        assert_eq!(Severity::Info.file_name(), None);
        assert_eq!(Severity::Debug.file_name(), None);
    }

    #[test]
    fn test_severity_from_str()
    {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("NORMAL".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("dbg".parse::<Severity>().unwrap(), Severity::Debug);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_scheme_from_str()
    {
        assert_eq!("normal".parse::<SeverityScheme>().unwrap(), SeverityScheme::Normal);
        assert_eq!("Standard".parse::<SeverityScheme>().unwrap(), SeverityScheme::Standard);
        assert!("loud".parse::<SeverityScheme>().is_err());
    }
}
