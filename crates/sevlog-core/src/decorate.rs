//! # Decorator
//!
//! Turns a rendered message into a decorated line:
//!
//! ```text
//! 2024-05-01 13:37:00 [WARNING]: disk almost full
//! ```

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::severity::{Severity, SeverityScheme};

/// `strftime` pattern for every timestamp the facility writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tag used when a raw severity value doesn't decode.
pub const UNKNOWN_TAG: &str = "UNKNOWN";

/// One log event on its way to the sinks. Built per call and dropped after dispatch.
#[derive(Debug, Clone)]
pub struct LogRecord
{
    /// Level of the event
    pub severity: Severity,
    /// Local wall-clock time the record was produced
    pub timestamp: DateTime<Local>,
    /// Message after template rendering
    pub body: String,
}

impl LogRecord
{
    /// Capture the current local time for `body`.
    #[must_use]
    pub fn now(severity: Severity, body: String) -> Self
    {
        Self {
            severity,
            timestamp: Local::now(),
            body,
        }
    }

    /// The decorated line for this record.
    #[must_use]
    pub fn decorate(&self, scheme: SeverityScheme) -> String
    {
        decorate(Some(self.severity), scheme, &self.body, &self.timestamp)
    }
}

/// Tag token for `level`; `None` stands for an undecodable raw severity.
#[must_use]
pub const fn level_tag(level: Option<Severity>, scheme: SeverityScheme) -> &'static str
{
    match level {
        Some(severity) => severity.tag(scheme),
        None => UNKNOWN_TAG,
    }
}

/// Second-resolution timestamp, e.g. `2024-05-01 13:37:00`.
#[must_use]
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Produce `"<timestamp> [<LEVEL>]: <message>"`.
#[must_use]
pub fn decorate<Tz: TimeZone>(
    level: Option<Severity>,
    scheme: SeverityScheme,
    message: &str,
    at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    format!("{} [{}]: {message}", format_timestamp(at), level_tag(level, scheme))
}

#[cfg(test)]
mod tests
{
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn fixed_time() -> DateTime<Utc>
    {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap()
    }

    #[test]
    fn test_decorate_layout()
    {
        let line = decorate(Some(Severity::Info), SeverityScheme::Standard, "Value: 42", &fixed_time());
        assert_eq!(line, "2024-03-09 07:05:02 [INFO]: Value: 42");
    }

    #[test]
    fn test_decorate_every_level()
    {
        let at = fixed_time();
        for (severity, tag) in [
            (Severity::Debug, "[DEBUG]"),
            (Severity::Info, "[INFO]"),
            (Severity::Warning, "[WARNING]"),
            (Severity::Error, "[ERROR]"),
        ] {
            let line = decorate(Some(severity), SeverityScheme::Standard, "m", &at);
            assert_eq!(line, format!("2024-03-09 07:05:02 {tag}: m"));
        }
    }

    #[test]
    fn test_normal_scheme_tag()
    {
        let line = decorate(Some(Severity::Info), SeverityScheme::Normal, "m", &fixed_time());
        assert!(line.contains(" [NORMAL]: "));
    }

    #[test]
    fn test_unknown_level()
    {
        let line = decorate(Severity::from_bits(0x40), SeverityScheme::Standard, "m", &fixed_time());
        assert_eq!(line, "2024-03-09 07:05:02 [UNKNOWN]: m");
    }

    #[test]
    fn test_timestamp_uses_the_given_offset()
    {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = fixed_time().with_timezone(&offset);
        assert_eq!(format_timestamp(&at), "2024-03-09 09:05:02");
    }

    #[test]
    fn test_record_decorates_its_body()
    {
        let record = LogRecord::now(Severity::Error, "Fail: x".to_string());
        let line = record.decorate(SeverityScheme::Standard);
        assert!(line.ends_with(" [ERROR]: Fail: x"));
        assert_eq!(line.len(), "YYYY-MM-DD HH:MM:SS".len() + " [ERROR]: Fail: x".len());
    }
}
