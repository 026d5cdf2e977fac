//! Tests for error handling

use std::io;
use std::path::PathBuf;

use sevlog_core::error::{LogError, LogResult};
use sevlog_core::format::render;

#[test]
fn test_format_error_display()
{
    let error = render("{} {}", &[&1]).unwrap_err();
    let message = format!("{}", error);
    assert!(message.contains("Format error"));
    assert!(message.contains("{} {}"));
}

#[test]
fn test_sink_unavailable_display()
{
    let error = LogError::SinkUnavailable {
        path: PathBuf::from("/nowhere/error_log.txt"),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    };
    let message = format!("{}", error);
    assert!(message.contains("/nowhere/error_log.txt"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_console_error_from_io()
{
    let error: LogError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
    match error {
        LogError::Console(_) => {
            // Expected: io::Error should convert to Console variant
        }
        _ => panic!("Expected Console variant"),
    }
}

#[test]
fn test_invalid_severity_display()
{
    let error = "fatal".parse::<sevlog_core::Severity>().unwrap_err();
    let message = format!("{}", error);
    assert!(message.contains("Unknown severity"));
    assert!(message.contains("fatal"));
}

#[test]
fn test_lifecycle_errors_display()
{
    assert!(format!("{}", LogError::AlreadyInstalled).contains("already installed"));
    assert!(format!("{}", LogError::NotInstalled).contains("not installed"));
}

#[test]
fn test_result_type()
{
    // Test that Result type is properly aliased
    let _result: LogResult<()> = Ok(());
    let _error_result: LogResult<()> = Err(LogError::NotInstalled);
}
