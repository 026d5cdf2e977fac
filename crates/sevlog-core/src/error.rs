//! # Error Types
//!
//! Error handling for the logging facility.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for facility operations
///
/// Only [`LogError::Format`] ever escapes a logging call. Sink failures are
/// constructed internally so they can be traced, then dropped: logging must
/// never break the caller's control flow.
///
/// ## Error Categories
///
/// 1. **Caller input**: Format
/// 2. **Sinks**: SinkUnavailable, Console (swallowed)
/// 3. **Lifecycle**: AlreadyInstalled, NotInstalled
/// 4. **Configuration**: InvalidSeverity, InvalidScheme
#[derive(Error, Debug)]
pub enum LogError
{
    /// The template and its arguments do not line up
    ///
    /// This happens when:
    /// - There are more `{}` placeholders than arguments
    /// - An argument is never referenced by the template
    /// - A `{N}` index is out of range
    /// - Braces are unbalanced or contain something other than a position
    #[error("Format error in {template:?}: {reason}")]
    Format
    {
        /// The offending template
        template: String,
        /// What went wrong
        reason: String,
    },

    /// A per-severity log file could not be opened or appended to
    #[error("Log file unavailable: {}", .path.display())]
    SinkUnavailable
    {
        /// Path of the file that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The console writer failed
    #[error("Console write failed: {0}")]
    Console(#[from] io::Error),

    /// The process-wide facility has already been installed
    ///
    /// ## Solution
    ///
    /// Call `LoggingFacility::global()` to reach the existing instance.
    #[error("Logging facility already installed")]
    AlreadyInstalled,

    /// The process-wide facility was requested before `install()`
    #[error("Logging facility not installed")]
    NotInstalled,

    /// Unknown severity name
    #[error("Unknown severity: {0}. Use 'debug', 'info', 'warning', or 'error'")]
    InvalidSeverity(String),

    /// Unknown severity scheme name
    #[error("Unknown severity scheme: {0}. Use 'standard' or 'normal'")]
    InvalidScheme(String),
}

impl LogError
{
    pub(crate) fn format(template: &str, reason: impl Into<String>) -> Self
    {
        Self::Format {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for `Result<T, LogError>`
///
/// ```rust
/// use sevlog_core::error::LogResult;
/// fn foo() -> LogResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type LogResult<T> = std::result::Result<T, LogError>;
