//! # sevlog-core
//!
//! Leveled logging to a colored console and per-severity files.
//!
//! This crate provides:
//! - Four severities (DEBUG, INFO, WARNING, ERROR) with a configurable label set
//! - Runtime template rendering with `{}` / `{N}` placeholders
//! - Timestamped, tagged lines: `2024-05-01 13:37:00 [INFO]: message`
//! - Red ERROR and yellow WARNING console output, mirrored to `error_log.txt`
//!   and `warning_log.txt`
//! - Pretty-printing of sequences, maps and enums for the `*_stream` calls
//! - "Log once" statements gated per call site
//!
//! ## Guarantees
//!
//! - Every call is one critical section, so console lines never interleave.
//! - Only malformed templates produce errors; sink failures are swallowed.
//! - DEBUG calls do no work at all when debug output is disabled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sevlog_core::prelude::*;
//! use sevlog_core::{log_error, log_info_stream};
//!
//! let log = LoggingFacility::install(FacilityConfig::from_env())?;
//! log_error!(log, "Fail: {}", "x")?;
//! log_info_stream!(log, "Nums:", vec![1, 2, 3]);
//! # Ok::<(), LogError>(())
//! ```

pub mod config;
pub mod container;
pub mod decorate;
pub mod dispatch;
pub mod error;
pub mod facility;
pub mod format;
mod macros;
pub mod once;
pub mod prelude;
pub mod severity;

pub use config::FacilityConfig;
// Re-export commonly used types
pub use container::{Container, IntoContainer, Ordinal};
pub use error::{LogError, LogResult};
pub use facility::LoggingFacility;
pub use once::{GateKey, OnceRegistry, SiteMarker};
pub use severity::{Severity, SeverityScheme};
