//! # Diagnostics
//!
//! `tracing` setup for sevlog's own internal events: swallowed sink failures,
//! once-gate firings, facility installation.
//!
//! These are not the log lines sevlog produces for its users. They go to
//! **stderr** (and optionally a file) so they never mix with the facility's
//! console sink on stdout. Without a subscriber they cost nothing and are
//! never seen.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sevlog_utils::init_diagnostics;
//!
//! // Reads RUST_LOG, SEVLOG_TRACE_FORMAT and SEVLOG_TRACE_FILE
//! let _guard = init_diagnostics().expect("Failed to initialize diagnostics");
//! tracing::debug!("visible with RUST_LOG=debug");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=sevlog_core=trace`)
//! - `SEVLOG_TRACE_FORMAT`: output format (`json` or `pretty`, default: `pretty`)
//! - `SEVLOG_TRACE_FILE`: optional path of a file that also receives diagnostics

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Diagnostics output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsFormat
{
    /// Pretty-printed, human-readable format (default)
    Pretty,
    /// JSON format
    Json,
}

impl DiagnosticsFormat
{
    /// `SEVLOG_TRACE_FORMAT`, falling back to [`DiagnosticsFormat::Pretty`] when
    /// unset or unrecognized.
    #[must_use]
    pub fn from_env() -> Self
    {
        env::var("SEVLOG_TRACE_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::Pretty)
    }
}

impl FromStr for DiagnosticsFormat
{
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(DiagnosticsFormat::Pretty),
            "json" => Ok(DiagnosticsFormat::Json),
            _ => Err(DiagnosticsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Diagnostics verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsLevel
{
    /// Error level
    Error,
    /// Warning level (default)
    Warn,
    /// Info level
    Info,
    /// Debug level, includes swallowed sink failures
    Debug,
    /// Trace level, includes once-gate firings
    Trace,
}

impl From<DiagnosticsLevel> for Level
{
    fn from(level: DiagnosticsLevel) -> Self
    {
        match level {
            DiagnosticsLevel::Error => Level::ERROR,
            DiagnosticsLevel::Warn => Level::WARN,
            DiagnosticsLevel::Info => Level::INFO,
            DiagnosticsLevel::Debug => Level::DEBUG,
            DiagnosticsLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for DiagnosticsLevel
{
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" => Ok(DiagnosticsLevel::Error),
            "warn" | "warning" => Ok(DiagnosticsLevel::Warn),
            "info" => Ok(DiagnosticsLevel::Info),
            "debug" => Ok(DiagnosticsLevel::Debug),
            "trace" => Ok(DiagnosticsLevel::Trace),
            _ => Err(DiagnosticsError::InvalidLevel(s.to_string())),
        }
    }
}

/// Keeps the background file writer alive. Drop it at process exit to flush.
#[must_use = "dropping the guard stops file diagnostics"]
#[derive(Debug)]
pub struct DiagnosticsGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize diagnostics from the environment
///
/// - `RUST_LOG`: level filter, defaults to `warn`
/// - `SEVLOG_TRACE_FORMAT`: `json` or `pretty` (default)
/// - `SEVLOG_TRACE_FILE`: optional diagnostics file
///
/// ## Errors
///
/// Returns an error if:
/// - A global subscriber is already installed
/// - `SEVLOG_TRACE_FILE` has no file name component
pub fn init_diagnostics() -> Result<DiagnosticsGuard, DiagnosticsError>
{
    let default_level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<DiagnosticsLevel>().ok())
        .map_or(Level::WARN, Into::into);

    // RUST_LOG can override the default level with more specific filters
    let make_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    install(DiagnosticsFormat::from_env(), &make_filter, trace_file().as_deref())
}

/// Initialize diagnostics with explicit level and format
///
/// Backs the CLI's `--trace-level`. `RUST_LOG` is not consulted;
/// `SEVLOG_TRACE_FILE` still is.
///
/// ## Example
///
/// ```rust,no_run
/// use sevlog_utils::{DiagnosticsFormat, DiagnosticsLevel, init_diagnostics_with_level};
///
/// let _guard = init_diagnostics_with_level(DiagnosticsLevel::Debug, DiagnosticsFormat::Pretty)
///     .expect("Failed to initialize diagnostics");
/// ```
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed or the
/// diagnostics file path is unusable.
pub fn init_diagnostics_with_level(
    level: DiagnosticsLevel,
    format: DiagnosticsFormat,
) -> Result<DiagnosticsGuard, DiagnosticsError>
{
    let level: Level = level.into();
    let make_filter = || EnvFilter::new(level.to_string());
    install(format, &make_filter, trace_file().as_deref())
}

fn trace_file() -> Option<PathBuf>
{
    env::var_os("SEVLOG_TRACE_FILE").filter(|p| !p.is_empty()).map(PathBuf::from)
}

fn install(
    format: DiagnosticsFormat,
    make_filter: &dyn Fn() -> EnvFilter,
    log_file: Option<&Path>,
) -> Result<DiagnosticsGuard, DiagnosticsError>
{
    let (layers, guard) = build_layers(format, make_filter, log_file)?;

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| DiagnosticsError::InitializationFailed(e.to_string()))?;

    Ok(guard)
}

/// The stderr layer, plus a file layer when `log_file` is given.
fn build_layers(
    format: DiagnosticsFormat,
    make_filter: &dyn Fn() -> EnvFilter,
    log_file: Option<&Path>,
) -> Result<(Vec<BoxedLayer>, DiagnosticsGuard), DiagnosticsError>
{
    let mut layers: Vec<BoxedLayer> = vec![build_layer(format, io::stderr, true, make_filter())];
    let mut file_guard = None;

    if let Some(path) = log_file {
        let file_name = path
            .file_name()
            .ok_or_else(|| DiagnosticsError::InvalidFile(path.display().to_string()))?;
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        // No rotation: the file just grows.
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(build_layer(format, writer, false, make_filter()));
        file_guard = Some(guard);
    }

    Ok((layers, DiagnosticsGuard { _file: file_guard }))
}

fn build_layer<W>(format: DiagnosticsFormat, writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        DiagnosticsFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        DiagnosticsFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
    }
}

/// Diagnostics initialization error
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError
{
    /// Invalid diagnostics format
    #[error("Invalid diagnostics format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid diagnostics level
    #[error("Invalid diagnostics level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// Diagnostics file path has no file name
    #[error("Invalid diagnostics file: {0}")]
    InvalidFile(String),

    /// Failed to install the subscriber
    #[error("Failed to initialize diagnostics: {0}")]
    InitializationFailed(String),

    /// File diagnostics error
    #[error("Diagnostics file error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn trace_filter() -> EnvFilter
    {
        EnvFilter::new("trace")
    }

    #[test]
    fn test_names_parse()
    {
        assert_eq!("JSON".parse::<DiagnosticsFormat>().unwrap(), DiagnosticsFormat::Json);
        assert_eq!("text".parse::<DiagnosticsFormat>().unwrap(), DiagnosticsFormat::Pretty);
        assert!(matches!(
            "yaml".parse::<DiagnosticsFormat>(),
            Err(DiagnosticsError::InvalidFormat(_))
        ));

        assert_eq!(Level::from("warning".parse::<DiagnosticsLevel>().unwrap()), Level::WARN);
        assert_eq!(Level::from("Trace".parse::<DiagnosticsLevel>().unwrap()), Level::TRACE);
        assert!(matches!(
            "loud".parse::<DiagnosticsLevel>(),
            Err(DiagnosticsError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_file_layer_receives_events()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("diagnostics.log");

        let (layers, guard) = build_layers(DiagnosticsFormat::Json, &trace_filter, Some(&path)).unwrap();
        assert_eq!(layers.len(), 2);
        tracing::subscriber::with_default(Registry::default().with(layers), || {
            tracing::debug!(path = "warning_log.txt", "sink unavailable");
        });
        // Dropping the guard flushes the background writer.
        drop(guard);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("sink unavailable"));
        assert!(written.contains("\"level\":\"DEBUG\""));
        assert!(!written.contains('\x1b'));
    }

    #[test]
    fn test_stderr_only_without_file()
    {
        let (layers, _guard) = build_layers(DiagnosticsFormat::Pretty, &trace_filter, None).unwrap();
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_file_without_name_is_rejected()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("..");
        let result = build_layers(DiagnosticsFormat::Pretty, &trace_filter, Some(&path));
        assert!(matches!(result, Err(DiagnosticsError::InvalidFile(_))));
    }

    #[test]
    fn test_second_init_fails()
    {
        let _first = init_diagnostics_with_level(DiagnosticsLevel::Error, DiagnosticsFormat::Pretty);
        let second = init_diagnostics_with_level(DiagnosticsLevel::Error, DiagnosticsFormat::Json);
        assert!(matches!(second, Err(DiagnosticsError::InitializationFailed(_))));
    }
}
