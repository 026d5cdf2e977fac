//! # Logging Facility
//!
//! The public entry point. One facility owns one output mutex, one dispatcher
//! and one once-gate registry.
//!
//! ## Pipeline
//!
//! Every call runs `render -> decorate -> dispatch` as a single critical
//! section, so console lines are totally ordered by lock acquisition even when
//! many threads log at once.
//!
//! ## Construction
//!
//! - [`LoggingFacility::install`] creates the process-wide instance; later
//!   code reaches it with [`LoggingFacility::global`].
//! - [`LoggingFacility::new`] / [`LoggingFacility::with_console`] build an
//!   owned instance to pass around explicitly (wrap it in an `Arc` to share).
//!
//! ## Call sites
//!
//! The `*_once` methods identify their call site with `#[track_caller]`.
//! Inside a `macro_rules!` body every such call reports the outermost macro
//! invocation, so two method calls in one helper macro share a latch. The
//! `log_*_once!` macros plant a static per expansion and don't have this limit.
//!
//! ```rust,no_run
//! use sevlog_core::{FacilityConfig, LoggingFacility};
//!
//! let log = LoggingFacility::install(FacilityConfig::from_env())?;
//! log.info("Value: {}", &[&42])?;
//! log.warning_stream("Nums:", vec![1, 2, 3]);
//! for _ in 0..5 {
//!     log.info_once("printed a single time", &[])?;
//! }
//! # Ok::<(), sevlog_core::LogError>(())
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::info;

use crate::config::FacilityConfig;
use crate::container::IntoContainer;
use crate::decorate::LogRecord;
use crate::dispatch::Dispatcher;
use crate::error::{LogError, LogResult};
use crate::format::render;
use crate::once::{GateKey, OnceRegistry};
use crate::severity::Severity;

static GLOBAL: OnceCell<LoggingFacility> = OnceCell::new();

/// Leveled logger writing colored lines to the console and WARNING/ERROR
/// lines to per-severity files.
///
/// Deliberately neither `Clone` nor `Copy`: every call site must see the same
/// mutex.
pub struct LoggingFacility
{
    config: FacilityConfig,
    output: Mutex<Dispatcher>,
    gates: OnceRegistry,
}

impl LoggingFacility
{
    /// Facility writing to process stdout.
    #[must_use]
    pub fn new(config: FacilityConfig) -> Self
    {
        Self::with_console(config, io::stdout())
    }

    /// Facility writing console lines to `console` instead of stdout.
    #[must_use]
    pub fn with_console(config: FacilityConfig, console: impl Write + Send + 'static) -> Self
    {
        let dispatcher = Dispatcher::new(Box::new(console), config.ansi, config.log_dir.clone());
        Self {
            config,
            output: Mutex::new(dispatcher),
            gates: OnceRegistry::new(),
        }
    }

    /// Create the process-wide facility.
    ///
    /// ## Errors
    ///
    /// Returns [`LogError::AlreadyInstalled`] if a facility was installed before;
    /// the existing one is left untouched.
    pub fn install(config: FacilityConfig) -> LogResult<&'static Self>
    {
        let log_dir = config.log_dir.display().to_string();
        let debug_enabled = config.debug_enabled;
        GLOBAL
            .set(Self::new(config))
            .map_err(|_| LogError::AlreadyInstalled)?;
        info!(debug_enabled, log_dir = %log_dir, "logging facility installed");
        Self::global()
    }

    /// The process-wide facility.
    ///
    /// ## Errors
    ///
    /// Returns [`LogError::NotInstalled`] before [`LoggingFacility::install`] succeeds.
    pub fn global() -> LogResult<&'static Self>
    {
        GLOBAL.get().ok_or(LogError::NotInstalled)
    }

    /// Configuration captured at construction.
    #[must_use]
    pub const fn config(&self) -> &FacilityConfig
    {
        &self.config
    }

    /// The once-gate registry backing the `*_once` operations.
    #[must_use]
    pub const fn gates(&self) -> &OnceRegistry
    {
        &self.gates
    }

    /// Whether DEBUG output and the debug-only variants are active.
    #[must_use]
    pub const fn debug_enabled(&self) -> bool
    {
        self.config.debug_enabled
    }

    /// Whether calls at `level` produce output at all.
    #[must_use]
    pub const fn is_enabled(&self, level: Severity) -> bool
    {
        !matches!(level, Severity::Debug) || self.config.debug_enabled
    }

    /// Render, decorate and dispatch one line at `level`.
    ///
    /// Disabled levels return before the template is looked at.
    ///
    /// ## Errors
    ///
    /// Returns [`LogError::Format`] if `template` and `args` don't match.
    /// Sink failures are never returned.
    pub fn log(&self, level: Severity, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let mut output = self.output.lock();
        let record = LogRecord::now(level, render(template, args)?);
        output.dispatch(level, &record.decorate(self.config.scheme));
        Ok(())
    }

    /// Log `label`, a space, and the rendered `container` at `level`.
    pub fn log_stream(&self, level: Severity, label: &str, container: impl IntoContainer)
    {
        if !self.is_enabled(level) {
            return;
        }

        let mut output = self.output.lock();
        let body = format!("{label} {}", container.into_container());
        let record = LogRecord::now(level, body);
        output.dispatch(level, &record.decorate(self.config.scheme));
    }

    /// Run `work` the first time `key` is reached, if `level` is enabled.
    ///
    /// A disabled level leaves the latch untouched, so a DEBUG statement that
    /// was skipped can still fire once debugging is on in another facility.
    /// Later calls return `Ok(())` without evaluating `work`.
    ///
    /// ## Errors
    ///
    /// Whatever `work` returns on the winning call.
    pub fn gated<F>(&self, key: GateKey, level: Severity, work: F) -> LogResult<()>
    where
        F: FnOnce() -> LogResult<()>,
    {
        if !self.is_enabled(level) {
            return Ok(());
        }
        self.gates.run_once(key, work).unwrap_or(Ok(()))
    }

    /// [`LoggingFacility::log`], at most once per `key`.
    ///
    /// ## Errors
    ///
    /// Returns [`LogError::Format`] if the winning call's template is malformed.
    pub fn log_once(&self, key: GateKey, level: Severity, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.gated(key, level, || self.log(level, template, args))
    }

    /// [`LoggingFacility::log_stream`], at most once per `key`.
    pub fn log_stream_once(&self, key: GateKey, level: Severity, label: &str, container: impl IntoContainer)
    {
        // The closure never fails, so the result carries nothing.
        let _ = self.gated(key, level, || {
            self.log_stream(level, label, container);
            Ok(())
        });
    }

    // Leveled scalar logging.

    /// DEBUG line; a no-op unless debug is enabled.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log`].
    pub fn debug(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log(Severity::Debug, template, args)
    }

    /// INFO line.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log`].
    pub fn info(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log(Severity::Info, template, args)
    }

    /// WARNING line, also appended to `warning_log.txt`.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log`].
    pub fn warning(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log(Severity::Warning, template, args)
    }

    /// ERROR line, also appended to `error_log.txt`.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log`].
    pub fn error(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log(Severity::Error, template, args)
    }

    // Leveled container logging.

    /// DEBUG container line; a no-op unless debug is enabled.
    pub fn debug_stream(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream(Severity::Debug, label, container);
    }

    /// INFO container line.
    pub fn info_stream(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream(Severity::Info, label, container);
    }

    /// WARNING container line.
    pub fn warning_stream(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream(Severity::Warning, label, container);
    }

    /// ERROR container line.
    pub fn error_stream(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream(Severity::Error, label, container);
    }

    // WARNING/ERROR that only fire when debug is enabled.

    /// WARNING line emitted only when debug is enabled.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log`].
    pub fn warning_debug(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        if !self.debug_enabled() {
            return Ok(());
        }
        self.warning(template, args)
    }

    /// ERROR line emitted only when debug is enabled.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log`].
    pub fn error_debug(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        if !self.debug_enabled() {
            return Ok(());
        }
        self.error(template, args)
    }

    /// WARNING container line emitted only when debug is enabled.
    pub fn warning_debug_stream(&self, label: &str, container: impl IntoContainer)
    {
        if self.debug_enabled() {
            self.warning_stream(label, container);
        }
    }

    /// ERROR container line emitted only when debug is enabled.
    pub fn error_debug_stream(&self, label: &str, container: impl IntoContainer)
    {
        if self.debug_enabled() {
            self.error_stream(label, container);
        }
    }

    // Once-gated variants keyed by the caller's source location.

    /// [`LoggingFacility::debug`], at most once per call site.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log_once`].
    #[track_caller]
    pub fn debug_once(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log_once(GateKey::caller(), Severity::Debug, template, args)
    }

    /// [`LoggingFacility::info`], at most once per call site.
    ///
    /// Calls made from a macro body share the invocation's location; prefer
    /// [`log_info_once!`](crate::log_info_once) there.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log_once`].
    #[track_caller]
    pub fn info_once(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log_once(GateKey::caller(), Severity::Info, template, args)
    }

    /// [`LoggingFacility::warning`], at most once per call site.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log_once`].
    #[track_caller]
    pub fn warning_once(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log_once(GateKey::caller(), Severity::Warning, template, args)
    }

    /// [`LoggingFacility::error`], at most once per call site.
    ///
    /// ## Errors
    ///
    /// See [`LoggingFacility::log_once`].
    #[track_caller]
    pub fn error_once(&self, template: &str, args: &[&dyn Display]) -> LogResult<()>
    {
        self.log_once(GateKey::caller(), Severity::Error, template, args)
    }

    /// [`LoggingFacility::debug_stream`], at most once per call site.
    #[track_caller]
    pub fn debug_stream_once(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream_once(GateKey::caller(), Severity::Debug, label, container);
    }

    /// [`LoggingFacility::info_stream`], at most once per call site.
    #[track_caller]
    pub fn info_stream_once(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream_once(GateKey::caller(), Severity::Info, label, container);
    }

    /// [`LoggingFacility::warning_stream`], at most once per call site.
    #[track_caller]
    pub fn warning_stream_once(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream_once(GateKey::caller(), Severity::Warning, label, container);
    }

    /// [`LoggingFacility::error_stream`], at most once per call site.
    #[track_caller]
    pub fn error_stream_once(&self, label: &str, container: impl IntoContainer)
    {
        self.log_stream_once(GateKey::caller(), Severity::Error, label, container);
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::dispatch::SharedBuffer;

    fn facility(debug: bool) -> (LoggingFacility, SharedBuffer, tempfile::TempDir)
    {
        let dir = tempfile::tempdir().unwrap();
        let console = SharedBuffer::new();
        let config = FacilityConfig::default().with_debug(debug).with_log_dir(dir.path());
        (LoggingFacility::with_console(config, console.clone()), console, dir)
    }

    #[test]
    fn test_debug_disabled_skips_formatting()
    {
        let (log, console, _dir) = facility(false);
        // Mismatched on purpose: a disabled level must not even render.
        log.debug("{} {}", &[]).unwrap();
        log.debug_stream("label", vec![1]);
        assert!(console.contents().is_empty());
    }

    #[test]
    fn test_debug_enabled_writes_plain_line()
    {
        let (log, console, _dir) = facility(true);
        log.debug("ratio is {}", &[&2.5]).unwrap();
        let out = console.contents();
        assert!(out.ends_with(" [DEBUG]: ratio is 2.5\n"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_format_error_propagates_and_writes_nothing()
    {
        let (log, console, _dir) = facility(false);
        let err = log.info("{} and {}", &[&1]).unwrap_err();
        assert!(matches!(err, LogError::Format { .. }));
        assert!(console.contents().is_empty());
    }

    #[test]
    fn test_disabled_debug_does_not_consume_latch()
    {
        let (log, _console, _dir) = facility(false);
        let key = GateKey::token("debug-site");
        log.log_once(key, Severity::Debug, "x", &[]).unwrap();
        assert!(!log.gates().is_fired(key));
    }

    #[test]
    fn test_is_enabled()
    {
        let (quiet, _c1, _d1) = facility(false);
        let (verbose, _c2, _d2) = facility(true);
        assert!(!quiet.is_enabled(Severity::Debug));
        assert!(quiet.is_enabled(Severity::Info));
        assert!(verbose.is_enabled(Severity::Debug));
    }
}
