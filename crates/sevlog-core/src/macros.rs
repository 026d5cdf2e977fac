//! Logging macros
//!
//! Thin wrappers over [`LoggingFacility`](crate::LoggingFacility) that take
//! arguments variadically. Unlike the methods, arguments are evaluated only
//! when the call will actually log: never for a disabled level, and only by
//! the winning caller of a `*_once` statement.
//!
//! The first argument is anything that derefs to a `LoggingFacility`
//! (`&LoggingFacility`, `Arc<LoggingFacility>`, ...).
//!
//! ```rust
//! use sevlog_core::{log_info, log_info_once, log_warning_stream, FacilityConfig, LoggingFacility};
//! # let dir = tempfile::tempdir().unwrap();
//! let log = LoggingFacility::new(FacilityConfig::default().with_log_dir(dir.path()));
//!
//! log_info!(log, "Value: {}", 42)?;
//! log_warning_stream!(log, "Nums:", vec![1, 2, 3]);
//! for i in 0..5 {
//!     log_info_once!(log, "first iteration was {}", i)?;
//! }
//! # Ok::<(), sevlog_core::LogError>(())
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __sevlog_log {
    ($facility:expr, $level:expr, $template:expr $(, $arg:expr)*) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        let level: $crate::Severity = $level;
        if facility.is_enabled(level) {
            facility.log(level, $template, &[$(&$arg),*])
        } else {
            $crate::error::LogResult::Ok(())
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sevlog_log_once {
    ($facility:expr, $level:expr, $template:expr $(, $arg:expr)*) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        let level: $crate::Severity = $level;
        static SITE: $crate::once::SiteMarker = $crate::once::SiteMarker::new();
        let key = $crate::once::GateKey::site(&SITE);
        facility.gated(key, level, || facility.log(level, $template, &[$(&$arg),*]))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sevlog_stream_once {
    ($facility:expr, $level:expr, $label:expr, $container:expr) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        let level: $crate::Severity = $level;
        static SITE: $crate::once::SiteMarker = $crate::once::SiteMarker::new();
        let key = $crate::once::GateKey::site(&SITE);
        // Container rendering cannot fail.
        let _ = facility.gated(key, level, || {
            facility.log_stream(level, $label, $container);
            $crate::error::LogResult::Ok(())
        });
    }};
}

/// DEBUG line. Evaluates to `LogResult<()>`; arguments untouched when debug is off.
#[macro_export]
macro_rules! log_debug {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log!($facility, $crate::Severity::Debug, $template $(, $arg)*)
    };
}

/// INFO line. Evaluates to `LogResult<()>`.
#[macro_export]
macro_rules! log_info {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log!($facility, $crate::Severity::Info, $template $(, $arg)*)
    };
}

/// WARNING line. Evaluates to `LogResult<()>`.
#[macro_export]
macro_rules! log_warning {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log!($facility, $crate::Severity::Warning, $template $(, $arg)*)
    };
}

/// ERROR line. Evaluates to `LogResult<()>`.
#[macro_export]
macro_rules! log_error {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log!($facility, $crate::Severity::Error, $template $(, $arg)*)
    };
}

/// DEBUG container line; `$container` is untouched when debug is off.
#[macro_export]
macro_rules! log_debug_stream {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        if facility.debug_enabled() {
            facility.debug_stream($label, $container);
        }
    }};
}

/// INFO container line.
#[macro_export]
macro_rules! log_info_stream {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::LoggingFacility::info_stream(&$facility, $label, $container)
    };
}

/// WARNING container line.
#[macro_export]
macro_rules! log_warning_stream {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::LoggingFacility::warning_stream(&$facility, $label, $container)
    };
}

/// ERROR container line.
#[macro_export]
macro_rules! log_error_stream {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::LoggingFacility::error_stream(&$facility, $label, $container)
    };
}

/// WARNING line that only fires when debug is enabled.
#[macro_export]
macro_rules! log_warning_debug {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        if facility.debug_enabled() {
            facility.warning($template, &[$(&$arg),*])
        } else {
            $crate::error::LogResult::Ok(())
        }
    }};
}

/// ERROR line that only fires when debug is enabled.
#[macro_export]
macro_rules! log_error_debug {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        if facility.debug_enabled() {
            facility.error($template, &[$(&$arg),*])
        } else {
            $crate::error::LogResult::Ok(())
        }
    }};
}

/// WARNING container line that only fires when debug is enabled.
#[macro_export]
macro_rules! log_warning_debug_stream {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        if facility.debug_enabled() {
            facility.warning_stream($label, $container);
        }
    }};
}

/// ERROR container line that only fires when debug is enabled.
#[macro_export]
macro_rules! log_error_debug_stream {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {{
        let facility: &$crate::LoggingFacility = &$facility;
        if facility.debug_enabled() {
            facility.error_stream($label, $container);
        }
    }};
}

/// DEBUG line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_debug_once {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log_once!($facility, $crate::Severity::Debug, $template $(, $arg)*)
    };
}

/// INFO line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_info_once {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log_once!($facility, $crate::Severity::Info, $template $(, $arg)*)
    };
}

/// WARNING line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_warning_once {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log_once!($facility, $crate::Severity::Warning, $template $(, $arg)*)
    };
}

/// ERROR line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_error_once {
    ($facility:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__sevlog_log_once!($facility, $crate::Severity::Error, $template $(, $arg)*)
    };
}

/// DEBUG container line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_debug_stream_once {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::__sevlog_stream_once!($facility, $crate::Severity::Debug, $label, $container)
    };
}

/// INFO container line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_info_stream_once {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::__sevlog_stream_once!($facility, $crate::Severity::Info, $label, $container)
    };
}

/// WARNING container line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_warning_stream_once {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::__sevlog_stream_once!($facility, $crate::Severity::Warning, $label, $container)
    };
}

/// ERROR container line, at most once for this macro invocation.
#[macro_export]
macro_rules! log_error_stream_once {
    ($facility:expr, $label:expr, $container:expr $(,)?) => {
        $crate::__sevlog_stream_once!($facility, $crate::Severity::Error, $label, $container)
    };
}
