//! # Facility Configuration
//!
//! Settings are read once when a [`LoggingFacility`](crate::LoggingFacility) is
//! constructed and never change afterwards.
//!
//! ## Environment Variables
//!
//! Consulted only by [`FacilityConfig::from_env`]:
//!
//! - `SEVLOG_DEBUG`: enable DEBUG output (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`)
//! - `SEVLOG_LOG_DIR`: directory for `warning_log.txt` and `error_log.txt` (default: `.`)
//! - `SEVLOG_SCHEME`: severity labels, `standard` or `normal`
//! - `NO_COLOR` / `SEVLOG_NO_COLOR`: disable ANSI colors when set
//!
//! ```rust
//! use sevlog_core::{FacilityConfig, SeverityScheme};
//!
//! let config = FacilityConfig::default()
//!     .with_debug(true)
//!     .with_scheme(SeverityScheme::Normal)
//!     .with_log_dir("logs");
//! assert!(config.debug_enabled);
//! ```

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::severity::SeverityScheme;

/// Configuration for a logging facility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityConfig
{
    /// Whether DEBUG calls (and the debug-only WARNING/ERROR variants) do anything
    pub debug_enabled: bool,
    /// Whether console lines carry ANSI color escapes
    pub ansi: bool,
    /// Directory holding the per-severity files
    pub log_dir: PathBuf,
    /// Label set for the informational tier
    pub scheme: SeverityScheme,
}

impl Default for FacilityConfig
{
    fn default() -> Self
    {
        Self {
            debug_enabled: cfg!(feature = "debug-log"),
            ansi: true,
            log_dir: PathBuf::from("."),
            scheme: SeverityScheme::Standard,
        }
    }
}

impl FacilityConfig
{
    /// Defaults overridden by whatever environment variables are set.
    ///
    /// Unparseable values are ignored rather than reported.
    #[must_use]
    pub fn from_env() -> Self
    {
        Self::from_vars(|name| env::var_os(name))
    }

    /// Defaults overridden by the variables `lookup` resolves.
    fn from_vars(lookup: impl Fn(&str) -> Option<OsString>) -> Self
    {
        let mut config = Self::default();
        let text = |name: &str| lookup(name).and_then(|v| v.into_string().ok());

        if let Some(debug) = text("SEVLOG_DEBUG").and_then(|v| parse_switch(&v)) {
            config.debug_enabled = debug;
        }
        if let Some(dir) = lookup("SEVLOG_LOG_DIR").filter(|d| !d.is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(scheme) = text("SEVLOG_SCHEME").and_then(|s| s.parse().ok()) {
            config.scheme = scheme;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) || lookup("SEVLOG_NO_COLOR").is_some() {
            config.ansi = false;
        }

        config
    }

    /// Enable or disable DEBUG output.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self
    {
        self.debug_enabled = enabled;
        self
    }

    /// Enable or disable ANSI colors on the console.
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self
    {
        self.ansi = ansi;
        self
    }

    /// Directory for the per-severity files.
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl AsRef<Path>) -> Self
    {
        self.log_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Severity label set.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: SeverityScheme) -> Self
    {
        self.scheme = scheme;
        self
    }
}

fn parse_switch(value: &str) -> Option<bool>
{
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> FacilityConfig
    {
        let vars: HashMap<String, OsString> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), OsString::from(v))).collect();
        FacilityConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults()
    {
        let config = FacilityConfig::default();
        assert!(config.ansi);
        assert_eq!(config.log_dir, PathBuf::from("."));
        assert_eq!(config.scheme, SeverityScheme::Standard);
        assert_eq!(config.debug_enabled, cfg!(feature = "debug-log"));
    }

    #[test]
    fn test_builder()
    {
        let config = FacilityConfig::default()
            .with_debug(true)
            .with_ansi(false)
            .with_log_dir("/var/tmp/app")
            .with_scheme(SeverityScheme::Normal);
        assert!(config.debug_enabled);
        assert!(!config.ansi);
        assert_eq!(config.log_dir, PathBuf::from("/var/tmp/app"));
        assert_eq!(config.scheme, SeverityScheme::Normal);
    }

    #[test]
    fn test_vars_override_defaults()
    {
        let config = from_pairs(&[
            ("SEVLOG_DEBUG", "on"),
            ("SEVLOG_LOG_DIR", "/tmp/sevlog"),
            ("SEVLOG_SCHEME", "normal"),
            ("SEVLOG_NO_COLOR", ""),
        ]);
        assert!(config.debug_enabled);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/sevlog"));
        assert_eq!(config.scheme, SeverityScheme::Normal);
        assert!(!config.ansi);

        assert!(!from_pairs(&[("SEVLOG_DEBUG", "off")]).debug_enabled);
        assert!(!from_pairs(&[("NO_COLOR", "1")]).ansi);
    }

    #[test]
    fn test_bad_vars_are_ignored()
    {
        let config = from_pairs(&[
            ("SEVLOG_DEBUG", "maybe"),
            ("SEVLOG_LOG_DIR", ""),
            ("SEVLOG_SCHEME", "loud"),
            ("NO_COLOR", ""),
        ]);
        assert_eq!(config, FacilityConfig::default());
    }

    #[test]
    fn test_parse_switch()
    {
        assert_eq!(parse_switch("ON"), Some(true));
        assert_eq!(parse_switch(" 1 "), Some(true));
        assert_eq!(parse_switch("no"), Some(false));
        assert_eq!(parse_switch("maybe"), None);
    }
}
