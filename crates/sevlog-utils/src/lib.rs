//! # Sevlog Utilities
//!
//! Shared helpers for the sevlog workspace.
//!
//! This crate wires up `tracing` diagnostics for sevlog's own internals,
//! kept on stderr so they stay out of the facility's stdout console sink.

pub mod diagnostics;

// Re-export commonly used diagnostics functions for convenience
pub use diagnostics::{
    init_diagnostics, init_diagnostics_with_level, DiagnosticsError, DiagnosticsFormat, DiagnosticsGuard,
    DiagnosticsLevel,
};
