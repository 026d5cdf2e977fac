//! Common module for library exports

pub use crate::config::FacilityConfig;
pub use crate::container::{Container, IntoContainer, Ordinal};
pub use crate::error::{LogError, LogResult};
pub use crate::facility::LoggingFacility;
pub use crate::once::GateKey;
pub use crate::severity::{Severity, SeverityScheme};
