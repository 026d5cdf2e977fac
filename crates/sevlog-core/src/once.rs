//! # Once-Gate
//!
//! Per-call-site latches for "log this only the first time" statements.
//!
//! Each call site is identified by a [`GateKey`] and owns one latch in the
//! [`OnceRegistry`]. The `log_*_once!` macros key on a [`SiteMarker`] static
//! planted in their own expansion, so two statements inside one helper macro
//! never share a latch. The `*_once` methods key on `#[track_caller]`
//! locations, which collapse to the outermost macro invocation when called
//! from a macro body. A latch moves from unfired to fired exactly once, via an
//! atomic compare-exchange, and is never reset. The registry is sharded
//! (`DashMap`), so checks against different call sites don't serialize on a
//! single lock, and the facility's output mutex is never touched by a check.
//!
//! ```rust
//! use sevlog_core::once::{GateKey, OnceRegistry};
//!
//! let registry = OnceRegistry::new();
//! let key = GateKey::token("startup-banner");
//! assert!(registry.try_fire(key));
//! assert!(!registry.try_fire(key));
//! ```

use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

/// Stable identity of a once-gated call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKey
{
    /// A source location, normally captured through `#[track_caller]`
    Location
    {
        /// Source file
        file: &'static str,
        /// 1-based line
        line: u32,
        /// 1-based column
        column: u32,
    },
    /// Address of a [`SiteMarker`] static, unique per macro expansion
    Site(usize),
    /// An explicit, caller-chosen token
    Token(&'static str),
}

/// Per-expansion anchor for a once-gated macro statement.
///
/// Statics with interior mutability always get their own address, so every
/// `static` of this type names exactly one expansion.
#[derive(Debug)]
pub struct SiteMarker(AtomicU8);

impl SiteMarker
{
    /// A fresh marker, for use in a `static`.
    #[must_use]
    pub const fn new() -> Self
    {
        Self(AtomicU8::new(0))
    }
}

impl Default for SiteMarker
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl GateKey
{
    /// Key for the location that called this function (or the nearest
    /// `#[track_caller]` frame above it).
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self
    {
        Self::from(Location::caller())
    }

    /// Key for the expansion owning `marker`.
    #[must_use]
    pub fn site(marker: &'static SiteMarker) -> Self
    {
        Self::Site(std::ptr::from_ref(marker) as usize)
    }

    /// Key for an explicit token.
    #[must_use]
    pub const fn token(token: &'static str) -> Self
    {
        Self::Token(token)
    }
}

impl From<&'static Location<'static>> for GateKey
{
    fn from(location: &'static Location<'static>) -> Self
    {
        Self::Location {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for GateKey
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Location { file, line, column } => write!(f, "{file}:{line}:{column}"),
            Self::Site(address) => write!(f, "site:{address:#x}"),
            Self::Token(token) => write!(f, "token:{token}"),
        }
    }
}

/// One call site's latch.
#[derive(Debug, Default)]
struct OnceLatch
{
    fired: AtomicBool,
}

impl OnceLatch
{
    fn try_fire(&self) -> bool
    {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn is_fired(&self) -> bool
    {
        self.fired.load(Ordering::Acquire)
    }
}

/// Table of latches keyed by call site.
#[derive(Debug, Default)]
pub struct OnceRegistry
{
    latches: DashMap<GateKey, Arc<OnceLatch>>,
}

impl OnceRegistry
{
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Atomically fire the latch for `key`.
    ///
    /// Returns `true` for exactly one caller per key over the registry's
    /// lifetime, however many threads race; every other call returns `false`.
    pub fn try_fire(&self, key: GateKey) -> bool
    {
        let latch = self.latch(key);
        let won = latch.try_fire();
        if won {
            trace!(call_site = %key, "once-gate fired");
        }
        won
    }

    /// Run `work` only if this call fires the latch for `key`.
    ///
    /// `work` is never evaluated by losing callers. Returns `None` when the
    /// latch had already fired.
    pub fn run_once<T>(&self, key: GateKey, work: impl FnOnce() -> T) -> Option<T>
    {
        self.try_fire(key).then(work)
    }

    /// Whether the latch for `key` has fired. Unknown keys have not.
    #[must_use]
    pub fn is_fired(&self, key: GateKey) -> bool
    {
        self.latches.get(&key).is_some_and(|latch| latch.is_fired())
    }

    /// Number of call sites seen so far.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.latches.len()
    }

    /// Whether no call site has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.latches.is_empty()
    }

    fn latch(&self, key: GateKey) -> Arc<OnceLatch>
    {
        // Clone the Arc out so the shard guard is released before the CAS.
        if let Some(latch) = self.latches.get(&key) {
            return Arc::clone(latch.value());
        }
        Arc::clone(self.latches.entry(key).or_default().value())
    }
}

#[cfg(test)]
mod tests
{
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    use super::*;

    #[test]
    fn test_fires_exactly_once_in_a_loop()
    {
        let registry = OnceRegistry::new();
        let key = GateKey::token("loop");
        let fired = (0..5).filter(|_| registry.try_fire(key)).count();
        assert_eq!(fired, 1);
        assert!(registry.is_fired(key));
    }

    #[test]
    fn test_keys_are_independent()
    {
        let registry = OnceRegistry::new();
        assert!(registry.try_fire(GateKey::token("a")));
        assert!(registry.try_fire(GateKey::token("b")));
        assert!(!registry.try_fire(GateKey::token("a")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_caller_locations_differ_per_line()
    {
        let first = GateKey::caller();
        let second = GateKey::caller();
        assert_ne!(first, second);
        assert!(first.to_string().contains("once.rs"));
    }

    #[test]
    fn test_site_markers_are_distinct()
    {
        static FIRST: SiteMarker = SiteMarker::new();
        static SECOND: SiteMarker = SiteMarker::new();

        let registry = OnceRegistry::new();
        assert_ne!(GateKey::site(&FIRST), GateKey::site(&SECOND));
        assert_eq!(GateKey::site(&FIRST), GateKey::site(&FIRST));
        assert!(registry.try_fire(GateKey::site(&FIRST)));
        assert!(registry.try_fire(GateKey::site(&SECOND)));
        assert!(GateKey::site(&FIRST).to_string().starts_with("site:0x"));
    }

    #[test]
    fn test_run_once_skips_work_for_losers()
    {
        let registry = OnceRegistry::new();
        let key = GateKey::token("work");
        let evaluations = AtomicUsize::new(0);
        for _ in 0..10 {
            registry.run_once(key, || evaluations.fetch_add(1, Ordering::SeqCst));
        }
        assert_eq!(evaluations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_callers_single_winner()
    {
        let registry = Arc::new(OnceRegistry::new());
        let winners = Arc::new(AtomicUsize::new(0));
        let key = GateKey::token("race");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    for _ in 0..100 {
                        if registry.try_fire(key) {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_key_is_not_fired()
    {
        let registry = OnceRegistry::new();
        assert!(!registry.is_fired(GateKey::token("never")));
        assert!(registry.is_empty());
    }
}
