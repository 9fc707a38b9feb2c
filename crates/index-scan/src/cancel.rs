//! Cancellation tokens for partitioned scans.
//!
//! The scan primitives themselves have no yield points. A caller that wants
//! to abandon a search splits it into partitions and checks a token between
//! them (see [`crate::partition`]). Tokens are versioned: starting a newer
//! search cancels every token handed out for older ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Tracks the active search version for cancellation.
#[derive(Debug, Default, Clone)]
pub struct SearchVersionTracker {
    active_version: Arc<AtomicU64>,
}

impl SearchVersionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the active version and returns the new version number.
    ///
    /// Tokens for every older version report cancelled from now on.
    pub fn next_version(&self) -> u64 {
        self.active_version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Creates a token that is cancelled once the active version moves past `version`.
    pub fn token_for_version(&self, version: u64) -> CancellationToken {
        CancellationToken {
            active_version: Some(Arc::clone(&self.active_version)),
            version,
        }
    }
}

/// A cancellation token checked between scan partitions.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    /// `None` for tokens that can never be cancelled.
    active_version: Option<Arc<AtomicU64>>,
    version: u64,
}

impl CancellationToken {
    /// Creates a token that is never cancelled.
    #[inline]
    pub fn noop() -> Self {
        Self::default()
    }

    /// Returns `Some(())` while still active and `None` once cancelled,
    /// so callers can bail out with `?`.
    #[inline]
    pub fn is_cancelled(&self) -> Option<()> {
        match &self.active_version {
            Some(active) if active.load(Ordering::Relaxed) != self.version => None,
            _ => Some(()),
        }
    }
}
