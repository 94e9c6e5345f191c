// Health probe port - liveness input for the watchdog engine

use thiserror::Error;

/// Failure of a probe query itself, distinct from `Ok(false)`.
///
/// A probe that cannot answer must not be mistaken for a healthy one;
/// the watchdog engine treats this as fail-closed and withholds the
/// liveness ping for that tick.
#[derive(Error, Debug)]
#[error("health probe {probe:?} failed: {reason}")]
pub struct ProbeError {
    pub probe: String,
    pub reason: String,
}

impl ProbeError {
    pub fn new(probe: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            probe: probe.into(),
            reason: reason.into(),
        }
    }
}

/// Health probe port
///
/// Implementations decide what "healthy" means (e.g. "activity seen
/// within a deadline"). Queries are synchronous, non-blocking reads of
/// cached or precomputed status by contract - never I/O.
pub trait HealthProbe: Send + Sync {
    /// Stable name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Current health status.
    ///
    /// # Returns
    /// `Ok(true)` if healthy, `Ok(false)` if unhealthy, `Err` if the
    /// query itself could not be answered.
    fn healthy(&self) -> Result<bool, ProbeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Mock HealthProbe for testing
    ///
    /// Settable health status plus a query counter so tests can assert
    /// that every probe was polled on a tick.
    pub struct MockHealthProbe {
        name: String,
        healthy: Arc<AtomicBool>,
        queries: Arc<AtomicUsize>,
    }

    impl MockHealthProbe {
        pub fn new(name: impl Into<String>, healthy: bool) -> Self {
            Self {
                name: name.into(),
                healthy: Arc::new(AtomicBool::new(healthy)),
                queries: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn set_healthy(&self, healthy: bool) {
            self.healthy.store(healthy, Ordering::SeqCst);
        }

        pub fn query_count(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }

        /// Handle that shares state with the probe, for flipping health
        /// from the test while the engine holds the probe.
        pub fn handle(&self) -> MockHealthProbe {
            MockHealthProbe {
                name: self.name.clone(),
                healthy: Arc::clone(&self.healthy),
                queries: Arc::clone(&self.queries),
            }
        }
    }

    impl HealthProbe for MockHealthProbe {
        fn name(&self) -> &str {
            &self.name
        }

        fn healthy(&self) -> Result<bool, ProbeError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.healthy.load(Ordering::SeqCst))
        }
    }

    /// Mock probe whose query always fails (for fail-closed tests)
    pub struct FailingProbe {
        name: String,
    }

    impl FailingProbe {
        pub fn new(name: impl Into<String>) -> Self {
            Self { name: name.into() }
        }
    }

    impl HealthProbe for FailingProbe {
        fn name(&self) -> &str {
            &self.name
        }

        fn healthy(&self) -> Result<bool, ProbeError> {
            Err(ProbeError::new(self.name.clone(), "query failed"))
        }
    }
}
