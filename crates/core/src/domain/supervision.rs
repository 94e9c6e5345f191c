//! Supervision context - the supervisor-provided configuration snapshot
//!
//! Read once at startup from the process environment and never mutated.
//! A supervising init that wants liveness pings exports `WATCHDOG_USEC`,
//! its own timeout in microseconds. Absence means the process is not
//! being watchdog-monitored.

use crate::error::{AppError, Result};
use tracing::debug;

/// Environment variable carrying the supervisor's watchdog timeout.
pub const WATCHDOG_USEC_ENV: &str = "WATCHDOG_USEC";

/// Immutable snapshot of supervisor-provided watchdog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisionContext {
    watchdog_timeout_usec: Option<u64>,
}

impl SupervisionContext {
    /// Context with watchdog monitoring disabled.
    pub fn disabled() -> Self {
        Self {
            watchdog_timeout_usec: None,
        }
    }

    /// Context with an explicit supervisor timeout (microseconds).
    ///
    /// A zero timeout disables monitoring, matching what a supervisor
    /// means by exporting `WATCHDOG_USEC=0`.
    pub fn with_timeout_usec(timeout_usec: u64) -> Self {
        Self {
            watchdog_timeout_usec: if timeout_usec == 0 {
                None
            } else {
                Some(timeout_usec)
            },
        }
    }

    /// Read the context from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `WATCHDOG_USEC` is present but not a
    /// valid non-negative integer. A malformed value is a fatal
    /// misconfiguration, never silently downgraded to "disabled".
    pub fn from_env() -> Result<Self> {
        match std::env::var(WATCHDOG_USEC_ENV) {
            Ok(raw) => {
                debug!(%raw, "{} set by supervisor", WATCHDOG_USEC_ENV);
                Self::parse(&raw)
            }
            Err(std::env::VarError::NotPresent) => {
                debug!("{} not set, watchdog disabled", WATCHDOG_USEC_ENV);
                Ok(Self::disabled())
            }
            Err(std::env::VarError::NotUnicode(_)) => Err(AppError::Config(format!(
                "{} is not valid unicode",
                WATCHDOG_USEC_ENV
            ))),
        }
    }

    /// Parse a raw `WATCHDOG_USEC` value.
    pub fn parse(raw: &str) -> Result<Self> {
        let timeout_usec: u64 = raw.trim().parse().map_err(|_| {
            AppError::Config(format!(
                "{} must be a non-negative integer, got {:?}",
                WATCHDOG_USEC_ENV, raw
            ))
        })?;
        Ok(Self::with_timeout_usec(timeout_usec))
    }

    /// Supervisor timeout in microseconds, `None` when monitoring is disabled.
    pub fn watchdog_timeout_usec(&self) -> Option<u64> {
        self.watchdog_timeout_usec
    }

    /// Whether the supervisor requested watchdog monitoring.
    pub fn is_enabled(&self) -> bool {
        self.watchdog_timeout_usec.is_some()
    }
}
