//! Notification payloads sent to the process supervisor
//!
//! The wire format is a single `KEY=VALUE` line, interpreted by the
//! supervisor (sd_notify protocol). The liveness ping is a fixed constant;
//! it is not rebuilt per tick.

use std::borrow::Cow;
use std::fmt;

/// A single `KEY=VALUE` state line for the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyState {
    raw: Cow<'static, str>,
}

impl NotifyState {
    /// Liveness ping: "I am still alive and healthy".
    pub const WATCHDOG: NotifyState = NotifyState::from_static("WATCHDOG=1");

    /// Startup finished, the service is ready to serve.
    pub const READY: NotifyState = NotifyState::from_static("READY=1");

    /// Graceful shutdown has begun.
    pub const STOPPING: NotifyState = NotifyState::from_static("STOPPING=1");

    const fn from_static(raw: &'static str) -> Self {
        Self {
            raw: Cow::Borrowed(raw),
        }
    }

    /// Free-form status line shown by the supervisor's status output.
    pub fn status(message: &str) -> Self {
        Self {
            raw: Cow::Owned(format!("STATUS={}", message)),
        }
    }

    /// The raw wire representation.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NotifyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchdog_ping_wire_format() {
        assert_eq!(NotifyState::WATCHDOG.as_str(), "WATCHDOG=1");
    }

    #[test]
    fn lifecycle_states_wire_format() {
        assert_eq!(NotifyState::READY.as_str(), "READY=1");
        assert_eq!(NotifyState::STOPPING.as_str(), "STOPPING=1");
    }

    #[test]
    fn status_prefixes_message() {
        let state = NotifyState::status("processing queue");
        assert_eq!(state.as_str(), "STATUS=processing queue");
    }
}
