// Notifier port - delivery channel toward the process supervisor

use crate::domain::NotifyState;
use thiserror::Error;

/// Delivery failure surfaced by a notification channel.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification socket unavailable: {0}")]
    Unavailable(String),

    #[error("notification send failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Notification channel port
///
/// Accepts a single `KEY=VALUE` state line and attempts best-effort
/// delivery to the process supervisor. Sends are fire-and-forget from
/// the watchdog engine's point of view: a failed send is not retried
/// within the same tick, the next tick re-attempts naturally.
pub trait Notifier: Send + Sync {
    fn notify(&self, state: &NotifyState) -> Result<(), NotifyError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock Notifier that records every state it was handed.
    #[derive(Clone, Default)]
    pub struct RecordingNotifier {
        sent: Arc<Mutex<Vec<NotifyState>>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sent(&self) -> Vec<NotifyState> {
            self.sent.lock().unwrap().clone()
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, state: &NotifyState) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(state.clone());
            Ok(())
        }
    }

    /// Mock Notifier whose sends always fail.
    pub struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn notify(&self, _state: &NotifyState) -> Result<(), NotifyError> {
            Err(NotifyError::Unavailable("mock channel down".to_string()))
        }
    }
}
