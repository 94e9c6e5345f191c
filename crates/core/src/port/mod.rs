// Port Layer - Interfaces for external dependencies

pub mod health_probe;
pub mod notifier;

// Re-exports
pub use health_probe::{HealthProbe, ProbeError};
pub use notifier::{Notifier, NotifyError};
