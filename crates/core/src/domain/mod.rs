// Domain Layer - supervision configuration and notification payloads

pub mod notify_state;
pub mod supervision;

pub use notify_state::NotifyState;
pub use supervision::SupervisionContext;
