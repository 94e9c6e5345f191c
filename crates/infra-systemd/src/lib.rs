// Vigil Infrastructure - systemd Adapters
// Implements: Notifier (sd_notify socket), HealthProbe (activity deadline)

pub mod activity;
pub mod notify_socket;

pub use activity::ActivityProbe;
pub use notify_socket::NotifySocket;
