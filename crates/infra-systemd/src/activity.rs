//! Activity-deadline health probe
//!
//! Reports healthy while activity has been recorded within a configured
//! deadline. The workload calls [`ActivityProbe::touch`] whenever it makes
//! progress; a stalled workload stops touching and the probe flips
//! unhealthy once the deadline passes.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;
use vigil_core::port::{HealthProbe, ProbeError};

pub struct ActivityProbe {
    name: String,
    deadline: Duration,
    last_activity: Mutex<Instant>,
}

impl ActivityProbe {
    /// New probe; the deadline clock starts at construction.
    pub fn new(name: impl Into<String>, deadline: Duration) -> Self {
        Self {
            name: name.into(),
            deadline,
            last_activity: Mutex::new(Instant::now()),
        }
    }

    /// Record workload activity, resetting the deadline.
    pub fn touch(&self) {
        if let Ok(mut last) = self.last_activity.lock() {
            *last = Instant::now();
        }
    }
}

impl HealthProbe for ActivityProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn healthy(&self) -> Result<bool, ProbeError> {
        let last = self
            .last_activity
            .lock()
            .map_err(|_| ProbeError::new(self.name.clone(), "activity clock poisoned"))?;
        let idle = last.elapsed();
        let healthy = idle <= self.deadline;
        debug!(probe = %self.name, idle_ms = idle.as_millis() as u64, healthy, "activity probe queried");
        Ok(healthy)
    }
}
