//! Watchdog engine - proves liveness to the process supervisor
//!
//! Owns a recurring timer derived from the supervisor's declared timeout
//! (see [`interval`]). On each tick every registered health probe is
//! queried; only when all of them report healthy is a `WATCHDOG=1` ping
//! handed to the notification channel. An unhealthy or failing probe
//! silently withholds the ping and lets the supervisor's own timeout
//! countdown run - that escalation path is the point of the design.

pub mod disarm;
pub mod interval;

pub use disarm::{disarm_channel, DisarmHandle, DisarmSignal};

use crate::domain::{NotifyState, SupervisionContext};
use crate::error::{AppError, Result};
use crate::port::{HealthProbe, Notifier, ProbeError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

struct ArmedTimer {
    disarm: DisarmHandle,
    // Kept so stop() detaches deliberately rather than by accident.
    _task: JoinHandle<()>,
}

/// Watchdog engine instance
///
/// Holds shared references to its probe set and notification channel;
/// lifetimes are managed by the host. States: inert (supervisor did not
/// request monitoring), stopped, running. Dropping the instance disarms
/// the timer.
pub struct Watchdog {
    probes: Arc<[Arc<dyn HealthProbe>]>,
    notifier: Arc<dyn Notifier>,
    interval: Option<Duration>,
    armed: Option<ArmedTimer>,
}

impl Watchdog {
    /// Create a watchdog engine.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `probes` is empty - a watchdog with
    /// nothing to check is a misconfiguration, not silently tolerated.
    /// With a disabled [`SupervisionContext`] the instance is constructed
    /// but inert: `start` never arms a timer.
    pub fn new(
        probes: Vec<Arc<dyn HealthProbe>>,
        notifier: Arc<dyn Notifier>,
        context: &SupervisionContext,
    ) -> Result<Self> {
        if probes.is_empty() {
            return Err(AppError::Config(
                "at least one health probe must be registered".to_string(),
            ));
        }

        let interval = interval::ping_interval(context);
        match interval {
            Some(period) => info!(
                probes = probes.len(),
                period_ms = period.as_millis() as u64,
                "watchdog configured"
            ),
            None => info!("supervisor did not request watchdog monitoring, engine inert"),
        }

        Ok(Self {
            probes: probes.into(),
            notifier,
            interval,
            armed: None,
        })
    }

    /// Tick period, `None` when the engine is inert.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Whether the timer is currently armed.
    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// Arm the recurring timer.
    ///
    /// The first tick fires one full interval after start; there is no
    /// immediate tick. No-op when inert or already running.
    pub fn start(&mut self) {
        let Some(period) = self.interval else {
            debug!("watchdog inert, start is a no-op");
            return;
        };
        if self.armed.is_some() {
            debug!("watchdog already running, start is a no-op");
            return;
        }

        let (handle, signal) = disarm_channel();
        let task = tokio::spawn(run_ticks(
            Arc::clone(&self.probes),
            Arc::clone(&self.notifier),
            period,
            signal,
        ));
        self.armed = Some(ArmedTimer {
            disarm: handle,
            _task: task,
        });
    }

    /// Disarm the timer.
    ///
    /// Barrier against future ticks only: a tick already executing is
    /// allowed to finish, no new tick is scheduled afterwards. Returns
    /// promptly, never waits for an in-flight tick. No-op when not armed.
    pub fn stop(&mut self) {
        match self.armed.take() {
            Some(armed) => armed.disarm.disarm(),
            None => debug!("watchdog not running, stop is a no-op"),
        }
    }
}

impl std::fmt::Debug for Watchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchdog")
            .field("probes", &self.probes.len())
            .field("interval", &self.interval)
            .field("running", &self.armed.is_some())
            .finish()
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ticker task: runs until disarmed.
async fn run_ticks(
    probes: Arc<[Arc<dyn HealthProbe>]>,
    notifier: Arc<dyn Notifier>,
    period: Duration,
    mut disarm: DisarmSignal,
) {
    // interval_at: first tick after one full period, not immediately.
    let mut timer = time::interval_at(time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_ms = period.as_millis() as u64, "watchdog armed");

    loop {
        tokio::select! {
            biased;
            _ = disarm.wait() => {
                info!("watchdog disarmed");
                break;
            }
            _ = timer.tick() => {
                tick(&probes, notifier.as_ref());
            }
        }
    }
}

/// One round of probe aggregation and conditional notification.
fn tick(probes: &[Arc<dyn HealthProbe>], notifier: &dyn Notifier) {
    match poll_probes(probes) {
        Ok(true) => match notifier.notify(&NotifyState::WATCHDOG) {
            Ok(()) => trace!("liveness ping sent"),
            // No retry within the tick; the next tick re-attempts.
            Err(e) => warn!(error = %e, "liveness ping delivery failed"),
        },
        Ok(false) => debug!("probe set unhealthy, withholding liveness ping"),
        // Fail closed: a probe that cannot answer must not be able to
        // mask unhealthiness, so the ping is withheld for this tick.
        Err(e) => error!(probe = %e.probe, error = %e, "probe query failed, withholding liveness ping"),
    }
}

/// Aggregate probe health with logical AND.
///
/// Every probe is queried even after an earlier one reported unhealthy -
/// probes may carry observation side effects such as logging, and partial
/// evaluation must not be relied upon. A query failure propagates
/// immediately and terminates evaluation.
fn poll_probes(probes: &[Arc<dyn HealthProbe>]) -> std::result::Result<bool, ProbeError> {
    let mut all_healthy = true;
    for probe in probes {
        all_healthy &= probe.healthy()?;
    }
    Ok(all_healthy)
}
