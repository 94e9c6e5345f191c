//! Vigil Watchdog Daemon - Main Entry Point
//!
//! Composition root: wires the watchdog engine to the systemd adapters
//! and runs a demo workload that feeds the activity probe. Designed for
//! a `Type=notify` unit with `WatchdogSec=` set.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vigil_core::application::Watchdog;
use vigil_core::domain::{NotifyState, SupervisionContext};
use vigil_core::port::{HealthProbe, Notifier};
use vigil_infra_systemd::{ActivityProbe, NotifySocket};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WORKLOAD_PERIOD: Duration = Duration::from_secs(1);
const ACTIVITY_DEADLINE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("VIGIL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("vigil=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Vigil watchdog daemon v{} starting...", VERSION);

    // 2. Load supervisor configuration (a malformed WATCHDOG_USEC is fatal)
    let supervision = SupervisionContext::from_env()?;

    // 3. Notification channel. Without a notify socket there is no
    //    supervisor listening, so the watchdog stays out of the way
    //    and the workload runs on its own.
    let notifier = NotifySocket::from_env().map(Arc::new);
    if notifier.is_none() {
        info!("NOTIFY_SOCKET not set, running without supervisor notifications");
    }

    // 4. Health probe + demo workload feeding it
    let activity = Arc::new(ActivityProbe::new("demo-workload", ACTIVITY_DEADLINE));

    let workload = tokio::spawn({
        let activity = Arc::clone(&activity);
        async move {
            loop {
                sleep(WORKLOAD_PERIOD).await;
                activity.touch();
                debug!("workload heartbeat");
            }
        }
    });

    // 5. Watchdog wiring (inert when the supervisor did not ask for pings)
    let mut watchdog = match &notifier {
        Some(socket) => {
            let probes: Vec<Arc<dyn HealthProbe>> =
                vec![Arc::clone(&activity) as Arc<dyn HealthProbe>];
            let mut watchdog = Watchdog::new(
                probes,
                Arc::clone(socket) as Arc<dyn Notifier>,
                &supervision,
            )?;
            watchdog.start();
            Some(watchdog)
        }
        None => None,
    };

    // 6. Host-level ready notification (the watchdog loop never sends this)
    if let Some(socket) = &notifier {
        if let Err(e) = socket.notify(&NotifyState::READY) {
            warn!(error = %e, "ready notification failed");
        }
    }

    info!("Ready. Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 8. Graceful shutdown: announce, disarm, stop the workload
    if let Some(socket) = &notifier {
        if let Err(e) = socket.notify(&NotifyState::STOPPING) {
            warn!(error = %e, "stopping notification failed");
        }
    }
    if let Some(watchdog) = watchdog.as_mut() {
        watchdog.stop();
    }
    workload.abort();

    info!("Shutdown complete.");

    Ok(())
}
