//! Watchdog engine behavioural tests
//!
//! Runs the engine against mock ports under tokio's paused clock, so tick
//! cadence is deterministic: sleeping in the test auto-advances time and
//! interleaves the engine's timer ticks at their exact deadlines.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use vigil_core::application::Watchdog;
use vigil_core::domain::{NotifyState, SupervisionContext};
use vigil_core::port::health_probe::mocks::{FailingProbe, MockHealthProbe};
use vigil_core::port::notifier::mocks::RecordingNotifier;
use vigil_core::port::{HealthProbe, Notifier};
use vigil_core::AppError;

/// Supervisor timeout of 2s, ping interval of 1s.
fn two_second_supervisor() -> SupervisionContext {
    SupervisionContext::with_timeout_usec(2_000_000)
}

fn probe(name: &str, healthy: bool) -> (Arc<dyn HealthProbe>, MockHealthProbe) {
    let probe = MockHealthProbe::new(name, healthy);
    let handle = probe.handle();
    (Arc::new(probe), handle)
}

#[tokio::test(start_paused = true)]
async fn pings_every_half_timeout_while_healthy() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (p, _) = probe("always-healthy", true);
    let mut watchdog =
        Watchdog::new(vec![p], Arc::clone(&notifier) as Arc<dyn Notifier>, &two_second_supervisor()).unwrap();

    watchdog.start();
    sleep(Duration::from_millis(2500)).await;

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2, "ticks at t=1s and t=2s");
    assert!(sent.iter().all(|s| *s == NotifyState::WATCHDOG));

    watchdog.stop();
}

#[tokio::test(start_paused = true)]
async fn unhealthy_probe_skips_ticks_until_recovery() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (steady, _) = probe("steady", true);
    let (flappy, flappy_handle) = probe("flappy", true);
    let mut watchdog = Watchdog::new(
        vec![steady, flappy],
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        &two_second_supervisor(),
    )
    .unwrap();

    watchdog.start();

    // t=1.5s: one ping so far, then the probe goes unhealthy.
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(notifier.sent_count(), 1);
    flappy_handle.set_healthy(false);

    // t=2.5s: the tick at t=2s was withheld.
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(notifier.sent_count(), 1, "no ping while any probe is unhealthy");

    // Recovery: pings resume on the next tick.
    flappy_handle.set_healthy(true);
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(notifier.sent_count(), 2);

    watchdog.stop();
}

#[tokio::test(start_paused = true)]
async fn failing_probe_withholds_every_ping() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (healthy, _) = probe("healthy", true);
    let broken: Arc<dyn HealthProbe> = Arc::new(FailingProbe::new("broken"));
    let mut watchdog = Watchdog::new(
        vec![healthy, broken],
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        &two_second_supervisor(),
    )
    .unwrap();

    watchdog.start();
    sleep(Duration::from_millis(3500)).await;

    // Fail closed: a probe that cannot answer never lets a ping through.
    assert_eq!(notifier.sent_count(), 0);

    watchdog.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_is_a_barrier_against_further_pings() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (p, _) = probe("always-healthy", true);
    let mut watchdog =
        Watchdog::new(vec![p], Arc::clone(&notifier) as Arc<dyn Notifier>, &two_second_supervisor()).unwrap();

    watchdog.start();
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(notifier.sent_count(), 1);

    watchdog.stop();
    assert!(!watchdog.is_running());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(notifier.sent_count(), 1, "no ticks after stop");
}

#[tokio::test(start_paused = true)]
async fn stopped_engine_can_be_rearmed() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (p, _) = probe("always-healthy", true);
    let mut watchdog =
        Watchdog::new(vec![p], Arc::clone(&notifier) as Arc<dyn Notifier>, &two_second_supervisor()).unwrap();

    watchdog.start();
    sleep(Duration::from_millis(1100)).await;
    watchdog.stop();
    assert_eq!(notifier.sent_count(), 1);

    watchdog.start();
    assert!(watchdog.is_running());
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(notifier.sent_count(), 2, "fresh interval after re-arm");

    watchdog.stop();
}

#[tokio::test(start_paused = true)]
async fn disabled_supervision_never_pings() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (p, _) = probe("always-healthy", true);
    let mut watchdog = Watchdog::new(
        vec![p],
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        &SupervisionContext::disabled(),
    )
    .unwrap();

    watchdog.start();
    assert!(!watchdog.is_running(), "start arms nothing when inert");

    sleep(Duration::from_secs(30)).await;
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn empty_probe_set_is_a_configuration_error() {
    let notifier = Arc::new(RecordingNotifier::new());

    let err = Watchdog::new(vec![], Arc::clone(&notifier) as Arc<dyn Notifier>, &two_second_supervisor())
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    // Same outcome regardless of supervision state.
    let err = Watchdog::new(vec![], notifier, &SupervisionContext::disabled()).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_engine_disarms_the_timer() {
    let notifier = Arc::new(RecordingNotifier::new());
    let (p, _) = probe("always-healthy", true);
    let mut watchdog =
        Watchdog::new(vec![p], Arc::clone(&notifier) as Arc<dyn Notifier>, &two_second_supervisor()).unwrap();

    watchdog.start();
    sleep(Duration::from_millis(1100)).await;
    drop(watchdog);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(notifier.sent_count(), 1, "no ticks survive the instance");
}
