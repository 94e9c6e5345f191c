// Timer Disarm Signal

use tokio::sync::watch;

/// Receiving side of the disarm signal, held by the ticker task.
#[derive(Clone)]
pub struct DisarmSignal {
    rx: watch::Receiver<bool>,
}

impl DisarmSignal {
    /// Check if the timer was disarmed
    pub fn is_disarmed(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the disarm signal
    pub async fn wait(&mut self) {
        let _ = self.rx.changed().await;
    }
}

/// Sending side, held by the watchdog instance.
///
/// Disarming is a barrier against future ticks only; it does not cancel
/// a tick that is already executing.
pub struct DisarmHandle {
    tx: watch::Sender<bool>,
}

impl DisarmHandle {
    /// Signal the ticker task to stop scheduling ticks
    pub fn disarm(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a disarm channel
pub fn disarm_channel() -> (DisarmHandle, DisarmSignal) {
    let (tx, rx) = watch::channel(false);
    (DisarmHandle { tx }, DisarmSignal { rx })
}
