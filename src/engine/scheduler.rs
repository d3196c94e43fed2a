//! Cancellable one-second tick schedule

use std::time::Duration;

use tokio::{
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error};

/// Periodic tick source owned by the engine.
///
/// Each `arm` starts a new generation and cancels the previous one. Ticks
/// carry the generation they were produced under so late arrivals from a
/// cancelled schedule can be told apart.
pub trait TickScheduler: Send {
    /// Start (or restart) the periodic tick; returns the new generation
    fn arm(&mut self) -> u64;

    /// Cancel the periodic tick. No-op when not armed.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;

    /// Generation of the most recent `arm`
    fn generation(&self) -> u64;
}

/// Tick schedule backed by a tokio task.
///
/// Ticks are delivered into a capacity-1 channel; a tick is dropped if the
/// previous one has not been consumed yet, so at most one is ever pending.
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    tx: mpsc::Sender<u64>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl IntervalScheduler {
    /// Create a scheduler and the receiving end the tick task listens on
    pub fn new(period: Duration) -> (Self, mpsc::Receiver<u64>) {
        let (tx, rx) = mpsc::channel(1);
        let scheduler = Self {
            period,
            tx,
            task: None,
            generation: 0,
        };
        (scheduler, rx)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickScheduler for IntervalScheduler {
    fn arm(&mut self) -> u64 {
        self.disarm();
        self.generation += 1;

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Cannot arm tick schedule outside a tokio runtime: {}", e);
                return self.generation;
            }
        };

        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        self.task = Some(handle.spawn(async move {
            // First tick one full period after arming
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match tx.try_send(generation) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        debug!("Previous tick still pending, skipping");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }
        }));

        debug!("Tick schedule armed (generation {})", generation);
        generation
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Tick schedule disarmed (generation {})", self.generation);
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
