//! Fixed-period poller.
//!
//! A ticker task fires every `period` on a wall-clock grid and spawns one
//! fetch per tick, so a slow response never delays the next tick. Outcomes are
//! sent over an mpsc channel to a single consumer, which is the only place
//! gauges get written.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::reading::Reading;
use super::source::{source_fn, MetricsSource};
use crate::error::{PmError, Result};

/// Capacity of the event channel between fetch tasks and the consumer.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Outcome of one poll tick.
#[derive(Debug)]
pub enum PollEvent {
    Reading(Reading),
    Error(PmError),
}

/// Fetch once and parse. Any failure becomes [`PollEvent::Error`].
pub async fn poll_once<S: MetricsSource>(source: &S) -> PollEvent {
    match source
        .fetch()
        .await
        .and_then(|payload| Reading::from_payload(&payload))
    {
        Ok(reading) => PollEvent::Reading(reading),
        Err(e) => PollEvent::Error(e),
    }
}

/// Handle to a running poller. Must be created inside a Tokio runtime.
///
/// Dropping the handle stops the ticker, same as [`Poller::stop`].
#[must_use = "dropping the poller stops it"]
pub struct Poller {
    shutdown_tx: broadcast::Sender<()>,
    ticker: JoinHandle<()>,
}

impl Poller {
    /// Start polling `source` every `period`, first tick one period from now.
    pub fn start<S: MetricsSource>(
        period: Duration,
        source: Arc<S>,
        sink: mpsc::Sender<PollEvent>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let ticker = tokio::spawn(ticker_task(period, source, sink, shutdown_rx));

        log::debug!("Poller started with a {}ms period", period.as_millis());

        Self { shutdown_tx, ticker }
    }

    /// Callback flavour: `on_reading`/`on_error` run one at a time on a
    /// dedicated consumer task.
    pub fn start_with_callbacks<F, Fut, R, E>(
        period: Duration,
        fetch: F,
        mut on_reading: R,
        mut on_error: E,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
        R: FnMut(Reading) + Send + 'static,
        E: FnMut(PmError) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    PollEvent::Reading(reading) => on_reading(reading),
                    PollEvent::Error(e) => on_error(e),
                }
            }
        });

        Self::start(period, Arc::new(source_fn(fetch)), tx)
    }

    pub fn is_running(&self) -> bool {
        !self.ticker.is_finished()
    }

    /// Stop the timer. In-flight fetches still complete and deliver.
    pub fn stop(self) {
        log::debug!("Poller stopped");
    }

    fn halt(&self) {
        let _ = self.shutdown_tx.send(());
        // The ticker may not have observed the signal yet.
        self.ticker.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.halt();
    }
}

async fn ticker_task<S: MetricsSource>(
    period: Duration,
    source: Arc<S>,
    sink: mpsc::Sender<PollEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if sink.is_closed() {
                    log::debug!("Poll consumer gone, ticker exiting");
                    break;
                }

                let source = Arc::clone(&source);
                let sink = sink.clone();
                tokio::spawn(async move {
                    let event = poll_once(source.as_ref()).await;
                    // Receiver dropped means we are shutting down.
                    let _ = sink.send(event).await;
                });
            }
            _ = shutdown.recv() => break,
        }
    }
}
