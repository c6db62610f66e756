//! Tokio runtime hosting the poller for the synchronous UI loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::poller::{poll_once, PollEvent, Poller, EVENT_CHANNEL_CAPACITY};
use super::source::MetricsSource;

/// Owns the runtime, the running poller and the receiving end of its events.
///
/// The thread holding this value is the single writer of the display: it pulls
/// events with [`PollRuntime::try_next`] or [`PollRuntime::next_timeout`].
pub struct PollRuntime {
    events_rx: mpsc::Receiver<PollEvent>,
    poller: Poller,
    runtime: tokio::runtime::Runtime,
}

impl PollRuntime {
    pub fn start<S: MetricsSource>(period: Duration, source: S) -> anyhow::Result<Self> {
        let runtime = build_runtime()?;

        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let poller = {
            let _guard = runtime.enter();
            Poller::start(period, Arc::new(source), events_tx)
        };

        log::info!("Polling every {}ms", period.as_millis());

        Ok(Self {
            events_rx,
            poller,
            runtime,
        })
    }

    /// Next pending event, if any, without blocking.
    pub fn try_next(&mut self) -> Option<PollEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Block until the next event or until `timeout` elapses.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<PollEvent> {
        let rx = &mut self.events_rx;
        self.runtime
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })
    }

    pub fn shutdown(self) {
        log::info!("Shutting down poller");
        self.poller.stop();
        // In-flight fetches are dropped with the runtime.
        self.runtime.shutdown_timeout(Duration::from_millis(250));
    }
}

/// Runtime shared by the poller and one-shot reads.
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .enable_io()
        .thread_name("pm-poller")
        .build()
}

/// Fetch a single reading outside of the periodic loop.
pub fn read_once<S: MetricsSource>(source: &S) -> anyhow::Result<PollEvent> {
    let runtime = build_runtime()?;
    Ok(runtime.block_on(poll_once(source)))
}
