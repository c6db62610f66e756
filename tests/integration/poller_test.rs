// Poller cadence, overlap and stop behaviour on a paused Tokio clock

use pmview::core::power_monitor::{
    source_fn, PollEvent, Poller, PowerMonitor, EVENT_CHANNEL_CAPACITY,
};
use pmview::core::Config;
use pmview::PmError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

fn payload(va: i64) -> Value {
    json!({"p": {"va": va, "w": 950}, "i": {"rms": 5.234}, "v": {"rms": 231.7}})
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_does_not_delay_next_tick() {
    let started = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&started);
    let source = source_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            Ok(payload(1200))
        }
    });

    let (tx, _rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let poller = Poller::start(Duration::from_millis(1000), Arc::new(source), tx);

    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(started.load(Ordering::SeqCst), 3);

    poller.stop();
}

#[tokio::test(start_paused = true)]
async fn test_stop_prevents_further_ticks() {
    let started = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&started);
    let source = source_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(payload(1)) }
    });

    let (tx, _rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let poller = Poller::start(Duration::from_millis(1000), Arc::new(source), tx);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(started.load(Ordering::SeqCst), 1);

    poller.stop();
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(started.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_errors_do_not_stop_the_loop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = source_fn(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            match n % 3 {
                0 => Err(PmError::fetch("connection refused")),
                1 => Ok(json!({"p": {"va": 1, "w": 1}})),
                _ => Ok(payload(n as i64)),
            }
        }
    });

    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let poller = Poller::start(Duration::from_millis(1000), Arc::new(source), tx);

    let mut events = Vec::new();
    for _ in 0..6 {
        events.push(rx.recv().await.unwrap());
    }
    poller.stop();

    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            PollEvent::Reading(_) => "reading",
            PollEvent::Error(PmError::Fetch(_)) => "fetch",
            PollEvent::Error(PmError::Parse(_)) => "parse",
            PollEvent::Error(_) => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["fetch", "parse", "reading", "fetch", "parse", "reading"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_single_consumer_freezes_on_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = source_fn(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if n == 0 {
                Ok(payload(1200))
            } else {
                Ok(json!({"p": {"va": 5, "w": 5}, "i": {}, "v": {"rms": 1.0}}))
            }
        }
    });

    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let poller = Poller::start(Duration::from_millis(1000), Arc::new(source), tx);

    let mut monitor = PowerMonitor::new(&Config::default());
    for _ in 0..3 {
        monitor.handle(rx.recv().await.unwrap());
    }
    poller.stop();

    assert_eq!(monitor.channels()[0].label.text(), "1200");
    assert_eq!(monitor.channels()[2].label.text(), "5.23");
    assert_eq!(monitor.stats().readings, 1);
    assert_eq!(monitor.stats().errors, 2);
}

#[tokio::test(start_paused = true)]
async fn test_callbacks_receive_outcomes() {
    let readings = Arc::new(Mutex::new(Vec::new()));
    let errors = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    let seen = Arc::clone(&readings);
    let failed = Arc::clone(&errors);
    let counter = Arc::clone(&calls);

    let poller = Poller::start_with_callbacks(
        Duration::from_millis(1000),
        move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 1 {
                    Err(PmError::fetch("status 500"))
                } else {
                    Ok(payload(n as i64))
                }
            }
        },
        move |reading| seen.lock().unwrap().push(reading.apparent_power),
        move |_| {
            failed.fetch_add(1, Ordering::SeqCst);
        },
    );

    tokio::time::sleep(Duration::from_millis(3500)).await;
    poller.stop();
    // Let the consumer drain what was already delivered
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(*readings.lock().unwrap(), vec![0, 2]);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}
