// PollRuntime driven from a plain thread, the way the dashboard and JSON mode use it

use pmview::core::power_monitor::{read_once, source_fn, PollEvent, PollRuntime, PowerMonitor};
use pmview::core::Config;
use pmview::PmError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

fn payload(va: i64) -> Value {
    json!({"p": {"va": va, "w": 950}, "i": {"rms": 5.234}, "v": {"rms": 231.7}})
}

fn apparent_power(event: &PollEvent) -> i64 {
    match event {
        PollEvent::Reading(reading) => reading.apparent_power,
        PollEvent::Error(e) => panic!("unexpected error event: {}", e),
    }
}

#[test]
fn test_next_timeout_returns_none_when_idle() {
    let source = source_fn(|| async { Ok(payload(1)) });
    let mut runtime = PollRuntime::start(Duration::from_secs(60), source).unwrap();

    assert!(runtime.try_next().is_none());
    assert!(runtime.next_timeout(Duration::from_millis(50)).is_none());

    runtime.shutdown();
}

#[test]
fn test_runtime_delivers_readings() {
    let source = source_fn(|| async { Ok(payload(1200)) });
    let mut runtime = PollRuntime::start(Duration::from_millis(20), source).unwrap();

    let event = runtime.next_timeout(WAIT).expect("no event before timeout");
    runtime.shutdown();

    assert_eq!(apparent_power(&event), 1200);
}

#[test]
fn test_shutdown_stops_ticks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = source_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(payload(1)) }
    });

    let mut runtime = PollRuntime::start(Duration::from_millis(10), source).unwrap();
    assert!(runtime.next_timeout(WAIT).is_some());
    runtime.shutdown();

    let after_shutdown = calls.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(100));
    assert_eq!(calls.load(Ordering::SeqCst), after_shutdown);
}

#[test]
fn test_late_result_is_applied_last() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = source_fn(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            match n {
                // Tick 1 answers after tick 2 has already delivered
                0 => {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    Ok(payload(1))
                }
                1 => Ok(payload(2)),
                _ => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(payload(99))
                }
            }
        }
    });

    let mut runtime = PollRuntime::start(Duration::from_millis(100), source).unwrap();
    let first = runtime.next_timeout(WAIT).expect("tick 2 result missing");
    let second = runtime.next_timeout(WAIT).expect("tick 1 result missing");
    runtime.shutdown();

    assert_eq!(apparent_power(&first), 2);
    assert_eq!(apparent_power(&second), 1);

    let mut monitor = PowerMonitor::new(&Config::default());
    monitor.handle(first);
    monitor.handle(second);

    assert_eq!(monitor.channels()[0].label.text(), "1");
    assert_eq!(monitor.stats().readings, 2);
}

#[test]
fn test_read_once_outcomes() {
    let good = source_fn(|| async { Ok(payload(640)) });
    assert_eq!(apparent_power(&read_once(&good).unwrap()), 640);

    let refused = source_fn(|| async { Err(PmError::fetch("connection refused")) });
    assert!(matches!(
        read_once(&refused).unwrap(),
        PollEvent::Error(PmError::Fetch(_))
    ));
}
