use std::sync::{Arc, Mutex};

use tokio::time::{sleep, Duration, Instant};
use youtube_embed_rs::Debouncer;

type Calls = Arc<Mutex<Vec<(u32, Instant)>>>;

fn recorder() -> (Calls, impl Fn(u32) + Send + Sync + 'static) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, move |arg| {
        sink.lock().unwrap().push((arg, Instant::now()));
    })
}

// Test a burst collapses into one call carrying the last arguments
#[tokio::test(start_paused = true)]
async fn test_trailing_burst() {
    let (calls, func) = recorder();
    let debounced = Debouncer::new(func, Duration::from_millis(300));
    let start = Instant::now();

    debounced.call(0);
    sleep(Duration::from_millis(50)).await;
    debounced.call(50);
    sleep(Duration::from_millis(50)).await;
    debounced.call(100);

    sleep(Duration::from_millis(299)).await;
    assert!(calls.lock().unwrap().is_empty());
    assert!(debounced.is_pending());

    sleep(Duration::from_millis(2)).await;
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (arg, at) = calls[0];
    assert_eq!(arg, 100);
    assert!(at - start >= Duration::from_millis(400));
    assert!(!debounced.is_pending());
}

// Test calls spaced wider than the window each run
#[tokio::test(start_paused = true)]
async fn test_trailing_separate_bursts() {
    let (calls, func) = recorder();
    let debounced = Debouncer::new(func, Duration::from_millis(100));

    debounced.call(1);
    sleep(Duration::from_millis(150)).await;
    debounced.call(2);
    sleep(Duration::from_millis(150)).await;

    let args: Vec<u32> = calls.lock().unwrap().iter().map(|(a, _)| *a).collect();
    assert_eq!(args, vec![1, 2]);
}

// Test immediate mode runs the first call and suppresses the rest of the window
#[tokio::test(start_paused = true)]
async fn test_immediate_mode() {
    let (calls, func) = recorder();
    let debounced = Debouncer::immediate(func, Duration::from_millis(300));

    debounced.call(0);
    assert_eq!(calls.lock().unwrap().len(), 1);

    sleep(Duration::from_millis(50)).await;
    debounced.call(50);
    sleep(Duration::from_millis(50)).await;
    debounced.call(100);

    // the window is measured from the last call, and nothing fires at its end
    sleep(Duration::from_millis(310)).await;
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert!(!debounced.is_pending());

    debounced.call(410);
    let args: Vec<u32> = calls.lock().unwrap().iter().map(|(a, _)| *a).collect();
    assert_eq!(args, vec![0, 410]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel() {
    let (calls, func) = recorder();
    let debounced = Debouncer::new(func, Duration::from_millis(100));

    debounced.call(1);
    debounced.cancel();
    assert!(!debounced.is_pending());

    sleep(Duration::from_millis(200)).await;
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending() {
    let (calls, func) = recorder();
    let debounced = Debouncer::new(func, Duration::from_millis(100));

    debounced.call(1);
    drop(debounced);

    sleep(Duration::from_millis(200)).await;
    assert!(calls.lock().unwrap().is_empty());
}
