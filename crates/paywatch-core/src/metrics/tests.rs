use std::time::Duration;

use super::*;

#[test]
fn counter_starts_at_zero_and_increments() {
    let counter = Counter::new();
    assert_eq!(counter.get(), 0);

    counter.inc();
    assert_eq!(counter.get(), 1);

    counter.inc_by(5);
    assert_eq!(counter.get(), 6);
}

#[test]
fn absent_counter_reads_zero() {
    let store = MetricStore::new();
    assert_eq!(store.counter(&MetricKey::global("never_written")), 0);
}

#[test]
fn counter_tracks_every_increment() {
    let store = MetricStore::new();
    let key = MetricKey::global("tests_started_total");
    for _ in 0..42 {
        store.increment_counter(key.clone());
    }
    assert_eq!(store.counter(&key), 42);
}

#[test]
fn concurrent_increments_all_land() {
    let store = MetricStore::new();
    let key = MetricKey::global("parallel_total");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let key = key.clone();
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    store.increment_counter(key.clone());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.counter(&key), 8000);
}

#[test]
fn gauge_is_last_write_wins() {
    let store = MetricStore::new();
    let key = MetricKey::global("selenium_grid_utilization");

    store.record_gauge(key.clone(), 0.5);
    store.record_gauge(key.clone(), 0.9);
    assert_eq!(store.gauge(&key), Some(GaugeValue::Float(0.9)));
    assert_eq!(store.gauge_f64(&key), 0.9);
}

#[test]
fn gauge_holds_text_values() {
    let store = MetricStore::new();
    let key = MetricKey::global("test_browser");

    store.record_gauge(key.clone(), "chrome");
    assert_eq!(store.gauge(&key), Some(GaugeValue::Text("chrome".into())));
    assert_eq!(store.gauge_f64(&key), 0.0);
}

#[test]
fn gauge_accumulation_sums_deltas() {
    let store = MetricStore::new();
    let key = MetricKey::global("business_volume_total");

    store.accumulate_gauge(key.clone(), 99.99);
    store.accumulate_gauge(key.clone(), 0.01);
    assert_eq!(store.gauge_f64(&key), 100.0);
}

#[test]
fn counter_and_gauge_namespaces_are_independent() {
    let store = MetricStore::new();
    let key = MetricKey::global("shared_name");

    store.increment_counter(key.clone());
    store.record_gauge(key.clone(), 7.5);

    assert_eq!(store.counter(&key), 1);
    assert_eq!(store.gauge_f64(&key), 7.5);
}

#[test]
fn timing_series_appends_in_order() {
    let store = MetricStore::new();
    let key = MetricKey::with_dim("test_duration", "payment");

    store.record_timing(key.clone(), Duration::from_millis(120));
    store.record_timing(key.clone(), Duration::from_millis(80));
    assert_eq!(store.timing_samples(&key), vec![120, 80]);
}

#[test]
fn concurrent_timing_appends_all_land() {
    let store = MetricStore::new();
    let key = MetricKey::global("page_load_time");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let key = key.clone();
            std::thread::spawn(move || {
                for i in 0..500 {
                    store.record_timing(key.clone(), Duration::from_millis(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.timing_samples(&key).len(), 2000);
}

#[test]
fn reset_restores_fresh_store_defaults() {
    let store = MetricStore::new();
    let counter_key = MetricKey::global("tests_passed_total");
    let gauge_key = MetricKey::global("test_environment");
    let timing_key = MetricKey::with_dim("test_duration", "checkout");

    store.increment_counter(counter_key.clone());
    store.record_gauge(gauge_key.clone(), "staging");
    store.record_timing(timing_key.clone(), Duration::from_millis(300));

    store.reset();

    assert_eq!(store.counter(&counter_key), 0);
    assert_eq!(store.gauge(&gauge_key), None);
    assert!(store.timing_samples(&timing_key).is_empty());
    assert!(store.counters_snapshot().is_empty());
    assert!(store.gauges_snapshot().is_empty());
    assert!(store.timings_snapshot().is_empty());
}

#[test]
fn snapshots_sort_by_rendered_name() {
    let store = MetricStore::new();
    store.increment_counter(MetricKey::global("zeta_total"));
    store.increment_counter(MetricKey::global("alpha_total"));

    let names: Vec<_> = store.counters_snapshot().into_keys().collect();
    assert_eq!(names, vec!["alpha_total".to_string(), "zeta_total".to_string()]);
}

#[test]
fn timer_measures_elapsed_time() {
    let timer = Timer::start();
    std::thread::sleep(Duration::from_millis(10));
    assert!(timer.elapsed() >= Duration::from_millis(10));
    assert!(timer.elapsed_ms() >= 10);
}
