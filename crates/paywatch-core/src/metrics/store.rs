use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::key::MetricKey;
use super::types::{Counter, GaugeValue, TimingSeries};

/// Process-wide metric store shared by all recorders.
///
/// Cheap to clone; clones share the same underlying maps. Counters use
/// atomic increments, gauges are last-write-wins, and timing series append
/// under a lock, so every operation is safe under concurrent invocation from
/// parallel test executions. No operation fails: absent keys read as zero or
/// empty.
#[derive(Debug, Default, Clone)]
pub struct MetricStore {
    counters: Arc<RwLock<HashMap<MetricKey, Counter>>>,
    gauges: Arc<RwLock<HashMap<MetricKey, GaugeValue>>>,
    timings: Arc<RwLock<HashMap<MetricKey, TimingSeries>>>,
}

impl MetricStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add 1 to the named counter, creating it at zero first if absent.
    pub fn increment_counter(&self, key: MetricKey) {
        self.increment_counter_by(key, 1);
    }

    /// Add `n` to the named counter, creating it at zero first if absent.
    pub fn increment_counter_by(&self, key: MetricKey, n: u64) {
        let counters = self.counters.read().unwrap_or_else(|e| e.into_inner());
        if let Some(counter) = counters.get(&key) {
            counter.inc_by(n);
            return;
        }
        drop(counters);

        let mut counters = self.counters.write().unwrap_or_else(|e| e.into_inner());
        counters.entry(key).or_default().inc_by(n);
    }

    /// Set the named gauge, overwriting any prior value.
    pub fn record_gauge(&self, key: MetricKey, value: impl Into<GaugeValue>) {
        let mut gauges = self.gauges.write().unwrap_or_else(|e| e.into_inner());
        gauges.insert(key, value.into());
    }

    /// Add `delta` to a numeric gauge, creating it at zero first if absent.
    ///
    /// The read-modify-write runs under the write lock, so concurrent
    /// accumulations never lose updates. A textual value under the same key
    /// is replaced by the accumulated number.
    pub fn accumulate_gauge(&self, key: MetricKey, delta: f64) {
        let mut gauges = self.gauges.write().unwrap_or_else(|e| e.into_inner());
        let current = gauges.get(&key).map_or(0.0, GaugeValue::as_f64);
        gauges.insert(key, GaugeValue::Float(current + delta));
    }

    /// Append a duration sample to the named timing series, creating the
    /// series if absent.
    pub fn record_timing(&self, key: MetricKey, duration: Duration) {
        let millis = duration.as_millis() as u64;
        let timings = self.timings.read().unwrap_or_else(|e| e.into_inner());
        if let Some(series) = timings.get(&key) {
            series.record(millis);
            return;
        }
        drop(timings);

        let mut timings = self.timings.write().unwrap_or_else(|e| e.into_inner());
        timings.entry(key).or_default().record(millis);
    }

    /// Current counter value, zero when absent.
    #[must_use]
    pub fn counter(&self, key: &MetricKey) -> u64 {
        let counters = self.counters.read().unwrap_or_else(|e| e.into_inner());
        counters.get(key).map_or(0, Counter::get)
    }

    /// Current gauge value, `None` when absent.
    #[must_use]
    pub fn gauge(&self, key: &MetricKey) -> Option<GaugeValue> {
        let gauges = self.gauges.read().unwrap_or_else(|e| e.into_inner());
        gauges.get(key).cloned()
    }

    /// Numeric gauge view: `0.0` when absent or textual.
    #[must_use]
    pub fn gauge_f64(&self, key: &MetricKey) -> f64 {
        self.gauge(key).map_or(0.0, |v| v.as_f64())
    }

    /// Samples recorded for a timing series, empty when absent.
    #[must_use]
    pub fn timing_samples(&self, key: &MetricKey) -> Vec<u64> {
        let timings = self.timings.read().unwrap_or_else(|e| e.into_inner());
        timings.get(key).map_or_else(Vec::new, TimingSeries::samples)
    }

    /// Atomically clear every counter, gauge, and timing series.
    ///
    /// All three write locks are held before anything is cleared, so a
    /// concurrent reader never observes a half-cleared store. Used only for
    /// test isolation of the observability subsystem itself.
    pub fn reset(&self) {
        let mut counters = self.counters.write().unwrap_or_else(|e| e.into_inner());
        let mut gauges = self.gauges.write().unwrap_or_else(|e| e.into_inner());
        let mut timings = self.timings.write().unwrap_or_else(|e| e.into_inner());
        counters.clear();
        gauges.clear();
        timings.clear();
    }

    /// Snapshot of all counters, sorted by rendered name.
    #[must_use]
    pub fn counters_snapshot(&self) -> BTreeMap<String, u64> {
        let counters = self.counters.read().unwrap_or_else(|e| e.into_inner());
        counters
            .iter()
            .map(|(key, counter)| (key.render(), counter.get()))
            .collect()
    }

    /// Snapshot of all gauges, sorted by rendered name.
    #[must_use]
    pub fn gauges_snapshot(&self) -> BTreeMap<String, GaugeValue> {
        let gauges = self.gauges.read().unwrap_or_else(|e| e.into_inner());
        gauges
            .iter()
            .map(|(key, value)| (key.render(), value.clone()))
            .collect()
    }

    /// Snapshot of all timing series, sorted by rendered name.
    #[must_use]
    pub fn timings_snapshot(&self) -> BTreeMap<String, Vec<u64>> {
        let timings = self.timings.read().unwrap_or_else(|e| e.into_inner());
        timings
            .iter()
            .map(|(key, series)| (key.render(), series.samples()))
            .collect()
    }
}
