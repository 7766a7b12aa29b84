use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;

/// A thread-safe counter metric.
///
/// Monotonically increasing; never negative. Cleared only when the owning
/// store is reset.
#[derive(Debug, Default, Clone)]
pub struct Counter {
    value: Arc<AtomicU64>,
}

impl Counter {
    /// Create a new counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter by 1.
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the counter by a specific amount.
    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Get the current value.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// A last-write-wins gauge value: numeric or textual.
///
/// Textual gauges carry run context (browser name, environment, currency)
/// and read as `0.0` through [`GaugeValue::as_f64`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GaugeValue {
    /// Floating-point reading.
    Float(f64),
    /// Integer reading.
    Int(i64),
    /// Textual context value.
    Text(String),
}

impl GaugeValue {
    /// Numeric view of the gauge; text gauges read as `0.0`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Float(v) => *v,
            Self::Int(v) => *v as f64,
            Self::Text(_) => 0.0,
        }
    }
}

impl fmt::Display for GaugeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for GaugeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for GaugeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for GaugeValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for GaugeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for GaugeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Append-only series of millisecond duration samples.
///
/// Statistics (min/max/avg/percentiles) are derived on demand by
/// [`crate::analysis::TimingSummary`], never stored here.
#[derive(Debug, Default, Clone)]
pub struct TimingSeries {
    samples: Arc<RwLock<Vec<u64>>>,
}

impl TimingSeries {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample.
    pub fn record(&self, millis: u64) {
        let mut samples = self.samples.write().unwrap_or_else(|e| e.into_inner());
        samples.push(millis);
    }

    /// Copy out the samples observed so far, in recording order.
    #[must_use]
    pub fn samples(&self) -> Vec<u64> {
        let samples = self.samples.read().unwrap_or_else(|e| e.into_inner());
        samples.clone()
    }

    /// Number of samples recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        let samples = self.samples.read().unwrap_or_else(|e| e.into_inner());
        samples.len()
    }

    /// Whether the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Timer for measuring durations to feed into recorders.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since the timer started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in whole milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
