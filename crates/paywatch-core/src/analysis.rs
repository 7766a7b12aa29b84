//! Derived metrics: pass rates, percentile summaries, SLA thresholds,
//! critical-path health, and the mocked revenue-impact estimate.
//!
//! Everything here is computed on demand from the raw store, never stored
//! redundantly, so readers always see the current state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics::{MetricKey, MetricStore};
use crate::names;

/// Mocked average transaction value used by the revenue-impact estimate.
const AVG_TRANSACTION_VALUE: f64 = 100.0;

/// Features subject to stricter critical-path alerting.
pub const CRITICAL_PATH_FEATURES: [&str; 4] =
    ["payment", "authentication", "checkout", "transaction"];

/// Features reported on the critical-path dashboard.
pub(crate) const DASHBOARD_FEATURES: [&str; 3] = ["payment", "authentication", "checkout"];

/// Maximum acceptable test duration for a feature, in milliseconds.
#[must_use]
pub fn sla_threshold_ms(feature: &str) -> u64 {
    match feature.to_ascii_lowercase().as_str() {
        "payment" => 5000,
        "authentication" => 2000,
        "checkout" => 3000,
        "api" => 1000,
        _ => 5000,
    }
}

/// Whether the feature is on the business-critical path (case-insensitive).
#[must_use]
pub fn is_critical_path(feature: &str) -> bool {
    CRITICAL_PATH_FEATURES.contains(&feature.to_ascii_lowercase().as_str())
}

/// Pass rate over all completions; optimistic 1.0 before the first one.
#[must_use]
pub fn pass_rate(store: &MetricStore) -> f64 {
    let passed = store.counter(&MetricKey::global(names::TESTS_PASSED_TOTAL));
    let failed = store.counter(&MetricKey::global(names::TESTS_FAILED_TOTAL));
    rate(passed, failed).unwrap_or(1.0)
}

/// Failure rate over all completions; complement of [`pass_rate`].
#[must_use]
pub fn failure_rate(store: &MetricStore) -> f64 {
    1.0 - pass_rate(store)
}

/// Revenue impact estimate: failure rate x mocked average transaction value
/// x total business transaction count. A deliberately simplified
/// placeholder, not a real financial computation.
#[must_use]
pub fn revenue_impact(store: &MetricStore) -> f64 {
    let transactions = store.counter(&MetricKey::global(names::BUSINESS_TRANSACTIONS_TOTAL));
    failure_rate(store) * AVG_TRANSACTION_VALUE * transactions as f64
}

/// Health classification for a critical-path feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriticalPathHealth {
    /// Pass rate above 95%.
    Healthy,
    /// Pass rate between 80% (inclusive) and 95%.
    Warning,
    /// Pass rate below 80%.
    Critical,
    /// No completions observed for the feature yet.
    NoData,
}

impl CriticalPathHealth {
    /// Classify from per-feature pass/fail counts.
    ///
    /// Healthy requires rate strictly above 0.95; Warning covers the
    /// inclusive 0.8 boundary, so 8 passed / 2 failed classifies as Warning.
    #[must_use]
    pub fn classify(passed: u64, failed: u64) -> Self {
        match rate(passed, failed) {
            None => Self::NoData,
            Some(rate) if rate > 0.95 => Self::Healthy,
            Some(rate) if rate >= 0.8 => Self::Warning,
            Some(_) => Self::Critical,
        }
    }

    /// Uppercase label used on dashboards.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::NoData => "NO_DATA",
        }
    }
}

/// Health of a single feature, from its per-feature pass/fail counters.
#[must_use]
pub fn critical_path_health(store: &MetricStore, feature: &str) -> CriticalPathHealth {
    let passed = store.counter(&MetricKey::with_dim(names::TESTS_PASSED, feature));
    let failed = store.counter(&MetricKey::with_dim(names::TESTS_FAILED, feature));
    CriticalPathHealth::classify(passed, failed)
}

/// Health of every dashboard-reported critical-path feature.
#[must_use]
pub fn critical_path_status(store: &MetricStore) -> BTreeMap<String, CriticalPathHealth> {
    DASHBOARD_FEATURES
        .iter()
        .map(|feature| ((*feature).to_string(), critical_path_health(store, feature)))
        .collect()
}

fn rate(passed: u64, failed: u64) -> Option<f64> {
    let total = passed + failed;
    if total == 0 {
        None
    } else {
        Some(passed as f64 / total as f64)
    }
}

/// Statistical summary of a timing series, all fields in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TimingSummary {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Arithmetic mean.
    pub avg: f64,
    /// Median (floor-index rule).
    pub p50: f64,
    /// 95th percentile (floor-index rule, clamped).
    pub p95: f64,
    /// 99th percentile (floor-index rule, clamped).
    pub p99: f64,
}

impl TimingSummary {
    /// Summarize a sample slice.
    ///
    /// Percentiles use the floor-index rule over the ascending sort:
    /// `p50 = sorted[n/2]`, `pXX = sorted[floor(n * 0.XX)]`, with the index
    /// clamped to `n - 1` so small series never index out of bounds. An
    /// empty slice yields all-zero fields rather than failing.
    #[must_use]
    pub fn from_samples(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let percentile =
            |q: f64| sorted[((n as f64 * q) as usize).min(n - 1)] as f64;

        Self {
            min: sorted[0] as f64,
            max: sorted[n - 1] as f64,
            avg: sorted.iter().sum::<u64>() as f64 / n as f64,
            p50: sorted[n / 2] as f64,
            p95: percentile(0.95),
            p99: percentile(0.99),
        }
    }
}
