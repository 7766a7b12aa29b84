//! Typed recorders translating harness events into store mutations.
//!
//! Lifecycle hooks and step definitions call these around every browser or
//! API action; the recorders classify the event, mutate the metric store,
//! and run the inline threshold checks (SLA, critical path, grid capacity).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::alert::{Alert, AlertSink, ErrorCategory, TracingAlertSink};
use crate::analysis;
use crate::error::{Error, Result};
use crate::export::{self, DashboardSnapshot, MetricsReport};
use crate::metrics::{MetricKey, MetricStore};
use crate::names;

/// Grid utilization above this ratio triggers a capacity alert.
const GRID_CAPACITY_THRESHOLD: f64 = 0.80;

/// Outcome of a completed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    /// The test passed.
    Passed,
    /// The test failed.
    Failed,
}

impl TestResult {
    /// Parse the harness result string (`"PASSED"` / `"FAILED"`,
    /// case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PASSED" => Some(Self::Passed),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Entry point for all observability events.
///
/// Explicitly constructed and injectable: clones share the same underlying
/// store and alert sink, so one instance per test run can be handed to
/// hooks and step definitions executing in parallel. There is no global
/// instance; isolated stores per run need no reset races.
#[derive(Clone)]
pub struct TestObservability {
    store: MetricStore,
    sink: Arc<dyn AlertSink>,
}

impl Default for TestObservability {
    fn default() -> Self {
        Self::new()
    }
}

impl TestObservability {
    /// Create with the default tracing-backed alert sink.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingAlertSink))
    }

    /// Create with a custom alert sink.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn AlertSink>) -> Self {
        Self {
            store: MetricStore::new(),
            sink,
        }
    }

    /// The underlying metric store.
    #[must_use]
    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    /// Clear every metric. Test isolation only.
    pub fn reset(&self) {
        self.store.reset();
    }

    /// Record a test entering execution.
    pub fn record_test_start(
        &self,
        test: &str,
        feature: &str,
        browser: &str,
        environment: &str,
    ) -> Result<()> {
        require(test, "test")?;
        require(feature, "feature")?;

        self.store
            .increment_counter(MetricKey::global(names::TESTS_STARTED_TOTAL));
        self.store
            .increment_counter(MetricKey::with_dim(names::TESTS_STARTED, feature));
        self.store
            .record_gauge(MetricKey::global(names::TEST_BROWSER), browser);
        self.store
            .record_gauge(MetricKey::global(names::TEST_ENVIRONMENT), environment);
        self.store
            .accumulate_gauge(MetricKey::global(names::TESTS_ACTIVE), 1.0);

        debug!(test, feature, browser, environment, "test started");
        Ok(())
    }

    /// Record a completed test: pass/fail counters, per-feature timing, the
    /// SLA check, and the critical-path alert on a failed critical feature.
    pub fn record_test_completion(
        &self,
        test: &str,
        feature: &str,
        result: TestResult,
        duration: Duration,
        error_message: Option<&str>,
    ) -> Result<()> {
        require(test, "test")?;
        require(feature, "feature")?;

        let (global, per_feature) = match result {
            TestResult::Passed => (names::TESTS_PASSED_TOTAL, names::TESTS_PASSED),
            TestResult::Failed => (names::TESTS_FAILED_TOTAL, names::TESTS_FAILED),
        };
        self.store.increment_counter(MetricKey::global(global));
        self.store
            .increment_counter(MetricKey::with_dim(per_feature, feature));
        self.store
            .record_timing(MetricKey::with_dim(names::TEST_DURATION, feature), duration);
        self.store
            .accumulate_gauge(MetricKey::global(names::TESTS_ACTIVE), -1.0);

        self.check_sla(feature, duration);

        if result == TestResult::Failed && analysis::is_critical_path(feature) {
            self.sink.send(&Alert::CriticalPathFailure {
                test: test.to_string(),
                feature: feature.to_ascii_lowercase(),
                category: ErrorCategory::from_message(error_message),
                message: error_message.unwrap_or("no error message").to_string(),
                at: Utc::now(),
            });
        }

        let passed = result == TestResult::Passed;
        debug!(
            test,
            feature,
            passed,
            duration_ms = duration.as_millis() as u64,
            "test completed"
        );
        Ok(())
    }

    /// Record one mocked API call.
    pub fn record_api_response(
        &self,
        endpoint: &str,
        method: &str,
        status_code: u16,
        response_time: Duration,
        response_size_bytes: u64,
    ) -> Result<()> {
        require(endpoint, "endpoint")?;
        require(method, "method")?;

        self.store
            .increment_counter(MetricKey::global(names::API_CALLS_TOTAL));
        self.store
            .increment_counter(MetricKey::with_dims(names::API_CALLS, &[method, endpoint]));
        let status_class = format!("{}xx", status_code / 100);
        self.store
            .increment_counter(MetricKey::with_dim(names::API_RESPONSES, &status_class));
        self.store.record_timing(
            MetricKey::with_dims(names::API_RESPONSE_TIME, &[method, endpoint]),
            response_time,
        );
        self.store.record_gauge(
            MetricKey::global(names::API_RESPONSE_SIZE_BYTES),
            response_size_bytes,
        );

        debug!(
            endpoint,
            method,
            status_code,
            response_time_ms = response_time.as_millis() as u64,
            "api response recorded"
        );
        Ok(())
    }

    /// Record a UI page load.
    pub fn record_page_load(&self, url: &str, duration: Duration, success: bool) -> Result<()> {
        require(url, "url")?;

        let counter = if success {
            names::PAGE_LOADS_SUCCESS_TOTAL
        } else {
            names::PAGE_LOADS_FAILED_TOTAL
        };
        self.store.increment_counter(MetricKey::global(counter));
        self.store
            .record_timing(MetricKey::global(names::PAGE_LOAD_TIME), duration);

        debug!(url, success, duration_ms = duration.as_millis() as u64, "page load recorded");
        Ok(())
    }

    /// Record an asserted business transaction (payment amount, currency,
    /// status). The amount accumulates into the running volume gauge used by
    /// the revenue-impact estimate.
    pub fn record_business_transaction(
        &self,
        kind: &str,
        status: &str,
        amount: f64,
        currency: &str,
    ) -> Result<()> {
        require(kind, "kind")?;
        require(status, "status")?;
        if !amount.is_finite() || amount < 0.0 {
            warn!(kind, status, amount, "dropping business transaction with invalid amount");
            return Err(Error::InvalidEvent {
                field: "amount",
                reason: "must be a non-negative finite number",
            });
        }

        self.store
            .increment_counter(MetricKey::global(names::BUSINESS_TRANSACTIONS_TOTAL));
        self.store.increment_counter(MetricKey::with_dims(
            names::BUSINESS_TRANSACTIONS,
            &[kind, status],
        ));
        self.store
            .accumulate_gauge(MetricKey::global(names::BUSINESS_VOLUME_TOTAL), amount);
        self.store
            .record_gauge(MetricKey::global(names::BUSINESS_CURRENCY), currency);

        debug!(kind, status, amount, currency, "business transaction recorded");
        Ok(())
    }

    /// Record Selenium grid node counts and run the capacity check.
    ///
    /// Utilization is active sessions over total nodes, `0.0` when the grid
    /// reports zero nodes; the capacity alert fires only when utilization is
    /// strictly above 80%.
    pub fn update_grid_status(
        &self,
        total_nodes: u64,
        active_sessions: u64,
        queued_sessions: u64,
    ) -> Result<()> {
        self.store.record_gauge(
            MetricKey::global(names::GRID_NODES_TOTAL),
            total_nodes,
        );
        self.store.record_gauge(
            MetricKey::global(names::GRID_SESSIONS_ACTIVE),
            active_sessions,
        );
        self.store.record_gauge(
            MetricKey::global(names::GRID_SESSIONS_QUEUED),
            queued_sessions,
        );

        let utilization = if total_nodes == 0 {
            0.0
        } else {
            active_sessions as f64 / total_nodes as f64
        };
        self.store
            .record_gauge(MetricKey::global(names::GRID_UTILIZATION), utilization);

        if utilization > GRID_CAPACITY_THRESHOLD {
            self.sink.send(&Alert::GridCapacity { utilization });
        }

        debug!(total_nodes, active_sessions, queued_sessions, utilization, "grid status updated");
        Ok(())
    }

    /// Prometheus text exposition of the current store.
    #[must_use]
    pub fn export_metrics(&self) -> String {
        export::export_metrics(&self.store)
    }

    /// Real-time dashboard snapshot of the current derived values.
    #[must_use]
    pub fn dashboard(&self) -> DashboardSnapshot {
        export::dashboard(&self.store)
    }

    /// Machine-readable snapshot of every raw metric.
    #[must_use]
    pub fn all_metrics(&self) -> MetricsReport {
        export::all_metrics(&self.store)
    }

    /// Increment SLA breach counters and alert when the duration exceeds the
    /// feature's threshold.
    fn check_sla(&self, feature: &str, duration: Duration) {
        let threshold_ms = analysis::sla_threshold_ms(feature);
        let duration_ms = duration.as_millis() as u64;
        if duration_ms <= threshold_ms {
            return;
        }

        self.store
            .increment_counter(MetricKey::global(names::SLA_BREACHES_TOTAL));
        self.store
            .increment_counter(MetricKey::with_dim(names::SLA_BREACHES, feature));
        self.sink.send(&Alert::SlaBreach {
            feature: feature.to_ascii_lowercase(),
            duration_ms,
            threshold_ms,
        });
    }
}

/// Reject empty event fields: log and return the drop error.
fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        warn!(field, "dropping observability event with empty field");
        return Err(Error::InvalidEvent {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}
