//! Prometheus text exposition and dashboard snapshot assembly.
//!
//! Export is pull-based and read-only: it renders whatever the store holds
//! at call time and never fails. A missing metric degrades to its default,
//! so a broken or empty run still produces a (possibly empty) document.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::analysis::{self, CriticalPathHealth, TimingSummary};
use crate::metrics::{GaugeValue, MetricKey, MetricStore};
use crate::names;

/// Render the store in Prometheus text exposition format.
///
/// Every counter and gauge becomes a `# TYPE` line followed by
/// `<name> <value>`; every non-empty timing series is exported as its
/// average under a gauge-typed `<name>_avg`. Output is sorted by rendered
/// name, so it is deterministic for a given store snapshot.
#[must_use]
pub fn export_metrics(store: &MetricStore) -> String {
    let mut out = String::new();

    for (name, value) in store.counters_snapshot() {
        let _ = writeln!(out, "# TYPE {name} counter");
        let _ = writeln!(out, "{name} {value}");
    }

    for (name, value) in store.gauges_snapshot() {
        let _ = writeln!(out, "# TYPE {name} gauge");
        let _ = writeln!(out, "{name} {value}");
    }

    for (name, samples) in store.timings_snapshot() {
        if samples.is_empty() {
            continue;
        }
        let avg = TimingSummary::from_samples(&samples).avg;
        let _ = writeln!(out, "# TYPE {name}_avg gauge");
        let _ = writeln!(out, "{name}_avg {avg}");
    }

    out
}

/// Serializable snapshot of every raw metric in the store.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Counter values by rendered name.
    pub counters: BTreeMap<String, u64>,
    /// Gauge values by rendered name.
    pub gauges: BTreeMap<String, GaugeValue>,
    /// Statistical summaries for each non-empty timing series.
    pub timings: BTreeMap<String, TimingSummary>,
}

/// Snapshot every counter, gauge, and timing summary for reporting.
#[must_use]
pub fn all_metrics(store: &MetricStore) -> MetricsReport {
    MetricsReport {
        counters: store.counters_snapshot(),
        gauges: store.gauges_snapshot(),
        timings: store
            .timings_snapshot()
            .into_iter()
            .filter(|(_, samples)| !samples.is_empty())
            .map(|(name, samples)| (name, TimingSummary::from_samples(&samples)))
            .collect(),
    }
}

/// Selenium grid state as last reported by the infrastructure probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSnapshot {
    /// Total grid nodes.
    pub total_nodes: i64,
    /// Sessions currently executing.
    pub active_sessions: i64,
    /// Sessions waiting for a node.
    pub queued_sessions: i64,
    /// Active sessions over total nodes.
    pub utilization: f64,
}

/// Real-time dashboard: current derived values for ad-hoc display.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Share of completed tests that passed (1.0 before any completion).
    pub pass_rate: f64,
    /// Complement of the pass rate.
    pub failure_rate: f64,
    /// Tests that entered execution.
    pub tests_started: u64,
    /// Completions recorded as passed.
    pub tests_passed: u64,
    /// Completions recorded as failed.
    pub tests_failed: u64,
    /// Started but not yet completed tests.
    pub tests_active: i64,
    /// Completions that exceeded their feature's SLA threshold.
    pub sla_breaches: u64,
    /// Grid state from the last probe.
    pub grid: GridSnapshot,
    /// Health per critical-path feature.
    pub critical_path: BTreeMap<String, CriticalPathHealth>,
    /// Mocked revenue-impact estimate.
    pub estimated_revenue_impact: f64,
}

/// Assemble the dashboard from the current store state.
#[must_use]
pub fn dashboard(store: &MetricStore) -> DashboardSnapshot {
    DashboardSnapshot {
        pass_rate: analysis::pass_rate(store),
        failure_rate: analysis::failure_rate(store),
        tests_started: store.counter(&MetricKey::global(names::TESTS_STARTED_TOTAL)),
        tests_passed: store.counter(&MetricKey::global(names::TESTS_PASSED_TOTAL)),
        tests_failed: store.counter(&MetricKey::global(names::TESTS_FAILED_TOTAL)),
        tests_active: store.gauge_f64(&MetricKey::global(names::TESTS_ACTIVE)) as i64,
        sla_breaches: store.counter(&MetricKey::global(names::SLA_BREACHES_TOTAL)),
        grid: GridSnapshot {
            total_nodes: store.gauge_f64(&MetricKey::global(names::GRID_NODES_TOTAL)) as i64,
            active_sessions: store.gauge_f64(&MetricKey::global(names::GRID_SESSIONS_ACTIVE))
                as i64,
            queued_sessions: store.gauge_f64(&MetricKey::global(names::GRID_SESSIONS_QUEUED))
                as i64,
            utilization: store.gauge_f64(&MetricKey::global(names::GRID_UTILIZATION)),
        },
        critical_path: analysis::critical_path_status(store),
        estimated_revenue_impact: analysis::revenue_impact(store),
    }
}

impl DashboardSnapshot {
    /// Human-readable label/value rows for ad-hoc display.
    #[must_use]
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Pass Rate".to_string(), format!("{:.1}%", self.pass_rate * 100.0)),
            (
                "Failure Rate".to_string(),
                format!("{:.1}%", self.failure_rate * 100.0),
            ),
            ("Tests Started".to_string(), self.tests_started.to_string()),
            ("Tests Passed".to_string(), self.tests_passed.to_string()),
            ("Tests Failed".to_string(), self.tests_failed.to_string()),
            ("Tests Active".to_string(), self.tests_active.to_string()),
            ("SLA Breaches".to_string(), self.sla_breaches.to_string()),
            (
                "Grid Utilization".to_string(),
                format!("{:.1}%", self.grid.utilization * 100.0),
            ),
            (
                "Estimated Revenue Impact".to_string(),
                format!("${:.2}", self.estimated_revenue_impact),
            ),
        ];
        for (feature, health) in &self.critical_path {
            rows.push((format!("Critical Path [{feature}]"), health.as_str().to_string()));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn exposition_renders_typed_lines() {
        let store = MetricStore::new();
        store.increment_counter_by(MetricKey::global("tests_passed_total"), 3);
        store.record_gauge(MetricKey::global("selenium_grid_utilization"), 0.75);
        store.record_timing(
            MetricKey::with_dim("test_duration", "payment"),
            Duration::from_millis(100),
        );
        store.record_timing(
            MetricKey::with_dim("test_duration", "payment"),
            Duration::from_millis(300),
        );

        let text = export_metrics(&store);
        assert!(text.contains("# TYPE tests_passed_total counter\ntests_passed_total 3\n"));
        assert!(text.contains(
            "# TYPE selenium_grid_utilization gauge\nselenium_grid_utilization 0.75\n"
        ));
        assert!(text.contains(
            "# TYPE test_duration_payment_avg gauge\ntest_duration_payment_avg 200\n"
        ));
    }

    #[test]
    fn exposition_of_empty_store_is_empty() {
        assert_eq!(export_metrics(&MetricStore::new()), "");
    }

    #[test]
    fn exposition_is_deterministic_per_snapshot() {
        let store = MetricStore::new();
        store.increment_counter(MetricKey::global("b_total"));
        store.increment_counter(MetricKey::global("a_total"));

        assert_eq!(export_metrics(&store), export_metrics(&store));
        assert!(export_metrics(&store).find("a_total").unwrap()
            < export_metrics(&store).find("b_total").unwrap());
    }

    #[test]
    fn fresh_store_dashboard_uses_optimistic_defaults() {
        let snapshot = dashboard(&MetricStore::new());

        assert_eq!(snapshot.pass_rate, 1.0);
        assert_eq!(snapshot.failure_rate, 0.0);
        assert_eq!(snapshot.tests_started, 0);
        assert_eq!(snapshot.sla_breaches, 0);
        assert_eq!(snapshot.grid.utilization, 0.0);
        assert_eq!(snapshot.estimated_revenue_impact, 0.0);
        assert!(snapshot
            .critical_path
            .values()
            .all(|health| *health == CriticalPathHealth::NoData));
    }

    #[test]
    fn dashboard_rows_include_critical_path_labels() {
        let rows = dashboard(&MetricStore::new()).rows();
        let labels: Vec<_> = rows.iter().map(|(label, _)| label.as_str()).collect();

        assert!(labels.contains(&"Pass Rate"));
        assert!(labels.contains(&"Grid Utilization"));
        assert!(labels.contains(&"Critical Path [payment]"));
        assert!(labels.contains(&"Critical Path [authentication]"));
        assert!(labels.contains(&"Critical Path [checkout]"));
    }

    #[test]
    fn report_summarizes_timing_series() {
        let store = MetricStore::new();
        store.increment_counter(MetricKey::global("api_calls_total"));
        store.record_gauge(MetricKey::global("test_browser"), "firefox");
        for millis in [10, 20, 30, 40, 50] {
            store.record_timing(
                MetricKey::with_dim("test_duration", "api"),
                Duration::from_millis(millis),
            );
        }

        let report = all_metrics(&store);
        assert_eq!(report.counters["api_calls_total"], 1);
        assert_eq!(report.gauges["test_browser"], GaugeValue::Text("firefox".into()));

        let summary = report.timings["test_duration_api"];
        assert_eq!(summary.p50, 30.0);
        assert_eq!(summary.p95, 50.0);
        assert_eq!(summary.avg, 30.0);
    }

    #[test]
    fn report_serializes_to_json() {
        let store = MetricStore::new();
        store.increment_counter(MetricKey::global("tests_started_total"));
        store.record_gauge(MetricKey::global("test_environment"), "staging");

        let json = serde_json::to_value(all_metrics(&store)).unwrap();
        assert_eq!(json["counters"]["tests_started_total"], 1);
        assert_eq!(json["gauges"]["test_environment"], "staging");
    }
}
