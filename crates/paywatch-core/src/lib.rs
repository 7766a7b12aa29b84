//! Paywatch Core - Test Observability Engine
//!
//! In-memory observability for the payment checkout test harness:
//! - Metrics: counters, gauges, and timing series in one shared store
//! - Recorders: typed entry points for test lifecycle, API, UI, business, and grid events
//! - Analysis: pass rates, percentile summaries, SLA breaches, critical-path health
//! - Export: Prometheus text exposition, JSON report, real-time dashboard
//! - Alerting: synchronous threshold alerts through a pluggable sink
//!
//! The store lives for one test-run process and is safe to share across
//! parallel test executions. Nothing here performs I/O beyond writing alert
//! text to the log: recorder failures are logged and dropped so that
//! observability can never abort the test run that produced an event.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alert;
pub mod analysis;
pub mod error;
pub mod export;
pub mod metrics;
pub mod observer;

mod names;

pub use alert::{Alert, AlertSink, CapturingAlertSink, ErrorCategory, TracingAlertSink};
pub use analysis::{CriticalPathHealth, TimingSummary};
pub use error::{Error, Result};
pub use export::{DashboardSnapshot, GridSnapshot, MetricsReport};
pub use metrics::{Counter, GaugeValue, MetricKey, MetricStore, Timer, TimingSeries};
pub use observer::{TestObservability, TestResult};
