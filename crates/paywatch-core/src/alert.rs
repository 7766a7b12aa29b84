//! Threshold alerts and delivery sinks.
//!
//! Alerts are ephemeral: generated and delivered synchronously the instant a
//! condition is detected, never persisted or deduplicated. Repeated
//! triggering conditions produce repeated alerts.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

/// Error taxonomy used to tag critical-path alerts.
///
/// Derived by keyword inspection of the error message supplied with a test
/// completion; the core never raises these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The action timed out.
    Timeout,
    /// A page element could not be located.
    ElementNotFound,
    /// Connectivity or DNS trouble.
    Network,
    /// A business assertion did not hold.
    AssertionFailure,
    /// Recognizable message that matched no known keyword.
    Other,
    /// No error message was supplied.
    Unknown,
}

impl ErrorCategory {
    /// Classify an optional error message by keyword inspection.
    #[must_use]
    pub fn from_message(message: Option<&str>) -> Self {
        let Some(message) = message else {
            return Self::Unknown;
        };
        let lower = message.to_ascii_lowercase();
        if lower.contains("timeout") {
            Self::Timeout
        } else if lower.contains("element not found") {
            Self::ElementNotFound
        } else if lower.contains("network") {
            Self::Network
        } else if lower.contains("assertion") {
            Self::AssertionFailure
        } else {
            Self::Other
        }
    }

    /// Snake-case tag used in alert payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ElementNotFound => "element_not_found",
            Self::Network => "network",
            Self::AssertionFailure => "assertion_failure",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A threshold-triggered alert event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alert {
    /// A test on a business-critical feature failed.
    CriticalPathFailure {
        /// Failing test name.
        test: String,
        /// Feature the test belongs to.
        feature: String,
        /// Categorized error taxonomy tag.
        category: ErrorCategory,
        /// Raw error message supplied by the harness.
        message: String,
        /// When the failure was recorded.
        at: DateTime<Utc>,
    },
    /// A completed test exceeded its feature's SLA threshold.
    SlaBreach {
        /// Feature whose threshold was exceeded.
        feature: String,
        /// Observed test duration in milliseconds.
        duration_ms: u64,
        /// The feature's SLA threshold in milliseconds.
        threshold_ms: u64,
    },
    /// Selenium grid utilization crossed the capacity threshold.
    GridCapacity {
        /// Active sessions divided by total nodes.
        utilization: f64,
    },
}

/// Destination for alert events.
///
/// Delivery is synchronous and fire-and-forget: no retry, no delivery
/// guarantee, no dedup window. Sinks must not block on I/O and must not
/// panic.
pub trait AlertSink: Send + Sync {
    /// Deliver one alert event.
    fn send(&self, alert: &Alert);
}

/// Default sink: writes alerts to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn send(&self, alert: &Alert) {
        match alert {
            Alert::CriticalPathFailure {
                test,
                feature,
                category,
                message,
                ..
            } => {
                error!(
                    test = %test,
                    feature = %feature,
                    category = %category,
                    message = %message,
                    "critical path failure"
                );
            }
            Alert::SlaBreach {
                feature,
                duration_ms,
                threshold_ms,
            } => {
                warn!(
                    feature = %feature,
                    duration_ms,
                    threshold_ms,
                    "SLA breach"
                );
            }
            Alert::GridCapacity { utilization } => {
                warn!(
                    utilization_pct = %format_args!("{:.1}", utilization * 100.0),
                    "selenium grid utilization above capacity threshold"
                );
            }
        }
    }
}

/// Sink that stores alerts in memory.
///
/// Used by the core's own tests and by embedders that forward alerts to an
/// external system at the end of a run.
#[derive(Debug, Default)]
pub struct CapturingAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl CapturingAlertSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts delivered so far, in delivery order.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        let alerts = self.alerts.lock().unwrap_or_else(|e| e.into_inner());
        alerts.clone()
    }
}

impl AlertSink for CapturingAlertSink {
    fn send(&self, alert: &Alert) {
        let mut alerts = self.alerts.lock().unwrap_or_else(|e| e.into_inner());
        alerts.push(alert.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_by_keyword() {
        assert_eq!(
            ErrorCategory::from_message(Some("Timeout waiting for iframe")),
            ErrorCategory::Timeout
        );
        assert_eq!(
            ErrorCategory::from_message(Some("element not found: #card-number")),
            ErrorCategory::ElementNotFound
        );
        assert_eq!(
            ErrorCategory::from_message(Some("Network unreachable")),
            ErrorCategory::Network
        );
        assert_eq!(
            ErrorCategory::from_message(Some("Assertion failed: expected DECLINED")),
            ErrorCategory::AssertionFailure
        );
        assert_eq!(
            ErrorCategory::from_message(Some("payment gateway returned 502")),
            ErrorCategory::Other
        );
        assert_eq!(ErrorCategory::from_message(None), ErrorCategory::Unknown);
    }

    #[test]
    fn capturing_sink_keeps_delivery_order() {
        let sink = CapturingAlertSink::new();
        sink.send(&Alert::GridCapacity { utilization: 0.9 });
        sink.send(&Alert::SlaBreach {
            feature: "api".into(),
            duration_ms: 1500,
            threshold_ms: 1000,
        });

        let alerts = sink.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0], Alert::GridCapacity { utilization: 0.9 });
    }

    #[test]
    fn alerts_serialize_with_type_tag() {
        let json = serde_json::to_value(Alert::GridCapacity { utilization: 0.85 }).unwrap();
        assert_eq!(json["type"], "GRID_CAPACITY");

        let json = serde_json::to_value(Alert::SlaBreach {
            feature: "payment".into(),
            duration_ms: 6000,
            threshold_ms: 5000,
        })
        .unwrap();
        assert_eq!(json["type"], "SLA_BREACH");
    }
}
