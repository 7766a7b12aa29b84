//! Simulated checkout run for standalone use of the reporting surface.
//!
//! Stands in for the lifecycle hooks and step definitions that feed the
//! recorders in a real run, so `/metrics` and `/dashboard` have data to show
//! when the server runs outside a harness. Recorder results are ignored by
//! contract: a dropped event is logged by the core and must not stop anything.

use std::time::Duration;

use paywatch_core::{TestObservability, TestResult};

/// Seed the store with one representative checkout run.
pub fn seed(observability: &TestObservability) {
    let scenarios = [
        ("checkout_visa_success", "checkout", TestResult::Passed, 2100, None),
        ("checkout_mastercard_success", "checkout", TestResult::Passed, 2350, None),
        ("checkout_declined_card", "checkout", TestResult::Passed, 1900, None),
        ("payment_capture", "payment", TestResult::Passed, 3200, None),
        ("payment_refund", "payment", TestResult::Passed, 6100, None),
        (
            "payment_3ds_challenge",
            "payment",
            TestResult::Failed,
            4800,
            Some("Timeout waiting for 3DS redirect"),
        ),
        ("login_valid_credentials", "authentication", TestResult::Passed, 900, None),
        ("api_status_lookup", "api", TestResult::Passed, 450, None),
    ];

    for (test, feature, result, millis, error) in scenarios {
        let _ = observability.record_test_start(test, feature, "chrome", "staging");
        let _ = observability.record_test_completion(
            test,
            feature,
            result,
            Duration::from_millis(millis),
            error,
        );
    }

    let _ = observability.record_page_load(
        "https://shop.example/checkout",
        Duration::from_millis(840),
        true,
    );
    let _ = observability.record_page_load(
        "https://shop.example/checkout/confirm",
        Duration::from_millis(1260),
        true,
    );

    let _ = observability.record_api_response(
        "/payments/{txnId}/status",
        "GET",
        200,
        Duration::from_millis(140),
        512,
    );
    let _ = observability.record_api_response(
        "/payments",
        "POST",
        201,
        Duration::from_millis(320),
        1024,
    );
    let _ = observability.record_api_response(
        "/payments/{txnId}/status",
        "GET",
        404,
        Duration::from_millis(95),
        64,
    );

    let _ = observability.record_business_transaction("card_payment", "SUCCESS", 49.99, "EUR");
    let _ = observability.record_business_transaction("card_payment", "SUCCESS", 120.00, "EUR");
    let _ = observability.record_business_transaction("card_payment", "DECLINED", 75.50, "EUR");

    let _ = observability.update_grid_status(10, 9, 2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_run_produces_a_populated_dashboard() {
        let observability = TestObservability::new();
        seed(&observability);

        let dashboard = observability.dashboard();
        assert_eq!(dashboard.tests_started, 8);
        assert_eq!(dashboard.tests_passed + dashboard.tests_failed, 8);
        assert!(dashboard.failure_rate > 0.0);
        assert!(dashboard.sla_breaches >= 1);
        assert_eq!(dashboard.grid.utilization, 0.9);
        assert!(dashboard.estimated_revenue_impact > 0.0);
    }
}
