//! Metric name constants shared by recorders, analysis, and export.
//!
//! Per-dimension variants (feature, endpoint, transaction kind) are built
//! from these bases via [`crate::metrics::MetricKey`] rather than string
//! concatenation.

// Test lifecycle
pub(crate) const TESTS_STARTED_TOTAL: &str = "tests_started_total";
pub(crate) const TESTS_PASSED_TOTAL: &str = "tests_passed_total";
pub(crate) const TESTS_FAILED_TOTAL: &str = "tests_failed_total";
pub(crate) const TESTS_STARTED: &str = "tests_started";
pub(crate) const TESTS_PASSED: &str = "tests_passed";
pub(crate) const TESTS_FAILED: &str = "tests_failed";
pub(crate) const TESTS_ACTIVE: &str = "tests_active";
pub(crate) const TEST_DURATION: &str = "test_duration";
pub(crate) const TEST_BROWSER: &str = "test_browser";
pub(crate) const TEST_ENVIRONMENT: &str = "test_environment";

// SLA
pub(crate) const SLA_BREACHES_TOTAL: &str = "sla_breaches_total";
pub(crate) const SLA_BREACHES: &str = "sla_breaches";

// API calls
pub(crate) const API_CALLS_TOTAL: &str = "api_calls_total";
pub(crate) const API_CALLS: &str = "api_calls";
pub(crate) const API_RESPONSES: &str = "api_responses";
pub(crate) const API_RESPONSE_TIME: &str = "api_response_time";
pub(crate) const API_RESPONSE_SIZE_BYTES: &str = "api_response_size_bytes";

// UI page loads
pub(crate) const PAGE_LOADS_SUCCESS_TOTAL: &str = "page_loads_success_total";
pub(crate) const PAGE_LOADS_FAILED_TOTAL: &str = "page_loads_failed_total";
pub(crate) const PAGE_LOAD_TIME: &str = "page_load_time";

// Business transactions
pub(crate) const BUSINESS_TRANSACTIONS_TOTAL: &str = "business_transactions_total";
pub(crate) const BUSINESS_TRANSACTIONS: &str = "business_transactions";
pub(crate) const BUSINESS_VOLUME_TOTAL: &str = "business_volume_total";
pub(crate) const BUSINESS_CURRENCY: &str = "business_currency";

// Selenium grid
pub(crate) const GRID_NODES_TOTAL: &str = "selenium_grid_nodes_total";
pub(crate) const GRID_SESSIONS_ACTIVE: &str = "selenium_grid_sessions_active";
pub(crate) const GRID_SESSIONS_QUEUED: &str = "selenium_grid_sessions_queued";
pub(crate) const GRID_UTILIZATION: &str = "selenium_grid_utilization";
