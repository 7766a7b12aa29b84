//! Metrics primitives and the shared store.
//!
//! Lightweight in-memory metrics without external dependencies. The store is
//! rendered to Prometheus format by [`crate::export`].

pub mod key;
pub mod store;
pub mod types;

pub use key::MetricKey;
pub use store::MetricStore;
pub use types::{Counter, GaugeValue, Timer, TimingSeries};

#[cfg(test)]
mod tests;
