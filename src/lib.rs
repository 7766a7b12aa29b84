//! Paywatch - reporting surface for the checkout test harness.
//!
//! The observability core lives in `paywatch-core`; this crate exposes it
//! over HTTP as a pull-based endpoint (`/metrics`, `/dashboard`,
//! `/metrics/report`, `/health`) and ships a small simulator that stands in
//! for the browser/API collaborators when the surface runs standalone.

#![forbid(unsafe_code)]

pub mod api;
pub mod simulate;
