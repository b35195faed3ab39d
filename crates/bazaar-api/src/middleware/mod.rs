// SPDX-License-Identifier: BUSL-1.1
//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - `TraceLayer` (mounted in `lib.rs`): request/response tracing.
//! - [`metrics`]: Prometheus-compatible request metrics.

pub mod metrics;
