//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every outbound call (backend, SDK service, Horizon):
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (request counters and latency histograms)
//! ```
//!
//! # Design Decisions
//! - Structured logging with an env-overridable filter
//! - Bearer tokens and secret keys are never logged
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder they are no-ops

pub mod logging;
pub mod metrics;
