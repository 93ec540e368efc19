//! Outbound HTTP plumbing shared by every remote call.
//!
//! # Data Flow
//! ```text
//! typed client method (api, payments::sdk, conversion)
//!     → client.rs (build request, attach bearer token / idempotency key)
//!     → reqwest (connect + total timeouts)
//!     → client.rs (status check, JSON decode, log + metrics)
//!     → typed response or ApiError
//! ```
//!
//! # Design Decisions
//! - Any non-2xx status is a rejection; 4xx and 5xx are not distinguished
//! - No retries and no backoff
//! - The token is read from the session on every request, never cached here

pub mod client;
pub mod types;

pub use client::{HttpClient, IDEMPOTENCY_KEY_HEADER};
pub use types::{ApiError, ApiResult, Operation};
