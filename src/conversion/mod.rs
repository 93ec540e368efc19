//! Display-only currency estimates.
//!
//! # Data Flow
//! ```text
//! (amount, currency)
//!     → api::ApiClient::conversion_rate (POST /fonbnk/rate)
//!     → engine::estimate (amount * rate * usd_to_xlm, clamped)
//!     → Estimate
//! ```

pub mod engine;
pub mod types;

pub use engine::{estimate, kes_to_xlm, xlm_to_kes, ConversionEngine};
pub use types::Estimate;
