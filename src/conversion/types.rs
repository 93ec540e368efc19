//! Conversion estimate types.

use serde::{Deserialize, Serialize};

/// A display-only XLM estimate for a fiat amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Amount entered by the user.
    pub amount: f64,
    pub currency: String,
    /// Currency the backend rate converts into (USD by default).
    pub reference_currency: String,
    /// Backend rate from `currency` to `reference_currency`.
    pub rate: f64,
    /// Multiplier from the reference currency to XLM.
    pub multiplier: f64,
    /// Estimated XLM, never negative.
    pub xlm_amount: f64,
}
