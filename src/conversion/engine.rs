//! Fiat to XLM estimates.

use crate::api::ApiClient;
use crate::config::ConversionConfig;
use crate::conversion::types::Estimate;
use crate::http::ApiResult;

/// `amount * rate * multiplier`, clamped to a non-negative finite value.
pub fn estimate(amount: f64, rate: f64, multiplier: f64) -> f64 {
    let value = amount * rate * multiplier;
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// KES to XLM at a fixed rate.
pub fn kes_to_xlm(kes: f64, kes_per_xlm: f64) -> f64 {
    if kes_per_xlm <= 0.0 {
        return 0.0;
    }
    estimate(kes, 1.0 / kes_per_xlm, 1.0)
}

/// XLM to KES at a fixed rate.
pub fn xlm_to_kes(xlm: f64, kes_per_xlm: f64) -> f64 {
    estimate(xlm, kes_per_xlm, 1.0)
}

/// Estimates using the backend rate feed.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    api: ApiClient,
    config: ConversionConfig,
}

impl ConversionEngine {
    pub fn new(api: ApiClient, config: ConversionConfig) -> Self {
        Self { api, config }
    }

    /// Fetch the `currency` → reference rate and estimate the XLM value.
    /// The result is for display and is never sent to the backend.
    pub async fn estimate_xlm(&self, amount: f64, currency: &str) -> ApiResult<Estimate> {
        let quoted = self
            .api
            .conversion_rate(currency, &self.config.reference_currency)
            .await?;

        let xlm_amount = estimate(amount, quoted.rate, self.config.usd_to_xlm);
        tracing::debug!(
            amount,
            currency,
            rate = quoted.rate,
            xlm_amount,
            "Conversion estimate"
        );

        Ok(Estimate {
            amount,
            currency: currency.to_string(),
            reference_currency: self.config.reference_currency.clone(),
            rate: quoted.rate,
            multiplier: self.config.usd_to_xlm,
            xlm_amount,
        })
    }

    /// Offline estimate at the fixed KES rate. `None` unless `currency`
    /// is KES, the only currency the fixed rate covers.
    pub fn fixed_estimate(&self, amount: f64, currency: &str) -> Option<Estimate> {
        if !currency.eq_ignore_ascii_case("KES") {
            return None;
        }

        let kes_per_xlm = self.config.kes_per_xlm;
        let rate = if kes_per_xlm > 0.0 { 1.0 / kes_per_xlm } else { 0.0 };
        Some(Estimate {
            amount,
            currency: "KES".to_string(),
            reference_currency: "XLM".to_string(),
            rate,
            multiplier: 1.0,
            xlm_amount: self.kes_to_xlm(amount),
        })
    }

    pub fn kes_to_xlm(&self, kes: f64) -> f64 {
        kes_to_xlm(kes, self.config.kes_per_xlm)
    }

    pub fn xlm_to_kes(&self, xlm: f64) -> f64 {
        xlm_to_kes(xlm, self.config.kes_per_xlm)
    }
}
