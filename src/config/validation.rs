//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint URLs are absolute http(s) URLs
//! - Validate value ranges (timeouts > 0, multipliers finite and positive)
//! - Cap the transaction validity window at one day
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to any client

use crate::config::schema::ClientConfig;

/// Longest validity window a built transaction may carry.
pub const MAX_TX_TIMEOUT_SECS: u64 = 86_400;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "api.base_url").
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "api.base_url", &config.api.base_url);
    check_url(&mut errors, "sdk.base_url", &config.sdk.base_url);
    check_url(&mut errors, "network.horizon_url", &config.network.horizon_url);
    check_url(&mut errors, "network.friendbot_url", &config.network.friendbot_url);

    check_positive(&mut errors, "api.connect_timeout_secs", config.api.connect_timeout_secs);
    check_positive(&mut errors, "api.request_timeout_secs", config.api.request_timeout_secs);
    check_positive(&mut errors, "network.timeout_secs", config.network.timeout_secs);
    check_positive(&mut errors, "network.tx_timeout_secs", config.network.tx_timeout_secs);
    if config.network.tx_timeout_secs > MAX_TX_TIMEOUT_SECS {
        errors.push(ValidationError {
            field: "network.tx_timeout_secs",
            message: format!("must be at most {} seconds", MAX_TX_TIMEOUT_SECS),
        });
    }

    if config.network.base_fee_fallback == 0 {
        errors.push(ValidationError {
            field: "network.base_fee_fallback",
            message: "must be at least 1 stroop".to_string(),
        });
    }

    let currency = &config.conversion.reference_currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(ValidationError {
            field: "conversion.reference_currency",
            message: format!("'{}' is not a 3-letter uppercase currency code", currency),
        });
    }

    check_multiplier(&mut errors, "conversion.usd_to_xlm", config.conversion.usd_to_xlm);
    check_multiplier(&mut errors, "conversion.kes_per_xlm", config.conversion.kes_per_xlm);

    if config.session.path.trim().is_empty() {
        errors.push(ValidationError {
            field: "session.path",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field,
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("invalid URL '{}': {}", value, e),
        }),
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &'static str, value: u64) {
    if value == 0 {
        errors.push(ValidationError {
            field,
            message: "must be greater than zero".to_string(),
        });
    }
}

fn check_multiplier(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ValidationError {
            field,
            message: format!("{} is not a positive finite number", value),
        });
    }
}
