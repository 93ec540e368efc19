//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the NovaPay client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// NovaPay backend API settings.
    pub api: ApiConfig,

    /// Remote wallet SDK service settings.
    pub sdk: SdkConfig,

    /// Stellar network settings used by the direct gateway.
    pub network: NetworkConfig,

    /// Which payment gateway to use.
    pub payments: PaymentsConfig,

    /// Display-only conversion estimates.
    pub conversion: ConversionConfig,

    /// Where the session (token + cached profile) is persisted.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the NovaPay backend (e.g., "http://localhost:3000").
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Attach an `Idempotency-Key` header to mutating calls.
    pub idempotency_keys: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            idempotency_keys: false,
        }
    }
}

/// Remote wallet SDK service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Base URL of the SDK service exposing `/sdk/wallet/*`.
    pub base_url: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Stellar network selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    #[default]
    Testnet,
    Public,
}

/// Stellar network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Which network passphrase to sign for.
    pub network: NetworkKind,

    /// Horizon API URL.
    pub horizon_url: String,

    /// Friendbot (testnet faucet) URL.
    pub friendbot_url: String,

    /// Horizon request timeout in seconds.
    pub timeout_secs: u64,

    /// Base fee in stroops when `/fee_stats` is unavailable.
    pub base_fee_fallback: u32,

    /// Validity window of submitted transactions in seconds.
    pub tx_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network: NetworkKind::Testnet,
            horizon_url: "https://horizon-testnet.stellar.org".to_string(),
            friendbot_url: "https://friendbot.stellar.org".to_string(),
            timeout_secs: 30,
            base_fee_fallback: 100,
            tx_timeout_secs: 30,
        }
    }
}

/// Payment gateway selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Proxy through the remote SDK service.
    #[default]
    Sdk,
    /// Talk to Horizon directly with locally held keys.
    Horizon,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PaymentsConfig {
    pub backend: GatewayKind,
}

/// Conversion estimate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Intermediate fiat currency the backend rate is quoted in.
    pub reference_currency: String,

    /// Reference-currency to XLM multiplier. Not a live price.
    pub usd_to_xlm: f64,

    /// Fixed KES per XLM used by the dashboard hints.
    pub kes_per_xlm: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            reference_currency: "USD".to_string(),
            usd_to_xlm: 8.33,
            kes_per_xlm: 120.0,
        }
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path of the JSON session file.
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: ".novapay/session.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}
