//! Payment gateway request, response, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::ApiError;
use crate::stellar::StellarError;

/// Keys of a freshly created wallet.
///
/// Holds the secret seed; `Debug` redacts it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletKeys {
    pub public_key: String,
    pub secret_key: String,
    /// Handle distinct from the public key.
    pub wallet_id: String,
}

impl std::fmt::Debug for WalletKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletKeys")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("wallet_id", &self.wallet_id)
            .finish()
    }
}

/// One asset balance. The native asset is reported as "XLM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub asset_code: String,
    pub balance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalances {
    pub public_key: String,
    pub balances: Vec<Balance>,
}

/// A payment to submit. `amount` is a decimal string with up to 7 places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub destination: String,
    pub amount: String,
    /// Omitted means XLM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl PaymentRequest {
    /// A native XLM payment.
    pub fn native(destination: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            amount: amount.into(),
            asset_code: None,
            asset_issuer: None,
            memo: None,
        }
    }

    pub fn asset(mut self, code: impl Into<String>, issuer: Option<String>) -> Self {
        self.asset_code = Some(code.into());
        self.asset_issuer = issuer;
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// True when the asset is XLM (absent, "XLM", or "native").
    pub fn is_native(&self) -> bool {
        match self.asset_code.as_deref() {
            None => true,
            Some(code) => code.eq_ignore_ascii_case("xlm") || code.eq_ignore_ascii_case("native"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub transaction_hash: String,
    pub amount: String,
    pub asset_code: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundResult {
    pub success: bool,
    pub message: String,
}

/// A trustline to open. `limit` is a decimal string; omitted means maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustlineRequest {
    pub asset_code: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustlineResult {
    pub transaction_hash: String,
    pub asset_code: String,
    pub issuer: String,
}

/// Errors surfaced by payment gateways.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Rejected locally before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Stellar(#[from] StellarError),
}

/// Result type for payment operations.
pub type GatewayResult<T> = Result<T, PaymentError>;
