//! Request and response bodies for the NovaPay backend.

use serde::{Deserialize, Serialize};

/// A NovaPay user as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stellar_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Partial profile update; `None` fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Lifecycle state of a transaction. Unknown values are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    #[serde(untagged)]
    Other(String),
}

/// A money movement recorded by the backend. Read-only to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub recipient_email: String,
    pub amount: f64,
    pub currency: String,
    pub target_currency: String,
    pub status: TransactionStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stellar_tx_hash: Option<String>,
}

/// Body of `POST /transactions/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMoneyRequest {
    pub recipient_email: String,
    pub amount: f64,
    pub currency: String,
    pub target_currency: String,
}

impl SendMoneyRequest {
    /// A USD → KES transfer, the dashboard's default pair.
    pub fn new(recipient_email: impl Into<String>, amount: f64) -> Self {
        Self {
            recipient_email: recipient_email.into(),
            amount,
            currency: "USD".to_string(),
            target_currency: "KES".to_string(),
        }
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn target_currency(mut self, target_currency: impl Into<String>) -> Self {
        self.target_currency = target_currency.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMoneyResponse {
    pub transaction: Transaction,
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// One asset line from the legacy balance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub balance: String,
    pub asset_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
}

/// Response of `GET /stellar/get-balance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockchainBalance {
    pub public_key: String,
    pub balances: Vec<AssetBalance>,
}

/// Response of `GET /wallet/balance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub xlm_balance: f64,
    pub kes_equivalent: f64,
    pub wallet_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DepositRequest<'a> {
    pub kes_amount: f64,
    pub mpesa_ref: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub kes_amount: f64,
    pub xlm_amount: f64,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WithdrawRequest<'a> {
    pub xlm_amount: f64,
    pub mpesa_number: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub xlm_amount: f64,
    pub kes_amount: f64,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransferRequest<'a> {
    pub xlm_amount: f64,
    pub to_wallet_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub xlm_amount: f64,
    pub to_wallet_id: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Body of `POST /fonbnk/deposit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtimeDepositRequest {
    pub phone_number: String,
    pub airtime_amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtimeDepositReceipt {
    pub success: bool,
    pub transaction_id: String,
    pub usd_amount: f64,
    pub xlm_amount: f64,
    pub new_balance: f64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RateRequest<'a> {
    pub from_currency: &'a str,
    pub to_currency: &'a str,
}

/// Response of `POST /fonbnk/rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
}
