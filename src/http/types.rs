//! Operation names and the transport error type.

use thiserror::Error;

use crate::session::SessionError;

/// Every remote call the client can make. Carries the metric label and the
/// user-facing message used when the call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    Login,
    CurrentUser,
    UserProfile,
    UpdateUserProfile,
    SendMoney,
    TransactionHistory,
    FundTestAccount,
    BlockchainBalance,
    WalletBalance,
    Deposit,
    Withdraw,
    Transfer,
    AirtimeDeposit,
    ConversionRate,
    SdkCreateWallet,
    SdkBalance,
    SdkSendPayment,
    SdkFundTestnet,
    SdkTrustline,
}

impl Operation {
    /// Stable snake_case name used in logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::CurrentUser => "current_user",
            Operation::UserProfile => "user_profile",
            Operation::UpdateUserProfile => "update_user_profile",
            Operation::SendMoney => "send_money",
            Operation::TransactionHistory => "transaction_history",
            Operation::FundTestAccount => "fund_test_account",
            Operation::BlockchainBalance => "blockchain_balance",
            Operation::WalletBalance => "wallet_balance",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
            Operation::Transfer => "transfer",
            Operation::AirtimeDeposit => "airtime_deposit",
            Operation::ConversionRate => "conversion_rate",
            Operation::SdkCreateWallet => "sdk_create_wallet",
            Operation::SdkBalance => "sdk_balance",
            Operation::SdkSendPayment => "sdk_send_payment",
            Operation::SdkFundTestnet => "sdk_fund_testnet",
            Operation::SdkTrustline => "sdk_trustline",
        }
    }

    /// Static message surfaced when the call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Register => "Registration failed",
            Operation::Login => "Login failed",
            Operation::CurrentUser => "Failed to get user",
            Operation::UserProfile => "Failed to get user profile",
            Operation::UpdateUserProfile => "Failed to update profile",
            Operation::SendMoney => "Failed to send money",
            Operation::TransactionHistory => "Failed to get transactions",
            Operation::FundTestAccount => "Failed to fund account",
            Operation::BlockchainBalance => "Failed to get balance",
            Operation::WalletBalance => "Failed to get wallet balance",
            Operation::Deposit => "Failed to deposit",
            Operation::Withdraw => "Failed to withdraw",
            Operation::Transfer => "Failed to transfer",
            Operation::AirtimeDeposit => "Airtime deposit failed",
            Operation::ConversionRate => "Failed to get conversion rate",
            Operation::SdkCreateWallet => "Failed to create wallet",
            Operation::SdkBalance => "Failed to get wallet balance",
            Operation::SdkSendPayment => "Failed to send payment",
            Operation::SdkFundTestnet => "Failed to fund testnet account",
            Operation::SdkTrustline => "Failed to create trustline",
        }
    }

    /// Calls that move money or change on-chain state.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Operation::SendMoney
                | Operation::Deposit
                | Operation::Withdraw
                | Operation::Transfer
                | Operation::AirtimeDeposit
                | Operation::SdkSendPayment
                | Operation::SdkTrustline
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from a remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{} (HTTP {status})", .operation.failure_message())]
    Rejected { operation: Operation, status: u16 },

    /// No response within the configured timeout.
    #[error("{}: request timed out", .operation.failure_message())]
    Timeout { operation: Operation },

    /// Connection or protocol failure.
    #[error("{}: {source}", .operation.failure_message())]
    Transport {
        operation: Operation,
        source: reqwest::Error,
    },

    /// Success status but the body did not match the expected shape.
    #[error("{}: unexpected response body: {source}", .operation.failure_message())]
    Decode {
        operation: Operation,
        source: serde_json::Error,
    },

    /// The configured base URL is unusable.
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Setup(reqwest::Error),

    /// The call succeeded but persisting the session failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// The HTTP status for rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The operation that failed, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Rejected { operation, .. }
            | ApiError::Timeout { operation }
            | ApiError::Transport { operation, .. }
            | ApiError::Decode { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Result type for remote calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_uses_static_message() {
        let err = ApiError::Rejected {
            operation: Operation::Login,
            status: 401,
        };
        assert_eq!(err.to_string(), "Login failed (HTTP 401)");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.operation(), Some(Operation::Login));
    }

    #[test]
    fn test_mutating_operations() {
        assert!(Operation::SendMoney.is_mutating());
        assert!(Operation::Transfer.is_mutating());
        assert!(!Operation::Login.is_mutating());
        assert!(!Operation::WalletBalance.is_mutating());
    }

    #[test]
    fn test_decode_display() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ApiError::Decode {
            operation: Operation::WalletBalance,
            source,
        };
        assert!(err.to_string().starts_with("Failed to get wallet balance: unexpected response body"));
    }
}
