//! Network selection and error definitions.

use sha2::{Digest, Sha256};
use thiserror::Error;

// Re-export the network selector from config to avoid duplication
pub use crate::config::schema::NetworkKind as Network;

impl Network {
    /// Passphrase mixed into every transaction signature.
    pub fn passphrase(self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Public => "Public Global Stellar Network ; September 2015",
        }
    }

    /// SHA-256 of the passphrase.
    pub fn network_id(self) -> [u8; 32] {
        Sha256::digest(self.passphrase().as_bytes()).into()
    }
}

/// Errors that can occur during Stellar operations.
#[derive(Debug, Error)]
pub enum StellarError {
    /// Malformed or mistyped strkey.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Amount is not a positive number with at most 7 decimals.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Asset code is not 1-12 alphanumeric characters.
    #[error("Invalid asset code '{0}'")]
    InvalidAsset(String),

    /// Text memo longer than the protocol allows.
    #[error("Memo too long: {0} bytes (max 28)")]
    MemoTooLong(usize),

    /// A transaction needs at least one operation.
    #[error("Transaction has no operations")]
    NoOperations,

    /// Horizon has no such account (unfunded or wrong key).
    #[error("Account {0} not found")]
    AccountNotFound(String),

    /// Horizon answered with an error status.
    #[error("Horizon returned {status}: {detail}")]
    Horizon { status: u16, detail: String },

    /// Horizon did not answer in time.
    #[error("Horizon timeout after {0} seconds")]
    Timeout(u64),

    /// Connection failure talking to Horizon or Friendbot.
    #[error("Horizon request failed: {0}")]
    Transport(String),

    /// Horizon answered with something we cannot read.
    #[error("Unexpected Horizon response: {0}")]
    Encoding(String),

    /// Feature not available on the configured network.
    #[error("Not supported on {network:?}: {what}")]
    Unsupported { network: Network, what: String },
}

/// Result type for Stellar operations.
pub type StellarResult<T> = Result<T, StellarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_ids_differ() {
        assert_ne!(Network::Testnet.network_id(), Network::Public.network_id());
        assert_eq!(
            hex::encode(Network::Testnet.network_id()),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn test_error_display() {
        let err = StellarError::Timeout(30);
        assert_eq!(err.to_string(), "Horizon timeout after 30 seconds");

        let err = StellarError::Horizon {
            status: 400,
            detail: "tx_bad_seq".to_string(),
        };
        assert!(err.to_string().contains("tx_bad_seq"));
    }
}
