//! Wallet and payment operations.
//!
//! # Data Flow
//! ```text
//! PaymentClient (client.rs)
//!     → gateway.rs (shared input validation)
//!     → PaymentGateway impl selected by `payments.backend`:
//!         sdk.rs      POST /sdk/wallet/* on the authenticated transport
//!         horizon.rs  local signing + Horizon/Friendbot via stellar::client
//! ```
//!
//! # Failure Semantics
//! - Every failure is a `PaymentError`; nothing is retried
//! - Submitted-but-unconfirmed transactions are not reconciled

pub mod client;
pub mod gateway;
pub mod horizon;
pub mod sdk;
pub mod types;

pub use client::PaymentClient;
pub use gateway::PaymentGateway;
pub use horizon::HorizonGateway;
pub use sdk::SdkGateway;
pub use types::{
    AccountBalances, Balance, FundResult, GatewayResult, PaymentError, PaymentRequest,
    PaymentResult, TrustlineRequest, TrustlineResult, WalletKeys,
};
