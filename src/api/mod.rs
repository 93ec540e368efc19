//! NovaPay backend API.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs (typed method, body from types.rs)
//!     → http::HttpClient (bearer token from the session)
//!     → backend
//!     → client.rs (session write on auth/profile success)
//! ```

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    Acknowledgement, AirtimeDepositReceipt, AirtimeDepositRequest, AssetBalance,
    BlockchainBalance, ConversionRate, DepositReceipt, LoginResponse, ProfileUpdate,
    SendMoneyRequest, SendMoneyResponse, Transaction, TransactionStatus, TransferReceipt, User,
    WalletBalance, WithdrawalReceipt,
};
