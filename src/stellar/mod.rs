//! Stellar network integration.
//!
//! # Data Flow
//! ```text
//! secret seed (S...) from the caller
//!     → strkey.rs (base32 + CRC16 decode)
//!     → wallet.rs (ed25519 keypair, signing)
//!     → transaction.rs + xdr.rs (build, hash, sign, envelope)
//!     → client.rs (Horizon: load account, fee stats, submit; Friendbot)
//! ```
//!
//! # Security Constraints
//! - Secret seeds are never logged; `Keypair`'s Debug output is redacted
//! - All Horizon calls have a configurable timeout
//! - `validation.rs` is a shallow format check for UI hints only; anything
//!   that needs key bytes goes through the checksummed strkey decoder

pub mod amount;
pub mod client;
pub mod strkey;
pub mod transaction;
pub mod types;
pub mod validation;
pub mod wallet;
pub mod xdr;

pub use amount::{format_amount, parse_amount, stroops_to_xlm, xlm_to_stroops, STROOPS_PER_XLM};
pub use client::HorizonClient;
pub use transaction::{Asset, Memo, Operation, SignedTransaction, Transaction, TransactionBuilder};
pub use types::{Network, StellarError, StellarResult};
pub use validation::{validate_asset_code, validate_public_key, validate_secret_key};
pub use wallet::Keypair;
