//! Transaction building, hashing, and signing.
//!
//! # Responsibilities
//! - Build single-source transactions (payment, change-trust)
//! - Encode them as XDR
//! - Hash for a network and sign with a keypair
//! - Produce the base64 envelope Horizon expects

use base64::Engine;
use sha2::{Digest, Sha256};

use crate::stellar::types::{Network, StellarError, StellarResult};
use crate::stellar::validation::validate_asset_code;
use crate::stellar::wallet::Keypair;
use crate::stellar::xdr::XdrWriter;

/// Longest text memo, in bytes.
pub const MAX_MEMO_TEXT_BYTES: usize = 28;

/// Protocol minimum fee per operation, in stroops.
pub const MIN_BASE_FEE: u32 = 100;

const ENVELOPE_TYPE_TX: u32 = 2;
const KEY_TYPE_ED25519: u32 = 0;
const PRECOND_NONE: u32 = 0;
const PRECOND_TIME: u32 = 1;
const MEMO_NONE: u32 = 0;
const MEMO_TEXT: u32 = 1;
const OP_PAYMENT: u32 = 1;
const OP_CHANGE_TRUST: u32 = 6;
const ASSET_NATIVE: u32 = 0;
const ASSET_ALPHANUM4: u32 = 1;
const ASSET_ALPHANUM12: u32 = 2;

/// An asset on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Native,
    Credit { code: String, issuer: [u8; 32] },
}

impl Asset {
    /// A non-native asset; `code` must be 1-12 alphanumerics.
    pub fn credit(code: &str, issuer: [u8; 32]) -> StellarResult<Self> {
        if !validate_asset_code(code) {
            return Err(StellarError::InvalidAsset(code.to_string()));
        }
        Ok(Asset::Credit {
            code: code.to_string(),
            issuer,
        })
    }

    /// Asset code as shown to users; the native asset is "XLM".
    pub fn code(&self) -> &str {
        match self {
            Asset::Native => "XLM",
            Asset::Credit { code, .. } => code,
        }
    }

    fn write_xdr(&self, w: &mut XdrWriter) {
        match self {
            Asset::Native => {
                w.u32(ASSET_NATIVE);
            }
            Asset::Credit { code, issuer } => {
                if code.len() <= 4 {
                    let mut padded = [0u8; 4];
                    padded[..code.len()].copy_from_slice(code.as_bytes());
                    w.u32(ASSET_ALPHANUM4).fixed_opaque(&padded);
                } else {
                    let mut padded = [0u8; 12];
                    padded[..code.len()].copy_from_slice(code.as_bytes());
                    w.u32(ASSET_ALPHANUM12).fixed_opaque(&padded);
                }
                w.u32(KEY_TYPE_ED25519).fixed_opaque(issuer);
            }
        }
    }
}

/// Transaction memo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Memo {
    #[default]
    None,
    Text(String),
}

impl Memo {
    pub fn text(text: &str) -> StellarResult<Self> {
        if text.len() > MAX_MEMO_TEXT_BYTES {
            return Err(StellarError::MemoTooLong(text.len()));
        }
        Ok(Memo::Text(text.to_string()))
    }

    fn write_xdr(&self, w: &mut XdrWriter) {
        match self {
            Memo::None => {
                w.u32(MEMO_NONE);
            }
            Memo::Text(text) => {
                w.u32(MEMO_TEXT).var_opaque(text.as_bytes());
            }
        }
    }
}

/// Supported operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Payment {
        destination: [u8; 32],
        asset: Asset,
        /// Amount in stroops.
        amount: i64,
    },
    ChangeTrust {
        asset: Asset,
        /// Limit in stroops; `i64::MAX` for unlimited.
        limit: i64,
    },
}

impl Operation {
    fn write_xdr(&self, w: &mut XdrWriter) {
        // No per-operation source account.
        w.u32(0);
        match self {
            Operation::Payment {
                destination,
                asset,
                amount,
            } => {
                w.u32(OP_PAYMENT);
                w.u32(KEY_TYPE_ED25519).fixed_opaque(destination);
                asset.write_xdr(w);
                w.i64(*amount);
            }
            Operation::ChangeTrust { asset, limit } => {
                w.u32(OP_CHANGE_TRUST);
                asset.write_xdr(w);
                w.i64(*limit);
            }
        }
    }
}

/// Validity window in unix seconds; `max_time == 0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source: [u8; 32],
    /// Total fee in stroops.
    pub fee: u32,
    pub sequence: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// XDR of the `Transaction` struct.
    pub fn to_xdr(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w);
        w.into_bytes()
    }

    fn write_xdr(&self, w: &mut XdrWriter) {
        w.u32(KEY_TYPE_ED25519).fixed_opaque(&self.source);
        w.u32(self.fee);
        w.i64(self.sequence);
        match self.time_bounds {
            Some(bounds) => {
                w.u32(PRECOND_TIME).u64(bounds.min_time).u64(bounds.max_time);
            }
            None => {
                w.u32(PRECOND_NONE);
            }
        }
        self.memo.write_xdr(w);
        w.u32(self.operations.len() as u32);
        for op in &self.operations {
            op.write_xdr(w);
        }
        // Extension point: v0.
        w.u32(0);
    }

    /// The bytes that get hashed for signing on `network`.
    pub fn signature_base(&self, network: Network) -> Vec<u8> {
        let mut w = XdrWriter::new();
        w.bytes(&network.network_id());
        w.u32(ENVELOPE_TYPE_TX);
        self.write_xdr(&mut w);
        w.into_bytes()
    }

    /// Transaction hash on `network`.
    pub fn hash(&self, network: Network) -> [u8; 32] {
        Sha256::digest(self.signature_base(network)).into()
    }

    /// Sign with `keypair` for `network`.
    pub fn sign(self, keypair: &Keypair, network: Network) -> SignedTransaction {
        let hash = self.hash(network);
        let signature = DecoratedSignature {
            hint: keypair.signature_hint(),
            signature: keypair.sign(&hash),
        };
        SignedTransaction {
            transaction: self,
            hash,
            signatures: vec![signature],
        }
    }
}

/// A signature plus the hint identifying its signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: [u8; 64],
}

/// A transaction ready for submission.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub hash: [u8; 32],
    pub signatures: Vec<DecoratedSignature>,
}

impl SignedTransaction {
    /// Lowercase hex hash, as Horizon reports it.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// XDR of the `TransactionEnvelope`.
    pub fn to_envelope_xdr(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        w.u32(ENVELOPE_TYPE_TX);
        self.transaction.write_xdr(&mut w);
        w.u32(self.signatures.len() as u32);
        for sig in &self.signatures {
            w.fixed_opaque(&sig.hint).var_opaque(&sig.signature);
        }
        w.into_bytes()
    }

    /// Base64 envelope for `POST /transactions`.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_envelope_xdr())
    }
}

/// Builder for single-source transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: [u8; 32],
    sequence: i64,
    base_fee: u32,
    time_bounds: Option<TimeBounds>,
    memo: Memo,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    /// `sequence` is the sequence number the transaction will carry
    /// (account sequence + 1).
    pub fn new(source: [u8; 32], sequence: i64) -> Self {
        Self {
            source,
            sequence,
            base_fee: MIN_BASE_FEE,
            time_bounds: None,
            memo: Memo::None,
            operations: Vec::new(),
        }
    }

    /// Fee per operation in stroops.
    pub fn base_fee(mut self, fee: u32) -> Self {
        self.base_fee = fee.max(MIN_BASE_FEE);
        self
    }

    /// Valid from now until `now + secs`, saturating at `u64::MAX`.
    pub fn timeout(mut self, now: u64, secs: u64) -> Self {
        self.time_bounds = Some(TimeBounds {
            min_time: 0,
            max_time: now.saturating_add(secs),
        });
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    pub fn build(self) -> StellarResult<Transaction> {
        if self.operations.is_empty() {
            return Err(StellarError::NoOperations);
        }
        let fee = self
            .base_fee
            .saturating_mul(self.operations.len() as u32);
        Ok(Transaction {
            source: self.source,
            fee,
            sequence: self.sequence,
            time_bounds: self.time_bounds,
            memo: self.memo,
            operations: self.operations,
        })
    }
}
