//! Keypair management and signing.
//!
//! # Security
//! - Secret seeds are accepted only as arguments, never read from disk here
//! - Seeds are never logged; Debug shows the public key only

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use crate::stellar::strkey;
use crate::stellar::types::{StellarError, StellarResult};

/// An ed25519 keypair on the Stellar network.
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Generate a fresh random keypair.
    pub fn random() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build from a secret seed (`S...`), verifying its checksum.
    pub fn from_secret(secret: &str) -> StellarResult<Self> {
        let seed = strkey::decode_secret_seed(secret)
            .map_err(|e| StellarError::InvalidKey(format!("secret seed: {}", e)))?;
        Ok(Self {
            signing: SigningKey::from_bytes(&seed),
        })
    }

    /// The account id (`G...`).
    pub fn public_key(&self) -> String {
        strkey::encode_public_key(&self.public_key_bytes())
    }

    /// The secret seed (`S...`).
    pub fn secret_key(&self) -> String {
        strkey::encode_secret_seed(&self.signing.to_bytes())
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    /// Last four bytes of the public key, used to match signatures to signers.
    pub fn signature_hint(&self) -> [u8; 4] {
        let key = self.public_key_bytes();
        [key[28], key[29], key[30], key[31]]
    }

    /// Sign `message` (a transaction hash in practice).
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing.sign(message).to_bytes()
    }

    /// Check a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> bool {
        verify_signature(&self.public_key_bytes(), message, signature)
    }
}

/// Check `signature` over `message` for a raw ed25519 public key.
pub fn verify_signature(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let signature = ed25519_dalek::Signature::from_bytes(signature);
    key.verify(message, &signature).is_ok()
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
