//! Shallow key-format checks.
//!
//! These only look at length and prefix, the same test the dashboard used
//! for form hints. A same-shaped string with a bad checksum still passes;
//! use `strkey::decode_*` when the key bytes matter.

/// Length of an encoded Stellar key.
pub const KEY_LENGTH: usize = 56;

/// `true` iff `key` is 56 characters and starts with `G`.
pub fn validate_public_key(key: &str) -> bool {
    key.chars().count() == KEY_LENGTH && key.starts_with('G')
}

/// `true` iff `secret` is 56 characters and starts with `S`.
pub fn validate_secret_key(secret: &str) -> bool {
    secret.chars().count() == KEY_LENGTH && secret.starts_with('S')
}

/// `true` iff `code` is 1-12 ASCII alphanumerics.
pub fn validate_asset_code(code: &str) -> bool {
    (1..=12).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}
