//! Stellar strkey encoding.
//!
//! A strkey is RFC 4648 base32 (no padding) over
//! `version byte || 32-byte payload || CRC16-XMODEM (little endian)`,
//! which is always 56 characters.

use crate::stellar::types::{StellarError, StellarResult};

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Encoded length of a 32-byte key.
pub const ENCODED_LEN: usize = 56;

/// Version byte of account ids ("G...").
pub const VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// Version byte of secret seeds ("S...").
pub const VERSION_SEED: u8 = 18 << 3;

pub fn encode_public_key(key: &[u8; 32]) -> String {
    encode(VERSION_ACCOUNT_ID, key)
}

pub fn decode_public_key(encoded: &str) -> StellarResult<[u8; 32]> {
    decode(VERSION_ACCOUNT_ID, encoded)
}

pub fn encode_secret_seed(seed: &[u8; 32]) -> String {
    encode(VERSION_SEED, seed)
}

pub fn decode_secret_seed(encoded: &str) -> StellarResult<[u8; 32]> {
    decode(VERSION_SEED, encoded)
}

/// Encode a 32-byte payload under `version`.
pub fn encode(version: u8, payload: &[u8; 32]) -> String {
    let mut raw = Vec::with_capacity(35);
    raw.push(version);
    raw.extend_from_slice(payload);
    let checksum = crc16_xmodem(&raw);
    raw.extend_from_slice(&checksum.to_le_bytes());
    base32_encode(&raw)
}

/// Decode and verify a strkey of the given `version`.
pub fn decode(version: u8, encoded: &str) -> StellarResult<[u8; 32]> {
    if encoded.len() != ENCODED_LEN {
        return Err(StellarError::InvalidKey(format!(
            "expected {} characters, got {}",
            ENCODED_LEN,
            encoded.len()
        )));
    }

    let raw = base32_decode(encoded)
        .ok_or_else(|| StellarError::InvalidKey("not base32".to_string()))?;
    if raw.len() != 35 {
        return Err(StellarError::InvalidKey("wrong decoded length".to_string()));
    }

    if raw[0] != version {
        return Err(StellarError::InvalidKey(format!(
            "unexpected version byte {:#04x}",
            raw[0]
        )));
    }

    let expected = u16::from_le_bytes([raw[33], raw[34]]);
    if crc16_xmodem(&raw[..33]) != expected {
        return Err(StellarError::InvalidKey("checksum mismatch".to_string()));
    }

    let mut payload = [0u8; 32];
    payload.copy_from_slice(&raw[1..33]);
    Ok(payload)
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn base32_decode(input: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for c in input.bytes() {
        let value = ALPHABET.iter().position(|&a| a == c)? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    // Leftover bits must be zero padding.
    if buffer != 0 {
        return None;
    }
    Some(out)
}
