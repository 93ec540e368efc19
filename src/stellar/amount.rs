//! Amount conversions between display units and stroops.
//!
//! One XLM is 10^7 stroops; display strings always carry 7 decimals.

use crate::stellar::types::{StellarError, StellarResult};

pub const STROOPS_PER_XLM: i64 = 10_000_000;

/// Number of decimals in a display amount.
pub const DECIMALS: usize = 7;

/// Format with exactly 7 decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{:.7}", amount)
}

/// Convert a display amount to stroops, rounding to the nearest stroop.
/// Saturates at the `i64` bounds.
pub fn xlm_to_stroops(xlm: f64) -> i64 {
    (xlm * STROOPS_PER_XLM as f64).round() as i64
}

/// Render stroops as a 7-decimal display amount, exactly.
pub fn stroops_to_xlm(stroops: i64) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let magnitude = stroops.unsigned_abs();
    let unit = STROOPS_PER_XLM as u64;
    format!(
        "{}{}.{:0width$}",
        sign,
        magnitude / unit,
        magnitude % unit,
        width = DECIMALS
    )
}

/// Parse a decimal string (e.g. "12.5") into stroops without going through
/// floating point. Rejects negatives, more than 7 decimals, and overflow.
pub fn parse_amount(input: &str) -> StellarResult<i64> {
    let invalid = || StellarError::InvalidAmount(input.to_string());
    let trimmed = input.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > DECIMALS {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{:0<width$}", fraction, width = DECIMALS)
            .parse()
            .map_err(|_| invalid())?
    };

    whole
        .checked_mul(STROOPS_PER_XLM)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(invalid)
}
