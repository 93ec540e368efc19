//! The payment gateway seam and the checks every gateway shares.

use async_trait::async_trait;

use crate::config::GatewayKind;
use crate::payments::types::{
    AccountBalances, FundResult, GatewayResult, PaymentError, PaymentRequest, PaymentResult,
    TrustlineRequest, TrustlineResult, WalletKeys,
};
use crate::stellar::transaction::MAX_MEMO_TEXT_BYTES;
use crate::stellar::{parse_amount, validate_asset_code, validate_public_key, validate_secret_key};

/// Wallet operations against the Stellar network.
///
/// Implementations receive input that already passed [`validate_secret`],
/// [`validate_payment`], or [`validate_trustline`].
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn kind(&self) -> GatewayKind;

    async fn create_wallet(&self) -> GatewayResult<WalletKeys>;

    async fn balances(&self, secret_key: &str) -> GatewayResult<AccountBalances>;

    async fn send_payment(
        &self,
        secret_key: &str,
        request: &PaymentRequest,
    ) -> GatewayResult<PaymentResult>;

    async fn fund_testnet(&self, secret_key: &str) -> GatewayResult<FundResult>;

    async fn create_trustline(
        &self,
        secret_key: &str,
        request: &TrustlineRequest,
    ) -> GatewayResult<TrustlineResult>;
}

pub fn validate_secret(secret_key: &str) -> GatewayResult<()> {
    if !validate_secret_key(secret_key) {
        return Err(PaymentError::InvalidInput(
            "secret key must be 56 characters starting with 'S'".to_string(),
        ));
    }
    Ok(())
}

fn validate_account(field: &str, key: &str) -> GatewayResult<()> {
    if !validate_public_key(key) {
        return Err(PaymentError::InvalidInput(format!(
            "{} must be 56 characters starting with 'G'",
            field
        )));
    }
    Ok(())
}

fn validate_positive_amount(field: &str, amount: &str) -> GatewayResult<i64> {
    let stroops = parse_amount(amount)
        .map_err(|_| PaymentError::InvalidInput(format!("{} '{}' is not a valid amount", field, amount)))?;
    if stroops <= 0 {
        return Err(PaymentError::InvalidInput(format!("{} must be positive", field)));
    }
    Ok(stroops)
}

fn validate_code(code: &str) -> GatewayResult<()> {
    if !validate_asset_code(code) {
        return Err(PaymentError::InvalidInput(format!(
            "asset code '{}' must be 1-12 alphanumeric characters",
            code
        )));
    }
    Ok(())
}

/// Check a payment before dispatch.
pub fn validate_payment(secret_key: &str, request: &PaymentRequest) -> GatewayResult<()> {
    validate_secret(secret_key)?;
    validate_account("destination", &request.destination)?;
    validate_positive_amount("amount", &request.amount)?;

    if let Some(memo) = request.memo.as_deref() {
        if memo.len() > MAX_MEMO_TEXT_BYTES {
            return Err(PaymentError::InvalidInput(format!(
                "memo is {} bytes, at most {} allowed",
                memo.len(),
                MAX_MEMO_TEXT_BYTES
            )));
        }
    }

    if !request.is_native() {
        if let Some(code) = request.asset_code.as_deref() {
            validate_code(code)?;
        }
        if let Some(issuer) = request.asset_issuer.as_deref() {
            validate_account("asset issuer", issuer)?;
        }
    }
    Ok(())
}

/// Check a trustline request before dispatch.
pub fn validate_trustline(secret_key: &str, request: &TrustlineRequest) -> GatewayResult<()> {
    validate_secret(secret_key)?;
    validate_code(&request.asset_code)?;
    validate_account("issuer", &request.issuer)?;
    if let Some(limit) = request.limit.as_deref() {
        validate_positive_amount("limit", limit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "SADQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQP54X";
    const DEST: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    fn invalid(result: GatewayResult<()>) -> String {
        match result {
            Err(PaymentError::InvalidInput(message)) => message,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_payment_passes() {
        assert!(validate_payment(SECRET, &PaymentRequest::native(DEST, "10")).is_ok());
        let asset = PaymentRequest::native(DEST, "0.0000001").asset("USDC", Some(DEST.to_string()));
        assert!(validate_payment(SECRET, &asset).is_ok());
    }

    #[test]
    fn test_payment_rejections() {
        assert!(invalid(validate_payment("SHORT", &PaymentRequest::native(DEST, "1"))).contains("secret"));
        assert!(invalid(validate_payment(SECRET, &PaymentRequest::native("GSHORT", "1"))).contains("destination"));
        assert!(invalid(validate_payment(SECRET, &PaymentRequest::native(DEST, "0"))).contains("positive"));
        assert!(invalid(validate_payment(SECRET, &PaymentRequest::native(DEST, "-1"))).contains("amount"));
        assert!(invalid(validate_payment(SECRET, &PaymentRequest::native(DEST, "1.00000001"))).contains("amount"));

        let bad_code = PaymentRequest::native(DEST, "1").asset("US-DC", None);
        assert!(invalid(validate_payment(SECRET, &bad_code)).contains("asset code"));

        let bad_issuer = PaymentRequest::native(DEST, "1").asset("USDC", Some("nope".to_string()));
        assert!(invalid(validate_payment(SECRET, &bad_issuer)).contains("issuer"));
    }

    #[test]
    fn test_memo_length_is_bytes_not_chars() {
        let fits = PaymentRequest::native(DEST, "1").memo("a".repeat(MAX_MEMO_TEXT_BYTES));
        assert!(validate_payment(SECRET, &fits).is_ok());

        let long = PaymentRequest::native(DEST, "1").memo("a".repeat(MAX_MEMO_TEXT_BYTES + 1));
        assert!(invalid(validate_payment(SECRET, &long)).contains("memo"));

        // 10 two-byte characters plus 9 ASCII: 19 chars, 29 bytes.
        let wide = PaymentRequest::native(DEST, "1").memo(format!("{}{}", "é".repeat(10), "x".repeat(9)));
        assert!(invalid(validate_payment(SECRET, &wide)).contains("29 bytes"));
    }

    #[test]
    fn test_trustline_validation() {
        let request = TrustlineRequest {
            asset_code: "USDC".to_string(),
            issuer: DEST.to_string(),
            limit: None,
        };
        assert!(validate_trustline(SECRET, &request).is_ok());

        let mut bad_limit = request.clone();
        bad_limit.limit = Some("abc".to_string());
        assert!(invalid(validate_trustline(SECRET, &bad_limit)).contains("limit"));

        let mut bad_issuer = request;
        bad_issuer.issuer = SECRET.to_string();
        assert!(invalid(validate_trustline(SECRET, &bad_issuer)).contains("issuer"));
    }
}
