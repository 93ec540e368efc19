//! Front door for wallet operations: validates input, then delegates to the
//! configured gateway.

use std::sync::Arc;

use crate::config::{ClientConfig, GatewayKind};
use crate::payments::gateway::{validate_payment, validate_secret, validate_trustline, PaymentGateway};
use crate::payments::horizon::HorizonGateway;
use crate::payments::sdk::SdkGateway;
use crate::payments::types::{
    AccountBalances, FundResult, GatewayResult, PaymentRequest, PaymentResult, TrustlineRequest,
    TrustlineResult, WalletKeys,
};
use crate::session::Session;

#[derive(Clone)]
pub struct PaymentClient {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentClient {
    /// Wrap an existing gateway.
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Build the gateway selected by `payments.backend`.
    pub fn from_config(config: &ClientConfig, session: Arc<Session>) -> GatewayResult<Self> {
        let gateway: Arc<dyn PaymentGateway> = match config.payments.backend {
            GatewayKind::Sdk => Arc::new(SdkGateway::new(&config.sdk, &config.api, session)?),
            GatewayKind::Horizon => Arc::new(HorizonGateway::new(&config.network)?),
        };
        tracing::debug!(backend = ?gateway.kind(), "Payment client initialized");
        Ok(Self { gateway })
    }

    pub fn kind(&self) -> GatewayKind {
        self.gateway.kind()
    }

    pub async fn create_wallet(&self) -> GatewayResult<WalletKeys> {
        self.gateway.create_wallet().await
    }

    pub async fn balances(&self, secret_key: &str) -> GatewayResult<AccountBalances> {
        validate_secret(secret_key)?;
        self.gateway.balances(secret_key).await
    }

    pub async fn send_payment(
        &self,
        secret_key: &str,
        request: &PaymentRequest,
    ) -> GatewayResult<PaymentResult> {
        validate_payment(secret_key, request)?;
        self.gateway.send_payment(secret_key, request).await
    }

    pub async fn fund_testnet(&self, secret_key: &str) -> GatewayResult<FundResult> {
        validate_secret(secret_key)?;
        self.gateway.fund_testnet(secret_key).await
    }

    pub async fn create_trustline(
        &self,
        secret_key: &str,
        request: &TrustlineRequest,
    ) -> GatewayResult<TrustlineResult> {
        validate_trustline(secret_key, request)?;
        self.gateway.create_trustline(secret_key, request).await
    }
}

impl std::fmt::Debug for PaymentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentClient")
            .field("backend", &self.gateway.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::types::PaymentError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway that counts calls and fails if reached.
    #[derive(Default)]
    struct CountingGateway {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PaymentGateway for CountingGateway {
        fn kind(&self) -> GatewayKind {
            GatewayKind::Sdk
        }

        async fn create_wallet(&self) -> GatewayResult<WalletKeys> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WalletKeys {
                public_key: "G".to_string(),
                secret_key: "S".to_string(),
                wallet_id: "w".to_string(),
            })
        }

        async fn balances(&self, _secret_key: &str) -> GatewayResult<AccountBalances> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PaymentError::InvalidInput("unreachable".to_string()))
        }

        async fn send_payment(&self, _: &str, _: &PaymentRequest) -> GatewayResult<PaymentResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PaymentError::InvalidInput("unreachable".to_string()))
        }

        async fn fund_testnet(&self, _: &str) -> GatewayResult<FundResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PaymentError::InvalidInput("unreachable".to_string()))
        }

        async fn create_trustline(&self, _: &str, _: &TrustlineRequest) -> GatewayResult<TrustlineResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PaymentError::InvalidInput("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_gateway() {
        let gateway = Arc::new(CountingGateway::default());
        let client = PaymentClient::new(gateway.clone());

        assert!(client.balances("not-a-secret").await.is_err());
        assert!(client.fund_testnet("").await.is_err());
        assert!(client
            .send_payment("bad", &PaymentRequest::native("GDEST", "1"))
            .await
            .is_err());
        let trustline = TrustlineRequest {
            asset_code: "TOO-LONG-CODE!".to_string(),
            issuer: "G".to_string(),
            limit: None,
        };
        assert!(client.create_trustline("bad", &trustline).await.is_err());

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_wallet_delegates() {
        let gateway = Arc::new(CountingGateway::default());
        let client = PaymentClient::new(gateway.clone());
        client.create_wallet().await.unwrap();
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_config_selects_backend() {
        let session = Arc::new(Session::in_memory());
        let mut config = ClientConfig::default();
        assert_eq!(
            PaymentClient::from_config(&config, session.clone()).unwrap().kind(),
            GatewayKind::Sdk
        );

        config.payments.backend = GatewayKind::Horizon;
        assert_eq!(
            PaymentClient::from_config(&config, session).unwrap().kind(),
            GatewayKind::Horizon
        );
    }
}
