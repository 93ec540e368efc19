//! Gateway backed by the remote wallet SDK service.
//!
//! Every call is a JSON POST under `/sdk/wallet/` on the shared authenticated
//! transport; the secret seed travels in the body.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{ApiConfig, GatewayKind, SdkConfig};
use crate::http::{HttpClient, Operation};
use crate::payments::gateway::PaymentGateway;
use crate::payments::types::{
    AccountBalances, FundResult, GatewayResult, PaymentRequest, PaymentResult, TrustlineRequest,
    TrustlineResult, WalletKeys,
};
use crate::session::Session;

#[derive(Serialize)]
struct SecretBody<'a> {
    secret_key: &'a str,
}

#[derive(Serialize)]
struct SendBody<'a> {
    secret_key: &'a str,
    #[serde(flatten)]
    payment: &'a PaymentRequest,
}

#[derive(Serialize)]
struct TrustlineBody<'a> {
    secret_key: &'a str,
    #[serde(flatten)]
    trustline: &'a TrustlineRequest,
}

#[derive(Debug, Clone)]
pub struct SdkGateway {
    http: HttpClient,
}

impl SdkGateway {
    pub fn new(sdk: &SdkConfig, api: &ApiConfig, session: Arc<Session>) -> GatewayResult<Self> {
        let http = HttpClient::new(&sdk.base_url, api, session)?;
        tracing::debug!(base_url = %http.base_url(), "SDK gateway initialized");
        Ok(Self { http })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PaymentGateway for SdkGateway {
    fn kind(&self) -> GatewayKind {
        GatewayKind::Sdk
    }

    async fn create_wallet(&self) -> GatewayResult<WalletKeys> {
        let keys: WalletKeys = self
            .http
            .post(Operation::SdkCreateWallet, "/sdk/wallet/create")
            .await?;
        tracing::info!(public_key = %keys.public_key, wallet_id = %keys.wallet_id, "Wallet created");
        Ok(keys)
    }

    async fn balances(&self, secret_key: &str) -> GatewayResult<AccountBalances> {
        let body = SecretBody { secret_key };
        Ok(self
            .http
            .post_json(Operation::SdkBalance, "/sdk/wallet/balance", &body)
            .await?)
    }

    async fn send_payment(
        &self,
        secret_key: &str,
        request: &PaymentRequest,
    ) -> GatewayResult<PaymentResult> {
        let body = SendBody {
            secret_key,
            payment: request,
        };
        let result: PaymentResult = self
            .http
            .post_json(Operation::SdkSendPayment, "/sdk/wallet/send", &body)
            .await?;
        tracing::info!(
            tx_hash = %result.transaction_hash,
            destination = %result.destination,
            amount = %result.amount,
            "Payment sent"
        );
        Ok(result)
    }

    async fn fund_testnet(&self, secret_key: &str) -> GatewayResult<FundResult> {
        let body = SecretBody { secret_key };
        Ok(self
            .http
            .post_json(Operation::SdkFundTestnet, "/sdk/wallet/fund-testnet", &body)
            .await?)
    }

    async fn create_trustline(
        &self,
        secret_key: &str,
        request: &TrustlineRequest,
    ) -> GatewayResult<TrustlineResult> {
        let body = TrustlineBody {
            secret_key,
            trustline: request,
        };
        Ok(self
            .http
            .post_json(Operation::SdkTrustline, "/sdk/wallet/trustline", &body)
            .await?)
    }
}
