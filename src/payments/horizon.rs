//! Gateway that signs locally and talks to Horizon directly.
//!
//! # Data Flow
//! ```text
//! secret seed → Keypair
//!     → HorizonClient::load_account (sequence)
//!     → HorizonClient::base_fee (or configured fallback)
//!     → TransactionBuilder (one operation, time bounds, memo)
//!     → sign for the configured network
//!     → HorizonClient::submit_transaction (base64 envelope)
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{GatewayKind, NetworkConfig};
use crate::payments::gateway::PaymentGateway;
use crate::payments::types::{
    AccountBalances, Balance, FundResult, GatewayResult, PaymentRequest, PaymentResult,
    TrustlineRequest, TrustlineResult, WalletKeys,
};
use crate::stellar::client::HorizonBalance;
use crate::stellar::{
    parse_amount, strkey, stroops_to_xlm, Asset, HorizonClient, Keypair, Memo, Network,
    Operation, StellarError, Transaction, TransactionBuilder,
};

#[derive(Debug, Clone)]
pub struct HorizonGateway {
    client: HorizonClient,
    network: Network,
    base_fee_fallback: u32,
    tx_timeout_secs: u64,
}

impl HorizonGateway {
    pub fn new(config: &NetworkConfig) -> GatewayResult<Self> {
        let client = HorizonClient::new(config)?;
        Ok(Self {
            client,
            network: config.network,
            base_fee_fallback: config.base_fee_fallback,
            tx_timeout_secs: config.tx_timeout_secs,
        })
    }

    async fn base_fee(&self) -> u32 {
        match self.client.base_fee().await {
            Ok(fee) => fee,
            Err(e) => {
                tracing::warn!(error = %e, fallback = self.base_fee_fallback, "Using fallback base fee");
                self.base_fee_fallback
            }
        }
    }

    /// Build, sign, and submit a one-operation transaction from `keypair`.
    async fn submit(&self, keypair: &Keypair, operation: Operation, memo: Memo) -> GatewayResult<String> {
        let account = self.client.load_account(&keypair.public_key()).await?;
        let sequence = account.sequence_number()? + 1;
        let fee = self.base_fee().await;

        let transaction: Transaction = TransactionBuilder::new(keypair.public_key_bytes(), sequence)
            .base_fee(fee)
            .timeout(unix_now(), self.tx_timeout_secs)
            .memo(memo)
            .operation(operation)
            .build()?;

        let signed = transaction.sign(keypair, self.network);
        tracing::debug!(
            tx_hash = %signed.hash_hex(),
            sequence,
            fee = signed.transaction.fee,
            "Submitting transaction"
        );

        let submitted = self.client.submit_transaction(&signed.to_base64()).await?;
        Ok(submitted.hash)
    }

    async fn friendbot(&self, public_key: &str) -> GatewayResult<bool> {
        if self.network != Network::Testnet {
            return Err(StellarError::Unsupported {
                network: self.network,
                what: "friendbot funding".to_string(),
            }
            .into());
        }
        Ok(self.client.fund_with_friendbot(public_key).await?)
    }
}

fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

fn to_balance(line: HorizonBalance) -> Balance {
    let asset_code = if line.asset_type == "native" {
        "XLM".to_string()
    } else {
        line.asset_code.unwrap_or(line.asset_type)
    };
    Balance {
        asset_code,
        balance: line.balance,
        asset_issuer: line.asset_issuer,
        limit: line.limit,
    }
}

/// Resolve the asset of a payment. Without an explicit issuer the destination
/// is taken as the issuer.
fn payment_asset(request: &PaymentRequest, destination: [u8; 32]) -> GatewayResult<Asset> {
    if request.is_native() {
        return Ok(Asset::Native);
    }
    let code = request.asset_code.as_deref().unwrap_or_default();
    let issuer = match request.asset_issuer.as_deref() {
        Some(issuer) => strkey::decode_public_key(issuer)?,
        None => destination,
    };
    Ok(Asset::credit(code, issuer)?)
}

#[async_trait]
impl PaymentGateway for HorizonGateway {
    fn kind(&self) -> GatewayKind {
        GatewayKind::Horizon
    }

    async fn create_wallet(&self) -> GatewayResult<WalletKeys> {
        let keypair = Keypair::random();
        let public_key = keypair.public_key();

        if self.network == Network::Testnet {
            match self.client.fund_with_friendbot(&public_key).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(public_key = %public_key, "New wallet left unfunded"),
                Err(e) => tracing::warn!(public_key = %public_key, error = %e, "New wallet left unfunded"),
            }
        }

        tracing::info!(public_key = %public_key, "Wallet created");
        Ok(WalletKeys {
            public_key,
            secret_key: keypair.secret_key(),
            wallet_id: Uuid::new_v4().to_string(),
        })
    }

    async fn balances(&self, secret_key: &str) -> GatewayResult<AccountBalances> {
        let keypair = Keypair::from_secret(secret_key)?;
        let account = self.client.load_account(&keypair.public_key()).await?;
        Ok(AccountBalances {
            public_key: account.account_id,
            balances: account.balances.into_iter().map(to_balance).collect(),
        })
    }

    async fn send_payment(
        &self,
        secret_key: &str,
        request: &PaymentRequest,
    ) -> GatewayResult<PaymentResult> {
        let keypair = Keypair::from_secret(secret_key)?;
        let destination = strkey::decode_public_key(&request.destination)?;
        let asset = payment_asset(request, destination)?;
        let amount = parse_amount(&request.amount)?;
        let memo = match request.memo.as_deref() {
            Some(text) => Memo::text(text)?,
            None => Memo::None,
        };

        let asset_code = asset.code().to_string();
        let hash = self
            .submit(
                &keypair,
                Operation::Payment {
                    destination,
                    asset,
                    amount,
                },
                memo,
            )
            .await?;

        tracing::info!(tx_hash = %hash, destination = %request.destination, asset = %asset_code, "Payment sent");
        Ok(PaymentResult {
            transaction_hash: hash,
            amount: stroops_to_xlm(amount),
            asset_code,
            destination: request.destination.clone(),
        })
    }

    async fn fund_testnet(&self, secret_key: &str) -> GatewayResult<FundResult> {
        let keypair = Keypair::from_secret(secret_key)?;
        let funded = self.friendbot(&keypair.public_key()).await?;
        let message = if funded {
            "Account funded with testnet XLM"
        } else {
            "Friendbot declined; the account may already be funded"
        };
        Ok(FundResult {
            success: funded,
            message: message.to_string(),
        })
    }

    async fn create_trustline(
        &self,
        secret_key: &str,
        request: &TrustlineRequest,
    ) -> GatewayResult<TrustlineResult> {
        let keypair = Keypair::from_secret(secret_key)?;
        let issuer = strkey::decode_public_key(&request.issuer)?;
        let asset = Asset::credit(&request.asset_code, issuer)?;
        let limit = match request.limit.as_deref() {
            Some(limit) => parse_amount(limit)?,
            None => i64::MAX,
        };

        let hash = self
            .submit(&keypair, Operation::ChangeTrust { asset, limit }, Memo::None)
            .await?;

        tracing::info!(tx_hash = %hash, asset = %request.asset_code, "Trustline created");
        Ok(TrustlineResult {
            transaction_hash: hash,
            asset_code: request.asset_code.clone(),
            issuer: request.issuer.clone(),
        })
    }
}
