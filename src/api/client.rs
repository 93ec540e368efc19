//! Typed client for the NovaPay backend.
//!
//! # Responsibilities
//! - One method per backend endpoint
//! - Write the session after successful login/registration
//! - Refresh the cached profile after profile fetch/update
//!
//! Nothing is validated client-side; the backend is the source of truth.

use std::sync::Arc;

use crate::api::types::{
    Acknowledgement, AirtimeDepositReceipt, AirtimeDepositRequest, BlockchainBalance,
    ConversionRate, DepositReceipt, DepositRequest, LoginRequest, LoginResponse, ProfileUpdate,
    RateRequest, RegisterRequest, SendMoneyRequest, SendMoneyResponse, Transaction,
    TransferReceipt, TransferRequest, User, WalletBalance, WithdrawRequest, WithdrawalReceipt,
};
use crate::config::ApiConfig;
use crate::http::{ApiResult, HttpClient, Operation};
use crate::session::Session;

/// NovaPay backend client.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Create a client for the backend described by `config`.
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> ApiResult<Self> {
        let http = HttpClient::new(&config.base_url, config, session)?;
        tracing::debug!(base_url = %http.base_url(), "API client initialized");
        Ok(Self { http })
    }

    pub fn session(&self) -> &Arc<Session> {
        self.http.session()
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> ApiResult<LoginResponse> {
        let body = RegisterRequest {
            email,
            password,
            full_name,
        };
        let response: LoginResponse = self
            .http
            .post_json(Operation::Register, "/auth/register", &body)
            .await?;

        self.session()
            .establish(response.token.clone(), response.user.clone())?;
        tracing::info!(user_id = %response.user.id, "Registered and logged in");
        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest { email, password };
        let response: LoginResponse = self
            .http
            .post_json(Operation::Login, "/auth/login", &body)
            .await?;

        self.session()
            .establish(response.token.clone(), response.user.clone())?;
        tracing::info!(user_id = %response.user.id, "Logged in");
        Ok(response)
    }

    /// Local only: forget the token and cached profile.
    pub fn logout(&self) -> ApiResult<()> {
        self.session().clear()?;
        Ok(())
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.http.get(Operation::CurrentUser, "/auth/me").await
    }

    pub async fn user_profile(&self) -> ApiResult<User> {
        let user: User = self.http.get(Operation::UserProfile, "/user/profile").await?;
        self.session().update_user(user.clone())?;
        Ok(user)
    }

    pub async fn update_user_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        let user: User = self
            .http
            .put_json(Operation::UpdateUserProfile, "/user/profile", update)
            .await?;
        self.session().update_user(user.clone())?;
        Ok(user)
    }

    pub async fn send_money(&self, request: &SendMoneyRequest) -> ApiResult<SendMoneyResponse> {
        self.http
            .post_json(Operation::SendMoney, "/transactions/send", request)
            .await
    }

    pub async fn transaction_history(&self) -> ApiResult<Vec<Transaction>> {
        self.http
            .get(Operation::TransactionHistory, "/transactions/history")
            .await
    }

    pub async fn fund_test_account(&self) -> ApiResult<Acknowledgement> {
        self.http
            .post(Operation::FundTestAccount, "/stellar/fund-test-account")
            .await
    }

    /// Legacy per-asset balance of the user's Stellar account.
    pub async fn blockchain_balance(&self) -> ApiResult<BlockchainBalance> {
        self.http
            .get(Operation::BlockchainBalance, "/stellar/get-balance")
            .await
    }

    pub async fn wallet_balance(&self) -> ApiResult<WalletBalance> {
        self.http.get(Operation::WalletBalance, "/wallet/balance").await
    }

    pub async fn deposit_from_mpesa(
        &self,
        kes_amount: f64,
        mpesa_ref: &str,
    ) -> ApiResult<DepositReceipt> {
        let body = DepositRequest {
            kes_amount,
            mpesa_ref,
        };
        self.http
            .post_json(Operation::Deposit, "/wallet/deposit", &body)
            .await
    }

    pub async fn withdraw_to_mpesa(
        &self,
        xlm_amount: f64,
        mpesa_number: &str,
    ) -> ApiResult<WithdrawalReceipt> {
        let body = WithdrawRequest {
            xlm_amount,
            mpesa_number,
        };
        self.http
            .post_json(Operation::Withdraw, "/wallet/withdraw", &body)
            .await
    }

    pub async fn transfer_to_wallet(
        &self,
        xlm_amount: f64,
        to_wallet_id: &str,
    ) -> ApiResult<TransferReceipt> {
        let body = TransferRequest {
            xlm_amount,
            to_wallet_id,
        };
        self.http
            .post_json(Operation::Transfer, "/wallet/transfer", &body)
            .await
    }

    /// Convert mobile airtime into XLM credited to the wallet.
    pub async fn deposit_via_airtime(
        &self,
        request: &AirtimeDepositRequest,
    ) -> ApiResult<AirtimeDepositReceipt> {
        self.http
            .post_json(Operation::AirtimeDeposit, "/fonbnk/deposit", request)
            .await
    }

    pub async fn conversion_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> ApiResult<ConversionRate> {
        let body = RateRequest {
            from_currency,
            to_currency,
        };
        self.http
            .post_json(Operation::ConversionRate, "/fonbnk/rate", &body)
            .await
    }
}
