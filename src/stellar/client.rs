//! Horizon REST client with timeout and error handling.
//!
//! # Responsibilities
//! - Load account state (sequence, balances)
//! - Read the current base fee
//! - Submit signed transaction envelopes
//! - Fund testnet accounts through Friendbot
//! - Provide a health check for Horizon connectivity

use std::future::Future;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::time::timeout;

use crate::observability::metrics;
use crate::stellar::types::{StellarError, StellarResult};

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// One balance line as Horizon reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HorizonBalance {
    pub balance: String,
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Subset of `GET /accounts/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
    /// Current sequence number; Horizon sends it as a string.
    pub sequence: String,
    pub balances: Vec<HorizonBalance>,
}

impl AccountRecord {
    pub fn sequence_number(&self) -> StellarResult<i64> {
        self.sequence
            .parse()
            .map_err(|_| StellarError::Encoding(format!("sequence '{}'", self.sequence)))
    }
}

/// Subset of a successful `POST /transactions` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitResponse {
    pub hash: String,
    #[serde(default)]
    pub ledger: Option<u64>,
    #[serde(default)]
    pub successful: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct FeeStats {
    last_ledger_base_fee: String,
}

#[derive(Debug, Deserialize)]
struct HorizonProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    extras: Option<serde_json::Value>,
}

/// Horizon + Friendbot client.
#[derive(Clone)]
pub struct HorizonClient {
    http: reqwest::Client,
    horizon_url: String,
    friendbot_url: String,
    timeout_secs: u64,
}

impl HorizonClient {
    /// Create a new Horizon client.
    pub fn new(config: &NetworkConfig) -> StellarResult<Self> {
        for raw in [&config.horizon_url, &config.friendbot_url] {
            url::Url::parse(raw)
                .map_err(|e| StellarError::Transport(format!("Invalid URL '{}': {}", raw, e)))?;
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StellarError::Transport(e.to_string()))?;

        tracing::debug!(
            horizon_url = %config.horizon_url,
            network = ?config.network,
            "Horizon client initialized"
        );

        Ok(Self {
            http,
            horizon_url: config.horizon_url.trim_end_matches('/').to_string(),
            friendbot_url: config.friendbot_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Load an account. A 404 becomes `AccountNotFound`.
    pub async fn load_account(&self, account_id: &str) -> StellarResult<AccountRecord> {
        let url = format!("{}/accounts/{}", self.horizon_url, account_id);
        let reply = self
            .fetch("horizon_load_account", self.http.get(&url).send())
            .await?;

        if reply.status == reqwest::StatusCode::NOT_FOUND {
            return Err(StellarError::AccountNotFound(account_id.to_string()));
        }
        reply.decode()
    }

    /// Base fee of the last closed ledger, in stroops.
    pub async fn base_fee(&self) -> StellarResult<u32> {
        let url = format!("{}/fee_stats", self.horizon_url);
        let stats: FeeStats = self
            .fetch("horizon_fee_stats", self.http.get(&url).send())
            .await?
            .decode()?;
        stats
            .last_ledger_base_fee
            .parse()
            .map_err(|_| StellarError::Encoding(format!("base fee '{}'", stats.last_ledger_base_fee)))
    }

    /// Submit a base64 transaction envelope.
    pub async fn submit_transaction(&self, envelope_base64: &str) -> StellarResult<SubmitResponse> {
        let url = format!("{}/transactions", self.horizon_url);
        let request = self.http.post(&url).form(&[("tx", envelope_base64)]).send();
        let submitted: SubmitResponse = self.fetch("horizon_submit", request).await?.decode()?;

        tracing::info!(tx_hash = %submitted.hash, ledger = ?submitted.ledger, "Transaction submitted");
        Ok(submitted)
    }

    /// Ask Friendbot to fund `account_id`. `false` means Friendbot refused
    /// (typically: already funded).
    pub async fn fund_with_friendbot(&self, account_id: &str) -> StellarResult<bool> {
        let request = self
            .http
            .get(&self.friendbot_url)
            .query(&[("addr", account_id)])
            .send();
        let reply = self.fetch("friendbot_fund", request).await?;
        let funded = reply.status.is_success();

        if funded {
            tracing::info!(account_id, "Friendbot funded account");
        } else {
            tracing::warn!(account_id, status = reply.status.as_u16(), "Friendbot refused");
        }
        Ok(funded)
    }

    /// Check if Horizon is reachable and healthy.
    pub async fn is_healthy(&self) -> bool {
        match self
            .fetch("horizon_root", self.http.get(&self.horizon_url).send())
            .await
        {
            Ok(reply) => reply.status.is_success(),
            Err(_) => false,
        }
    }

    pub fn horizon_url(&self) -> &str {
        &self.horizon_url
    }

    /// Send a request and read its whole body under one deadline.
    async fn fetch<F>(&self, operation: &'static str, fut: F) -> StellarResult<Reply>
    where
        F: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let started = Instant::now();
        let exchange = async {
            let response = fut.await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(Reply { status, body })
        };

        match timeout(Duration::from_secs(self.timeout_secs), exchange).await {
            Ok(Ok(reply)) => {
                let outcome = if reply.status.is_success() { "ok" } else { "rejected" };
                metrics::record_request(operation, outcome, started.elapsed());
                Ok(reply)
            }
            Ok(Err(e)) if e.is_timeout() => {
                metrics::record_request(operation, "timeout", started.elapsed());
                tracing::warn!(operation, "Horizon request timed out");
                Err(StellarError::Timeout(self.timeout_secs))
            }
            Ok(Err(e)) => {
                metrics::record_request(operation, "transport", started.elapsed());
                tracing::warn!(operation, error = %e, "Horizon request failed");
                Err(StellarError::Transport(e.to_string()))
            }
            Err(_) => {
                metrics::record_request(operation, "timeout", started.elapsed());
                tracing::warn!(operation, "Horizon request timed out");
                Err(StellarError::Timeout(self.timeout_secs))
            }
        }
    }
}

/// Status and body of a completed Horizon exchange.
#[derive(Debug)]
struct Reply {
    status: reqwest::StatusCode,
    body: String,
}

impl Reply {
    fn decode<T: serde::de::DeserializeOwned>(self) -> StellarResult<T> {
        if !self.status.is_success() {
            return Err(StellarError::Horizon {
                status: self.status.as_u16(),
                detail: problem_detail(&self.body),
            });
        }

        serde_json::from_str(&self.body).map_err(|e| StellarError::Encoding(e.to_string()))
    }
}

/// Summarize a Horizon problem document, preferring result codes.
fn problem_detail(body: &str) -> String {
    let Ok(problem) = serde_json::from_str::<HorizonProblem>(body) else {
        return body.chars().take(200).collect();
    };

    if let Some(codes) = problem
        .extras
        .as_ref()
        .and_then(|extras| extras.get("result_codes"))
    {
        return codes.to_string();
    }

    problem
        .detail
        .or(problem.title)
        .unwrap_or_else(|| "unknown error".to_string())
}

impl std::fmt::Debug for HorizonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HorizonClient")
            .field("horizon_url", &self.horizon_url)
            .field("friendbot_url", &self.friendbot_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
