//! `novapay` command-line client.
//!
//! # Architecture Overview
//!
//! ```text
//!     novapay <command>
//!           │
//!           ▼
//!     ┌──────────┐   ┌──────────────────────────────┐
//!     │  config  │──▶│ Session (FileStore, JSON)    │
//!     └──────────┘   └──────────────┬───────────────┘
//!                                   │ bearer token
//!           ┌───────────────────────┼───────────────────────┐
//!           ▼                       ▼                       ▼
//!     ┌───────────┐         ┌───────────────┐       ┌──────────────┐
//!     │ ApiClient │         │ PaymentClient │       │ Conversion   │
//!     │ (backend) │         │ sdk | horizon │       │ Engine       │
//!     └───────────┘         └───────────────┘       └──────────────┘
//! ```
//!
//! Results are printed as pretty JSON on stdout. Logs and errors go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use novapay_client::api::{AirtimeDepositRequest, ApiClient, ProfileUpdate, SendMoneyRequest};
use novapay_client::config::load_or_default;
use novapay_client::conversion::ConversionEngine;
use novapay_client::observability::logging::init_logging;
use novapay_client::payments::{PaymentClient, PaymentRequest, TrustlineRequest};
use novapay_client::session::{FileStore, Session};
use novapay_client::stellar::{strkey, validate_public_key, validate_secret_key};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Environment variable consulted when `--secret` is omitted.
const SECRET_ENV: &str = "NOVAPAY_SECRET_KEY";

#[derive(Parser)]
#[command(name = "novapay")]
#[command(about = "Client for the NovaPay remittance service", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the authenticated user
    Me,
    /// Show or update the profile
    Profile {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Send money to another user by email
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value = "KES")]
        target_currency: String,
    },
    /// List past transactions
    History,
    /// Ask the backend to fund the user's test account
    FundTestAccount,
    /// Show the wallet balance
    Balance {
        /// Per-asset balance of the Stellar account instead
        #[arg(long)]
        legacy: bool,
    },
    /// Deposit KES from M-Pesa
    Deposit {
        #[arg(long)]
        kes_amount: f64,
        #[arg(long)]
        mpesa_ref: String,
    },
    /// Withdraw XLM to M-Pesa
    Withdraw {
        #[arg(long)]
        xlm_amount: f64,
        #[arg(long)]
        mpesa_number: String,
    },
    /// Transfer XLM to another wallet
    Transfer {
        #[arg(long)]
        xlm_amount: f64,
        #[arg(long)]
        to_wallet_id: String,
    },
    /// Convert airtime into XLM
    AirtimeDeposit {
        #[arg(long)]
        phone_number: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "KES")]
        currency: String,
    },
    /// Estimate the XLM value of a fiat amount
    Estimate {
        amount: f64,
        #[arg(long, default_value = "KES")]
        currency: String,
        /// Use the fixed KES rate instead of asking the backend (KES only)
        #[arg(long)]
        fixed: bool,
    },
    /// Wallet operations through the configured payment gateway
    #[command(subcommand)]
    Wallet(WalletCommands),
    /// Check the format of a key
    Validate(ValidateArgs),
}

#[derive(Subcommand)]
enum WalletCommands {
    /// Create a new wallet
    Create,
    /// Show balances
    Balance(SecretArg),
    /// Send a payment
    Send {
        #[command(flatten)]
        secret: SecretArg,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        asset_code: Option<String>,
        #[arg(long)]
        asset_issuer: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    /// Fund the wallet from the testnet faucet
    Fund(SecretArg),
    /// Open a trustline
    Trustline {
        #[command(flatten)]
        secret: SecretArg,
        #[arg(long)]
        asset_code: String,
        #[arg(long)]
        issuer: String,
        #[arg(long)]
        limit: Option<String>,
    },
}

#[derive(Args)]
struct SecretArg {
    /// Secret key (S...); falls back to NOVAPAY_SECRET_KEY
    #[arg(long)]
    secret: Option<String>,
}

impl SecretArg {
    fn resolve(&self) -> CliResult<String> {
        match &self.secret {
            Some(secret) => Ok(secret.clone()),
            None => std::env::var(SECRET_ENV).map_err(|_| {
                Box::<dyn std::error::Error>::from(format!("pass --secret or set {}", SECRET_ENV))
            }),
        }
    }
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ValidateArgs {
    #[arg(long)]
    public: Option<String>,
    #[arg(long)]
    secret: Option<String>,
}

#[derive(Serialize)]
struct Validation {
    kind: &'static str,
    /// Length and prefix check.
    valid: bool,
    /// Full strkey decode including the checksum.
    checksum_valid: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::debug!(
        api = %config.api.base_url,
        backend = ?config.payments.backend,
        network = ?config.network.network,
        "Configuration loaded"
    );

    let session = Arc::new(Session::load(FileStore::new(&config.session.path))?);
    let api = ApiClient::new(&config.api, session.clone())?;

    match cli.command {
        Commands::Register {
            email,
            password,
            full_name,
        } => print_json(&api.register(&email, &password, &full_name).await?.user),
        Commands::Login { email, password } => print_json(&api.login(&email, &password).await?.user),
        Commands::Logout => {
            api.logout()?;
            print_json(&serde_json::json!({ "logged_out": true }))
        }
        Commands::Me => print_json(&api.current_user().await?),
        Commands::Profile { full_name, phone } => {
            let user = if full_name.is_none() && phone.is_none() {
                api.user_profile().await?
            } else {
                let update = ProfileUpdate {
                    full_name,
                    phone_number: phone,
                };
                api.update_user_profile(&update).await?
            };
            print_json(&user)
        }
        Commands::Send {
            to,
            amount,
            currency,
            target_currency,
        } => {
            let request = SendMoneyRequest::new(to, amount)
                .currency(currency)
                .target_currency(target_currency);
            print_json(&api.send_money(&request).await?)
        }
        Commands::History => print_json(&api.transaction_history().await?),
        Commands::FundTestAccount => print_json(&api.fund_test_account().await?),
        Commands::Balance { legacy } => {
            if legacy {
                print_json(&api.blockchain_balance().await?)
            } else {
                print_json(&api.wallet_balance().await?)
            }
        }
        Commands::Deposit {
            kes_amount,
            mpesa_ref,
        } => print_json(&api.deposit_from_mpesa(kes_amount, &mpesa_ref).await?),
        Commands::Withdraw {
            xlm_amount,
            mpesa_number,
        } => print_json(&api.withdraw_to_mpesa(xlm_amount, &mpesa_number).await?),
        Commands::Transfer {
            xlm_amount,
            to_wallet_id,
        } => print_json(&api.transfer_to_wallet(xlm_amount, &to_wallet_id).await?),
        Commands::AirtimeDeposit {
            phone_number,
            amount,
            currency,
        } => {
            let request = AirtimeDepositRequest {
                phone_number,
                airtime_amount: amount,
                currency,
            };
            print_json(&api.deposit_via_airtime(&request).await?)
        }
        Commands::Estimate {
            amount,
            currency,
            fixed,
        } => {
            let engine = ConversionEngine::new(api, config.conversion.clone());
            if fixed {
                let estimate = engine.fixed_estimate(amount, &currency).ok_or_else(|| {
                    format!("--fixed only covers KES, got '{}'; drop --fixed to use the live rate", currency)
                })?;
                print_json(&estimate)
            } else {
                print_json(&engine.estimate_xlm(amount, &currency).await?)
            }
        }
        Commands::Wallet(command) => {
            let payments = PaymentClient::from_config(&config, session)?;
            run_wallet(&payments, command).await
        }
        Commands::Validate(args) => print_json(&validate(&args)),
    }
}

async fn run_wallet(payments: &PaymentClient, command: WalletCommands) -> CliResult<()> {
    match command {
        WalletCommands::Create => print_json(&payments.create_wallet().await?),
        WalletCommands::Balance(secret) => print_json(&payments.balances(&secret.resolve()?).await?),
        WalletCommands::Send {
            secret,
            destination,
            amount,
            asset_code,
            asset_issuer,
            memo,
        } => {
            let request = PaymentRequest {
                destination,
                amount,
                asset_code,
                asset_issuer,
                memo,
            };
            print_json(&payments.send_payment(&secret.resolve()?, &request).await?)
        }
        WalletCommands::Fund(secret) => print_json(&payments.fund_testnet(&secret.resolve()?).await?),
        WalletCommands::Trustline {
            secret,
            asset_code,
            issuer,
            limit,
        } => {
            let request = TrustlineRequest {
                asset_code,
                issuer,
                limit,
            };
            print_json(&payments.create_trustline(&secret.resolve()?, &request).await?)
        }
    }
}

fn validate(args: &ValidateArgs) -> Validation {
    match (&args.public, &args.secret) {
        (Some(key), _) => Validation {
            kind: "public",
            valid: validate_public_key(key),
            checksum_valid: strkey::decode_public_key(key).is_ok(),
        },
        (None, Some(secret)) => Validation {
            kind: "secret",
            valid: validate_secret_key(secret),
            checksum_valid: strkey::decode_secret_seed(secret).is_ok(),
        },
        (None, None) => Validation {
            kind: "none",
            valid: false,
            checksum_valid: false,
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
