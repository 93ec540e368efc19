//! Integration tests for the backend API client against a recording mock.

use std::sync::Arc;

use novapay_client::api::{
    AirtimeDepositRequest, ApiClient, ProfileUpdate, SendMoneyRequest, TransactionStatus, User,
};
use novapay_client::http::{ApiError, Operation, IDEMPOTENCY_KEY_HEADER};
use novapay_client::session::{MemoryStore, Session, SessionState};

mod common;

const USER_JSON: &str =
    r#"{"id":"u-1","email":"amina@example.com","full_name":"Amina W","phone_number":"+254700000001"}"#;

fn login_body() -> String {
    format!(r#"{{"token":"tok-abc","user":{}}}"#, USER_JSON)
}

fn transaction_json(amount: f64, currency: &str, target: &str) -> String {
    format!(
        r#"{{"id":"t-1","recipient_email":"bob@example.com","amount":{},"currency":"{}","target_currency":"{}","status":"pending","created_at":"2024-05-01T10:00:00Z"}}"#,
        amount, currency, target
    )
}

fn logged_in_store() -> MemoryStore {
    MemoryStore::with_state(SessionState {
        token: Some("tok-existing".to_string()),
        user: Some(User {
            id: "u-1".to_string(),
            email: "amina@example.com".to_string(),
            full_name: "Amina W".to_string(),
            ..User::default()
        }),
    })
}

fn client(backend: &common::MockBackend, store: MemoryStore) -> (ApiClient, Arc<Session>) {
    let session = Arc::new(Session::load(store).unwrap());
    let api = ApiClient::new(&backend.api_config(), session.clone()).unwrap();
    (api, session)
}

#[tokio::test]
async fn test_login_success_writes_session() {
    let backend = common::start_mock_backend(200, &login_body()).await;
    let store = MemoryStore::default();
    let (api, session) = client(&backend, store.clone());

    let response = api.login("amina@example.com", "hunter2").await.unwrap();
    assert_eq!(response.token, "tok-abc");
    assert_eq!(response.user.full_name, "Amina W");

    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-abc"));
    assert_eq!(store.state().unwrap().token.as_deref(), Some("tok-abc"));

    let request = backend.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/auth/login");
    assert_eq!(
        request.json(),
        serde_json::json!({"email": "amina@example.com", "password": "hunter2"})
    );
    assert!(request.header("authorization").is_none());
}

#[tokio::test]
async fn test_login_rejected_leaves_session_empty() {
    let backend = common::start_mock_backend(401, r#"{"error":"Invalid credentials"}"#).await;
    let store = MemoryStore::default();
    let (api, session) = client(&backend, store.clone());

    let err = api.login("amina@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed (HTTP 401)");
    assert_eq!(err.status(), Some(401));

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(store.state().is_none());
}

#[tokio::test]
async fn test_register_writes_session() {
    let backend = common::start_mock_backend(200, &login_body()).await;
    let (api, session) = client(&backend, MemoryStore::default());

    api.register("amina@example.com", "hunter2", "Amina W").await.unwrap();
    assert_eq!(session.user().unwrap().id, "u-1");
    assert_eq!(backend.last_request().path, "/auth/register");
    assert_eq!(backend.last_request().json()["full_name"], "Amina W");
}

#[tokio::test]
async fn test_unauthorized_call_does_not_touch_session() {
    let backend = common::start_mock_backend(401, r#"{"error":"expired"}"#).await;
    let store = logged_in_store();
    let (api, session) = client(&backend, store.clone());
    let before = session.snapshot();

    let err = api.user_profile().await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Rejected {
            operation: Operation::UserProfile,
            status: 401
        }
    ));
    assert_eq!(*session.snapshot(), *before);
    assert_eq!(store.state().unwrap().token.as_deref(), Some("tok-existing"));

    assert!(api.wallet_balance().await.is_err());
    assert!(api.transaction_history().await.is_err());
    assert_eq!(*session.snapshot(), *before);
}

#[tokio::test]
async fn test_send_money_body_and_bearer_token() {
    let backend = common::start_programmable_backend(|_| {
        (200, format!(r#"{{"transaction":{}}}"#, transaction_json(100.0, "USD", "KES")))
    })
    .await;
    let (api, _session) = client(&backend, logged_in_store());

    let request = SendMoneyRequest::new("bob@example.com", 100.0).target_currency("KES");
    let response = api.send_money(&request).await.unwrap();
    assert_eq!(response.transaction.status, TransactionStatus::Pending);

    let recorded = backend.last_request();
    assert_eq!(recorded.path, "/transactions/send");
    let body = recorded.json();
    assert_eq!(body["amount"], 100.0);
    assert_eq!(body["target_currency"], "KES");
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["recipient_email"], "bob@example.com");
    assert_eq!(recorded.header("authorization"), Some("Bearer tok-existing"));
    assert!(recorded.header(IDEMPOTENCY_KEY_HEADER).is_none());
}

#[tokio::test]
async fn test_send_money_without_token_has_no_authorization() {
    let backend = common::start_programmable_backend(|_| {
        (200, format!(r#"{{"transaction":{}}}"#, transaction_json(100.0, "USD", "KES")))
    })
    .await;
    let (api, _session) = client(&backend, MemoryStore::default());

    api.send_money(&SendMoneyRequest::new("bob@example.com", 100.0))
        .await
        .unwrap();
    assert!(backend.last_request().header("authorization").is_none());
}

#[tokio::test]
async fn test_idempotency_key_only_when_enabled() {
    let backend = common::start_programmable_backend(|request| match request.path.as_str() {
        "/wallet/deposit" => (
            200,
            r#"{"success":true,"message":"ok","kes_amount":500.0,"xlm_amount":4.1666667,"tx_hash":"abc"}"#
                .to_string(),
        ),
        _ => (200, r#"{"xlm_balance":1.0,"kes_equivalent":120.0,"wallet_id":"w-1"}"#.to_string()),
    })
    .await;

    let session = Arc::new(Session::load(logged_in_store()).unwrap());
    let mut settings = backend.api_config();
    settings.idempotency_keys = true;
    let api = ApiClient::new(&settings, session).unwrap();

    let receipt = api.deposit_from_mpesa(500.0, "QK12345").await.unwrap();
    assert!(receipt.success);
    let deposit = backend.last_request();
    let key = deposit.header(IDEMPOTENCY_KEY_HEADER).unwrap();
    assert!(uuid::Uuid::parse_str(key).is_ok());
    assert_eq!(deposit.json()["mpesa_ref"], "QK12345");

    api.wallet_balance().await.unwrap();
    assert!(backend.last_request().header(IDEMPOTENCY_KEY_HEADER).is_none());
}

#[tokio::test]
async fn test_profile_fetch_and_update_refresh_cached_user() {
    let backend = common::start_programmable_backend(|request| match request.method.as_str() {
        "PUT" => (
            200,
            r#"{"id":"u-1","email":"amina@example.com","full_name":"Amina Wanjiru","phone_number":"+254711111111"}"#
                .to_string(),
        ),
        _ => (200, USER_JSON.to_string()),
    })
    .await;
    let store = logged_in_store();
    let (api, session) = client(&backend, store.clone());

    let user = api.user_profile().await.unwrap();
    assert_eq!(user.phone_number.as_deref(), Some("+254700000001"));
    assert_eq!(session.user().unwrap().phone_number.as_deref(), Some("+254700000001"));

    let update = ProfileUpdate {
        full_name: Some("Amina Wanjiru".to_string()),
        phone_number: None,
    };
    api.update_user_profile(&update).await.unwrap();

    let put = backend.last_request();
    assert_eq!(put.path, "/user/profile");
    assert_eq!(put.json(), serde_json::json!({"full_name": "Amina Wanjiru"}));
    assert_eq!(session.user().unwrap().full_name, "Amina Wanjiru");
    assert_eq!(store.state().unwrap().user.unwrap().full_name, "Amina Wanjiru");
    assert_eq!(session.token().as_deref(), Some("tok-existing"));
}

#[tokio::test]
async fn test_logout_clears_session_and_store() {
    let backend = common::start_mock_backend(200, "{}").await;
    let store = logged_in_store();
    let (api, session) = client(&backend, store.clone());

    api.logout().unwrap();
    assert!(!session.is_authenticated());
    assert!(store.state().is_none());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_fund_test_account_posts_without_body() {
    let backend =
        common::start_mock_backend(200, r#"{"success":true,"message":"Account funded"}"#).await;
    let (api, _session) = client(&backend, logged_in_store());

    let ack = api.fund_test_account().await.unwrap();
    assert!(ack.success);
    let request = backend.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/stellar/fund-test-account");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_airtime_deposit_and_rate() {
    let backend = common::start_programmable_backend(|request| match request.path.as_str() {
        "/fonbnk/deposit" => (
            200,
            r#"{"success":true,"transaction_id":"fb-1","usd_amount":7.7,"xlm_amount":64.1,"new_balance":70.0,"message":"done"}"#
                .to_string(),
        ),
        _ => (200, r#"{"from_currency":"KES","to_currency":"USD","rate":0.0077}"#.to_string()),
    })
    .await;
    let (api, _session) = client(&backend, logged_in_store());

    let receipt = api
        .deposit_via_airtime(&AirtimeDepositRequest {
            phone_number: "+254700000001".to_string(),
            airtime_amount: 1000.0,
            currency: "KES".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(receipt.transaction_id, "fb-1");
    assert_eq!(backend.last_request().json()["airtime_amount"], 1000.0);

    let rate = api.conversion_rate("KES", "USD").await.unwrap();
    assert_eq!(rate.rate, 0.0077);
    assert_eq!(
        backend.last_request().json(),
        serde_json::json!({"from_currency": "KES", "to_currency": "USD"})
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let backend = common::start_mock_backend(200, "not json").await;
    let (api, _session) = client(&backend, logged_in_store());

    let err = api.wallet_balance().await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Decode {
            operation: Operation::WalletBalance,
            ..
        }
    ));
}

#[tokio::test]
async fn test_withdraw_and_transfer_bodies_and_keys() {
    let backend = common::start_programmable_backend(|request| match request.path.as_str() {
        "/wallet/withdraw" => (
            200,
            r#"{"success":true,"message":"sent","xlm_amount":2.5,"kes_amount":300.0,"tx_hash":"w-hash"}"#
                .to_string(),
        ),
        _ => (
            200,
            r#"{"success":true,"message":"moved","xlm_amount":1.25,"to_wallet_id":"w-9"}"#.to_string(),
        ),
    })
    .await;

    let session = Arc::new(Session::load(logged_in_store()).unwrap());
    let mut settings = backend.api_config();
    settings.idempotency_keys = true;
    let api = ApiClient::new(&settings, session).unwrap();

    let withdrawal = api.withdraw_to_mpesa(2.5, "+254700000001").await.unwrap();
    assert_eq!(withdrawal.kes_amount, 300.0);
    assert_eq!(withdrawal.tx_hash.as_deref(), Some("w-hash"));

    let withdraw = backend.last_request();
    assert_eq!(withdraw.method, "POST");
    assert_eq!(withdraw.path, "/wallet/withdraw");
    assert_eq!(
        withdraw.json(),
        serde_json::json!({"xlm_amount": 2.5, "mpesa_number": "+254700000001"})
    );
    assert_eq!(withdraw.header("authorization"), Some("Bearer tok-existing"));
    let withdraw_key = withdraw.header(IDEMPOTENCY_KEY_HEADER).unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&withdraw_key).is_ok());

    let transfer_receipt = api.transfer_to_wallet(1.25, "w-9").await.unwrap();
    assert_eq!(transfer_receipt.to_wallet_id, "w-9");
    assert!(transfer_receipt.tx_hash.is_none());

    let transfer = backend.last_request();
    assert_eq!(transfer.method, "POST");
    assert_eq!(transfer.path, "/wallet/transfer");
    assert_eq!(
        transfer.json(),
        serde_json::json!({"xlm_amount": 1.25, "to_wallet_id": "w-9"})
    );
    assert_eq!(transfer.header("authorization"), Some("Bearer tok-existing"));
    let transfer_key = transfer.header(IDEMPOTENCY_KEY_HEADER).unwrap();
    assert!(uuid::Uuid::parse_str(transfer_key).is_ok());
    assert_ne!(transfer_key, withdraw_key);
}

#[tokio::test]
async fn test_withdraw_without_keys_sends_no_header() {
    let backend = common::start_mock_backend(
        200,
        r#"{"success":true,"message":"sent","xlm_amount":1.0,"kes_amount":120.0}"#,
    )
    .await;
    let (api, _session) = client(&backend, logged_in_store());

    api.withdraw_to_mpesa(1.0, "+254700000001").await.unwrap();
    assert!(backend.last_request().header(IDEMPOTENCY_KEY_HEADER).is_none());
}

#[tokio::test]
async fn test_blockchain_balance_reads_asset_lines() {
    let backend = common::start_mock_backend(
        200,
        r#"{"public_key":"GDVEU3DD4KOFECV66VIHWEZOYX4ZKR3WV27L464SIIPOU2IUI3JCZA57","balances":[
            {"balance":"10.0000000","asset_type":"native"},
            {"balance":"3.5000000","asset_type":"credit_alphanum4","asset_code":"USDC"}
        ]}"#,
    )
    .await;
    let (api, _session) = client(&backend, logged_in_store());

    let balance = api.blockchain_balance().await.unwrap();
    assert_eq!(balance.balances.len(), 2);
    assert_eq!(balance.balances[0].asset_type, "native");
    assert!(balance.balances[0].asset_code.is_none());
    assert_eq!(balance.balances[1].asset_code.as_deref(), Some("USDC"));

    let request = backend.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/stellar/get-balance");
    assert_eq!(request.header("authorization"), Some("Bearer tok-existing"));
    assert!(request.header(IDEMPOTENCY_KEY_HEADER).is_none());
}

#[tokio::test]
async fn test_stalled_body_is_timeout() {
    let backend = common::start_stalling_backend(200).await;
    let session = Arc::new(Session::load(logged_in_store()).unwrap());
    let mut settings = backend.api_config();
    settings.request_timeout_secs = 1;
    let api = ApiClient::new(&settings, session).unwrap();

    let result = tokio::time::timeout(std::time::Duration::from_secs(5), api.wallet_balance())
        .await
        .expect("balance request hung past the client timeout");
    assert!(matches!(
        result,
        Err(ApiError::Timeout {
            operation: Operation::WalletBalance
        })
    ));
}
