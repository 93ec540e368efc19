//! NovaPay remittance client library

pub mod api;
pub mod config;
pub mod conversion;
pub mod http;
pub mod observability;
pub mod payments;
pub mod session;
pub mod stellar;

pub use api::ApiClient;
pub use config::schema::ClientConfig;
pub use conversion::ConversionEngine;
pub use payments::PaymentClient;
pub use session::Session;
