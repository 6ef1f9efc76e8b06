//! # Brighte API
//!
//! Typed async client for the Brighte platform services (identity, finance,
//! vendor, promotions, payments, communications).
//!
//! The heart of the crate is [`BrighteApi`]: it owns connection details for
//! the named backend services, resolves bearer tokens per audience (OAuth
//! client-credentials or the legacy API key), and applies two caching layers
//! (an in-process response cache plus an injectable external store for
//! tokens and GraphQL results). The per-domain resource clients are thin
//! consumers that build requests and map responses onto the
//! `brighte-domain` models.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use brighte_api::{ApiConfig, BrighteApi, IdentityApi};
//! use brighte_common::MemoryCacheStore;
//!
//! # async fn example() -> brighte_domain::Result<()> {
//! let mut config = ApiConfig::new("https://api.brighte.com.au/v1");
//! config.client_id = Some("my-client".to_string());
//! config.client_secret = Some("my-secret".to_string());
//! config.auth0_domain = Some("brighte.au.auth0.com".to_string());
//!
//! let api = Arc::new(BrighteApi::new(config, Arc::new(MemoryCacheStore::new()))?);
//! let identity = IdentityApi::new(api);
//! let user = identity.get_user(42).await?;
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod response;
pub mod service;
pub mod token;
pub mod transport;

// Re-export commonly used items
pub use clients::{
    CommunicationApi, FinanceApi, FinanceCoreApi, IdentityApi, PaymentApi, PromotionApi, VendorApi,
};
pub use config::ApiConfig;
pub use response::ApiResponse;
pub use transport::BrighteApi;
