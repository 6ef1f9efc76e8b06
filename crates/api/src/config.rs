//! Configuration for the API client

use std::time::Duration;

use serde::Deserialize;

/// Default TTL for decoded GraphQL responses persisted to the external store
pub const DEFAULT_GRAPHQL_CACHE_TTL: Duration = Duration::from_secs(900);

/// Connection and credential configuration consumed at construction.
///
/// Exactly one of `key` or `client_id`+`client_secret` should be set;
/// client-credentials takes precedence when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Primary service base URL, e.g. `https://api.brighte.com.au/v1`
    pub uri: String,

    /// OAuth client ID for the client-credentials grant
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret for the client-credentials grant
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Legacy shared API key
    #[serde(default)]
    pub key: Option<String>,

    /// Identity-provider host, e.g. `brighte.au.auth0.com`
    #[serde(default)]
    pub auth0_domain: Option<String>,

    /// Accepted for parity with legacy configuration bundles; unused
    #[serde(default)]
    pub legacy_client_id: Option<String>,

    /// TTL for cached GraphQL POST results (default 15 minutes)
    #[serde(default = "default_graphql_cache_ttl", with = "ttl_seconds")]
    pub graphql_cache_ttl: Duration,
}

impl ApiConfig {
    /// Create a configuration with only the primary service URL set
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            client_id: None,
            client_secret: None,
            key: None,
            auth0_domain: None,
            legacy_client_id: None,
            graphql_cache_ttl: DEFAULT_GRAPHQL_CACHE_TTL,
        }
    }
}

fn default_graphql_cache_ttl() -> Duration {
    DEFAULT_GRAPHQL_CACHE_TTL
}

/// (De)serialize a `Duration` config field as whole seconds
mod ttl_seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(seconds))
    }
}
