//! Transport, authentication, and caching core
//!
//! [`BrighteApi`] centralizes everything the resource clients share: service
//! endpoint registration, bearer-token resolution per audience (with an
//! in-memory table mirrored to the external cache store), per-process
//! response caching for GETs, and store-backed caching of decoded GraphQL
//! POST results.
//!
//! Token state and both response caches are instance fields. Token
//! resolution is wrapped in a per-audience mutex so concurrent callers for
//! the same audience share a single authentication round-trip; the response
//! caches are plain last-write-wins maps.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use brighte_common::{CacheStore, Clock, SystemClock};
use brighte_domain::{BrighteError, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::response::ApiResponse;
use crate::service::{ServiceEndpoint, ServiceRegistry, SERVICE_AUTH0, SERVICE_BRIGHTE};
use crate::token::{BearerToken, Credentials, LegacyTokenResponse, OAuthTokenResponse};

/// Path of the legacy API-key exchange on the primary service
const LEGACY_AUTHENTICATE_PATH: &str = "/identity/authenticate";

/// Token endpoint path on the identity provider
const OAUTH_TOKEN_PATH: &str = "/oauth/token";

/// Base component of every persisted-token cache key
const TOKEN_CACHE_KEY: &str = "service_jwt";

/// Fallback TTL for persisted tokens when the issuer omits `expires_in`
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(900);

/// Shared transport for all Brighte resource clients
pub struct BrighteApi {
    http: reqwest::Client,
    services: ServiceRegistry,
    credentials: Option<Credentials>,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    graphql_cache_ttl: Duration,
    /// One bearer token per audience cache key, for the process lifetime
    tokens: DashMap<String, BearerToken>,
    /// Per-audience guards so concurrent callers share one authentication
    auth_locks: DashMap<String, Arc<Mutex<()>>>,
    /// Raw responses of successful GETs, keyed by `path?query`
    raw_response_cache: RwLock<HashMap<String, ApiResponse>>,
    /// Decoded bodies of successful cached GraphQL POSTs
    decoded_graphql_cache: RwLock<HashMap<String, Value>>,
}

impl BrighteApi {
    /// Build a client with its own HTTP connection and the system clock
    pub fn new(config: ApiConfig, store: Arc<dyn CacheStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BrighteError::Config(format!("failed to build HTTP client: {e}")))?;

        Self::with_parts(http, config, store, Arc::new(SystemClock))
    }

    /// Build a client from injected collaborators (useful for testing)
    pub fn with_parts(
        http: reqwest::Client,
        config: ApiConfig,
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut services = ServiceRegistry::default();
        services.register(SERVICE_BRIGHTE, ServiceEndpoint::from_uri(&config.uri)?);
        if let Some(domain) = &config.auth0_domain {
            services.register(SERVICE_AUTH0, ServiceEndpoint::from_uri(&auth0_base(domain))?);
        }

        let credentials = Credentials::from_config(&config);

        Ok(Self {
            http,
            services,
            credentials,
            store,
            clock,
            graphql_cache_ttl: config.graphql_cache_ttl,
            tokens: DashMap::new(),
            auth_locks: DashMap::new(),
            raw_response_cache: RwLock::new(HashMap::new()),
            decoded_graphql_cache: RwLock::new(HashMap::new()),
        })
    }

    /// GET from the primary service, caching successful responses for the
    /// lifetime of the process.
    ///
    /// Repeated calls with the same `path` and `query` return the first
    /// 200 response without touching the network; non-200 responses are
    /// never cached, so each call after a failure re-issues the request.
    pub async fn get(
        &self,
        path: &str,
        query: &str,
        headers: &[(&str, &str)],
        audience: Option<&str>,
    ) -> Result<ApiResponse> {
        let fingerprint = format!("{path}?{query}");
        if let Some(hit) = self.raw_response_cache.read().get(&fingerprint) {
            return Ok(hit.clone());
        }

        let response = self
            .do_request(SERVICE_BRIGHTE, Method::GET, path, query, None, headers, audience)
            .await?;
        if response.is_ok() {
            self.raw_response_cache.write().insert(fingerprint, response.clone());
        }

        Ok(response)
    }

    /// POST to the primary service. Always dispatches fresh.
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        query: &str,
        headers: &[(&str, &str)],
        audience: Option<&str>,
    ) -> Result<ApiResponse> {
        self.do_request(SERVICE_BRIGHTE, Method::POST, path, query, Some(body), headers, audience)
            .await
    }

    /// POST a GraphQL document, caching the decoded body of error-free
    /// responses.
    ///
    /// The cache key is derived from `function_name` and `parameters`.
    /// Resolution order: local decoded cache, then the external store, then
    /// a fresh dispatch. A non-200 status or a top-level `errors` field is
    /// logged as a warning and yields `None`; callers must treat `None` as
    /// "no data, already logged", not as legitimately empty.
    #[allow(clippy::too_many_arguments)]
    pub async fn cached_post(
        &self,
        function_name: &str,
        parameters: &[String],
        path: &str,
        body: &Value,
        query: &str,
        headers: &[(&str, &str)],
        audience: Option<&str>,
        debug: bool,
    ) -> Result<Option<Value>> {
        let key = sanitize_cache_key(&format!("{function_name}_{}", parameters.join("_")));

        if let Some(hit) = self.decoded_graphql_cache.read().get(&key) {
            return Ok(Some(hit.clone()));
        }
        if self.store.has(&key).await {
            if let Some(value) = self.store.get(&key).await {
                return Ok(Some(value));
            }
        }

        let response = self
            .do_request(SERVICE_BRIGHTE, Method::POST, path, query, Some(body), headers, audience)
            .await?;
        if debug {
            debug!(body = %response.body, "BrighteApi->{} response", function_name);
        }

        let decoded = match response.json_value() {
            Some(value) if response.is_ok() && value.get("errors").is_none() => value,
            _ => {
                warn!(
                    "BrighteApi->{}: {}: {}",
                    function_name,
                    response.status.as_u16(),
                    response.graphql_error_message()
                );
                return Ok(None);
            }
        };

        self.decoded_graphql_cache.write().insert(key.clone(), decoded.clone());
        self.store.set(&key, decoded.clone(), self.graphql_cache_ttl).await;

        Ok(Some(decoded))
    }

    /// Resolve a bearer token for the audience, authenticating if needed.
    ///
    /// A valid in-memory token is returned without any store or network
    /// access. An expired in-memory token is purged from the external store
    /// before re-authentication. When no in-memory token exists, a non-empty
    /// store entry is adopted verbatim; otherwise the configured credential
    /// flow runs and the fresh token is remembered in both layers.
    pub async fn get_token(&self, audience: Option<&str>) -> Result<String> {
        let key = token_cache_key(audience);

        if let Some(token) = self.usable_token(&key) {
            return Ok(token);
        }

        let lock = self.auth_lock(&key);
        let _guard = lock.lock().await;

        // Another caller may have resolved the token while we waited.
        if let Some(token) = self.usable_token(&key) {
            return Ok(token);
        }

        if self.tokens.contains_key(&key) {
            // Known-stale token: drop the persisted copy so nothing adopts it.
            self.store.delete(&key).await;
            self.tokens.remove(&key);
        } else if let Some(value) = self.store.get(&key).await {
            if let Some(raw) = value.as_str().filter(|raw| !raw.is_empty()) {
                self.tokens.insert(key.clone(), BearerToken::parse(raw));
                return Ok(raw.to_string());
            }
        }

        let (raw, expires_in) = self.authenticate(audience).await?;
        self.tokens.insert(key.clone(), BearerToken::parse(&raw));
        let ttl = expires_in.map(Duration::from_secs).unwrap_or(DEFAULT_TOKEN_TTL);
        self.store.set(&key, Value::String(raw.clone()), ttl).await;

        Ok(raw)
    }

    /// Derive a full audience URL from a relative path.
    ///
    /// `None` stays `None`, meaning the request is sent unauthenticated.
    /// An absolute URL is passed through untouched.
    pub fn build_audience(&self, path: Option<&str>) -> Result<Option<String>> {
        let Some(path) = path else { return Ok(None) };
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Some(path.to_string()));
        }

        let endpoint = self.services.get(SERVICE_BRIGHTE)?;
        Ok(Some(endpoint.url(path, "")?.to_string()))
    }

    fn usable_token(&self, key: &str) -> Option<String> {
        let entry = self.tokens.get(key)?;
        entry.is_usable(self.clock.as_ref()).then(|| entry.raw().to_string())
    }

    fn auth_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.auth_locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn authenticate(&self, audience: Option<&str>) -> Result<(String, Option<u64>)> {
        let credentials = self
            .credentials
            .clone()
            .ok_or_else(|| BrighteError::Config("no credentials configured".to_string()))?;

        match credentials {
            Credentials::ClientCredentials { client_id, client_secret } => {
                let body = serde_json::json!({
                    "client_id": client_id,
                    "client_secret": client_secret,
                    "grant_type": "client_credentials",
                    "audience": audience,
                });
                let response = self
                    .do_request(
                        SERVICE_AUTH0,
                        Method::POST,
                        OAUTH_TOKEN_PATH,
                        "",
                        Some(&body),
                        &[],
                        None,
                    )
                    .await?;
                if !response.is_ok() {
                    return Err(BrighteError::Auth(response.error_message()));
                }

                let token: OAuthTokenResponse = response.json()?;
                Ok((token.access_token, token.expires_in))
            }
            Credentials::ApiKey(key) => {
                let body = serde_json::json!({ "apiKey": key });
                let response = self
                    .do_request(
                        SERVICE_BRIGHTE,
                        Method::POST,
                        LEGACY_AUTHENTICATE_PATH,
                        "",
                        Some(&body),
                        &[],
                        None,
                    )
                    .await?;
                if !response.is_ok() {
                    return Err(BrighteError::Auth(response.error_message()));
                }

                let token: LegacyTokenResponse = response.json()?;
                Ok((token.access_token, None))
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn do_request(
        &self,
        service: &str,
        method: Method,
        path: &str,
        query: &str,
        body: Option<&Value>,
        extra_headers: &[(&str, &str)],
        audience: Option<&str>,
    ) -> Result<ApiResponse> {
        if path == LEGACY_AUTHENTICATE_PATH {
            // The legacy exchange carries the API key; log the path only.
            debug!(path, "BrighteApi->do_request");
        } else {
            debug!(%method, path, query, audience = ?audience, "BrighteApi->do_request");
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| BrighteError::Internal(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| BrighteError::Internal(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        if let Some(audience) = self.build_audience(audience)? {
            let token = Box::pin(self.get_token(Some(&audience))).await?;
            let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| BrighteError::Internal(format!("invalid bearer token: {e}")))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        let endpoint = self.services.get(service)?;
        let url = endpoint.url(path, query)?;

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| BrighteError::Network(format!("request failed: {e}")))?;
        ApiResponse::from_reqwest(response).await
    }
}

fn auth0_base(domain: &str) -> String {
    // Accept a full URL so non-TLS endpoints can stand in for the provider.
    if domain.contains("://") {
        domain.trim_end_matches('/').to_string()
    } else {
        format!("https://{domain}")
    }
}

/// Strip characters the cache store reserves (`{}()/\@:`); an embedded
/// audience URL loses its `https://` and keeps path structure via `_`.
fn sanitize_cache_key(raw: &str) -> String {
    raw.replace("https://", "")
        .chars()
        .map(|c| if c == '/' { '_' } else { c })
        .filter(|c| !matches!(c, '{' | '}' | '(' | ')' | '\\' | '@' | ':'))
        .collect()
}

fn token_cache_key(audience: Option<&str>) -> String {
    match audience {
        None => TOKEN_CACHE_KEY.to_string(),
        Some(audience) => format!("{TOKEN_CACHE_KEY}_{}", sanitize_cache_key(audience)),
    }
}
