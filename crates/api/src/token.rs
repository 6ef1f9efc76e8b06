//! Credentials and bearer-token state

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use brighte_common::Clock;
use serde::Deserialize;

use crate::config::ApiConfig;

/// Seconds of headroom before `exp` at which a token stops being used,
/// avoiding edge-of-expiry races.
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 3;

/// How the client authenticates against the platform
#[derive(Debug, Clone)]
pub enum Credentials {
    /// OAuth client-credentials grant against the identity provider
    ClientCredentials { client_id: String, client_secret: String },
    /// Legacy shared API key exchanged at the legacy authenticate endpoint
    ApiKey(String),
}

impl Credentials {
    /// Resolve credentials from the configuration bundle.
    ///
    /// Client-credentials takes precedence when both schemes are configured.
    pub fn from_config(config: &ApiConfig) -> Option<Self> {
        if let (Some(client_id), Some(client_secret)) =
            (config.client_id.clone(), config.client_secret.clone())
        {
            return Some(Self::ClientCredentials { client_id, client_secret });
        }
        config.key.clone().map(Self::ApiKey)
    }
}

/// An access token together with the expiry read from its payload.
///
/// Tokens are compact three-part signed strings; only the `exp` claim in the
/// payload is of interest here. A token whose payload cannot be decoded is
/// treated as expired so the next use forces re-authentication.
#[derive(Debug, Clone)]
pub struct BearerToken {
    raw: String,
    exp: Option<i64>,
}

impl BearerToken {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let exp = decode_exp(&raw);
        Self { raw, exp }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// A token is usable iff `now + buffer < exp`
    pub fn is_usable(&self, clock: &dyn Clock) -> bool {
        match self.exp {
            Some(exp) => clock.unix_seconds() + TOKEN_EXPIRY_BUFFER_SECS < exp,
            None => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

fn decode_exp(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    // Issuers vary between base64url and plain base64 payload encodings.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD.decode(payload))
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;
    serde_json::from_slice::<TokenClaims>(&bytes).ok()?.exp
}

/// Token endpoint response for the client-credentials grant (RFC 6749)
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Legacy authenticate endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTokenResponse {
    pub access_token: String,
}
