//! Service endpoint registry and URI composition
//!
//! Each named backend the client can reach is registered once at
//! construction as a [`ServiceEndpoint`] (scheme, host, port, path-prefix)
//! and never mutated afterwards. Relative request paths are resolved against
//! the endpoint's prefix with RFC 3986 dot-segment normalization, so a
//! prefix like `/../v2/finance` composes correctly on a shared host.

use std::collections::HashMap;

use brighte_domain::{BrighteError, Result};
use url::Url;

/// Name of the primary platform service
pub const SERVICE_BRIGHTE: &str = "brighte";

/// Name of the identity-provider service
pub const SERVICE_AUTH0: &str = "auth0";

/// Scheme/host/port/prefix of one backend service
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    scheme: String,
    host: String,
    port: Option<u16>,
    prefix: String,
}

impl ServiceEndpoint {
    /// Decompose a base URI into an endpoint
    pub fn from_uri(uri: &str) -> Result<Self> {
        let url = Url::parse(uri)
            .map_err(|e| BrighteError::Config(format!("invalid service URI {uri}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| BrighteError::Config(format!("service URI {uri} has no host")))?
            .to_string();
        let prefix = match url.path() {
            "/" => String::new(),
            path => path.trim_end_matches('/').to_string(),
        };

        Ok(Self { scheme: url.scheme().to_string(), host, port: url.port(), prefix })
    }

    /// Build the full URL for a relative path and query string.
    ///
    /// The prefix and path are concatenated and dot-segments are removed the
    /// way a URL resolver would.
    pub fn url(&self, path: &str, query: &str) -> Result<Url> {
        let mut base = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            base.push(':');
            base.push_str(&port.to_string());
        }

        let full = format!("{base}{}{path}", self.prefix);
        let mut url = Url::parse(&full)
            .map_err(|e| BrighteError::Config(format!("invalid request URI {full}: {e}")))?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }

        Ok(url)
    }
}

/// Immutable name → endpoint table built at construction
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    endpoints: HashMap<String, ServiceEndpoint>,
}

impl ServiceRegistry {
    pub fn register(&mut self, name: impl Into<String>, endpoint: ServiceEndpoint) {
        self.endpoints.insert(name.into(), endpoint);
    }

    pub fn get(&self, name: &str) -> Result<&ServiceEndpoint> {
        self.endpoints
            .get(name)
            .ok_or_else(|| BrighteError::Config(format!("unknown service: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_base_uri() {
        let endpoint = ServiceEndpoint::from_uri("https://api.brighte.com.au/v1").unwrap();
        let url = endpoint.url("/widgets", "size=2").unwrap();

        assert_eq!(url.as_str(), "https://api.brighte.com.au/v1/widgets?size=2");
    }

    #[test]
    fn keeps_explicit_port() {
        let endpoint = ServiceEndpoint::from_uri("http://127.0.0.1:8080/v1").unwrap();
        let url = endpoint.url("/widgets", "").unwrap();

        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v1/widgets");
    }

    #[test]
    fn normalizes_dot_segments_when_composing() {
        // (base uri, request path) -> expected resolved URL
        let cases = [
            (
                "https://api.brighte.com.au/v1",
                "/../v2/finance/graphql",
                "https://api.brighte.com.au/v2/finance/graphql",
            ),
            (
                "https://api.brighte.com.au/v1",
                "/../v2/finance/lms/client/abc",
                "https://api.brighte.com.au/v2/finance/lms/client/abc",
            ),
            (
                "https://api.brighte.com.au/../v2/finance",
                "/graphql",
                "https://api.brighte.com.au/v2/finance/graphql",
            ),
            ("https://api.brighte.com.au/v1", "/./identity", "https://api.brighte.com.au/v1/identity"),
        ];

        for (base, path, expected) in cases {
            let endpoint = ServiceEndpoint::from_uri(base).unwrap();
            assert_eq!(endpoint.url(path, "").unwrap().as_str(), expected, "{base} + {path}");
        }
    }

    #[test]
    fn host_only_uri_has_empty_prefix() {
        let endpoint = ServiceEndpoint::from_uri("https://brighte.au.auth0.com").unwrap();
        let url = endpoint.url("/oauth/token", "").unwrap();

        assert_eq!(url.as_str(), "https://brighte.au.auth0.com/oauth/token");
    }

    #[test]
    fn rejects_uri_without_host() {
        assert!(ServiceEndpoint::from_uri("not a uri").is_err());
    }

    #[test]
    fn registry_lookup_fails_for_unknown_service() {
        let mut registry = ServiceRegistry::default();
        registry.register(
            SERVICE_BRIGHTE,
            ServiceEndpoint::from_uri("https://api.brighte.com.au/v1").unwrap(),
        );

        assert!(registry.get(SERVICE_BRIGHTE).is_ok());
        assert!(registry.get(SERVICE_AUTH0).is_err());
    }
}
