//! Payment service client

use std::sync::Arc;

use brighte_domain::{PaymentMethod, Result};

use super::warn_response;
use crate::transport::BrighteApi;

pub struct PaymentApi {
    api: Arc<BrighteApi>,
}

impl PaymentApi {
    pub const PATH: &'static str = "/payment";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// Fetch a stored payment method belonging to a user.
    pub async fn get_method(
        &self,
        method_id: &str,
        user_id: i64,
    ) -> Result<Option<PaymentMethod>> {
        let path = format!("{}-methods/{method_id}", Self::PATH);
        let query = format!("userId={user_id}");
        let response = self.api.get(&path, &query, &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("PaymentApi", "get_method", &response);
            return Ok(None);
        }

        response.json().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use brighte_common::MemoryCacheStore;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    fn test_client(server: &MockServer) -> PaymentApi {
        let config = ApiConfig::new(format!("{}/v1", server.uri()));
        let api = BrighteApi::new(config, Arc::new(MemoryCacheStore::new())).expect("client");
        PaymentApi::new(Arc::new(api))
    }

    #[tokio::test]
    async fn maps_payment_method_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/payment-methods/pm-1"))
            .and(query_param("userId", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pm-1",
                "userId": 6,
                "type": "card",
                "token": "tok_123",
                "cardHolder": "Joe Customer",
                "cardNumber": "XXXX-1111",
                "cardExpiry": "12/30",
                "cardType": "VISA",
                "source": "portal",
            })))
            .mount(&server)
            .await;

        let method = test_client(&server).get_method("pm-1", 6).await.unwrap().expect("method");

        assert_eq!(method.id.as_deref(), Some("pm-1"));
        assert_eq!(method.user_id, Some(6));
        assert_eq!(method.method_type.as_deref(), Some("card"));
        assert_eq!(method.card_type.as_deref(), Some("VISA"));
        assert!(method.account_bsb.is_none());
    }

    #[tokio::test]
    async fn failure_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/payment-methods/pm-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(test_client(&server).get_method("pm-1", 6).await.unwrap().is_none());
    }
}
