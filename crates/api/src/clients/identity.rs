//! Identity service client

use std::sync::Arc;

use brighte_domain::{Result, User};
use serde_json::{json, Value};

use super::warn_response;
use crate::transport::BrighteApi;

pub struct IdentityApi {
    api: Arc<BrighteApi>,
}

impl IdentityApi {
    pub const PATH: &'static str = "/identity";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// Fetch a user by ID. Returns `None` on any handled failure.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let path = format!("{}/users/{user_id}", Self::PATH);
        let response = self.api.get(&path, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("IdentityApi", "get_user", &response);
            return Ok(None);
        }

        response.json().map(Some)
    }

    /// Create a user, returning it with the assigned ID filled in.
    pub async fn create_user(&self, user: &User) -> Result<Option<User>> {
        let body = json!({
            "email": user.email,
            "mobile": user.phone,
            "role": user.role,
            "firstName": user.first_name.clone().unwrap_or_default(),
            "lastName": user.last_name.clone().unwrap_or_default(),
        });

        let path = format!("{}/users", Self::PATH);
        let response = self.api.post(&path, &body, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("IdentityApi", "create_user", &response);
            return Ok(None);
        }

        let result: Value = response.json()?;
        let mut created = user.clone();
        created.id = result
            .get("id")
            .and_then(|id| id.as_i64().or_else(|| id.as_str().and_then(|s| s.parse().ok())));

        Ok(Some(created))
    }
}

#[cfg(test)]
mod tests {
    use brighte_common::MemoryCacheStore;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    fn test_client(server: &MockServer) -> IdentityApi {
        let config = ApiConfig::new(format!("{}/v1", server.uri()));
        let api = BrighteApi::new(config, Arc::new(MemoryCacheStore::new())).expect("client");
        IdentityApi::new(Arc::new(api))
    }

    #[tokio::test]
    async fn maps_user_fields_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/identity/users/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 6,
                "role": "VENDOR",
                "firstName": "Joe",
                "lastName": "Customer",
                "email": "joe@example.com",
                "phone": "0400000000",
                "sfContactId": "sf-1",
            })))
            .mount(&server)
            .await;

        let identity = test_client(&server);
        let user = identity.get_user(6).await.unwrap().expect("user");

        assert_eq!(user.id, Some(6));
        assert_eq!(user.role.as_deref(), Some("VENDOR"));
        assert_eq!(user.first_name.as_deref(), Some("Joe"));
        assert_eq!(user.sf_contact_id.as_deref(), Some("sf-1"));
        assert!(user.middle_name.is_none());
    }

    #[tokio::test]
    async fn get_user_returns_none_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/identity/users/6"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "no such user" })),
            )
            .mount(&server)
            .await;

        let identity = test_client(&server);
        assert!(identity.get_user(6).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_user_posts_expected_body_and_fills_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/identity/users"))
            .and(body_partial_json(json!({
                "email": "joe@example.com",
                "mobile": "0400000000",
                "role": "CONSUMER",
                "firstName": "Joe",
                "lastName": "",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .expect(1)
            .mount(&server)
            .await;

        let identity = test_client(&server);
        let user = User {
            email: Some("joe@example.com".to_string()),
            phone: Some("0400000000".to_string()),
            role: Some("CONSUMER".to_string()),
            first_name: Some("Joe".to_string()),
            ..User::default()
        };

        let created = identity.create_user(&user).await.unwrap().expect("user");
        assert_eq!(created.id, Some(21));
        assert_eq!(created.email.as_deref(), Some("joe@example.com"));
    }
}
