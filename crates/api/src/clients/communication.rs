//! Communication service client

use std::sync::Arc;

use brighte_domain::{Notification, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::warn_response;
use crate::transport::BrighteApi;

pub struct CommunicationApi {
    api: Arc<BrighteApi>,
}

impl CommunicationApi {
    pub const PATH: &'static str = "/communications";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// Send a notification, returning it with the assigned ID filled in.
    pub async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<Option<Notification>> {
        let body = json!({
            "to": notification.to,
            "templateKey": notification.template_key,
            "payload": notification.payload,
        });

        let path = format!("{}/notifications", Self::PATH);
        let response = self.api.post(&path, &body, "", &[], Some(Self::PATH)).await?;

        if response.status != StatusCode::CREATED {
            warn_response("CommunicationApi", "create_notification", &response);
            return Ok(None);
        }

        let result: Value = response.json()?;
        let mut created = notification.clone();
        created.id = result.get("id").and_then(Value::as_str).map(str::to_string);

        Ok(Some(created))
    }
}
