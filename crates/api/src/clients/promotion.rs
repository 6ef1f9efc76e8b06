//! Promotion service client
//!
//! Unlike the other resource clients, the promotion flows surface typed
//! errors: callers need to distinguish validation failures, "promotion not
//! applicable", and missing records.

use std::sync::Arc;

use brighte_domain::types::promotion::{Application, Promotion};
use brighte_domain::{BrighteError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::transport::BrighteApi;

/// Shape of a successful promotion application response
#[derive(Debug, Deserialize)]
struct AppliedPromotion {
    id: i64,
    #[serde(rename = "vendorId")]
    vendor_id: i64,
    product: String,
    code: Option<String>,
}

pub struct PromotionApi {
    api: Arc<BrighteApi>,
}

impl PromotionApi {
    pub const PATH: &'static str = "/promotions";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// Try to apply a promotion to an application.
    ///
    /// `Ok(None)` means the promotion is not applicable for the vendor and
    /// product type (the service answers 204). A 400 carries the service's
    /// validation errors; any other unexpected status is a promotion error.
    pub async fn apply_promotion(&self, application: &Application) -> Result<Option<Application>> {
        let body = serde_json::to_value(application)
            .map_err(|e| BrighteError::Internal(format!("failed to encode application: {e}")))?;
        let path = format!("{}/applications", Self::PATH);
        let response = self.api.post(&path, &body, "", &[], Some(Self::PATH)).await?;

        match response.status {
            StatusCode::BAD_REQUEST => Err(BrighteError::BadRequest {
                errors: response.json_value().unwrap_or(Value::Null),
            }),
            StatusCode::NO_CONTENT => Ok(None),
            StatusCode::CREATED => {
                let applied: AppliedPromotion = serde_json::from_str(&response.body).map_err(|e| {
                    BrighteError::Promotion(format!(
                        "Failed to parse response after promo application - {e}"
                    ))
                })?;
                Ok(Some(Application::new(
                    applied.id,
                    applied.vendor_id,
                    applied.product,
                    applied.code,
                )))
            }
            _ => Err(BrighteError::Promotion("Failed to apply promotion".to_string())),
        }
    }

    /// Fetch a promotion by ID, failing with `NotFound` when it is missing.
    pub async fn get_promotion(&self, id: &str) -> Result<Promotion> {
        let path = format!("{}/{id}", Self::PATH);
        let response = self.api.get(&path, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            return Err(BrighteError::NotFound);
        }

        serde_json::from_str(&response.body).map_err(|e| {
            BrighteError::Promotion(format!("Failed to map json response to Promotion - {e}"))
        })
    }

    /// List promotions, optionally filtered by a raw query string.
    pub async fn get_promotions(&self, query: Option<&str>) -> Result<Vec<Promotion>> {
        let response =
            self.api.get(Self::PATH, query.unwrap_or(""), &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&response.body).map_err(|e| {
            BrighteError::Promotion(format!("Failed to map json response to Promotion - {e}"))
        })
    }
}
