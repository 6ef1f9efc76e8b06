//! Finance service client

use std::sync::Arc;

use brighte_domain::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::warn_response;
use crate::transport::BrighteApi;

/// Details of an applicant added to an existing application
#[derive(Debug, Clone)]
pub struct JointApplicant {
    pub first_name: String,
    pub email: String,
    pub mobile: String,
}

pub struct FinanceApi {
    api: Arc<BrighteApi>,
}

impl FinanceApi {
    pub const PATH: &'static str = "/finance";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// Look up the application ID belonging to a remote account ID.
    pub async fn get_application_id(&self, remote_id: &str) -> Result<Option<String>> {
        let path = format!("{}/applications/account/{remote_id}", Self::PATH);
        let response = self.api.get(&path, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("FinanceApi", "get_application_id", &response);
            return Ok(None);
        }

        let result: Value = response.json()?;
        Ok(result.get("id").and_then(Value::as_str).map(str::to_string))
    }

    /// Add a joint applicant to an application. Returns the new applicant ID.
    pub async fn add_joint_applicant(
        &self,
        applicant: &JointApplicant,
        application_id: &str,
    ) -> Result<Option<String>> {
        let body = json!({
            "firstName": applicant.first_name,
            "email": applicant.email,
            "mobile": applicant.mobile,
            "present": false,
        });

        let path = format!("{}/applications/{application_id}/applicants", Self::PATH);
        let response = self.api.post(&path, &body, "", &[], Some(Self::PATH)).await?;

        if response.status != StatusCode::CREATED {
            warn_response("FinanceApi", "add_joint_applicant", &response);
            return Ok(None);
        }

        let result: Value = response.json()?;
        Ok(result.get("id").and_then(Value::as_str).map(str::to_string))
    }
}
