//! Vendor service client

use std::sync::Arc;

use brighte_domain::{Category, Result, Vendor};
use serde_json::Value;

use super::warn_response;
use crate::transport::BrighteApi;

pub struct VendorApi {
    api: Arc<BrighteApi>,
}

impl VendorApi {
    pub const PATH: &'static str = "/vendors";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// List all vendors. Returns an empty list on any handled failure.
    pub async fn get_vendors(&self) -> Result<Vec<Vendor>> {
        let response = self.api.get(Self::PATH, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("VendorApi", "get_vendors", &response);
            return Ok(Vec::new());
        }

        response.json()
    }

    /// List the user IDs of a vendor's agents.
    pub async fn get_vendor_agent_ids(&self, vendor_id: i64) -> Result<Vec<i64>> {
        let path = format!("{}/{vendor_id}/agents", Self::PATH);
        let response = self.api.get(&path, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("VendorApi", "get_vendor_agent_ids", &response);
            return Ok(Vec::new());
        }

        let agents: Vec<Value> = response.json()?;
        Ok(agents.iter().filter_map(|agent| agent.get("userId")?.as_i64()).collect())
    }

    /// List the categories a vendor sells under.
    pub async fn get_vendor_categories(&self, vendor_id: i64) -> Result<Vec<Category>> {
        let path = format!("{}/{vendor_id}/categories", Self::PATH);
        let response = self.api.get(&path, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            warn_response("VendorApi", "get_vendor_categories", &response);
            return Ok(Vec::new());
        }

        response.json()
    }
}
