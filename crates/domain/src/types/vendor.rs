//! Vendor service types

use serde::{Deserialize, Serialize};

/// A vendor registered on the platform
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vendor {
    pub id: Option<i64>,
    pub trading_name: Option<String>,
    /// Salesforce Account ID
    pub salesforce_account_id: Option<String>,
    pub accounts_email: Option<String>,
    pub slug: Option<String>,
}

/// A product category a vendor can sell under
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub group: Option<String>,
}
