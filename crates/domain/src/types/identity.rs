//! Identity service types

use serde::{Deserialize, Serialize};

/// A platform user as returned by the identity service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,
    /// Remote ID
    pub remote_id: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Salesforce Contact ID
    pub sf_contact_id: Option<String>,
    /// Universal ID
    pub uid: Option<String>,
}
