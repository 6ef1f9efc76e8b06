//! Communication service types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A notification to be delivered through the communications service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notification {
    /// Assigned by the service on creation
    pub id: Option<String>,
    pub to: String,
    pub template_key: String,
    /// Template substitution values
    pub payload: Option<Value>,
}
