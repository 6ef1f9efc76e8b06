//! Promotion service types
//!
//! The promotions service predates the platform's camelCase convention, so
//! most wire fields here are snake_case as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A promotion campaign
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Promotion {
    pub id: Option<i64>,
    pub code: Option<String>,
    /// Product types the promotion applies to
    pub products: Option<Value>,
    pub type_id: Option<i64>,
    pub description: Option<String>,
    pub contents: Option<String>,
    pub display_title: Option<String>,
    pub display_text: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A finance application submitted for promotion matching
///
/// The wire format mixes conventions: `applicationId`/`vendorId` are
/// camelCase while `product_variant` is snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "applicationId")]
    pub application_id: i64,
    #[serde(rename = "vendorId")]
    pub vendor_id: i64,
    pub product: String,
    #[serde(default)]
    pub product_variant: Option<String>,
}

impl Application {
    pub fn new(
        application_id: i64,
        vendor_id: i64,
        product: impl Into<String>,
        product_variant: Option<String>,
    ) -> Self {
        Self { application_id, vendor_id, product: product.into(), product_variant }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_serializes_with_mixed_field_naming() {
        let application = Application::new(5, 7, "GreenLoan", Some("variant-a".to_string()));
        let body = serde_json::to_value(&application).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "applicationId": 5,
                "vendorId": 7,
                "product": "GreenLoan",
                "product_variant": "variant-a",
            })
        );
    }

    #[test]
    fn promotion_tolerates_sparse_payloads() {
        let promotion: Promotion =
            serde_json::from_str(r#"{"id": 1, "code": "SUMMER"}"#).unwrap();

        assert_eq!(promotion.code.as_deref(), Some("SUMMER"));
        assert!(promotion.display_title.is_none());
    }
}
