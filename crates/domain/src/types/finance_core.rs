//! Finance-core (GraphQL) service types
//!
//! These mirror the finance-core GraphQL schema rather than the legacy
//! finance REST payloads, so they live in their own namespace.

use serde::{Deserialize, Serialize};

/// A vendor as modelled by finance-core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vendor {
    pub legacy_id: Option<i64>,
    pub public_id: Option<String>,
    pub trading_name: Option<String>,
    pub sf_account_id: Option<String>,
    pub slug: Option<String>,
    pub active_rebate: Option<VendorRebate>,
    pub approved_financial_products: Option<Vec<ApprovedFinancialProduct>>,
}

/// A rebate window granted to a vendor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorRebate {
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub dollar: Option<f64>,
    pub percentage: Option<f64>,
    pub rebate_type: Option<String>,
}

/// A financial product a vendor is approved to offer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApprovedFinancialProduct {
    pub id: Option<String>,
    pub promotions: Option<Vec<VendorPromotion>>,
}

/// A promotion attached to an approved financial product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorPromotion {
    pub code: Option<String>,
}

/// A finance account with its rebate history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    pub id: Option<String>,
    pub loan_type_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub status: Option<String>,
    pub rebates: Vec<VendorRebate>,
}
