//! Finance service types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A financial product offered to customers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub customer_type: Option<String>,
    pub loan_type_id: Option<i64>,
    pub configuration: Option<FinancialProductConfig>,
    pub category_group: Option<String>,
    /// Finpower account type (legacy)
    pub fp_account_type: Option<String>,
    /// Finpower branch (legacy)
    pub fp_branch: Option<String>,
}

/// Versioned fee and limit configuration for a financial product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialProductConfig {
    pub version: Option<i64>,
    pub establishment_fee: Option<f64>,
    pub interest_rate: Option<f64>,
    pub application_fee: Option<f64>,
    pub annual_fee: Option<f64>,
    pub weekly_account_fee: Option<f64>,
    pub late_payment_fee: Option<f64>,
    pub introducer_fee: Option<f64>,
    pub enable_express_settlement: Option<bool>,
    pub min_finance_amount: Option<f64>,
    pub max_finance_amount: Option<f64>,
    pub min_repayment_month: Option<i64>,
    pub max_repayment_month: Option<i64>,
    pub force_cca_process: Option<bool>,
    pub default_payment_cycle: Option<String>,
    pub invoice_required: Option<bool>,
    pub manual_settlement_required: Option<bool>,
    pub risk_based_pricing: Option<bool>,
    pub active_to: Option<DateTime<Utc>>,
    pub prevent_applications_after_end_date: bool,
}

/// Personal details held against a loan client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientDetail {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
}
