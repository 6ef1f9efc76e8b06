//! Payment service types

use serde::{Deserialize, Serialize};

/// A stored payment method (card or bank account)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: Option<String>,
    pub user_id: Option<i64>,
    /// Type of payment method, e.g. `card` or `bank`
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    /// Token from the payment gateway
    pub token: Option<String>,
    pub card_holder: Option<String>,
    /// Obfuscated card number
    pub card_number: Option<String>,
    /// MM/YY expiry date of the card
    pub card_expiry: Option<String>,
    /// Card scheme, e.g. VISA, Mastercard, AMEX
    pub card_type: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub account_last4: Option<String>,
    pub account_bsb: Option<String>,
    pub agreement_text: Option<String>,
    /// App that created this method
    pub source: Option<String>,
}
