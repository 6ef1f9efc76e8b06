//! Per-domain resource clients
//!
//! Each client receives the shared [`BrighteApi`](crate::BrighteApi)
//! transport by constructor injection, builds paths/bodies (REST) or query
//! documents (GraphQL), and maps JSON responses onto the `brighte-domain`
//! models. On a handled failure they log one warning and return `None` (or
//! an empty list); only authentication failures and the promotion flows
//! surface errors.

use crate::response::ApiResponse;

pub mod communication;
pub mod finance;
pub mod finance_core;
pub mod identity;
pub mod payment;
pub mod promotion;
pub mod vendor;

pub use communication::CommunicationApi;
pub use finance::{FinanceApi, JointApplicant};
pub use finance_core::FinanceCoreApi;
pub use identity::IdentityApi;
pub use payment::PaymentApi;
pub use promotion::PromotionApi;
pub use vendor::VendorApi;

/// Log a failed response once, in the shared
/// `client->function: status: message` shape.
pub(crate) fn warn_response(client: &str, function: &str, response: &ApiResponse) {
    tracing::warn!(
        "{}->{}: {}: {}",
        client,
        function,
        response.status.as_u16(),
        response.error_message()
    );
}
