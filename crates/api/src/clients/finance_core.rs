//! Finance-core GraphQL client
//!
//! All queries go through the transport's cached POST, so repeated lookups
//! with identical arguments are served from cache. The selected-field lists
//! are wire-compatible with the finance-core schema.

use std::sync::Arc;

use brighte_domain::types::finance_core::{Account, Vendor};
use brighte_domain::{BrighteError, FinancialProduct, FinancialProductConfig, Result};
use brighte_domain::{Category, ClientDetail};
use serde_json::{json, Value};

use crate::transport::BrighteApi;

const FINANCIAL_PRODUCT_CONFIG_FIELDS: &str = "\
            establishmentFee
            interestRate
            applicationFee
            annualFee
            weeklyAccountFee
            latePaymentFee
            introducerFee
            enableExpressSettlement
            minFinanceAmount
            maxFinanceAmount
            minRepaymentMonth
            maxRepaymentMonth
            forceCcaProcess
            defaultPaymentCycle
            invoiceRequired
            manualSettlementRequired
            riskBasedPricing
            version
            activeTo
            preventApplicationsAfterEndDate";

pub struct FinanceCoreApi {
    api: Arc<BrighteApi>,
}

impl FinanceCoreApi {
    pub const PATH: &'static str = "/../v2/finance/graphql";

    pub fn new(api: Arc<BrighteApi>) -> Self {
        Self { api }
    }

    /// Fetch a vendor by its public ID.
    pub async fn get_vendor(
        &self,
        vendor_id: &str,
        include_financial_product: bool,
    ) -> Result<Option<Vendor>> {
        let filter = format!("publicId: \"{vendor_id}\"");
        let parameters = vec![vendor_id.to_string(), include_financial_product.to_string()];
        self.fetch_vendor("get_vendor", &filter, &parameters, include_financial_product).await
    }

    /// Fetch a vendor by its numeric legacy ID.
    pub async fn get_vendor_by_legacy_id(
        &self,
        vendor_legacy_id: i64,
        include_financial_product: bool,
    ) -> Result<Option<Vendor>> {
        let filter = format!("legacyId: {vendor_legacy_id}");
        let parameters =
            vec![vendor_legacy_id.to_string(), include_financial_product.to_string()];
        self.fetch_vendor("get_vendor_by_legacy_id", &filter, &parameters, include_financial_product)
            .await
    }

    async fn fetch_vendor(
        &self,
        function_name: &str,
        filter: &str,
        parameters: &[String],
        include_financial_product: bool,
    ) -> Result<Option<Vendor>> {
        let body = json!({ "query": vendor_query(filter, include_financial_product) });
        let Some(response) = self
            .api
            .cached_post(function_name, parameters, Self::PATH, &body, "", &[], Some(Self::PATH), true)
            .await?
        else {
            return Ok(None);
        };

        decode(response.pointer("/data/vendor"))
    }

    /// Fetch the fee configuration for a financial product, optionally scoped
    /// by vendor, version, promo code, and category.
    pub async fn get_financial_product_config(
        &self,
        slug: &str,
        vendor_id: Option<&str>,
        version: Option<i64>,
        promo_code: Option<&str>,
        category: Option<&str>,
    ) -> Result<Option<FinancialProductConfig>> {
        let query = format!(
            "query FinancialProductConfiguration(
            $financialProductId: String,
            $version: Int,
            $vendorId: String,
            $promoCode: String,
            $category: String) {{
            financialProductConfiguration(
            financialProductId: $financialProductId,
            version: $version,
            vendorId: $vendorId,
            promoCode: $promoCode,
            category: $category
            ) {{
{FINANCIAL_PRODUCT_CONFIG_FIELDS}
            }}
        }}"
        );
        let body = json!({
            "query": query,
            "variables": {
                "financialProductId": slug,
                "vendorId": vendor_id,
                "version": version,
                "promoCode": promo_code,
                "category": category,
            },
        });
        let parameters = vec![
            slug.to_string(),
            vendor_id.unwrap_or_default().to_string(),
            version.map(|v| v.to_string()).unwrap_or_default(),
            promo_code.unwrap_or_default().to_string(),
            category.unwrap_or_default().to_string(),
        ];

        let Some(response) = self
            .api
            .cached_post(
                "get_financial_product_config",
                &parameters,
                Self::PATH,
                &body,
                "",
                &[],
                Some(Self::PATH),
                false,
            )
            .await?
        else {
            return Ok(None);
        };

        decode(response.pointer("/data/financialProductConfiguration"))
    }

    /// Fetch a financial product with its current configuration.
    pub async fn get_financial_product(&self, id: &str) -> Result<Option<FinancialProduct>> {
        let query = format!(
            "query FinancialProduct($id: String!) {{
                financialProduct(
                id: $id
                ) {{
                    id
                    name
                    type
                    customerType
                    loanTypeId
                    configuration {{
{FINANCIAL_PRODUCT_CONFIG_FIELDS}
                    }}
                    categoryGroup
                    fpAccountType
                    fpBranch
                }}
            }}"
        );
        let body = json!({ "query": query, "variables": { "id": id } });
        let parameters = vec![id.to_string()];

        let Some(response) = self
            .api
            .cached_post(
                "get_financial_product",
                &parameters,
                Self::PATH,
                &body,
                "",
                &[],
                Some(Self::PATH),
                false,
            )
            .await?
        else {
            return Ok(None);
        };

        decode(response.pointer("/data/financialProduct"))
    }

    /// Fetch a finance account and its rebate history.
    pub async fn get_finance_account(&self, id: &str) -> Result<Option<Account>> {
        let query = format!(
            "query {{
                financeAccount(
                id: \"{id}\"
                ) {{
                    id
                    status
                    rebates {{
                        startDate
                        finishDate
                        dollar
                        percentage
                        rebateType
                    }}
                }}
            }}"
        );
        let body = json!({ "query": query });
        let parameters = vec![id.to_string()];

        let Some(response) = self
            .api
            .cached_post(
                "get_finance_account",
                &parameters,
                Self::PATH,
                &body,
                "",
                &[],
                Some(Self::PATH),
                false,
            )
            .await?
        else {
            return Ok(None);
        };

        decode(response.pointer("/data/financeAccount"))
    }

    /// Fetch a product category by ID.
    pub async fn get_category_by_id(&self, category_id: i64) -> Result<Option<Category>> {
        let query = "query GetCategory($categoryId: Int) {
                category(id: $categoryId) {
                    id
                    slug
                    name
                    group
                }
            }";
        let body = json!({ "query": query, "variables": { "categoryId": category_id } });
        let parameters = vec![category_id.to_string()];

        let Some(response) = self
            .api
            .cached_post(
                "get_category_by_id",
                &parameters,
                Self::PATH,
                &body,
                "",
                &[],
                Some(Self::PATH),
                false,
            )
            .await?
        else {
            return Ok(None);
        };

        decode(response.pointer("/data/category"))
    }

    /// Fetch loan client details over the finance-core REST surface.
    pub async fn get_client_details(&self, client_id: &str) -> Result<Option<ClientDetail>> {
        let path = format!("/../v2/finance/lms/client/{client_id}");
        let response = self.api.get(&path, "", &[], Some(Self::PATH)).await?;

        if !response.is_ok() {
            return Ok(None);
        }

        response.json().map(Some)
    }
}

fn vendor_query(filter: &str, include_financial_product: bool) -> String {
    let approved_financial_products = if include_financial_product {
        "
              approvedFinancialProducts {
                  promotions {
                      code
                  }
                  id
              }"
    } else {
        ""
    };

    format!(
        "query {{
            vendor (filter: {{ {filter} }}) {{
              legacyId
              publicId
              tradingName
              sfAccountId
              slug{approved_financial_products}
              activeRebate {{
                startDate
                finishDate
                dollar
                percentage
                rebateType
              }}
            }}
          }}"
    )
}

/// Decode a GraphQL data node into a model, treating `null` as absent.
fn decode<T: serde::de::DeserializeOwned>(node: Option<&Value>) -> Result<Option<T>> {
    match node {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| BrighteError::Internal(format!("failed to decode response body: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use brighte_common::MemoryCacheStore;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    fn test_client(server: &MockServer) -> FinanceCoreApi {
        let config = ApiConfig::new(format!("{}/v1", server.uri()));
        let api = BrighteApi::new(config, Arc::new(MemoryCacheStore::new())).expect("client");
        FinanceCoreApi::new(Arc::new(api))
    }

    fn vendor_body() -> serde_json::Value {
        json!({
            "data": {
                "vendor": {
                    "legacyId": 42,
                    "publicId": "E1234",
                    "tradingName": "Solar Co",
                    "sfAccountId": "SF1",
                    "slug": "solar-co",
                    "activeRebate": {
                        "startDate": "2021-01-01",
                        "finishDate": "2021-02-01",
                        "dollar": 30.0,
                        "percentage": null,
                        "rebateType": "dollar",
                    },
                }
            }
        })
    }

    #[tokio::test]
    async fn vendor_query_resolves_against_normalized_path() {
        let server = MockServer::start().await;
        // Prefix /v1 plus /../v2/finance/graphql must hit /v2/finance/graphql.
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body()))
            .expect(1)
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let vendor = finance_core.get_vendor("E1234", false).await.unwrap().expect("vendor");

        assert_eq!(vendor.legacy_id, Some(42));
        assert_eq!(vendor.trading_name.as_deref(), Some("Solar Co"));
        assert_eq!(vendor.active_rebate.unwrap().dollar, Some(30.0));

        // Identical arguments come from the cache: expect(1) stays satisfied.
        let again = finance_core.get_vendor("E1234", false).await.unwrap();
        assert!(again.is_some());
    }

    #[tokio::test]
    async fn vendor_query_includes_products_when_requested() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "vendor": {
                        "legacyId": 42,
                        "publicId": "E1234",
                        "approvedFinancialProducts": [
                            { "id": "fp-1", "promotions": [{ "code": "SPRING" }] }
                        ],
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let vendor =
            finance_core.get_vendor_by_legacy_id(42, true).await.unwrap().expect("vendor");

        let products = vendor.approved_financial_products.expect("products");
        assert_eq!(products[0].id.as_deref(), Some("fp-1"));
        assert_eq!(products[0].promotions.as_ref().unwrap()[0].code.as_deref(), Some("SPRING"));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let query = body["query"].as_str().unwrap_or_default();
        assert!(query.contains("approvedFinancialProducts"));
        assert!(query.contains("legacyId: 42"));
    }

    #[tokio::test]
    async fn graphql_errors_yield_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "vendor not found" }],
                "data": null,
            })))
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        assert!(finance_core.get_vendor("missing", false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn null_data_node_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "vendor": null } })),
            )
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        assert!(finance_core.get_vendor("missing", false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn financial_product_config_sends_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .and(body_partial_json(json!({
                "variables": {
                    "financialProductId": "green-loan",
                    "vendorId": "E1234",
                    "version": 3,
                    "promoCode": null,
                    "category": null,
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "financialProductConfiguration": {
                        "interestRate": 5.99,
                        "establishmentFee": 299.0,
                        "version": 3,
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let config = finance_core
            .get_financial_product_config("green-loan", Some("E1234"), Some(3), None, None)
            .await
            .unwrap()
            .expect("config");

        assert_eq!(config.interest_rate, Some(5.99));
        assert_eq!(config.version, Some(3));
    }

    #[tokio::test]
    async fn financial_product_decodes_nested_configuration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "financialProduct": {
                        "id": "green-loan",
                        "name": "Green Loan",
                        "type": "GreenLoan",
                        "customerType": "RESIDENTIAL",
                        "loanTypeId": 2,
                        "configuration": { "interestRate": 0.0, "version": 1 },
                        "categoryGroup": "SOLAR",
                    }
                }
            })))
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let product =
            finance_core.get_financial_product("green-loan").await.unwrap().expect("product");

        assert_eq!(product.product_type.as_deref(), Some("GreenLoan"));
        assert_eq!(product.configuration.unwrap().version, Some(1));
    }

    #[tokio::test]
    async fn finance_account_maps_rebates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "financeAccount": {
                        "id": "acc-1",
                        "status": "ACTIVE",
                        "rebates": [
                            { "startDate": "2021-01-01", "dollar": 25.0, "rebateType": "dollar" }
                        ],
                    }
                }
            })))
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let account = finance_core.get_finance_account("acc-1").await.unwrap().expect("account");

        assert_eq!(account.status.as_deref(), Some("ACTIVE"));
        assert_eq!(account.rebates.len(), 1);
        assert_eq!(account.rebates[0].dollar, Some(25.0));
    }

    #[tokio::test]
    async fn category_lookup_maps_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/finance/graphql"))
            .and(body_partial_json(json!({ "variables": { "categoryId": 7 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "category": { "id": 7, "slug": "solar", "name": "Solar", "group": "energy" }
                }
            })))
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let category = finance_core.get_category_by_id(7).await.unwrap().expect("category");

        assert_eq!(category.slug.as_deref(), Some("solar"));
        assert_eq!(category.group.as_deref(), Some("energy"));
    }

    #[tokio::test]
    async fn client_details_use_the_rest_surface() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/finance/lms/client/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "firstName": "Joe",
                "lastName": "Customer",
                "middleName": null,
                "dateOfBirth": "1990-01-31",
            })))
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        let detail = finance_core.get_client_details("abc").await.unwrap().expect("detail");

        assert_eq!(detail.first_name.as_deref(), Some("Joe"));
        assert_eq!(detail.date_of_birth.as_deref(), Some("1990-01-31"));
    }

    #[tokio::test]
    async fn client_details_failure_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/finance/lms/client/abc"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let finance_core = test_client(&server);
        assert!(finance_core.get_client_details("abc").await.unwrap().is_none());
    }
}
