//! Payments Backend Client
//!
//! Thin wrapper over the three backend endpoints. No retries and no caching;
//! callers decide what a failure means.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::Address;
use crate::cart::{Cart, LineItem};
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::money;
use crate::payments::{self, PaymentEvent};

const CREATE_SESSION_PATH: &str = "/api/create-payment-session";
const ORDER_REF_PATH: &str = "/api/get-order-ref";
const RECENT_PAYMENTS_PATH: &str = "/api/recent-payments";

/// Body of `POST /api/create-payment-session`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentSessionRequest {
    /// Minor units (pence)
    pub amount: i64,
    pub currency: String,
    pub address: Address,
    pub items: Vec<LineItem>,
}

impl PaymentSessionRequest {
    /// Snapshot the cart and address. Fails when there is nothing to pay for.
    pub fn from_cart(cart: &Cart, address: &Address, currency: &str) -> Result<Self> {
        let total = cart.total();
        if total <= rust_decimal::Decimal::ZERO {
            return Err(CheckoutError::EmptyCart);
        }
        let amount = money::to_minor_units(total).ok_or(CheckoutError::InvalidAmount(total))?;

        Ok(Self {
            amount,
            currency: currency.to_string(),
            address: address.clone(),
            items: cart.line_items(),
        })
    }
}

/// Provider session object, passed to the widget untouched
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentSession(pub Value);

impl PaymentSession {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

/// Merchant order reference resolved after payment
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderReference(String);

impl OrderReference {
    pub fn new(order_ref: impl Into<String>) -> Self {
        Self(order_ref.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session creation and order lookup
#[async_trait(?Send)]
pub trait SessionApi {
    async fn create_session(&self, request: &PaymentSessionRequest) -> Result<PaymentSession>;

    async fn order_reference(&self, payment_id: &str) -> Result<OrderReference>;
}

/// Source of the recent-payments list
#[async_trait(?Send)]
pub trait PaymentsSource {
    async fn recent_payments(&self) -> Result<Vec<PaymentEvent>>;
}

/// `reqwest`-backed client for the payments backend
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::new(config.backend_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and return the body of a 2xx response
    async fn body(&self, endpoint: &str, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait(?Send)]
impl SessionApi for HttpApi {
    async fn create_session(&self, request: &PaymentSessionRequest) -> Result<PaymentSession> {
        tracing::info!(
            amount = request.amount,
            currency = %request.currency,
            items = request.items.len(),
            "Requesting payment session"
        );

        let builder = self.client.post(self.url(CREATE_SESSION_PATH)).json(request);
        let body = self.body(CREATE_SESSION_PATH, builder).await?;
        let session: Value = serde_json::from_str(&body)?;
        if !session.is_object() {
            return Err(CheckoutError::MalformedPayload(
                "payment session is not an object".into(),
            ));
        }
        Ok(PaymentSession(session))
    }

    async fn order_reference(&self, payment_id: &str) -> Result<OrderReference> {
        let builder = self
            .client
            .get(self.url(ORDER_REF_PATH))
            .query(&[("payment_id", payment_id)]);
        let body = self.body(ORDER_REF_PATH, builder).await?;
        let value: Value = serde_json::from_str(&body)?;

        value
            .get("order_ref")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| OrderReference(r.to_string()))
            .ok_or_else(|| CheckoutError::MissingOrderReference(payment_id.to_string()))
    }
}

#[async_trait(?Send)]
impl PaymentsSource for HttpApi {
    async fn recent_payments(&self) -> Result<Vec<PaymentEvent>> {
        let builder = self.client.get(self.url(RECENT_PAYMENTS_PATH));
        let body = self.body(RECENT_PAYMENTS_PATH, builder).await?;
        payments::parse_payments_payload(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn two_of_present_a() -> Cart {
        let mut cart = Cart::storefront();
        cart.set_units(1, 2);
        cart
    }

    #[test]
    fn test_request_from_cart() {
        let request =
            PaymentSessionRequest::from_cart(&two_of_present_a(), &Address::default(), "GBP")
                .unwrap();
        assert_eq!(request.amount, 2000);
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].price, dec!(10));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0], json!({"name": "Present A", "units": 2, "price": 10.0}));
        assert_eq!(json["address"]["country"], "UK");
    }

    #[test]
    fn test_request_rejects_zero_total() {
        let err = PaymentSessionRequest::from_cart(&Cart::storefront(), &Address::default(), "GBP")
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_create_session_posts_minor_units() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/create-payment-session"))
            .and(body_partial_json(json!({"amount": 2000, "currency": "GBP"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ps_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpApi::new(server.uri());
        let request =
            PaymentSessionRequest::from_cart(&two_of_present_a(), &Address::default(), "GBP")
                .unwrap();
        let session = api.create_session(&request).await.unwrap();

        assert_eq!(session.id(), Some("ps_1"));
    }

    #[tokio::test]
    async fn test_create_session_non_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let api = HttpApi::new(server.uri());
        let request =
            PaymentSessionRequest::from_cart(&two_of_present_a(), &Address::default(), "GBP")
                .unwrap();
        let err = api.create_session(&request).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_order_reference() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-order-ref"))
            .and(query_param("payment_id", "pay_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order_ref": "ORD-9"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/get-order-ref"))
            .and(query_param("payment_id", "pay_404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order_ref": ""})))
            .mount(&server)
            .await;

        let api = HttpApi::new(format!("{}/", server.uri()));
        let order_ref = api.order_reference("pay_123").await.unwrap();
        assert_eq!(order_ref.as_str(), "ORD-9");

        let err = api.order_reference("pay_404").await.unwrap_err();
        assert!(matches!(err, CheckoutError::MissingOrderReference(id) if id == "pay_404"));
    }

    #[tokio::test]
    async fn test_recent_payments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/recent-payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payments": [{"payment_id": "pay_1", "amount": "20.00", "status": "captured"}]
            })))
            .mount(&server)
            .await;

        let api = HttpApi::new(server.uri());
        let events = api.recent_payments().await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].amount.as_deref(), Some("20.00"));
    }
}
