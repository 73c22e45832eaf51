//! # Request Handlers
//!
//! Axum request handlers for the payment API. These play the host
//! application's role: they own the payment records and drive the
//! provider's checkout/callback/refund operations.

use crate::extract::CallbackPayload;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{Currency, PaymentError, PaymentRecord};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Decimal total in the payment currency
    pub total: f64,
    /// Currency (defaults to INR)
    #[serde(default)]
    pub currency: Currency,
    /// Billing first name
    #[serde(default)]
    pub billing_first_name: String,
    /// Billing last name
    #[serde(default)]
    pub billing_last_name: String,
    /// Billing email (optional)
    #[serde(default)]
    pub billing_email: Option<String>,
    /// Billing phone (optional)
    #[serde(default)]
    pub billing_phone: Option<String>,
}

/// Create checkout response: everything the checkout page needs
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Template the host should render
    pub template: String,
    /// Hidden fields the template round-trips to the callback
    pub confirmation_fields: Vec<String>,
    /// Widget parameters
    pub params: pay_core::CheckoutParameters,
}

/// Refund request body
#[derive(Debug, Default, Deserialize)]
pub struct RefundBody {
    /// Decimal amount; defaults to the captured amount
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "razorgate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment record (host-side step before checkout)
#[instrument(skip(state, request), fields(total = request.total))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<PaymentRecord>, (StatusCode, Json<ErrorResponse>)> {
    let mut payment = PaymentRecord::new(request.total, request.currency)
        .with_billing_name(request.billing_first_name, request.billing_last_name);

    if let Some(email) = request.billing_email {
        payment = payment.with_email(email);
    }
    if let Some(phone) = request.billing_phone {
        payment = payment.with_phone(phone);
    }

    state
        .store
        .save(&payment)
        .await
        .map_err(payment_error_to_response)?;

    info!("Created payment record: {}", payment.id);
    Ok(Json(payment))
}

/// Fetch a payment record
pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentRecord>, (StatusCode, Json<ErrorResponse>)> {
    let payment = state
        .store
        .load(&payment_id)
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(payment))
}

/// Reserve a gateway order and return the checkout parameters
#[instrument(skip(state), fields(payment_id = %payment_id))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut payment = state
        .store
        .load(&payment_id)
        .await
        .map_err(payment_error_to_response)?;

    let params = state
        .provider
        .create_checkout(&mut payment)
        .await
        .map_err(|e| {
            error!("Failed to create checkout: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(CheckoutResponse {
        template: state.provider.checkout_template().to_string(),
        confirmation_fields: state
            .provider
            .confirmation_fields()
            .iter()
            .map(|f| f.to_string())
            .collect(),
        params,
    }))
}

/// Verify a checkout callback and confirm the payment
#[instrument(skip(state, payload), fields(payment_id = %payment_id))]
pub async fn confirm_checkout(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    CallbackPayload(payload): CallbackPayload,
) -> Result<Json<PaymentRecord>, (StatusCode, Json<ErrorResponse>)> {
    let mut payment = state
        .store
        .load(&payment_id)
        .await
        .map_err(payment_error_to_response)?;

    state
        .provider
        .confirm_checkout(&mut payment, &payload)
        .await
        .map_err(|e| {
            error!("Checkout confirmation failed: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(payment))
}

/// Capture a payment (trivial under auto-capture)
pub async fn capture_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentRecord>, (StatusCode, Json<ErrorResponse>)> {
    let mut payment = state
        .store
        .load(&payment_id)
        .await
        .map_err(payment_error_to_response)?;

    state
        .provider
        .capture(&mut payment, None)
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(payment))
}

/// Refund a captured payment
#[instrument(skip(state, body), fields(payment_id = %payment_id))]
pub async fn refund_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    body: Option<Json<RefundBody>>,
) -> Result<Json<PaymentRecord>, (StatusCode, Json<ErrorResponse>)> {
    let amount = body.and_then(|Json(b)| b.amount);

    let mut payment = state
        .store
        .load(&payment_id)
        .await
        .map_err(payment_error_to_response)?;

    state
        .provider
        .refund(&mut payment, amount)
        .await
        .map_err(|e| {
            error!("Refund failed: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(payment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppConfig;
    use axum_test::TestServer;
    use pay_core::{BoxedPaymentRepository, MemoryRepository};
    use pay_razorpay::{checkout_signature, RazorpayConfig, RazorpayProvider};
    use std::sync::Arc;

    const TEST_SECRET: &str = "test_secret";

    fn test_server() -> TestServer {
        let store: BoxedPaymentRepository = Arc::new(MemoryRepository::new());
        let config = RazorpayConfig::new("rzp_test_key", TEST_SECRET);
        let provider = Arc::new(RazorpayProvider::new(config, store.clone()));

        let state = AppState {
            provider,
            store,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                base_url: "http://localhost:8080".to_string(),
                environment: "test".to_string(),
            },
        };

        TestServer::new(create_router(state)).expect("failed to build test server")
    }

    async fn create_test_payment(server: &TestServer) -> String {
        let response = server
            .post("/api/v1/payments")
            .json(&serde_json::json!({
                "total": 500.0,
                "currency": "INR",
                "billing_first_name": "Asha",
                "billing_email": "asha@example.com"
            }))
            .await;
        response.assert_status_ok();
        let payment: serde_json::Value = response.json();
        payment["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_create_and_get_payment() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let response = server.get(&format!("/api/v1/payments/{}", id)).await;
        response.assert_status_ok();

        let payment: serde_json::Value = response.json();
        assert_eq!(payment["total"], 500.0);
        assert_eq!(payment["currency"], "INR");
        assert_eq!(payment["status"], "pending");
    }

    #[tokio::test]
    async fn test_get_unknown_payment() {
        let server = test_server();
        let response = server.get("/api/v1/payments/nope").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_callback_json_confirms_payment() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let sig = checkout_signature(TEST_SECRET, "order_abc", "pay_xyz");
        let response = server
            .post(&format!("/api/v1/payments/{}/callback", id))
            .json(&serde_json::json!({
                "razorpay_order_id": "order_abc",
                "razorpay_payment_id": "pay_xyz",
                "razorpay_signature": sig
            }))
            .await;
        response.assert_status_ok();

        let payment: serde_json::Value = response.json();
        assert_eq!(payment["status"], "confirmed");
        assert_eq!(payment["transaction_id"], "pay_xyz");
        assert_eq!(payment["captured_amount"], 500.0);
    }

    #[tokio::test]
    async fn test_callback_form_confirms_payment() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let sig = checkout_signature(TEST_SECRET, "order_abc", "pay_xyz");
        let response = server
            .post(&format!("/api/v1/payments/{}/callback", id))
            .form(&serde_json::json!({
                "razorpay_order_id": "order_abc",
                "razorpay_payment_id": "pay_xyz",
                "razorpay_signature": sig
            }))
            .await;
        response.assert_status_ok();

        let payment: serde_json::Value = response.json();
        assert_eq!(payment["status"], "confirmed");
    }

    #[tokio::test]
    async fn test_callback_query_confirms_payment() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let sig = checkout_signature(TEST_SECRET, "order_abc", "pay_xyz");
        let response = server
            .post(&format!("/api/v1/payments/{}/callback", id))
            .add_query_param("razorpay_order_id", "order_abc")
            .add_query_param("razorpay_payment_id", "pay_xyz")
            .add_query_param("razorpay_signature", &sig)
            .await;
        response.assert_status_ok();

        let payment: serde_json::Value = response.json();
        assert_eq!(payment["status"], "confirmed");
    }

    #[tokio::test]
    async fn test_callback_missing_fields_rejects() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let response = server
            .post(&format!("/api/v1/payments/{}/callback", id))
            .json(&serde_json::json!({
                "razorpay_order_id": "order_abc"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Missing payment details");

        let payment_response = server.get(&format!("/api/v1/payments/{}", id)).await;
        let payment: serde_json::Value = payment_response.json();
        assert_eq!(payment["status"], "rejected");
    }

    #[tokio::test]
    async fn test_callback_bad_signature() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let response = server
            .post(&format!("/api/v1/payments/{}/callback", id))
            .json(&serde_json::json!({
                "razorpay_order_id": "order_abc",
                "razorpay_payment_id": "pay_xyz",
                "razorpay_signature": "forged"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Signature verification failed");

        let payment_response = server.get(&format!("/api/v1/payments/{}", id)).await;
        let payment: serde_json::Value = payment_response.json();
        assert_eq!(payment["status"], "error");
    }

    #[tokio::test]
    async fn test_capture_is_trivial() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let response = server
            .post(&format!("/api/v1/payments/{}/capture", id))
            .await;
        response.assert_status_ok();

        let payment: serde_json::Value = response.json();
        assert_eq!(payment["status"], "pending");
    }

    #[tokio::test]
    async fn test_refund_before_confirmation_fails() {
        let server = test_server();
        let id = create_test_payment(&server).await;

        let response = server
            .post(&format!("/api/v1/payments/{}/refund", id))
            .json(&serde_json::json!({}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
