//! # Razorpay Payment Provider
//!
//! Implementation of the razorgate `PaymentProvider` trait against the
//! Razorpay Orders and Refunds APIs.
//!
//! Orders are created with auto-capture on, so `capture` has nothing to
//! do and the confirmation callback is the moment a payment settles.

use crate::config::RazorpayConfig;
use crate::signature;
use async_trait::async_trait;
use pay_core::{
    BoxedPaymentRepository, CheckoutParameters, CheckoutPrefill, CheckoutTheme, ConfirmationPayload,
    ContactNotes, PaymentError, PaymentProvider, PaymentRecord, PaymentResult, PaymentStatus,
};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Template rendered by the host for the checkout page
pub const CHECKOUT_TEMPLATE: &str = "payments/razorpay.html";

/// Attribute-bag key holding the gateway order id
pub const ORDER_ID_ATTR: &str = "razorpay_order_id";

/// Hidden fields the checkout page round-trips back to the callback
pub const CONFIRMATION_FIELDS: &[&str] = &[
    "razorpay_order_id",
    "razorpay_payment_id",
    "razorpay_signature",
];

/// Widget accent color
const CHECKOUT_THEME_COLOR: &str = "#F37254";

/// Razorpay payment provider
///
/// Holds the credential pair, an HTTP client for the remote calls, and
/// the persistence port every status transition is written through.
pub struct RazorpayProvider {
    config: RazorpayConfig,
    client: Client,
    store: BoxedPaymentRepository,
}

impl RazorpayProvider {
    /// Create a new Razorpay provider
    pub fn new(config: RazorpayConfig, store: BoxedPaymentRepository) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            store,
        }
    }

    /// Create from environment variables
    pub fn from_env(store: BoxedPaymentRepository) -> PaymentResult<Self> {
        let config = RazorpayConfig::from_env()?;
        Ok(Self::new(config, store))
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> PaymentResult<CheckoutOrder> {
        let url = format!("{}/v1/orders", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn refund_payment(&self, payment_id: &str, amount: i64) -> PaymentResult<RefundRecord> {
        let url = format!(
            "{}/v1/payments/{}/refund",
            self.config.api_base_url, payment_id
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&RefundRequest { amount })
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> PaymentResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(PaymentError::Provider {
                    message: error_response.error.description,
                });
            }

            return Err(PaymentError::Provider {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Razorpay response: {}", e))
        })
    }

    /// Record a failure status and persist it before the error surfaces.
    ///
    /// The caller's error is the contract; a failing transition or save
    /// here is logged and must not replace it.
    async fn record_failure(
        &self,
        payment: &mut PaymentRecord,
        status: PaymentStatus,
        reason: String,
    ) {
        if let Err(e) = payment.transition(status, Some(reason)) {
            error!("Could not record {} status: {}", status, e);
            return;
        }
        if let Err(e) = self.store.save(payment).await {
            error!("Could not persist {} status: {}", status, e);
        }
    }
}

#[async_trait]
impl PaymentProvider for RazorpayProvider {
    #[instrument(skip(self, payment), fields(payment_id = %payment.id))]
    async fn create_checkout(
        &self,
        payment: &mut PaymentRecord,
    ) -> PaymentResult<CheckoutParameters> {
        if payment.total <= 0.0 {
            return Err(PaymentError::InvalidRequest(
                "Payment total must be positive".to_string(),
            ));
        }

        let amount = payment.currency.to_minor_units(payment.total);
        let notes = ContactNotes::from_record(payment);

        let request = CreateOrderRequest {
            amount,
            currency: payment.currency.as_str().to_string(),
            receipt: payment.id.clone(),
            notes: notes.clone(),
            payment_capture: true,
        };

        debug!(
            "Creating Razorpay order: amount={}, currency={}",
            amount, request.currency
        );

        let order = match self.create_order(&request).await {
            Ok(order) => order,
            Err(e) => {
                self.record_failure(payment, PaymentStatus::Error, e.to_string())
                    .await;
                return Err(e);
            }
        };

        // The order id is the correlation key for the callback; persist it
        // before the checkout parameters leave the adapter.
        payment.set_attr_once(ORDER_ID_ATTR, order.id.as_str())?;
        self.store.save(payment).await?;

        info!("Created Razorpay order: id={}", order.id);

        let name = payment.billing_name();
        Ok(CheckoutParameters {
            order_id: order.id,
            key_id: self.config.key_id.clone(),
            amount,
            currency: payment.currency.as_str().to_string(),
            name: name.clone(),
            description: format!("Payment for order {}", payment.id),
            image: None,
            prefill: CheckoutPrefill {
                name,
                email: notes.email.clone(),
                contact: notes.phone.clone(),
            },
            notes: notes.to_json()?,
            theme: CheckoutTheme {
                color: CHECKOUT_THEME_COLOR.to_string(),
            },
        })
    }

    #[instrument(skip(self, payment, payload), fields(payment_id = %payment.id))]
    async fn confirm_checkout(
        &self,
        payment: &mut PaymentRecord,
        payload: &ConfirmationPayload,
    ) -> PaymentResult<()> {
        if !payload.is_complete() {
            let err = PaymentError::MissingPaymentDetails;
            self.record_failure(payment, PaymentStatus::Rejected, err.to_string())
                .await;
            return Err(err);
        }

        let valid = signature::verify_checkout_signature(
            &self.config.key_secret,
            &payload.order_id,
            &payload.payment_id,
            &payload.signature,
        );

        if !valid {
            let err = PaymentError::SignatureVerificationFailed;
            self.record_failure(payment, PaymentStatus::Error, err.to_string())
                .await;
            return Err(err);
        }

        payment.transaction_id = Some(payload.payment_id.clone());
        payment.captured_amount = Some(payment.total);
        payment.transition(PaymentStatus::Confirmed, None)?;
        self.store.save(payment).await?;

        info!("Payment confirmed: transaction={}", payload.payment_id);
        Ok(())
    }

    async fn capture(
        &self,
        _payment: &mut PaymentRecord,
        _amount: Option<f64>,
    ) -> PaymentResult<()> {
        // Orders are created with payment_capture on; the gateway captures
        // at payment time and there is nothing left to finalize.
        Ok(())
    }

    #[instrument(skip(self, payment), fields(payment_id = %payment.id))]
    async fn refund(
        &self,
        payment: &mut PaymentRecord,
        amount: Option<f64>,
    ) -> PaymentResult<()> {
        let transaction_id = payment.transaction_id.clone().ok_or_else(|| {
            PaymentError::InvalidRequest("Payment has no transaction id".to_string())
        })?;

        let amount = amount.or(payment.captured_amount).unwrap_or(payment.total);
        let minor_amount = payment.currency.to_minor_units(amount);

        debug!(
            "Refunding Razorpay payment: transaction={}, amount={}",
            transaction_id, minor_amount
        );

        match self.refund_payment(&transaction_id, minor_amount).await {
            Ok(refund) => {
                payment.transition(PaymentStatus::Refunded, None)?;
                self.store.save(payment).await?;
                info!("Refund issued: id={}, amount={}", refund.id, refund.amount);
                Ok(())
            }
            Err(e) => {
                self.record_failure(payment, PaymentStatus::Error, e.to_string())
                    .await;
                Err(e)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "razorpay"
    }

    fn checkout_template(&self) -> &'static str {
        CHECKOUT_TEMPLATE
    }

    fn confirmation_fields(&self) -> &'static [&'static str] {
        CONFIRMATION_FIELDS
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    amount: i64,
    currency: String,
    receipt: String,
    notes: ContactNotes,
    payment_capture: bool,
}

/// A reserved payment intent returned by the orders endpoint
#[derive(Debug, Deserialize)]
pub struct CheckoutOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
struct RefundRequest {
    amount: i64,
}

/// A refund returned by the refunds endpoint
#[derive(Debug, Deserialize)]
pub struct RefundRecord {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub payment_id: String,
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetails {
    description: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}
