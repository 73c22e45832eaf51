//! # Payment Provider Trait
//!
//! Capability trait for payment gateway adapters. An implementation maps
//! payment records to gateway API calls and drives the record's status
//! lifecycle; persistence goes through the injected
//! [`PaymentRepository`](crate::store::PaymentRepository) port.

use crate::error::PaymentResult;
use crate::payment::PaymentRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Confirmation data returned by the checkout flow.
///
/// Normalized at the transport boundary: callers parse the inbound
/// request (JSON body, form, or query) into this value once, and absent
/// fields arrive here as empty strings. Completeness is the adapter's
/// call, not the transport's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmationPayload {
    /// Gateway order id issued at checkout creation
    pub order_id: String,
    /// Gateway payment id issued after the payer completed payment
    pub payment_id: String,
    /// Signature over (order id, payment id) supplied by the gateway
    pub signature: String,
}

impl ConfirmationPayload {
    pub fn new(
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
            signature: signature.into(),
        }
    }

    /// All three fields present and non-empty
    pub fn is_complete(&self) -> bool {
        !self.order_id.is_empty() && !self.payment_id.is_empty() && !self.signature.is_empty()
    }
}

/// Prefilled contact block shown by the checkout UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Checkout UI theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutTheme {
    pub color: String,
}

/// Data handed to the checkout UI to open the gateway's payment widget.
///
/// Derived per checkout attempt, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutParameters {
    /// Gateway order id
    pub order_id: String,

    /// Public API key for the browser-side widget
    pub key_id: String,

    /// Amount in minor currency units
    pub amount: i64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Merchant/display name
    pub name: String,

    /// Line shown under the merchant name
    pub description: String,

    /// Optional logo URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Prefilled contact fields
    pub prefill: CheckoutPrefill,

    /// Contact notes rendered as a JSON string (the widget passes this
    /// through opaquely; distinct from the structured notes sent on the
    /// order-creation call)
    pub notes: String,

    /// Widget theme
    pub theme: CheckoutTheme,
}

/// Capability trait for payment gateway adapters.
///
/// Four operations match the host's payment-provider contract; the two
/// accessor methods tell the host which checkout template to render and
/// which hidden fields round-trip the confirmation payload through it.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Reserve a payment intent with the gateway and return the data the
    /// checkout UI needs. Persists the gateway order id onto the record.
    async fn create_checkout(
        &self,
        payment: &mut PaymentRecord,
    ) -> PaymentResult<CheckoutParameters>;

    /// Verify a checkout callback and confirm the payment.
    async fn confirm_checkout(
        &self,
        payment: &mut PaymentRecord,
        payload: &ConfirmationPayload,
    ) -> PaymentResult<()>;

    /// Finalize an authorization into a fund transfer.
    async fn capture(
        &self,
        payment: &mut PaymentRecord,
        amount: Option<f64>,
    ) -> PaymentResult<()>;

    /// Reverse a captured payment, fully or partially.
    async fn refund(
        &self,
        payment: &mut PaymentRecord,
        amount: Option<f64>,
    ) -> PaymentResult<()>;

    /// Gateway name (for logging and routing)
    fn provider_name(&self) -> &'static str;

    /// Template identifier for the checkout UI
    fn checkout_template(&self) -> &'static str;

    /// Names of the hidden form fields the checkout UI round-trips back
    /// as the confirmation payload
    fn confirmation_fields(&self) -> &'static [&'static str];
}

/// Type alias for a boxed payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
