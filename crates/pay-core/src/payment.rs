//! # Payment Record Types
//!
//! The payment record owned by the host application, its status
//! lifecycle, and the contact metadata forwarded to the gateway.

use crate::currency::Currency;
use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Status of a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, awaiting checkout completion
    Pending,
    /// Callback verified, funds captured
    Confirmed,
    /// Callback arrived with incomplete data
    Rejected,
    /// Captured amount returned to the payer
    Refunded,
    /// A gateway call or verification failed
    Error,
}

impl PaymentStatus {
    /// Whether a transition from `self` to `to` is allowed.
    ///
    /// Transitions are one-directional per event:
    /// Pending -> {Confirmed, Rejected, Error},
    /// Confirmed -> {Refunded, Error}.
    pub fn can_transition(&self, to: PaymentStatus) -> bool {
        matches!(
            (self, to),
            (
                PaymentStatus::Pending,
                PaymentStatus::Confirmed | PaymentStatus::Rejected | PaymentStatus::Error
            ) | (
                PaymentStatus::Confirmed,
                PaymentStatus::Refunded | PaymentStatus::Error
            )
        )
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Confirmed => "confirmed",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A payment record
///
/// Owned by the host application and persisted through a
/// [`PaymentRepository`](crate::store::PaymentRepository). The adapter
/// mutates it only through [`PaymentRecord::transition`] and the
/// attribute bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique payment ID (generated)
    pub id: String,

    /// Decimal total in the payment currency
    pub total: f64,

    /// Currency
    pub currency: Currency,

    /// Billing first name
    #[serde(default)]
    pub billing_first_name: String,

    /// Billing last name
    #[serde(default)]
    pub billing_last_name: String,

    /// Billing email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_email: Option<String>,

    /// Billing phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_phone: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: PaymentStatus,

    /// Reason recorded with the last status transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,

    /// Gateway payment id, set on confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Amount actually captured, set on confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_amount: Option<f64>,

    /// Free-form attribute bag (gateway order id, correlation keys)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attrs: HashMap<String, String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Create a new pending payment with a generated ID
    pub fn new(total: f64, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            total,
            currency,
            billing_first_name: String::new(),
            billing_last_name: String::new(),
            billing_email: None,
            billing_phone: None,
            status: PaymentStatus::Pending,
            status_reason: None,
            transaction_id: None,
            captured_amount: None,
            attrs: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder: set billing name
    pub fn with_billing_name(
        mut self,
        first: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        self.billing_first_name = first.into();
        self.billing_last_name = last.into();
        self
    }

    /// Builder: set billing email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.billing_email = Some(email.into());
        self
    }

    /// Builder: set billing phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.billing_phone = Some(phone.into());
        self
    }

    /// Full billing name for display ("First Last", trimmed)
    pub fn billing_name(&self) -> String {
        format!("{} {}", self.billing_first_name, self.billing_last_name)
            .trim()
            .to_string()
    }

    /// Move to a new status, recording the reason.
    ///
    /// Fails with [`PaymentError::InvalidTransition`] when the lifecycle
    /// does not allow the move; the record is left untouched in that case.
    pub fn transition(
        &mut self,
        to: PaymentStatus,
        reason: Option<String>,
    ) -> PaymentResult<()> {
        if !self.status.can_transition(to) {
            return Err(PaymentError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.status_reason = reason;
        Ok(())
    }

    /// Get an attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|s| s.as_str())
    }

    /// Set an attribute that is immutable once written.
    ///
    /// Re-setting the same value is a no-op; a different value is an error.
    pub fn set_attr_once(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> PaymentResult<()> {
        let key = key.into();
        let value = value.into();
        match self.attrs.get(&key) {
            Some(existing) if *existing == value => Ok(()),
            Some(_) => Err(PaymentError::InvalidRequest(format!(
                "attribute already set: {}",
                key
            ))),
            None => {
                self.attrs.insert(key, value);
                Ok(())
            }
        }
    }
}

/// Contact metadata forwarded to the gateway with each order.
///
/// One typed value with two renderings: the structured form serialized
/// into the order-creation call, and [`ContactNotes::to_json`] for the
/// string field embedded in the checkout parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactNotes {
    pub email: String,
    pub phone: String,
}

impl ContactNotes {
    /// Build from a payment record; absent fields become empty strings
    pub fn from_record(payment: &PaymentRecord) -> Self {
        Self {
            email: payment.billing_email.clone().unwrap_or_default(),
            phone: payment.billing_phone.clone().unwrap_or_default(),
        }
    }

    /// Render as a JSON string for the checkout UI payload
    pub fn to_json(&self) -> PaymentResult<String> {
        serde_json::to_string(self).map_err(|e| PaymentError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        let mut payment = PaymentRecord::new(10.0, Currency::INR);
        assert_eq!(payment.status, PaymentStatus::Pending);

        payment.transition(PaymentStatus::Confirmed, None).unwrap();
        assert_eq!(payment.status, PaymentStatus::Confirmed);

        payment
            .transition(PaymentStatus::Refunded, None)
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_disallowed_transitions() {
        let mut payment = PaymentRecord::new(10.0, Currency::INR);
        payment
            .transition(PaymentStatus::Rejected, Some("Missing payment details".into()))
            .unwrap();

        // Rejected is terminal
        let err = payment.transition(PaymentStatus::Confirmed, None).unwrap_err();
        assert!(matches!(err, PaymentError::InvalidTransition { .. }));
        assert_eq!(payment.status, PaymentStatus::Rejected);
        assert_eq!(
            payment.status_reason.as_deref(),
            Some("Missing payment details")
        );
    }

    #[test]
    fn test_confirmed_to_error_allowed() {
        let mut payment = PaymentRecord::new(10.0, Currency::INR);
        payment.transition(PaymentStatus::Confirmed, None).unwrap();
        payment
            .transition(PaymentStatus::Error, Some("refund failed".into()))
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Error);
    }

    #[test]
    fn test_attr_once_is_immutable() {
        let mut payment = PaymentRecord::new(10.0, Currency::INR);
        payment.set_attr_once("order_id", "order_abc").unwrap();
        assert_eq!(payment.attr("order_id"), Some("order_abc"));

        // Same value again is fine
        payment.set_attr_once("order_id", "order_abc").unwrap();

        // Different value is not
        assert!(payment.set_attr_once("order_id", "order_xyz").is_err());
        assert_eq!(payment.attr("order_id"), Some("order_abc"));
    }

    #[test]
    fn test_billing_name_trims() {
        let payment = PaymentRecord::new(10.0, Currency::INR).with_billing_name("Asha", "");
        assert_eq!(payment.billing_name(), "Asha");

        let payment =
            PaymentRecord::new(10.0, Currency::INR).with_billing_name("Asha", "Iyer");
        assert_eq!(payment.billing_name(), "Asha Iyer");
    }

    #[test]
    fn test_contact_notes_renderings() {
        let payment = PaymentRecord::new(10.0, Currency::INR)
            .with_email("asha@example.com")
            .with_phone("+919999999999");
        let notes = ContactNotes::from_record(&payment);

        assert_eq!(notes.email, "asha@example.com");
        assert_eq!(
            notes.to_json().unwrap(),
            r#"{"email":"asha@example.com","phone":"+919999999999"}"#
        );

        // Absent fields render as empty strings, not nulls
        let bare = ContactNotes::from_record(&PaymentRecord::new(1.0, Currency::INR));
        assert_eq!(bare.to_json().unwrap(), r#"{"email":"","phone":""}"#);
    }
}
