//! # Payment Error Types
//!
//! Typed error handling for the razorgate payment adapter.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Confirmation payload is missing one or more required fields
    #[error("Missing payment details")]
    MissingPaymentDetails,

    /// Checkout signature did not match the expected HMAC
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Payment gateway rejected the call; message is the gateway's
    /// error description, verbatim
    #[error("{message}")]
    Provider { message: String },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    Network(String),

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Payment record not found
    #[error("Payment not found: {payment_id}")]
    NotFound { payment_id: String },

    /// Disallowed status transition
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::MissingPaymentDetails => 400,
            PaymentError::SignatureVerificationFailed => 401,
            PaymentError::Provider { .. } => 502,
            PaymentError::Network(_) => 503,
            PaymentError::Storage(_) => 500,
            PaymentError::NotFound { .. } => 404,
            PaymentError::InvalidTransition { .. } => 409,
            PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_messages() {
        assert_eq!(
            PaymentError::MissingPaymentDetails.to_string(),
            "Missing payment details"
        );
        assert_eq!(
            PaymentError::SignatureVerificationFailed.to_string(),
            "Signature verification failed"
        );
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        let err = PaymentError::Provider {
            message: "The amount must be atleast INR 1.00".to_string(),
        };
        assert_eq!(err.to_string(), "The amount must be atleast INR 1.00");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::MissingPaymentDetails.status_code(), 400);
        assert_eq!(PaymentError::SignatureVerificationFailed.status_code(), 401);
        assert_eq!(
            PaymentError::NotFound {
                payment_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            PaymentError::Provider {
                message: "bad".into()
            }
            .status_code(),
            502
        );
    }
}
