//! # pay-razorpay
//!
//! Razorpay payment provider for razorgate-rs.
//!
//! The provider maps a host-owned payment record onto the Razorpay
//! Orders and Refunds APIs and verifies checkout callbacks locally:
//!
//! 1. **create_checkout** - reserves an order with auto-capture on and
//!    returns the parameters the browser-side checkout widget needs
//! 2. **confirm_checkout** - recomputes the HMAC checkout signature and
//!    settles the payment record on a match
//! 3. **capture** - no-op (orders auto-capture at payment time)
//! 4. **refund** - reverses a captured payment, fully or partially
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_core::{Currency, MemoryRepository, PaymentProvider, PaymentRecord};
//! use pay_razorpay::RazorpayProvider;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryRepository::new());
//! let provider = RazorpayProvider::from_env(store)?;
//!
//! let mut payment = PaymentRecord::new(500.0, Currency::INR)
//!     .with_email("payer@example.com");
//!
//! // Open the checkout widget with these parameters
//! let params = provider.create_checkout(&mut payment).await?;
//!
//! // After the payer completes payment, the widget posts the payload back
//! provider.confirm_checkout(&mut payment, &payload).await?;
//! ```

pub mod config;
pub mod provider;
pub mod signature;

// Re-exports
pub use config::RazorpayConfig;
pub use provider::{
    CheckoutOrder, RazorpayProvider, RefundRecord, CHECKOUT_TEMPLATE, CONFIRMATION_FIELDS,
    ORDER_ID_ATTR,
};
pub use signature::{checkout_signature, verify_checkout_signature};
