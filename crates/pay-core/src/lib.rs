//! # pay-core
//!
//! Core types and ports for the razorgate payment adapter.
//!
//! This crate provides:
//! - `PaymentProvider` trait for gateway adapter implementations
//! - `PaymentRecord` and its one-directional status lifecycle
//! - `PaymentRepository` persistence port (with an in-memory impl)
//! - `ConfirmationPayload` and `CheckoutParameters` checkout values
//! - `Currency` with per-currency minor-unit conversion
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{Currency, PaymentProvider, PaymentRecord};
//!
//! // Host creates the record, the adapter reserves the gateway order
//! let mut payment = PaymentRecord::new(500.0, Currency::INR)
//!     .with_email("payer@example.com");
//!
//! let params = provider.create_checkout(&mut payment).await?;
//! // Render the checkout UI from `params`, then on callback:
//! provider.confirm_checkout(&mut payment, &payload).await?;
//! ```

pub mod currency;
pub mod error;
pub mod payment;
pub mod provider;
pub mod store;

// Re-exports for convenience
pub use currency::Currency;
pub use error::{PaymentError, PaymentResult};
pub use payment::{ContactNotes, PaymentRecord, PaymentStatus};
pub use provider::{
    BoxedPaymentProvider, CheckoutParameters, CheckoutPrefill, CheckoutTheme,
    ConfirmationPayload, PaymentProvider,
};
pub use store::{BoxedPaymentRepository, MemoryRepository, PaymentRepository};
