//! # pay-api
//!
//! HTTP API layer for razorgate-rs.
//!
//! This crate plays the host application's role around the payment
//! adapter: it owns payment records and exposes the checkout flow over
//! REST. Callback payloads are normalized at the boundary (JSON body,
//! urlencoded form, or query parameters) before the provider sees them.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/payments` | Create payment record |
//! | GET | `/api/v1/payments/:id` | Fetch payment record |
//! | POST | `/api/v1/payments/:id/checkout` | Reserve gateway order |
//! | POST | `/api/v1/payments/:id/callback` | Verify checkout callback |
//! | POST | `/api/v1/payments/:id/capture` | Capture (trivial) |
//! | POST | `/api/v1/payments/:id/refund` | Refund |

pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
