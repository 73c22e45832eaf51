//! # Confirmation Payload Extraction
//!
//! The checkout widget reports back as a JSON body, an urlencoded form,
//! or query parameters depending on the integration. All three shapes
//! normalize to one `ConfirmationPayload` here, so the provider never
//! inspects the transport.

use crate::handlers::ErrorResponse;
use axum::extract::{Form, FromRequest, FromRequestParts, Query, Request};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::Json;
use pay_core::ConfirmationPayload;
use serde::Deserialize;

/// Confirmation fields as posted by the checkout widget.
///
/// Every field is optional at the transport level; absent fields become
/// empty strings and completeness is judged by the provider.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfirmation {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

impl From<RawConfirmation> for ConfirmationPayload {
    fn from(raw: RawConfirmation) -> Self {
        ConfirmationPayload::new(
            raw.razorpay_order_id.unwrap_or_default(),
            raw.razorpay_payment_id.unwrap_or_default(),
            raw.razorpay_signature.unwrap_or_default(),
        )
    }
}

/// Extractor producing the normalized confirmation payload
pub struct CallbackPayload(pub ConfirmationPayload);

impl<S> FromRequest<S> for CallbackPayload
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let raw = if content_type.starts_with("application/json") {
            let Json(raw) = Json::<RawConfirmation>::from_request(req, state)
                .await
                .map_err(|e| bad_payload(e.to_string()))?;
            raw
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(raw) = Form::<RawConfirmation>::from_request(req, state)
                .await
                .map_err(|e| bad_payload(e.to_string()))?;
            raw
        } else {
            let (mut parts, _body) = req.into_parts();
            let Query(raw) = Query::<RawConfirmation>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| bad_payload(e.to_string()))?;
            raw
        };

        Ok(CallbackPayload(raw.into()))
    }
}

fn bad_payload(details: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Malformed callback payload", 400).with_details(details)),
    )
}
