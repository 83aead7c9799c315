//! Webhook HTTP Handler
//!
//! Receives GitHub webhook deliveries, verifies the HMAC signature over
//! the raw request bytes, and forwards the matching dispatch event.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use tracing::{info, instrument, warn};

use super::dispatch::Outcome;
use super::events::classify;
use super::signing;
use super::types::{WebhookError, WebhookPayload};
use crate::api::AppState;

/// Header carrying the HMAC-SHA256 signature of the request body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Header naming the GitHub event kind (e.g. `push`).
pub const EVENT_HEADER: &str = "x-github-event";

/// POST /webhook
///
/// The body arrives as raw bytes and verification runs over exactly those
/// bytes, before any parsing. Nothing past the signature check executes
/// for an unauthenticated delivery.
#[instrument(skip_all)]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    if !signing::verify_signature(&state.config.webhook_secret, &body, signature) {
        warn!("Webhook rejected: signature mismatch");
        return Err(WebhookError::InvalidSignature.into());
    }

    let payload: WebhookPayload =
        serde_json::from_slice(&body).map_err(WebhookError::MalformedBody)?;

    let event_kind = headers.get(EVENT_HEADER).and_then(|v| v.to_str().ok());
    let decision = classify(event_kind, &payload);

    match state
        .dispatcher
        .send(&decision)
        .await
        .map_err(WebhookError::Dispatch)?
    {
        Outcome::Dispatched(event_type) => {
            info!(%event_type, "Webhook processed");
            Ok((StatusCode::OK, "Webhook processed successfully"))
        }
        Outcome::Skipped => {
            info!("Webhook received, no matching rule");
            Ok((StatusCode::OK, "Webhook received, but no action taken"))
        }
    }
}
