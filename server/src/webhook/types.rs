//! Webhook Types
//!
//! Inbound payload structures and handler errors.

use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::dispatch::DispatchError;

/// Submodule object embedded in a submodule-update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmodulePayload {
    pub name: String,
    pub commit: String,
}

/// Recognized fields of an inbound webhook body.
///
/// Every field is optional: a well-formed payload that matches no field is
/// a valid no-op delivery, not a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    pub action: Option<String>,
    pub submodule: Option<SubmodulePayload>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub after: Option<String>,
}

/// Webhook handler errors.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Missing X-Hub-Signature-256 header")]
    MissingSignature,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

impl From<WebhookError> for (StatusCode, String) {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            WebhookError::MalformedBody(e) => {
                (StatusCode::BAD_REQUEST, format!("Malformed JSON body: {e}"))
            }
            WebhookError::Dispatch(e) => {
                tracing::error!("Dispatch error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing webhook".to_string(),
                )
            }
        }
    }
}
