//! Repository Dispatch Client
//!
//! Sends `repository_dispatch` events to the GitHub Actions API, at most
//! one call per accepted webhook. Failures are reported to the caller,
//! never retried.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::events::{Decision, DispatchEventType};
use crate::config::Config;

/// Errors from the repository-dispatch call.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

/// Outcome of handling one classification decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One dispatch call was sent and accepted.
    Dispatched(DispatchEventType),
    /// The decision was `NoAction`; nothing was sent.
    Skipped,
}

/// Client for the GitHub repository-dispatch API.
///
/// Holds a pooled HTTP client with a bounded request timeout; a hung
/// dispatch call surfaces as a timeout failure rather than stalling the
/// request forever.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: String,
}

impl Dispatcher {
    /// Build a dispatcher from the gateway configuration.
    pub fn new(config: &Config) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.dispatch_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.github_api_base.trim_end_matches('/').to_string(),
            owner: config.repo_owner.clone(),
            repo: config.repo_name.clone(),
            token: config.github_token.clone(),
        })
    }

    /// Send the dispatch call for a classification decision.
    ///
    /// `NoAction` short-circuits without any network traffic.
    pub async fn send(&self, decision: &Decision) -> Result<Outcome, DispatchError> {
        let (event_type, client_payload) = match decision {
            Decision::SubmoduleUpdate { submodule, commit } => (
                DispatchEventType::CvSubmoduleUpdate,
                json!({ "submodule": submodule, "commit": commit }),
            ),
            Decision::PushToMain { git_ref, commit } => (
                DispatchEventType::DeployOnPush,
                json!({ "ref": git_ref, "commit": commit }),
            ),
            Decision::NoAction => return Ok(Outcome::Skipped),
        };

        let url = format!(
            "{}/repos/{}/{}/dispatches",
            self.api_base, self.owner, self.repo
        );
        let body = json!({
            "event_type": event_type.as_str(),
            "client_payload": client_payload,
        });

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            // GitHub rejects requests without a User-Agent
            .header(
                "User-Agent",
                concat!("hookrelay/", env!("CARGO_PKG_VERSION")),
            )
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DispatchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            event_type = %event_type,
            owner = %self.owner,
            repo = %self.repo,
            "Dispatch event sent"
        );
        Ok(Outcome::Dispatched(event_type))
    }
}
