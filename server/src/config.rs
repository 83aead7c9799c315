//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Gateway configuration loaded from environment variables.
///
/// Built once at startup and never mutated; handlers see it through
/// `Arc<Config>`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000")
    pub bind_address: String,

    /// Shared secret for webhook signature verification
    pub webhook_secret: String,

    /// GitHub API token (needs permission to create dispatch events)
    pub github_token: String,

    /// Owner of the repository receiving dispatch events
    pub repo_owner: String,

    /// Name of the repository receiving dispatch events
    pub repo_name: String,

    /// Base URL of the GitHub API
    pub github_api_base: String,

    /// Outbound dispatch call timeout in seconds (default: 10)
    pub dispatch_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            webhook_secret: env::var("WEBHOOK_SECRET").context("WEBHOOK_SECRET must be set")?,
            github_token: env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?,
            repo_owner: env::var("REPO_OWNER").context("REPO_OWNER must be set")?,
            repo_name: env::var("REPO_NAME").context("REPO_NAME must be set")?,
            github_api_base: env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| "https://api.github.com".into()),
            dispatch_timeout_secs: env::var("DISPATCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".into(),
            webhook_secret: "test-secret".into(),
            github_token: "test-token".into(),
            repo_owner: "acme".into(),
            repo_name: "deploy-target".into(),
            github_api_base: "https://api.github.com".into(),
            dispatch_timeout_secs: 10,
        }
    }
}
