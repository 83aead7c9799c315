//! Webhook Event Classification
//!
//! Maps an inbound GitHub webhook to the dispatch event it should trigger.

use super::types::WebhookPayload;

/// Git ref that qualifies a push for deployment.
const MAIN_REF: &str = "refs/heads/main";

/// Dispatch event types sent to the repository-dispatch API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchEventType {
    /// The `cv` submodule advanced to a new commit.
    CvSubmoduleUpdate,
    /// A commit landed on the main branch.
    DeployOnPush,
}

impl DispatchEventType {
    /// Parse from the wire string (e.g., `"deploy-on-push"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "cv-submodule-update" => Some(Self::CvSubmoduleUpdate),
            "deploy-on-push" => Some(Self::DeployOnPush),
            _ => None,
        }
    }

    /// Convert to the dash-separated wire string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CvSubmoduleUpdate => "cv-submodule-update",
            Self::DeployOnPush => "deploy-on-push",
        }
    }
}

impl std::fmt::Display for DispatchEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification outcome for one inbound webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// `action == "updated"` with a submodule object in the payload.
    SubmoduleUpdate { submodule: String, commit: String },
    /// A `push` event for the main branch.
    PushToMain { git_ref: String, commit: String },
    /// Payload matched no rule; a valid outcome, not an error.
    NoAction,
}

/// Classify an inbound webhook by its event-kind header and payload shape.
///
/// Rules are checked in order: the submodule rule wins should a payload
/// ever satisfy both.
pub fn classify(event_kind: Option<&str>, payload: &WebhookPayload) -> Decision {
    if payload.action.as_deref() == Some("updated") {
        if let Some(submodule) = &payload.submodule {
            return Decision::SubmoduleUpdate {
                submodule: submodule.name.clone(),
                commit: submodule.commit.clone(),
            };
        }
    }

    if event_kind == Some("push") {
        if let (Some(git_ref), Some(after)) = (&payload.git_ref, &payload.after) {
            if git_ref == MAIN_REF {
                return Decision::PushToMain {
                    git_ref: git_ref.clone(),
                    commit: after.clone(),
                };
            }
        }
    }

    Decision::NoAction
}
