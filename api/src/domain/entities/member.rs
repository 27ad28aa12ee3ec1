use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A league member: a GitHub user who signed in through the OAuth flow.
///
/// The onboarding timestamps advance monotonically as the member moves
/// through the pipeline: signed up, accepted the org invitation, got a
/// bot repository, got the welcome email. A `None` means that step has
/// not happened yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub github_username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub joined_org_at: Option<DateTime<Utc>>,
    pub repo_provisioned_at: Option<DateTime<Utc>>,
    pub notified_at: Option<DateTime<Utc>>,
}

impl Member {
    /// True once the member has accepted the org invitation but still
    /// lacks a bot repository.
    pub fn awaiting_repo(&self) -> bool {
        self.joined_org_at.is_some() && self.repo_provisioned_at.is_none()
    }

    /// True once the member has a repository but no welcome email yet.
    pub fn awaiting_notification(&self) -> bool {
        self.repo_provisioned_at.is_some() && self.notified_at.is_none()
    }

    /// Name of the bot repository provisioned for this member.
    pub fn repo_name(&self) -> String {
        format!("{}-bot", self.github_username)
    }
}

/// Data required to register a member on first sign-in.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub github_username: String,
    pub email: Option<String>,
    pub name: Option<String>,
}
