//! GitHub client port trait
//!
//! Defines the interface for the GitHub REST and OAuth APIs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GitHubError;

/// GitHub user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A pending organization invitation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgInvitation {
    pub login: Option<String>,
    pub email: Option<String>,
}

/// Port trait for GitHub API operations
#[async_trait]
pub trait GitHubClient: Send + Sync {
    // OAuth

    /// Exchange an OAuth authorization code for an access token
    async fn exchange_code(&self, code: &str) -> Result<String, GitHubError>;

    /// Fetch the user the access token belongs to
    async fn fetch_user(&self, access_token: &str) -> Result<GitHubUser, GitHubError>;

    // Organization membership

    /// Check whether a user is a member of the organization
    async fn is_org_member(&self, username: &str) -> Result<bool, GitHubError>;

    /// List pending invitations to the organization
    async fn list_pending_invitations(&self) -> Result<Vec<OrgInvitation>, GitHubError>;

    /// Invite a user into the organization
    async fn invite_user(&self, username: &str) -> Result<(), GitHubError>;

    // Repository provisioning

    /// Generate a new repository from the template repo
    async fn generate_from_template(&self, repo_name: &str) -> Result<(), GitHubError>;

    /// Grant a user admin access to a repository in the organization
    async fn add_collaborator(&self, repo_name: &str, username: &str) -> Result<(), GitHubError>;
}
