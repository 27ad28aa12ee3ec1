//! Onboarding service
//!
//! Handles the GitHub OAuth callback: registers the member and makes
//! sure an organization invitation is on its way.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Member, NewMember};
use crate::domain::ports::{GitHubClient, MemberRepository};
use crate::error::AppError;

/// Where the member stands with respect to the org invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InviteStatus {
    #[serde(rename = "invitation sent")]
    InvitationSent,
    #[serde(rename = "already invited, invite pending")]
    InvitePending,
    #[serde(rename = "you are a member")]
    AlreadyMember,
}

/// Result of a completed OAuth sign-in
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub member: Member,
    pub invite_status: InviteStatus,
}

/// Service for member sign-in and org invitations
pub struct OnboardingService<MR, GH>
where
    MR: MemberRepository,
    GH: GitHubClient,
{
    members: Arc<MR>,
    github: Arc<GH>,
}

impl<MR, GH> OnboardingService<MR, GH>
where
    MR: MemberRepository,
    GH: GitHubClient,
{
    pub fn new(members: Arc<MR>, github: Arc<GH>) -> Self {
        Self { members, github }
    }

    /// Finish the OAuth flow for an authorization code.
    ///
    /// Exchanges the code, fetches the user, registers them (idempotent),
    /// and ensures an org invitation exists. Re-running the flow for a
    /// known member never re-invites or duplicates the row.
    pub async fn complete_login(&self, code: &str) -> Result<LoginOutcome, AppError> {
        let token = self.github.exchange_code(code).await?;
        let user = self.github.fetch_user(&token).await?;

        let member = self
            .members
            .upsert(&NewMember {
                github_username: user.login.clone(),
                email: user.email.clone(),
                name: user.name.clone(),
            })
            .await?;

        let invite_status = self.ensure_invited(&user.login, user.email.as_deref()).await?;

        tracing::info!(
            username = %member.github_username,
            status = ?invite_status,
            "completed sign-in"
        );

        Ok(LoginOutcome {
            member,
            invite_status,
        })
    }

    /// Invite the user into the org unless they are already in, or an
    /// invitation is already pending for their login or email.
    async fn ensure_invited(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<InviteStatus, AppError> {
        if self.github.is_org_member(username).await? {
            return Ok(InviteStatus::AlreadyMember);
        }

        let pending = self.github.list_pending_invitations().await?;
        let already_invited = pending.iter().any(|inv| {
            inv.login.as_deref() == Some(username)
                || (email.is_some() && inv.email.as_deref() == email)
        });
        if already_invited {
            return Ok(InviteStatus::InvitePending);
        }

        self.github.invite_user(username).await?;
        Ok(InviteStatus::InvitationSent)
    }

    /// Look up a member by GitHub username
    pub async fn member_status(&self, username: &str) -> Result<Option<Member>, AppError> {
        Ok(self.members.find_by_username(username).await?)
    }
}
