//! Background provisioner
//!
//! Polls the GitHub organization for members who accepted their
//! invitation and walks each one through the rest of the pipeline:
//! record the join, generate a bot repository from the template, grant
//! admin access, and send the welcome email. One member failing never
//! stops the others; the failed step is retried on the next poll.

use std::sync::Arc;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;

use crate::domain::entities::Member;
use crate::domain::ports::{GitHubClient, Mailer, MemberRepository, OutgoingMail};
use crate::error::{AppError, DomainError};

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // GitHub login rules: alphanumeric and hyphens, no leading or
    // trailing hyphen, at most 39 characters.
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,37}[A-Za-z0-9])?$").unwrap()
});

/// Background worker that finishes member onboarding
pub struct Provisioner<MR, GH, M>
where
    MR: MemberRepository,
    GH: GitHubClient,
    M: Mailer,
{
    members: Arc<MR>,
    github: Arc<GH>,
    mailer: Option<Arc<M>>,
    org_name: String,
    mail_from: String,
    interval: Duration,
}

impl<MR, GH, M> Provisioner<MR, GH, M>
where
    MR: MemberRepository,
    GH: GitHubClient,
    M: Mailer,
{
    pub fn new(
        members: Arc<MR>,
        github: Arc<GH>,
        mailer: Option<Arc<M>>,
        org_name: String,
        mail_from: String,
        interval: Duration,
    ) -> Self {
        Self {
            members,
            github,
            mailer,
            org_name,
            mail_from,
            interval,
        }
    }

    /// Poll forever. Meant to be spawned as a task next to the server.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                tracing::error!("provisioning pass failed: {}", e);
            }
        }
    }

    /// One pass over every member with unfinished onboarding.
    pub async fn tick(&self) -> Result<(), AppError> {
        let pending = self.members.find_unprovisioned().await?;
        if pending.is_empty() {
            return Ok(());
        }

        tracing::debug!(count = pending.len(), "polling unfinished members");

        for member in pending {
            if let Err(e) = self.advance(&member).await {
                tracing::warn!(
                    username = %member.github_username,
                    "onboarding step failed, will retry next poll: {}",
                    e
                );
            }
        }
        Ok(())
    }

    /// Push one member as far through the pipeline as currently possible.
    async fn advance(&self, member: &Member) -> Result<(), AppError> {
        let username = &member.github_username;
        let mut member = member.clone();

        if member.joined_org_at.is_none() {
            if !self.github.is_org_member(username).await? {
                // Invitation not accepted yet, nothing to do.
                return Ok(());
            }
            let now = Utc::now();
            self.members.mark_joined(username, now).await?;
            member.joined_org_at = Some(now);
            tracing::info!(username = %username, "member joined the organization");
        }

        if member.awaiting_repo() {
            if !USERNAME_RE.is_match(username) {
                return Err(AppError::Domain(DomainError::Validation(format!(
                    "username '{}' is not a valid repository prefix",
                    username
                ))));
            }

            let repo = member.repo_name();
            self.github.generate_from_template(&repo).await?;
            self.github.add_collaborator(&repo, username).await?;

            let now = Utc::now();
            self.members.mark_provisioned(username, now).await?;
            member.repo_provisioned_at = Some(now);
            tracing::info!(username = %username, repo = %repo, "bot repository provisioned");
        }

        if member.awaiting_notification() {
            self.notify(&member).await?;
        }

        Ok(())
    }

    async fn notify(&self, member: &Member) -> Result<(), AppError> {
        let username = &member.github_username;

        if let (Some(mailer), Some(email)) = (&self.mailer, &member.email) {
            let repo_url = format!("https://github.com/{}/{}", self.org_name, member.repo_name());
            mailer
                .send(&OutgoingMail {
                    to: email.clone(),
                    subject: format!("Welcome to {}", self.org_name),
                    body: format!(
                        "Hi {},\n\nYour bot repository is ready: {}\n\n\
                         Push your bot and it will enter the next round of matches.\n\n\
                         {}",
                        member.name.as_deref().unwrap_or(username),
                        repo_url,
                        self.mail_from,
                    ),
                })
                .await?;
            tracing::info!(username = %username, "welcome email sent");
        }

        // Members without an address, or deployments without a mail
        // gateway, complete the pipeline silently.
        self.members.mark_notified(username, Utc::now()).await?;
        Ok(())
    }
}
