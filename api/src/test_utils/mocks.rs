//! In-memory port implementations for tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Member, NewMember, ResultBatch};
use crate::domain::ports::{
    GitHubClient, GitHubUser, Mailer, MemberRepository, OrgInvitation, OutgoingMail, ResultStore,
};
use crate::error::{DomainError, GitHubError, MailError};

/// In-memory MemberRepository
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<Vec<Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(self, member: Member) -> Self {
        self.members.lock().unwrap().push(member);
        self
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.github_username == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Member>, DomainError> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn find_unprovisioned(&self) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.notified_at.is_none())
            .cloned()
            .collect())
    }

    async fn upsert(&self, member: &NewMember) -> Result<Member, DomainError> {
        let mut members = self.members.lock().unwrap();
        if let Some(existing) = members
            .iter()
            .find(|m| m.github_username == member.github_username)
        {
            return Ok(existing.clone());
        }

        let created = Member {
            id: Uuid::new_v4(),
            github_username: member.github_username.clone(),
            email: member.email.clone(),
            name: member.name.clone(),
            created_at: Utc::now(),
            joined_org_at: None,
            repo_provisioned_at: None,
            notified_at: None,
        };
        members.push(created.clone());
        Ok(created)
    }

    async fn mark_joined(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.set(username, |m| m.joined_org_at = Some(at))
    }

    async fn mark_provisioned(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.set(username, |m| m.repo_provisioned_at = Some(at))
    }

    async fn mark_notified(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.set(username, |m| m.notified_at = Some(at))
    }
}

impl InMemoryMemberRepository {
    fn set(&self, username: &str, f: impl FnOnce(&mut Member)) -> Result<(), DomainError> {
        let mut members = self.members.lock().unwrap();
        let member = members
            .iter_mut()
            .find(|m| m.github_username == username)
            .ok_or_else(|| DomainError::NotFound(format!("member '{}'", username)))?;
        f(member);
        Ok(())
    }
}

/// In-memory ResultStore
#[derive(Default)]
pub struct InMemoryResultStore {
    batches: Mutex<Vec<ResultBatch>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn append(&self, batch: &ResultBatch) -> Result<(), DomainError> {
        self.batches.lock().unwrap().push(batch.clone());
        Ok(())
    }

    async fn history(&self) -> Result<Vec<ResultBatch>, DomainError> {
        Ok(self.batches.lock().unwrap().clone())
    }
}

/// Configurable mock GitHubClient
///
/// Records invitations, generated repos, and collaborator grants so
/// tests can assert on the calls that were made.
#[derive(Default)]
pub struct MockGitHubClient {
    user: Mutex<Option<GitHubUser>>,
    org_members: Mutex<Vec<String>>,
    pending: Mutex<Vec<OrgInvitation>>,
    invited: Mutex<Vec<String>>,
    generated: Mutex<Vec<String>>,
    collaborators: Mutex<Vec<(String, String)>>,
    fail_provisioning: Mutex<bool>,
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// User that fetch_user will return
    pub fn with_user(self, login: &str, email: Option<&str>) -> Self {
        *self.user.lock().unwrap() = Some(GitHubUser {
            login: login.to_string(),
            email: email.map(String::from),
            name: None,
        });
        self
    }

    pub fn with_org_member(self, username: &str) -> Self {
        self.org_members.lock().unwrap().push(username.to_string());
        self
    }

    /// Make generate_from_template fail until cleared
    pub fn with_failing_provisioning(self) -> Self {
        *self.fail_provisioning.lock().unwrap() = true;
        self
    }

    pub fn clear_provisioning_failure(&self) {
        *self.fail_provisioning.lock().unwrap() = false;
    }

    pub fn set_pending(&self, logins: Vec<&str>) {
        *self.pending.lock().unwrap() = logins
            .into_iter()
            .map(|l| OrgInvitation {
                login: Some(l.to_string()),
                email: None,
            })
            .collect();
    }

    pub fn invited(&self) -> Vec<String> {
        self.invited.lock().unwrap().clone()
    }

    pub fn generated_repos(&self) -> Vec<String> {
        self.generated.lock().unwrap().clone()
    }

    pub fn collaborators(&self) -> Vec<(String, String)> {
        self.collaborators.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubClient for MockGitHubClient {
    async fn exchange_code(&self, code: &str) -> Result<String, GitHubError> {
        if code.is_empty() {
            return Err(GitHubError::OAuth("empty code".to_string()));
        }
        Ok(format!("token-{}", code))
    }

    async fn fetch_user(&self, _access_token: &str) -> Result<GitHubUser, GitHubError> {
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or(GitHubError::Unauthorized)
    }

    async fn is_org_member(&self, username: &str) -> Result<bool, GitHubError> {
        Ok(self
            .org_members
            .lock()
            .unwrap()
            .iter()
            .any(|m| m == username))
    }

    async fn list_pending_invitations(&self) -> Result<Vec<OrgInvitation>, GitHubError> {
        Ok(self.pending.lock().unwrap().clone())
    }

    async fn invite_user(&self, username: &str) -> Result<(), GitHubError> {
        self.invited.lock().unwrap().push(username.to_string());
        Ok(())
    }

    async fn generate_from_template(&self, repo_name: &str) -> Result<(), GitHubError> {
        if *self.fail_provisioning.lock().unwrap() {
            return Err(GitHubError::Api {
                status: 503,
                message: "provisioning unavailable".to_string(),
            });
        }
        self.generated.lock().unwrap().push(repo_name.to_string());
        Ok(())
    }

    async fn add_collaborator(&self, repo_name: &str, username: &str) -> Result<(), GitHubError> {
        self.collaborators
            .lock()
            .unwrap()
            .push((repo_name.to_string(), username.to_string()));
        Ok(())
    }
}

/// Mock Mailer that records every send
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Api {
                status: 500,
                message: "mail gateway down".to_string(),
            });
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
