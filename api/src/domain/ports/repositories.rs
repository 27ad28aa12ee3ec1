//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (SQLite for members, an
//! append-only JSON file for match results).

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use crate::domain::entities::{Member, NewMember, ResultBatch};
use crate::error::DomainError;

/// Repository for league members
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a member by GitHub username
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, DomainError>;

    /// All members, oldest first
    async fn find_all(&self) -> Result<Vec<Member>, DomainError>;

    /// Members whose onboarding pipeline has not finished yet
    /// (no welcome notification recorded)
    async fn find_unprovisioned(&self) -> Result<Vec<Member>, DomainError>;

    /// Register a member on first sign-in. Returns the existing row
    /// unchanged when the username is already registered.
    async fn upsert(&self, member: &NewMember) -> Result<Member, DomainError>;

    /// Record that the member has accepted the org invitation
    async fn mark_joined(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Record that the member's bot repository exists
    async fn mark_provisioned(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Record that the welcome email went out
    async fn mark_notified(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError>;
}

/// Append-only store for submitted match-result batches
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Append one batch to the history
    async fn append(&self, batch: &ResultBatch) -> Result<(), DomainError>;

    /// Full history in submission order
    async fn history(&self) -> Result<Vec<ResultBatch>, DomainError>;
}
