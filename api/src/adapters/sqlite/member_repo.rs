//! SQLite adapter for MemberRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Member, NewMember};
use crate::domain::ports::MemberRepository;
use crate::entity::members;
use crate::error::DomainError;

/// SQLite implementation of MemberRepository
pub struct SqliteMemberRepository {
    db: DatabaseConnection,
}

impl SqliteMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, DomainError> {
        let result = members::Entity::find()
            .filter(members::Column::GithubUsername.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Member>, DomainError> {
        let results = members::Entity::find()
            .order_by_asc(members::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_unprovisioned(&self) -> Result<Vec<Member>, DomainError> {
        let results = members::Entity::find()
            .filter(members::Column::NotifiedAt.is_null())
            .order_by_asc(members::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn upsert(&self, member: &NewMember) -> Result<Member, DomainError> {
        if let Some(existing) = self.find_by_username(&member.github_username).await? {
            return Ok(existing);
        }

        let model = members::ActiveModel {
            id: Set(Uuid::new_v4()),
            github_username: Set(member.github_username.clone()),
            email: Set(member.email.clone()),
            name: Set(member.name.clone()),
            created_at: Set(Utc::now().fixed_offset()),
            joined_org_at: Set(None),
            repo_provisioned_at: Set(None),
            notified_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn mark_joined(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.set_timestamp(username, members::Column::JoinedOrgAt, at)
            .await
    }

    async fn mark_provisioned(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.set_timestamp(username, members::Column::RepoProvisionedAt, at)
            .await
    }

    async fn mark_notified(&self, username: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.set_timestamp(username, members::Column::NotifiedAt, at)
            .await
    }
}

impl SqliteMemberRepository {
    async fn set_timestamp(
        &self,
        username: &str,
        column: members::Column,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let existing = members::Entity::find()
            .filter(members::Column::GithubUsername.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("member '{}'", username)))?;

        let mut model: members::ActiveModel = existing.into();
        let value = Set(Some(at.fixed_offset()));
        match column {
            members::Column::JoinedOrgAt => model.joined_org_at = value,
            members::Column::RepoProvisionedAt => model.repo_provisioned_at = value,
            members::Column::NotifiedAt => model.notified_at = value,
            _ => {
                return Err(DomainError::Internal(
                    "unsupported timestamp column".to_string(),
                ))
            }
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Member {
            id: model.id,
            github_username: model.github_username,
            email: model.email,
            name: model.name,
            created_at: model.created_at.with_timezone(&Utc),
            joined_org_at: model.joined_org_at.map(|dt| dt.with_timezone(&Utc)),
            repo_provisioned_at: model.repo_provisioned_at.map(|dt| dt.with_timezone(&Utc)),
            notified_at: model.notified_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
