//! Member status handler

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::domain::entities::Member;
use crate::error::AppError;
use crate::AppState;

/// Member as reported by the API, with derived pipeline flags
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub github_username: String,
    pub joined_org: bool,
    pub repo_provisioned: bool,
    pub repo_name: Option<String>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        let repo_name = member
            .repo_provisioned_at
            .is_some()
            .then(|| member.repo_name());
        MemberResponse {
            joined_org: member.joined_org_at.is_some(),
            repo_provisioned: member.repo_provisioned_at.is_some(),
            github_username: member.github_username,
            repo_name,
        }
    }
}

/// GET /members/:username
pub async fn get_member(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state
        .onboarding_service
        .member_status(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("member '{}'", username)))?;

    Ok(Json(member.into()))
}
