//! Sign-in handlers
//!
//! GET /auth/login redirects the browser to GitHub's consent page;
//! GET /auth/github/callback finishes the flow with the returned code.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::InviteStatus;
use crate::error::AppError;
use crate::AppState;

/// Query parameters GitHub sends to the callback
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// Response for a completed sign-in
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub username: String,
    pub invite_status: InviteStatus,
}

/// GET /auth/login
///
/// Redirect to GitHub's OAuth consent page.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let client_id = state
        .config
        .github_client_id
        .as_ref()
        .ok_or_else(|| AppError::Internal("GitHub OAuth not configured".to_string()))?;

    let url = format!(
        "https://github.com/login/oauth/authorize?client_id={}&redirect_uri={}&scope=read:user%20user:email",
        client_id,
        urlencoding::encode(&state.config.github_redirect_uri),
    );

    Ok(Redirect::temporary(&url))
}

/// GET /auth/github/callback
///
/// Complete the OAuth flow with the authorization code from GitHub.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<CallbackResponse>, AppError> {
    let code = query
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let outcome = state.onboarding_service.complete_login(&code).await?;

    Ok(Json(CallbackResponse {
        username: outcome.member.github_username,
        invite_status: outcome.invite_status,
    }))
}
