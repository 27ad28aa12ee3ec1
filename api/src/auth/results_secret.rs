//! Shared-secret authentication for result submission

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::AppState;

/// SHA-256 hex digest of a secret.
///
/// Both sides of the check are hashed, so the comparison runs over
/// fixed-length digests rather than the raw secrets.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn extract_secret(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("X-Results-Secret")
        .and_then(|h| h.to_str().ok())
}

/// Authentication middleware for the result-submission route
///
/// Rejects the request unless the X-Results-Secret header matches the
/// configured shared secret.
pub async fn results_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // An unset secret disables ingestion instead of matching everything.
    if state.config.results_secret.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let secret = extract_secret(&request).ok_or(AppError::Unauthorized)?;

    if hash_secret(secret) != state.results_secret_hash {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
