//! GitHub API client implementation
//!
//! Talks to github.com with an org admin token for membership and
//! provisioning, and to the OAuth token endpoint for sign-in.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::ports::{GitHubClient, GitHubUser, OrgInvitation};
use crate::error::GitHubError;

const API_BASE: &str = "https://api.github.com";
const OAUTH_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("botleague-api/", env!("CARGO_PKG_VERSION"));

/// Implementation of the GitHub API client
pub struct GitHubClientImpl {
    http: Client,
    org: String,
    admin_token: String,
    template_repo: String,
    client_id: String,
    client_secret: String,
}

impl GitHubClientImpl {
    pub fn new(
        org: String,
        admin_token: String,
        template_repo: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            http: Client::new(),
            org,
            admin_token,
            template_repo,
            client_id,
            client_secret,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", API_BASE, path)
    }

    fn admin_request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.api_url(path))
            .bearer_auth(&self.admin_token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GitHubError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| GitHubError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(GitHubError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(GitHubError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), GitHubError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 {
            Err(GitHubError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(GitHubError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Request and response types for the GitHub API
#[derive(Serialize)]
struct ExchangeCodeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct ExchangeCodeResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}

#[derive(Serialize)]
struct InviteRequest<'a> {
    role: &'a str,
}

#[derive(Serialize)]
struct GenerateRepoRequest<'a> {
    owner: &'a str,
    name: &'a str,
    private: bool,
}

#[derive(Serialize)]
struct AddCollaboratorRequest<'a> {
    permission: &'a str,
}

#[async_trait]
impl GitHubClient for GitHubClientImpl {
    async fn exchange_code(&self, code: &str) -> Result<String, GitHubError> {
        let response = self
            .http
            .post(OAUTH_TOKEN_URL)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .form(&ExchangeCodeRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                code,
            })
            .send()
            .await?;

        let body: ExchangeCodeResponse = self.handle_response(response).await?;
        body.access_token.ok_or_else(|| {
            GitHubError::OAuth(
                body.error_description
                    .unwrap_or_else(|| "no access token in response".to_string()),
            )
        })
    }

    async fn fetch_user(&self, access_token: &str) -> Result<GitHubUser, GitHubError> {
        let response = self
            .http
            .get(self.api_url("/user"))
            .bearer_auth(access_token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn is_org_member(&self, username: &str) -> Result<bool, GitHubError> {
        let path = format!(
            "/orgs/{}/members/{}",
            urlencoding::encode(&self.org),
            urlencoding::encode(username)
        );
        let response = self
            .admin_request(reqwest::Method::GET, &path)
            .send()
            .await?;

        // 204 means member, 404 means not (or invitation still pending).
        match response.status().as_u16() {
            204 => Ok(true),
            404 => Ok(false),
            401 => Err(GitHubError::Unauthorized),
            429 => Err(GitHubError::RateLimited),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(GitHubError::Api { status, message })
            }
        }
    }

    async fn list_pending_invitations(&self) -> Result<Vec<OrgInvitation>, GitHubError> {
        let path = format!("/orgs/{}/invitations", urlencoding::encode(&self.org));
        let response = self
            .admin_request(reqwest::Method::GET, &path)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn invite_user(&self, username: &str) -> Result<(), GitHubError> {
        let path = format!(
            "/orgs/{}/memberships/{}",
            urlencoding::encode(&self.org),
            urlencoding::encode(username)
        );
        let response = self
            .admin_request(reqwest::Method::PUT, &path)
            .json(&InviteRequest { role: "member" })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    async fn generate_from_template(&self, repo_name: &str) -> Result<(), GitHubError> {
        let path = format!(
            "/repos/{}/{}/generate",
            urlencoding::encode(&self.org),
            urlencoding::encode(&self.template_repo)
        );
        let response = self
            .admin_request(reqwest::Method::POST, &path)
            .json(&GenerateRepoRequest {
                owner: &self.org,
                name: repo_name,
                private: false,
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    async fn add_collaborator(&self, repo_name: &str, username: &str) -> Result<(), GitHubError> {
        let path = format!(
            "/repos/{}/{}/collaborators/{}",
            urlencoding::encode(&self.org),
            urlencoding::encode(repo_name),
            urlencoding::encode(username)
        );
        let response = self
            .admin_request(reqwest::Method::PUT, &path)
            .json(&AddCollaboratorRequest {
                permission: "admin",
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
