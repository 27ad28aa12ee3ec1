use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// GitHub organization that members are invited into
    pub org_name: String,
    /// Admin token used for org invitations and repo provisioning
    pub org_token: String,
    /// GitHub OAuth client ID
    pub github_client_id: Option<String>,
    /// GitHub OAuth client secret
    pub github_client_secret: Option<String>,
    /// Redirect URI registered with the OAuth app
    pub github_redirect_uri: String,
    /// Template repository that new bot repos are generated from
    pub template_repo: String,
    /// Shared secret expected in the X-Results-Secret header
    pub results_secret: String,
    /// Append-only match-result store
    pub results_path: PathBuf,
    /// Where the rendered leaderboard JSON is written after each submission
    pub leaderboard_path: Option<PathBuf>,
    /// Directory served as the static site
    pub static_dir: PathBuf,
    /// Seconds between org-membership polls
    pub poll_interval_secs: u64,
    /// Mail gateway endpoint and token (email is skipped when unset)
    pub mail_api_url: Option<String>,
    pub mail_api_token: Option<String>,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://members.db?mode=rwc".to_string()),
            org_name: env::var("GITHUB_ORG_NAME").unwrap_or_else(|_| "BotLeague".to_string()),
            org_token: env::var("GITHUB_ORG_TOKEN").unwrap_or_default(),
            github_client_id: env::var("GITHUB_CLIENT_ID").ok(),
            github_client_secret: env::var("GITHUB_CLIENT_SECRET").ok(),
            github_redirect_uri: env::var("GITHUB_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/auth/github/callback".to_string()),
            template_repo: env::var("TEMPLATE_REPO_NAME")
                .unwrap_or_else(|_| "BotTemplate".to_string()),
            results_secret: env::var("RESULTS_SECRET").unwrap_or_default(),
            results_path: env::var("RESULTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("results.json")),
            leaderboard_path: env::var("LEADERBOARD_PATH").map(PathBuf::from).ok(),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("www")),
            poll_interval_secs: env::var("POLL_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            mail_api_url: env::var("MAIL_API_URL").ok(),
            mail_api_token: env::var("MAIL_API_TOKEN").ok(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "league@botleague.local".to_string()),
        }
    }

    /// Check if GitHub OAuth is configured
    pub fn github_oauth_enabled(&self) -> bool {
        self.github_client_id.is_some() && self.github_client_secret.is_some()
    }

    /// Check if the mail gateway is configured
    pub fn mail_enabled(&self) -> bool {
        self.mail_api_url.is_some() && self.mail_api_token.is_some()
    }
}
