//! Full integration tests for the Botleague API
//!
//! Two layers: service-level flows over the in-memory mocks, and
//! HTTP-level tests that run the real router against an in-memory
//! SQLite database and a temp result file.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::app::{InviteStatus, OnboardingService, Provisioner, StandingsService};
    use crate::domain::ports::MemberRepository;
    use crate::rating::DEFAULT_K_FACTOR;
    use crate::test_utils::{
        test_batch, test_outcome, InMemoryMemberRepository, InMemoryResultStore, MockGitHubClient,
        MockMailer,
    };

    fn provisioner(
        members: Arc<InMemoryMemberRepository>,
        github: Arc<MockGitHubClient>,
        mailer: Option<Arc<MockMailer>>,
    ) -> Provisioner<InMemoryMemberRepository, MockGitHubClient, MockMailer> {
        Provisioner::new(
            members,
            github,
            mailer,
            "BotLeague".to_string(),
            "league@botleague.local".to_string(),
            Duration::from_secs(300),
        )
    }

    /// Sign-in, provisioning, result submission, leaderboard.
    #[tokio::test]
    async fn member_onboarding_to_leaderboard() {
        let members = Arc::new(InMemoryMemberRepository::new());
        let github = Arc::new(MockGitHubClient::new().with_user("alice", Some("a@example.com")));
        let mailer = Arc::new(MockMailer::new());

        // Sign in through OAuth.
        let onboarding = OnboardingService::new(members.clone(), github.clone());
        let outcome = onboarding.complete_login("oauth-code").await.unwrap();
        assert_eq!(outcome.invite_status, InviteStatus::InvitationSent);

        // The member accepts on the GitHub side; next poll provisions them.
        let github = Arc::new(
            MockGitHubClient::new()
                .with_user("alice", Some("a@example.com"))
                .with_org_member("alice"),
        );
        provisioner(members.clone(), github.clone(), Some(mailer.clone()))
            .tick()
            .await
            .unwrap();

        let member = members.find_by_username("alice").await.unwrap().unwrap();
        assert!(member.repo_provisioned_at.is_some());
        assert_eq!(github.generated_repos(), vec!["alice-bot".to_string()]);
        assert_eq!(mailer.sent().len(), 1);

        // The runner submits a batch involving the new bot.
        let standings_service = StandingsService::new(
            Arc::new(InMemoryResultStore::new()),
            DEFAULT_K_FACTOR,
            None,
        );
        let standings = standings_service
            .submit(test_batch(vec![test_outcome("alice-bot", "bob-bot", 10, 0)]))
            .await
            .unwrap();

        assert_eq!(standings[0].bot, "alice-bot");
        assert_eq!(standings[0].rating, 1510.0);
    }

    /// A GitHub outage during provisioning is retried on the next poll.
    #[tokio::test]
    async fn provisioning_recovers_after_outage() {
        let members = Arc::new(InMemoryMemberRepository::new());
        let github = Arc::new(
            MockGitHubClient::new()
                .with_user("carol", None)
                .with_org_member("carol")
                .with_failing_provisioning(),
        );

        OnboardingService::new(members.clone(), github.clone())
            .complete_login("code")
            .await
            .unwrap();

        let p = provisioner(members.clone(), github.clone(), None);

        // First poll: join is recorded, repo generation fails.
        p.tick().await.unwrap();
        let member = members.find_by_username("carol").await.unwrap().unwrap();
        assert!(member.joined_org_at.is_some());
        assert!(member.repo_provisioned_at.is_none());

        // Outage over: the same member is picked up again.
        github.clear_provisioning_failure();
        p.tick().await.unwrap();
        let member = members.find_by_username("carol").await.unwrap().unwrap();
        assert!(member.repo_provisioned_at.is_some());
        assert!(member.notified_at.is_some());
    }

    /// Mail failure leaves the notification pending without undoing the repo.
    #[tokio::test]
    async fn mail_failure_keeps_notification_pending() {
        let members = Arc::new(InMemoryMemberRepository::new());
        let github = Arc::new(
            MockGitHubClient::new()
                .with_user("dave", Some("d@example.com"))
                .with_org_member("dave"),
        );
        OnboardingService::new(members.clone(), github.clone())
            .complete_login("code")
            .await
            .unwrap();

        let mailer = Arc::new(MockMailer::failing());
        provisioner(members.clone(), github, Some(mailer))
            .tick()
            .await
            .unwrap();

        let member = members.find_by_username("dave").await.unwrap().unwrap();
        assert!(member.repo_provisioned_at.is_some());
        assert!(member.notified_at.is_none());
    }

    mod http {
        use std::sync::Arc;

        use axum::http::{HeaderName, HeaderValue, StatusCode};
        use axum::{
            middleware,
            routing::{get, post},
            Router,
        };
        use axum_test::TestServer;
        use chrono::Utc;
        use sea_orm::Database;
        use serde_json::json;

        use crate::adapters::github::GitHubClientImpl;
        use crate::adapters::jsonstore::JsonFileResultStore;
        use crate::adapters::sqlite::{self, SqliteMemberRepository};
        use crate::app::{OnboardingService, StandingsService};
        use crate::auth;
        use crate::config::Config;
        use crate::domain::entities::NewMember;
        use crate::domain::ports::MemberRepository;
        use crate::handlers;
        use crate::rating::{Standing, DEFAULT_K_FACTOR};
        use crate::AppState;

        const SECRET: &str = "test-secret";

        fn secret_header() -> (HeaderName, HeaderValue) {
            (
                HeaderName::from_static("x-results-secret"),
                HeaderValue::from_static(SECRET),
            )
        }

        async fn test_server() -> (TestServer, Arc<SqliteMemberRepository>) {
            test_server_with_secret(SECRET).await
        }

        async fn test_server_with_secret(
            secret: &str,
        ) -> (TestServer, Arc<SqliteMemberRepository>) {
            let db = Database::connect("sqlite::memory:").await.unwrap();
            sqlite::init_schema(&db).await.unwrap();
            let member_repo = Arc::new(SqliteMemberRepository::new(db));

            let results_path =
                std::env::temp_dir().join(format!("results-{}.json", uuid::Uuid::new_v4()));
            let result_store = Arc::new(JsonFileResultStore::new(results_path));

            let github = Arc::new(GitHubClientImpl::new(
                "BotLeague".to_string(),
                String::new(),
                "BotTemplate".to_string(),
                String::new(),
                String::new(),
            ));

            let mut config = Config::from_env();
            config.results_secret = secret.to_string();

            let state = AppState {
                onboarding_service: Arc::new(OnboardingService::new(
                    member_repo.clone(),
                    github,
                )),
                standings_service: Arc::new(StandingsService::new(
                    result_store,
                    DEFAULT_K_FACTOR,
                    None,
                )),
                results_secret_hash: auth::hash_secret(secret),
                config,
            };

            let app = Router::new()
                .route("/health", get(crate::health))
                .route("/leaderboard", get(handlers::get_leaderboard))
                .route("/members/:username", get(handlers::get_member))
                .route(
                    "/results",
                    post(handlers::submit_results).layer(middleware::from_fn_with_state(
                        state.clone(),
                        auth::results_auth_middleware,
                    )),
                )
                .with_state(state);

            (TestServer::new(app).unwrap(), member_repo)
        }

        #[tokio::test]
        async fn health_reports_ok() {
            let (server, _) = test_server().await;
            let response = server.get("/health").await;
            assert_eq!(response.status_code(), StatusCode::OK);
            let body: serde_json::Value = response.json();
            assert_eq!(body["status"], "ok");
        }

        #[tokio::test]
        async fn results_require_the_shared_secret() {
            let (server, _) = test_server().await;
            let body = json!({"Date": Utc::now(), "Results": []});

            let response = server.post("/results").json(&body).await;
            assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

            let (name, _) = secret_header();
            let response = server
                .post("/results")
                .add_header(name, HeaderValue::from_static("wrong"))
                .json(&body)
                .await;
            assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn unset_secret_disables_submission() {
            // An empty configured secret must not match an empty header.
            let (server, _) = test_server_with_secret("").await;
            let body = json!({"Date": Utc::now(), "Results": []});

            let (name, _) = secret_header();
            let response = server
                .post("/results")
                .add_header(name, HeaderValue::from_static(""))
                .json(&body)
                .await;

            assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn submitted_results_show_up_on_the_leaderboard() {
            let (server, _) = test_server().await;
            let body = json!({
                "Date": Utc::now(),
                "Results": [
                    {"BotA": "X", "BotB": "Y", "BotAWins": 10, "BotBWins": 0}
                ]
            });

            let (name, value) = secret_header();
            let response = server.post("/results").add_header(name, value).json(&body).await;
            assert_eq!(response.status_code(), StatusCode::OK);

            let returned: Vec<Standing> = response.json();
            assert_eq!(returned[0].bot, "X");
            assert_eq!(returned[0].rating, 1510.0);

            let leaderboard: Vec<Standing> = server.get("/leaderboard").await.json();
            assert_eq!(leaderboard, returned);
        }

        #[tokio::test]
        async fn malformed_batches_are_rejected() {
            let (server, _) = test_server().await;
            let (name, value) = secret_header();

            let response = server
                .post("/results")
                .add_header(name, value)
                .json(&json!({
                    "Date": Utc::now(),
                    "Results": [
                        {"BotA": "X", "BotB": "Y", "BotAWins": 5.5, "BotBWins": 4.5}
                    ]
                }))
                .await;

            assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        }

        #[tokio::test]
        async fn member_status_reflects_the_database() {
            let (server, members) = test_server().await;

            let response = server.get("/members/nobody").await;
            assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

            members
                .upsert(&NewMember {
                    github_username: "alice".to_string(),
                    email: None,
                    name: None,
                })
                .await
                .unwrap();
            members.mark_joined("alice", Utc::now()).await.unwrap();

            let response = server.get("/members/alice").await;
            assert_eq!(response.status_code(), StatusCode::OK);
            let body: serde_json::Value = response.json();
            assert_eq!(body["joined_org"], true);
            assert_eq!(body["repo_provisioned"], false);
        }
    }
}
