#![allow(dead_code)]


use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde_json::{Value, json};
use server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, JudgeConfig, ReviewConfig, ServerConfig,
};
use server::entity::team;
use server::state::AppState;
use server::{build_router, database, seed};
use tempfile::TempDir;

use self::mock_judge::MockJudge;

pub const PASSWORD: &str = "password123";

pub mod routes {
    pub const REGISTER: &str = "/api/v1/auth/register";
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const ME: &str = "/api/v1/auth/me";
    pub const CHALLENGES: &str = "/api/v1/challenges";
    pub const EXECUTE: &str = "/api/v1/execute";
    pub const PROGRESS: &str = "/api/v1/progress";
    pub const SUBMISSIONS: &str = "/api/v1/submissions";
    pub const LEADERBOARD: &str = "/api/v1/leaderboard";
    pub const NOTIFICATIONS: &str = "/api/v1/notifications";
    pub const REVIEWS: &str = "/api/v1/admin/reviews";
    pub const ADMIN_NOTIFICATIONS: &str = "/api/v1/admin/notifications";
    pub const ANALYTICS: &str = "/api/v1/admin/analytics";
    pub const TEAMS: &str = "/api/v1/admin/teams";

    pub fn challenge(id: i32) -> String {
        format!("{CHALLENGES}/{id}")
    }

    pub fn flag(id: i32) -> String {
        format!("{CHALLENGES}/{id}/flag")
    }

    pub fn buildathon(id: i32) -> String {
        format!("{CHALLENGES}/{id}/buildathon")
    }

    pub fn submission(id: i32) -> String {
        format!("{SUBMISSIONS}/{id}")
    }

    pub fn notification_read(id: i32) -> String {
        format!("{NOTIFICATIONS}/{id}/read")
    }

    pub fn team(id: i32) -> String {
        format!("{TEAMS}/{id}")
    }
}

/// A running server on a random port with its own SQLite file and fake judge.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub judge: MockJudge,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("oasis.db").display());

        let db = database::connect(&url)
            .await
            .expect("Failed to connect to test database");
        database::sync_schema(&db)
            .await
            .expect("Failed to create schema");
        seed::seed_role_permissions(&db)
            .await
            .expect("Failed to seed roles");
        seed::ensure_indexes(&db).await.expect("Failed to ensure indexes");

        let judge = MockJudge::start().await;
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url },
            auth: AuthConfig {
                jwt_secret: "test-secret-key-for-integration-tests".into(),
                token_ttl_days: 7,
                admin_name: None,
                admin_password: None,
            },
            judge: JudgeConfig {
                base_url: judge.base_url.clone(),
                poll_interval_ms: 0,
                max_attempts: 15,
                request_timeout_secs: 5,
                ..Default::default()
            },
            review: ReviewConfig::default(),
        };

        let backend =
            judge::Judge0Client::new(&config.judge).expect("Failed to build judge client");
        let state = AppState {
            db: db.clone(),
            config,
            judge: Arc::new(backend),
        };
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            judge,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    /// Register an account and return its ID.
    pub async fn register(&self, name: &str) -> i32 {
        let res = self
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "name": name,
                    "email": format!("{}@example.com", name.replace(' ', ".")),
                    "password": PASSWORD,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "register failed: {}", res.text);
        res.id()
    }

    pub async fn login(&self, name: &str) -> String {
        let res = self
            .post_without_token(routes::LOGIN, &json!({"name": name, "password": PASSWORD}))
            .await;
        assert_eq!(res.status, 200, "login failed: {}", res.text);
        res.body["token"].as_str().unwrap().to_string()
    }

    /// Register a regular team and return `(id, token)`.
    pub async fn create_team(&self, name: &str) -> (i32, String) {
        let id = self.register(name).await;
        (id, self.login(name).await)
    }

    /// Register an account, move it to `role` directly in the DB, and log in.
    pub async fn create_user_with_role(&self, name: &str, role: &str) -> String {
        let id = self.register(name).await;
        let account = team::Entity::find()
            .filter(team::Column::Id.eq(id))
            .one(&self.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: team::ActiveModel = account.into();
        active.role = Set(role.to_string());
        active.update(&self.db).await.unwrap();
        self.login(name).await
    }

    pub async fn create_admin(&self) -> String {
        self.create_user_with_role("admin", seed::ADMIN_ROLE).await
    }

    /// Create an active challenge with the given points and flag.
    pub async fn create_challenge(
        &self,
        admin_token: &str,
        title: &str,
        points: i32,
        flag: &str,
    ) -> i32 {
        let res = self
            .post_with_token(
                routes::CHALLENGES,
                &json!({
                    "title": title,
                    "points": points,
                    "problem_description": "Print the answer.",
                    "sample_input": "1 2",
                    "sample_output": "3",
                    "buildathon_description": "Build a dashboard.",
                    "buildathon_requirements": ["README", "Tests"],
                    "expected_flag": flag,
                }),
                admin_token,
            )
            .await;
        assert_eq!(res.status, 201, "create challenge failed: {}", res.text);
        res.id()
    }

    pub async fn solve_flag(&self, token: &str, challenge_id: i32, flag: &str) {
        let res = self
            .post_with_token(&routes::flag(challenge_id), &json!({"flag": flag}), token)
            .await;
        assert_eq!(res.status, 200, "flag failed: {}", res.text);
    }

    /// Submit a repository link and return the submission ID.
    pub async fn submit_buildathon(&self, token: &str, challenge_id: i32, link: &str) -> i32 {
        let res = self
            .post_with_token(
                &routes::buildathon(challenge_id),
                &json!({"github_link": link}),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "buildathon failed: {}", res.text);
        res.body["submission_id"].as_i64().unwrap() as i32
    }

    pub async fn review(&self, admin_token: &str, submission_id: i32, body: Value) -> TestResponse {
        let mut body = body;
        body["submission_id"] = json!(submission_id);
        self.post_with_token(routes::REVIEWS, &body, admin_token).await
    }

    pub async fn total_points(&self, token: &str) -> i64 {
        let res = self.get_with_token(routes::ME, token).await;
        assert_eq!(res.status, 200, "me failed: {}", res.text);
        res.body["total_points"].as_i64().unwrap()
    }
}

pub struct TestResponse {
    pub status: u16,
    pub text: String,
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i32 {
        self.body["id"].as_i64().expect("response has no id") as i32
    }
}
