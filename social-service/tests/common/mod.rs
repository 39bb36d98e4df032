#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::KeyPair;
use auth::TokenIssuer;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use serde_json::Value;
use social_service::domain::authentication::service::AuthService;
use social_service::domain::follower::errors::FollowerError;
use social_service::domain::follower::ports::FollowerRepository;
use social_service::domain::follower::service::FollowerService;
use social_service::domain::post::errors::PostError;
use social_service::domain::post::models::Post;
use social_service::domain::post::models::PostId;
use social_service::domain::post::ports::PostRepository;
use social_service::domain::post::service::PostService;
use social_service::domain::user::models::EmailAddress;
use social_service::domain::user::models::User;
use social_service::domain::user::models::UserId;
use social_service::domain::user::ports::UserRepository;
use social_service::domain::user::service::ProfileService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::AppState;
use social_service::user::errors::UserError;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tower::ServiceExt;

pub const PRIVATE_KEY_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../auth/testdata/private.pem");
pub const PUBLIC_KEY_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../auth/testdata/public.pem");

pub fn test_keys() -> KeyPair {
    KeyPair::load(PRIVATE_KEY_PATH, PUBLIC_KEY_PATH).expect("Failed to load test key pair")
}

/// Users, posts and follow relationships kept in memory.
///
/// Enforces the same uniqueness and existence rules as the Postgres schema.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<UserId, User>>,
    posts: Mutex<HashMap<PostId, Post>>,
    follows: Mutex<Vec<(UserId, UserId)>>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check_unique(users: &HashMap<UserId, User>, user: &User) -> Result<(), UserError> {
        for existing in users.values().filter(|u| u.id != user.id) {
            if existing.username == user.username {
                return Err(UserError::UsernameAlreadyExists(
                    user.username.as_str().to_string(),
                ));
            }
            if existing.email == user.email {
                return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
            }
        }
        Ok(())
    }

    fn users_by_ids(&self, ids: Vec<UserId>) -> Vec<User> {
        let users = self.users.lock().unwrap();
        ids.iter().filter_map(|id| users.get(id).cloned()).collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        if !posts.contains_key(&post.id) {
            return Err(PostError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        self.posts
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(PostError::NotFound)
    }
}

#[async_trait]
impl FollowerRepository for InMemoryStore {
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), FollowerError> {
        {
            let users = self.users.lock().unwrap();
            if !users.contains_key(follower) || !users.contains_key(followee) {
                return Err(FollowerError::UserNotFound);
            }
        }

        let mut follows = self.follows.lock().unwrap();
        if !follows.contains(&(*follower, *followee)) {
            follows.push((*follower, *followee));
        }
        Ok(())
    }

    async fn unfollow(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<(), FollowerError> {
        let mut follows = self.follows.lock().unwrap();
        let before = follows.len();
        follows.retain(|pair| *pair != (*follower, *followee));
        if follows.len() == before {
            return Err(FollowerError::RelationshipNotFound);
        }
        Ok(())
    }

    async fn find_followers(&self, user: &UserId) -> Result<Vec<User>, FollowerError> {
        let ids = self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, followee)| followee == user)
            .map(|(follower, _)| *follower)
            .collect();
        Ok(self.users_by_ids(ids))
    }

    async fn find_following(&self, user: &UserId) -> Result<Vec<User>, FollowerError> {
        let ids = self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(follower, _)| follower == user)
            .map(|(_, followee)| *followee)
            .collect();
        Ok(self.users_by_ids(ids))
    }
}

/// Test application driving the real router in-process.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub keys: KeyPair,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["data"]["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let keys = test_keys();
        let store = Arc::new(InMemoryStore::default());
        let authenticator = Arc::new(Authenticator::new(&keys, chrono::Duration::hours(12)));

        let state = AppState {
            auth_service: Arc::new(AuthService::new(Arc::clone(&store), authenticator)),
            profile_service: Arc::new(ProfileService::new(Arc::clone(&store))),
            post_service: Arc::new(PostService::new(Arc::clone(&store))),
            follower_service: Arc::new(FollowerService::new(Arc::clone(&store))),
        };

        Self {
            router: create_router(state, Duration::from_secs(30)),
            store,
            keys,
        }
    }

    /// Send a request with an optional raw Authorization header value.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str, token: &str) -> TestResponse {
        self.send(Method::GET, path, Some(&bearer(token)), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::POST, path, Some(&bearer(token)), Some(body))
            .await
    }

    pub async fn patch(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, path, Some(&bearer(token)), Some(body))
            .await
    }

    pub async fn delete(&self, path: &str, token: &str) -> TestResponse {
        self.send(Method::DELETE, path, Some(&bearer(token)), None)
            .await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({
                "username": username,
                "email": email,
                "password": password
            })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({
                "email": email,
                "password": password
            })),
        )
        .await
    }

    /// Register an account and sign in, returning its id and access token.
    pub async fn sign_up_and_login(&self, username: &str, email: &str) -> (String, String) {
        let registered = self.register(username, email, "password123").await;
        assert_eq!(registered.status, StatusCode::CREATED);
        let id = registered.body["data"]["id"]
            .as_str()
            .expect("Missing id")
            .to_string();

        let logged_in = self.login(email, "password123").await;
        assert_eq!(logged_in.status, StatusCode::OK);
        let token = logged_in.body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string();

        (id, token)
    }

    /// Issue a token for `subject` as if it had been signed at `issued_at`.
    pub fn token_issued_at(
        &self,
        subject: uuid::Uuid,
        issued_at: chrono::DateTime<chrono::Utc>,
    ) -> String {
        TokenIssuer::new(&self.keys, chrono::Duration::hours(12))
            .issue_at(subject, issued_at)
            .expect("Failed to sign token")
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a fresh database with migrations applied.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let postgres_url = std::env::var("DATABASE_URL").ok()?;
        let db_name = format!(
            "test_social_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl TestDb {
    /// Close the pool and drop the database.
    ///
    /// Awaited at the end of each test; a test that panics earlier leaves its
    /// database behind.
    pub async fn cleanup(self) {
        self.pool.close().await;

        let mut conn = PgConnection::connect(&self.postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(
            format!(
                r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                self.db_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to terminate test database connections");

        conn.execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, self.db_name).as_str())
            .await
            .expect("Failed to drop test database");
    }
}
