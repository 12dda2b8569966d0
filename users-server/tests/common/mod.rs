#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::json;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use users_core::models::{NewUser, User};
use users_core::{UsersError, UsersResult};
use users_server::{
    app::build_app, config::LogFormat, database::ServerDatabase, database::UserStore, AppState,
};

/// Schema the database tests write into, so they never touch a real `users` table.
pub const TEST_SCHEMA: &str = "users_api_test";
/// Same table shape, but with a text primary key.
pub const TEXT_KEY_SCHEMA: &str = "users_api_text_key_test";

const SERIAL_KEY_COLUMNS: &str = r#"
    id BIGSERIAL PRIMARY KEY,
    name TEXT,
    email TEXT,
    password TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
"#;

const TEXT_KEY_COLUMNS: &str = r#"
    id TEXT PRIMARY KEY DEFAULT 'usr_' || md5(random()::text || clock_timestamp()::text),
    name TEXT,
    email TEXT,
    password TEXT,
    score NUMERIC NOT NULL DEFAULT 1.50
"#;
const SCHEMA_LOCK_KEY: i64 = 7_301_001;

/// In-memory store that records every insert it receives.
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    pub inserted: Mutex<Vec<NewUser>>,
}

impl MemoryStore {
    pub fn insert_count(&self) -> usize {
        self.inserted.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> UsersResult<User> {
        self.inserted.lock().unwrap().push(new_user.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(serde_json::from_value(json!({
            "id": id,
            "name": new_user.name,
            "email": new_user.email,
            "password": new_user.password,
        }))
        .unwrap())
    }
}

/// Store whose every insert fails like a lost connection.
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn create_user(&self, _new_user: &NewUser) -> UsersResult<User> {
        Err(UsersError::DatabaseError(sqlx::Error::PoolTimedOut))
    }
}

pub struct PanickingStore;

#[async_trait]
impl UserStore for PanickingStore {
    async fn create_user(&self, _new_user: &NewUser) -> UsersResult<User> {
        panic!("store exploded")
    }
}

pub fn app_with(store: Arc<dyn UserStore>) -> Router {
    build_app(Arc::new(AppState::new(store)), LogFormat::Concise)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

pub async fn connect_with_search_path(
    database_url: &str,
    schema: &str,
) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.options([("search_path", schema)]);
    PgPoolOptions::new().connect_with(options).await
}

/// Connects to `DATABASE_URL` and prepares a nullable `users` table in
/// `TEST_SCHEMA`. Fails when the variable is unset so callers can skip.
pub async fn setup_test_db() -> Result<ServerDatabase, Box<dyn std::error::Error>> {
    setup_schema(TEST_SCHEMA, SERIAL_KEY_COLUMNS).await
}

/// Like `setup_test_db`, but the `users` table has a text key and a
/// numeric column.
pub async fn setup_text_key_db() -> Result<ServerDatabase, Box<dyn std::error::Error>> {
    setup_schema(TEXT_KEY_SCHEMA, TEXT_KEY_COLUMNS).await
}

async fn setup_schema(
    schema: &str,
    columns: &str,
) -> Result<ServerDatabase, Box<dyn std::error::Error>> {
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL environment variable not set")?;

    let admin = PgPool::connect(&database_url).await?;
    let mut tx = admin.begin().await?;
    // Tests in one binary run in parallel; serialize the DDL.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {schema}"))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {schema}.users ({columns})"
    ))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    admin.close().await;

    let pool = connect_with_search_path(&database_url, schema).await?;
    Ok(ServerDatabase { pool })
}

pub fn unique_email(tag: &str) -> String {
    format!("{}_{}@example.com", tag, uuid::Uuid::new_v4())
}
