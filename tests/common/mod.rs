#![allow(dead_code)]

use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Once,
};

static INIT: Once = Once::new();
static DB_READY: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();
static USER_COUNTER: AtomicUsize = AtomicUsize::new(0);
static CATEGORY_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "JWT_SECRET",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        let config = introlink::config::jwt::JwtConfig::from_env().unwrap();
        let _ = introlink::utils::jwt::init_jwt_config(config);
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Migrate and clean once per test binary; every caller waits until
    // both are done. Tests within a binary run concurrently and isolate
    // through unique names instead of repeated truncation.
    DB_READY
        .get_or_init(|| async {
            introlink::migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
            cleanup_tables(&db).await;
        })
        .await;

    // No Google verifier extension here: the Google signup path answers
    // 400 in tests, same as a deployment without GOOGLE_CLIENT_ID.
    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(introlink::routes::create_routes())
        .layer(axum::extract::Extension(db.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let addr_str = format!("http://{}", addr);
    let client = Client::new();

    TestApp {
        addr: addr_str,
        db,
        client,
    }
}

async fn cleanup_tables(db: &DatabaseConnection) {
    // Reverse dependency order
    let tables = ["threads", "trending_threads", "categories", "users"];

    for table in tables {
        let sql = format!("TRUNCATE TABLE {} CASCADE", table);
        let _ = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await;
    }
}

/// Sign up a user and log in; returns (full_name, email, token).
pub async fn create_test_user(app: &TestApp, prefix: &str) -> (String, String, String) {
    let counter = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    let full_name = format!("{} Tester {}", prefix, counter);
    let email = format!("{}_{}@test.com", prefix, counter);

    let resp = app
        .client
        .post(app.url("/auth/signup"))
        .json(&serde_json::json!({
            "fullName": full_name,
            "email": email,
            "password": "test_password_123"
        }))
        .send()
        .await
        .expect("Failed to sign up user");

    let status = resp.status();
    assert_eq!(status, 201, "signup failed for {}", email);

    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": email,
            "password": "test_password_123"
        }))
        .send()
        .await
        .expect("Failed to log in user");

    let body: serde_json::Value = resp.json().await.expect("Failed to parse login response");
    let token = body["data"]["token"]
        .as_str()
        .unwrap_or_else(|| panic!("Login response missing token for {}: {:?}", email, body))
        .to_string();

    (full_name, email, token)
}

/// Look up a user's id directly in the store.
pub async fn get_user_id(db: &DatabaseConnection, email: &str) -> i32 {
    let row = db
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT id FROM users WHERE email = $1",
            vec![email.into()],
        ))
        .await
        .expect("Failed to query user")
        .expect("User not found");

    row.try_get_by_index::<i32>(0).unwrap()
}

pub async fn count_users_with_email(db: &DatabaseConnection, email: &str) -> i64 {
    let row = db
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT COUNT(*) FROM users WHERE email = $1",
            vec![email.into()],
        ))
        .await
        .expect("Failed to count users")
        .expect("Count query returned no row");

    row.try_get_by_index::<i64>(0).unwrap()
}

/// Insert a category directly (they are pre-seeded in production, there
/// is no endpoint). Returns its id.
pub async fn seed_category(db: &DatabaseConnection, prefix: &str) -> i32 {
    let counter = CATEGORY_COUNTER.fetch_add(1, Ordering::SeqCst);
    let name = format!("{} {}", prefix, counter);

    let row = db
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "INSERT INTO categories (name, description, icon, color, thread_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, 0, NOW(), NOW()) RETURNING id",
            vec![
                name.into(),
                "A quiet place to talk".into(),
                "🌿".into(),
                "green".into(),
            ],
        ))
        .await
        .expect("Failed to seed category")
        .expect("Category insert returned no row");

    row.try_get_by_index::<i32>(0).unwrap()
}

/// Insert a thread directly with chosen counters, bypassing the API (no
/// endpoint mutates likes/views/replies). `age_secs` pushes created_at
/// into the past so newest-first ordering is deterministic.
pub async fn seed_thread(
    db: &DatabaseConnection,
    category_id: i32,
    title: &str,
    likes: i32,
    views: i32,
    reply_count: usize,
    age_secs: f64,
) -> i32 {
    let author = serde_json::json!({
        "id": 0,
        "name": "John Doe",
        "avatar": "https://i.pravatar.cc/150?img=1",
        "joinDate": "2024-01-01T00:00:00Z",
        "postCount": 10
    });

    let replies: Vec<serde_json::Value> = (0..reply_count)
        .map(|i| {
            serde_json::json!({
                "content": format!("reply {}", i),
                "author": author.clone(),
                "createdAt": "2024-01-02T00:00:00Z",
                "likes": 0,
                "isLikedByUser": false
            })
        })
        .collect();

    let row = db
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "INSERT INTO threads (category_id, title, content, author, likes, views, replies, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW() - make_interval(secs => $9), NOW()) RETURNING id",
            vec![
                category_id.into(),
                title.into(),
                "Seeded thread content that is long enough.".into(),
                author.into(),
                likes.into(),
                views.into(),
                serde_json::Value::Array(replies).into(),
                serde_json::json!([]).into(),
                age_secs.into(),
            ],
        ))
        .await
        .expect("Failed to seed thread")
        .expect("Thread insert returned no row");

    row.try_get_by_index::<i32>(0).unwrap()
}

/// Insert a trending feed entry directly (pre-seeded in production).
pub async fn seed_trending(db: &DatabaseConnection, title: &str, replies: i32) {
    db.execute(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        "INSERT INTO trending_threads (title, author, category, replies, last_active, is_hot, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, NOW())",
        vec![
            title.into(),
            "Quiet Author".into(),
            "General".into(),
            replies.into(),
            "2 hours ago".into(),
            (replies > 5).into(),
        ],
    ))
    .await
    .expect("Failed to seed trending thread");
}
