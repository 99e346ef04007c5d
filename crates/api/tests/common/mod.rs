#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use regelwerk_api::auth::jwt::JwtConfig;
use regelwerk_api::auth::password::hash_password;
use regelwerk_api::config::ServerConfig;
use regelwerk_api::router::build_app_router;
use regelwerk_api::state::AppState;
use regelwerk_core::content::{Category, CategoryKind, Faction, Rule};
use regelwerk_core::types::DbId;
use regelwerk_db::models::user::{CreateUser, User};
use regelwerk_db::repositories::{CategoryRepo, FactionRepo, RuleRepo, UserRepo};

pub const ADMIN_EMAIL: &str = "admin@regelwerk.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Test configuration: dev CORS origin, fixed JWT secret, no admin bootstrap.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin: None,
    }
}

/// The production router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

/// The production router plus its state, for tests that inspect the cache.
pub fn build_test_app_with_state(pool: PgPool) -> (Router, AppState) {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    (build_app_router(state.clone(), &config), state)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert the admin account directly.
pub async fn create_admin(pool: &PgPool) -> User {
    let password_hash = hash_password(ADMIN_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: ADMIN_EMAIL.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Create the admin account, log in through the API and return the access token.
pub async fn admin_token(pool: &PgPool) -> String {
    create_admin(pool).await;
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .expect("login returns an access token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Content fixtures
// ---------------------------------------------------------------------------

pub async fn insert_category(
    pool: &PgPool,
    title: &str,
    parent_id: Option<DbId>,
    kind: CategoryKind,
    order_position: i32,
) -> Category {
    let now = Utc::now();
    let category = Category {
        id: DbId::now_v7(),
        title: title.to_string(),
        icon: "book".to_string(),
        order_position,
        parent_id,
        kind,
        created_at: now,
        updated_at: now,
    };
    CategoryRepo::upsert(pool, &category)
        .await
        .expect("category insert should succeed")
}

pub async fn insert_rule(
    pool: &PgPool,
    category_id: DbId,
    title: &str,
    content: &str,
    order_position: i32,
) -> Rule {
    let now = Utc::now();
    let rule = Rule {
        id: DbId::now_v7(),
        category_id,
        title: title.to_string(),
        content: content.to_string(),
        order_position,
        created_at: now,
        updated_at: now,
    };
    RuleRepo::upsert(pool, &rule)
        .await
        .expect("rule insert should succeed")
}

pub async fn insert_faction(
    pool: &PgPool,
    category_id: DbId,
    name: &str,
    order_position: i32,
) -> Faction {
    let now = Utc::now();
    let faction = Faction {
        id: DbId::now_v7(),
        category_id,
        name: name.to_string(),
        image_url: format!("https://img.regelwerk.test/{}.png", name.to_lowercase()),
        discord_url: "https://discord.gg/regelwerk".to_string(),
        order_position,
        created_at: now,
        updated_at: now,
    };
    FactionRepo::upsert(pool, &faction)
        .await
        .expect("faction insert should succeed")
}

/// "Allgemein" with rulebook "Verkehr" (two rules) and the faction gallery
/// "Staatsfraktionen" with one faction.
pub struct Seeded {
    pub main: Category,
    pub book: Category,
    pub gallery: Category,
    pub by_title: Rule,
    pub by_content: Rule,
    pub faction: Faction,
}

pub async fn seed_content(pool: &PgPool) -> Seeded {
    let main = insert_category(pool, "Allgemein", None, CategoryKind::Standard, 1).await;
    let book = insert_category(pool, "Verkehr", Some(main.id), CategoryKind::Standard, 1).await;
    let gallery = insert_category(
        pool,
        "Staatsfraktionen",
        Some(main.id),
        CategoryKind::FactionGallery,
        2,
    )
    .await;
    let by_title = insert_rule(pool, book.id, "Verkehrsregeln", "<p>Fahre vorsichtig.</p>", 0).await;
    let by_content = insert_rule(
        pool,
        book.id,
        "Geschwindigkeit",
        "<p>Innerorts gilt: im Verkehr ist Vorsicht geboten.</p>",
        1,
    )
    .await;
    let faction = insert_faction(pool, gallery.id, "Polizei", 1).await;

    Seeded {
        main,
        book,
        gallery,
        by_title,
        by_content,
        faction,
    }
}
