//! HTTP-level integration tests for account administration: builder
//! applications, promotion, bans and role changes.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_offline_app, create_user, get, get_auth, post_json, post_json_auth,
    put_json_auth, token_for, TEST_PASSWORD,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn login(app: axum::Router, email: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await
}

async fn open_request(pool: &PgPool, owner_id: i64) -> i64 {
    let build_id: i64 = sqlx::query_scalar(
        "INSERT INTO builds (creator_id, title) VALUES ($1, 'Fixture') RETURNING id",
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap();
    sqlx::query_scalar("INSERT INTO build_requests (build_id, user_id) VALUES ($1, $2) RETURNING id")
        .bind(build_id)
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn application() -> Value {
    json!({
        "business_name": "Rig Works",
        "portfolio_url": "https://rigworks.example.com",
        "years_of_experience": 4,
        "specialization": "Small form factor"
    })
}

// ---------------------------------------------------------------------------
// Builder applications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approved_application_promotes_to_builder(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let (applicant, applicant_token) = create_user(&pool, "maker@example.com", "consumer").await;
    let (customer, _) = create_user(&pool, "customer@example.com", "consumer").await;
    let request_id = open_request(&pool, customer.id).await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app.clone(), "/api/v1/applications", application(), &applicant_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["status"], "pending");
    assert_eq!(created["application_type"], "individual");
    let id = created["id"].as_i64().unwrap();

    let response =
        post_json_auth(app.clone(), "/api/v1/applications", application(), &applicant_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(app.clone(), "/api/v1/applications", &applicant_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/v1/applications?status=pending", &admin).await;
    let pending = body_json(response).await["data"].clone();
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["user_email"], "maker@example.com");

    let review = format!("/api/v1/applications/{id}/review");
    let response = put_json_auth(app.clone(), &review, json!({ "status": "pending" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "status": "approved", "admin_notes": "Great portfolio" });
    let response = put_json_auth(app.clone(), &review, body.clone(), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let reviewed = body_json(response).await["data"].clone();
    assert_eq!(reviewed["status"], "approved");
    assert!(reviewed["reviewed_at"].is_string());

    let response = put_json_auth(app.clone(), &review, body, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(app.clone(), &format!("/api/v1/users/{}", applicant.id)).await;
    assert_eq!(body_json(response).await["data"]["role"], "builder");

    let response = get(app.clone(), &format!("/api/v1/users/{}/builder-profile", applicant.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["business_name"], "Rig Works");

    // The old token still carries the consumer role.
    let offer = json!({ "request_id": request_id, "fee": 90.0 });
    let response = post_json_auth(app.clone(), "/api/v1/offers", offer.clone(), &applicant_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = login(app.clone(), "maker@example.com").await;
    let session = body_json(response).await["data"].clone();
    assert_eq!(session["user"]["role"], "builder");
    let builder_token = session["token"].as_str().unwrap().to_string();

    let response = post_json_auth(app.clone(), "/api/v1/offers", offer, &builder_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app.clone(), "/api/v1/applications/mine", &builder_token).await;
    let mine = body_json(response).await["data"].clone();
    assert_eq!(mine[0]["status"], "approved");

    let response = post_json_auth(app, "/api/v1/applications", application(), &builder_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_application_keeps_consumer_role(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let (applicant, token) = create_user(&pool, "maker@example.com", "consumer").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app.clone(), "/api/v1/applications", application(), &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let review = format!("/api/v1/applications/{id}/review");
    let response = put_json_auth(app.clone(), &review, json!({ "status": "rejected" }), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), &format!("/api/v1/users/{}", applicant.id)).await;
    assert_eq!(body_json(response).await["data"]["role"], "consumer");
    let response = get(app.clone(), &format!("/api/v1/users/{}/builder-profile", applicant.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing is pending any more, so a fresh application is accepted.
    let response = post_json_auth(app, "/api/v1/applications", application(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_of_unknown_application_is_404(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/applications/424242/review",
        json!({ "status": "approved" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_requires_business_name(pool: PgPool) {
    let (_, token) = create_user(&pool, "maker@example.com", "consumer").await;
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/applications", json!({ "business_name": " " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Bans and roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_banned_user_cannot_log_in(pool: PgPool) {
    let (admin, admin_token) = create_user(&pool, "admin@example.com", "admin").await;
    let (user, user_token) = create_user(&pool, "user@example.com", "consumer").await;
    let app = common::build_test_app(pool);
    let ban = format!("/api/v1/users/{}/ban", user.id);

    let response = put_json_auth(app.clone(), &ban, json!({ "is_banned": true }), &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &ban, json!({ "is_banned": true }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_banned"], true);

    let response = login(app.clone(), "user@example.com").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let response = put_json_auth(app.clone(), &ban, json!({ "is_banned": false }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = login(app.clone(), "user@example.com").await;
    assert_eq!(response.status(), StatusCode::OK);

    let self_ban = format!("/api/v1/users/{}/ban", admin.id);
    let response =
        put_json_auth(app.clone(), &self_ban, json!({ "is_banned": true }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/v1/users/424242/ban",
        json!({ "is_banned": true }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_sets_role_and_builder_directory(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin@example.com", "admin").await;
    let (user, _) = create_user(&pool, "user@example.com", "consumer").await;
    let (banned, _) = create_user(&pool, "banned@example.com", "builder").await;
    sqlx::query("UPDATE users SET is_banned = true WHERE id = $1")
        .bind(banned.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/users/{}/role", user.id);

    let response = put_json_auth(app.clone(), &uri, json!({ "role": "overlord" }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app.clone(), &uri, json!({ "role": "builder" }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "builder");

    let response = get(app.clone(), "/api/v1/users/builders").await;
    let names: Vec<String> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["display_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["admin", "user"]);

    let response = get_auth(app, "/api/v1/users", &admin_token).await;
    let users = body_json(response).await["data"].clone();
    assert_eq!(users.as_array().unwrap().len(), 3);
    assert!(users[0].get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_update_is_owner_only(pool: PgPool) {
    let (user, token) = create_user(&pool, "user@example.com", "consumer").await;
    let (_, other) = create_user(&pool, "other@example.com", "consumer").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/users/{}", user.id);

    let body = json!({ "display_name": "  Ana  ", "bio": "Likes quiet builds" });
    let response = put_json_auth(app.clone(), &uri, body.clone(), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["display_name"], "Ana");
    assert_eq!(updated["bio"], "Likes quiet builds");
    assert_eq!(updated["role"], "consumer");

    let response = put_json_auth(app.clone(), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app, &uri, json!({ "display_name": " " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_account_admin_routes_reject_non_admins() {
    let app = build_offline_app();
    let consumer = token_for(1, "consumer");
    let builder = token_for(2, "builder");

    let response = get_auth(app.clone(), "/api/v1/users", &consumer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        put_json_auth(app.clone(), "/api/v1/users/1/role", json!({ "role": "admin" }), &builder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/applications/1/review",
        json!({ "status": "approved" }),
        &builder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app, "/api/v1/applications/mine").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
