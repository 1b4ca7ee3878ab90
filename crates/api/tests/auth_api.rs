//! HTTP-level tests for login and account lockout.

mod common;

use axum::http::header::RETRY_AFTER;
use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_token_and_user(pool: PgPool) {
    let user = common::create_user(&pool, "loginuser").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        login_body("loginuser@test.com", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert!(json["user"].get("email").is_none(), "email must not leak");

    // The issued token works against an authenticated endpoint.
    let token = json["access_token"].as_str().unwrap();
    let me = get_auth(app, "/api/v1/users/me", token).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["data"]["user"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_401(pool: PgPool) {
    common::create_user(&pool, "wrongpw").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("wrongpw@test.com", "incorrect_password"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_email_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("nobody@test.com", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    common::create_user(&pool, "locked").await;
    let app = common::build_test_app(pool);

    for attempt in 1..=5 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            login_body("locked@test.com", "bad_password"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "attempt {attempt}");
    }

    // Even the correct password is refused while locked.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        login_body("locked@test.com", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: i64 = response.headers()[RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=180).contains(&retry_after));

    let json = body_json(response).await;
    assert_eq!(json["code"], "LOCKED_OUT");
    assert!(json["error"].as_str().unwrap().contains("remaining"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn success_resets_failure_count(pool: PgPool) {
    let user = common::create_user(&pool, "recovers").await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..4 {
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            login_body("recovers@test.com", "bad_password"),
        )
        .await;
    }
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        login_body("recovers@test.com", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let reloaded = arcade_db::repositories::UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.failed_login_count, 0);
    assert!(reloaded.locked_until.is_none());
}
