//! HTTP-level tests for the follow graph.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn follow_then_list_then_unfollow(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let token = common::token_for(&alice);
    let app = common::build_test_app(pool);

    let follow_uri = format!("/api/v1/users/{}/follow", bob.id);
    let response = post_auth(app.clone(), &follow_uri, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let following = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}/following", alice.id),
        &token,
    )
    .await;
    let json = body_json(following).await;
    assert_eq!(json["data"][0]["username"], "bob");

    let followers = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}/followers", bob.id),
        &token,
    )
    .await;
    let json = body_json(followers).await;
    assert_eq!(json["data"][0]["user_id"], alice.id);

    let response = delete_auth(app.clone(), &follow_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &follow_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn following_twice_is_409(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let token = common::token_for(&alice);
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/users/{}/follow", bob.id);
    post_auth(app.clone(), &uri, &token).await;
    let response = post_auth(app, &uri, &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn following_yourself_is_400(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let token = common::token_for(&alice);
    let app = common::build_test_app(pool);

    let response = post_auth(app, &format!("/api/v1/users/{}/follow", alice.id), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn following_unknown_user_is_404(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let token = common::token_for(&alice);
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/v1/users/555555/follow", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
