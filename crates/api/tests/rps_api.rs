//! HTTP-level tests for Rock-Paper-Scissors rounds and their XP awards.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

fn choice(c: &str) -> serde_json::Value {
    serde_json::json!({ "choice": c })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn round_awards_xp_matching_outcome(pool: PgPool) {
    let player = common::create_user(&pool, "player").await;
    let token = common::token_for(&player);
    let app = common::build_test_app(pool);

    let mut expected_xp = 0;
    let mut expected_streak = 0;
    for _ in 0..6 {
        let response = post_json_auth(app.clone(), "/api/v1/games/rps", choice("Rock"), &token).await;
        assert_eq!(response.status(), StatusCode::OK);

        let data = &body_json(response).await["data"];
        assert_eq!(data["game"]["player_choice"], "rock");
        let outcome = data["game"]["outcome"].as_str().unwrap().to_string();
        match outcome.as_str() {
            "win" => {
                expected_xp += 50;
                expected_streak += 1;
                assert_eq!(data["award"]["primary"]["applied"], 50);
            }
            "draw" => {
                expected_xp += 10;
                assert_eq!(data["award"]["primary"]["applied"], 10);
            }
            "loss" => {
                expected_streak = 0;
                assert!(data["award"].is_null());
            }
            other => panic!("unexpected outcome {other}"),
        }
        assert_eq!(data["current_streak"], expected_streak);
    }

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}/progression", player.id),
        &token,
    )
    .await;
    let progression = &body_json(response).await["data"];
    assert_eq!(progression["experience_for_day"], 1000 - expected_xp);
    assert_eq!(progression["buddy_experience_points"], expected_xp);

    let response = get_auth(app, "/api/v1/games/rps/history", &token).await;
    let history = body_json(response).await;
    assert_eq!(history["data"].as_array().unwrap().len(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_choice_is_400(pool: PgPool) {
    let player = common::create_user(&pool, "player").await;
    let token = common::token_for(&player);
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/games/rps", choice("lizard"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Play until the round earns a nominal reward, returning the round payload.
async fn play_until_rewarded(app: &axum::Router, token: &str) -> serde_json::Value {
    for _ in 0..60 {
        let response = post_json_auth(app.clone(), "/api/v1/games/rps", choice("paper"), token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let data = body_json(response).await["data"].clone();
        if data["game"]["outcome"] != "loss" {
            return data;
        }
    }
    panic!("no rewarded round in 60 plays");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exhausted_budget_records_zero_xp(pool: PgPool) {
    let player = common::create_user(&pool, "tired").await;
    sqlx::query("UPDATE users SET experience_for_day = 0, buddy_experience_for_day = 0 WHERE id = $1")
        .bind(player.id)
        .execute(&pool)
        .await
        .unwrap();
    let token = common::token_for(&player);
    let app = common::build_test_app(pool);

    let data = play_until_rewarded(&app, &token).await;
    assert_eq!(data["award"]["primary"]["applied"], 0);
    assert_eq!(data["game"]["xp_awarded"], 0);

    let response = get_auth(app.clone(), "/api/v1/games/rps/history", &token).await;
    let history = body_json(response).await;
    assert_eq!(history["data"][0]["id"], data["game"]["id"]);
    assert_eq!(history["data"][0]["xp_awarded"], 0);

    let response = get_auth(
        app,
        &format!("/api/v1/users/{}/progression", player.id),
        &token,
    )
    .await;
    let progression = &body_json(response).await["data"];
    assert_eq!(progression["experience_points"], 0);
    assert_eq!(progression["progress_version"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_stores_doubled_reward_at_top_buddy_level(pool: PgPool) {
    let player = common::create_user(&pool, "veteran").await;
    sqlx::query(
        "UPDATE users SET buddy_level = 10, experience_for_day = 2000, buddy_experience_for_day = 3000 \
         WHERE id = $1",
    )
    .bind(player.id)
    .execute(&pool)
    .await
    .unwrap();
    let token = common::token_for(&player);
    let app = common::build_test_app(pool);

    let data = play_until_rewarded(&app, &token).await;
    let nominal = if data["game"]["outcome"] == "win" { 50 } else { 10 };
    assert_eq!(data["award"]["primary"]["applied"], nominal * 2);
    assert_eq!(data["game"]["xp_awarded"], nominal * 2);

    let response = get_auth(app, "/api/v1/games/rps/history", &token).await;
    let history = body_json(response).await;
    assert_eq!(history["data"][0]["xp_awarded"], nominal * 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/games/rps/history").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
