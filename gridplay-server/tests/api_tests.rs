//! Integration tests for gridplay-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use gridplay_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new());
    create_router(&config, state)
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn delete(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Play the lowest empty cell until the game ends
async fn play_out(app: &axum::Router, id: u64) -> Value {
    let (_, mut game) = get(app, &format!("/api/game/{}", id)).await;
    while game["active_side"].is_string() {
        let cell = game["board"]["cells"]
            .as_array()
            .unwrap()
            .iter()
            .position(Value::is_null)
            .unwrap();
        let (status, next) = post(app, &format!("/api/game/{}/move", id), json!({ "cell": cell })).await;
        assert_eq!(status, StatusCode::OK);
        game = next;
    }
    game
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();
    let (status, json) = get(&app, "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "rust");
}

#[tokio::test]
async fn test_start_game_defaults() {
    let app = test_app();
    let (status, json) = post(&app, "/api/game/start", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "human_vs_ai");
    assert_eq!(json["active_side"], "A");
    assert_eq!(json["status"]["status"], "in_progress");
    assert_eq!(json["moves"].as_array().unwrap().len(), 0);
    assert!(json["id"].is_u64());
}

#[tokio::test]
async fn test_move_gets_engine_reply() {
    let app = test_app();
    let (_, game) = post(&app, "/api/game/start", json!({ "difficulty": "hard" })).await;
    let id = game["id"].as_u64().unwrap();

    let (status, json) = post(&app, &format!("/api/game/{}/move", id), json!({ "cell": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    let moves = json["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0], 4);
    assert_eq!(json["active_side"], "A");

    // Repeated reads are identical
    let (_, first) = get(&app, &format!("/api/game/{}", id)).await;
    let (_, second) = get(&app, &format!("/api/game/{}", id)).await;
    assert_eq!(first, second);
    assert_eq!(first, json);
}

#[tokio::test]
async fn test_illegal_moves_rejected() {
    let app = test_app();
    let (_, game) = post(&app, "/api/game/start", json!({ "mode": "human_vs_human" })).await;
    let id = game["id"].as_u64().unwrap();
    let uri = format!("/api/game/{}/move", id);

    post(&app, &uri, json!({ "cell": 0 })).await;
    let (status, json) = post(&app, &uri, json!({ "cell": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("occupied"));

    let (status, _) = post(&app, &uri, json!({ "cell": 9 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, after) = get(&app, &format!("/api/game/{}", id)).await;
    assert_eq!(after["moves"], json!([0]));
}

#[tokio::test]
async fn test_unknown_handles() {
    let app = test_app();
    let (status, json) = get(&app, "/api/game/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());

    let (status, _) = get(&app, "/api/tournament/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_parameters() {
    let app = test_app();
    let (status, _) = post(&app, "/api/game/start", json!({ "difficulty": "impossible" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/api/game/start", json!({ "mode": "chess" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/api/tournament/start", json!({ "rounds": 0 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_finished_game_updates_stats() {
    let app = test_app();
    let (_, game) = post(&app, "/api/game/start", json!({ "mode": "human_vs_human" })).await;
    let id = game["id"].as_u64().unwrap();
    let uri = format!("/api/game/{}/move", id);

    // A takes the top row
    let mut last = Value::Null;
    for cell in [0, 3, 1, 4, 2] {
        let (status, json) = post(&app, &uri, json!({ "cell": cell })).await;
        assert_eq!(status, StatusCode::OK);
        last = json;
    }
    assert_eq!(last["status"]["status"], "win");
    assert_eq!(last["status"]["winner"], "A");
    assert_eq!(last["winning_line"], json!([0, 1, 2]));
    assert!(last["active_side"].is_null());

    let (status, _) = post(&app, &uri, json!({ "cell": 8 })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, stats) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_games"], 1);
    assert_eq!(stats["wins"], 1);
    assert_eq!(stats["current_streak"], 1);
    let badges: Vec<&str> = stats["badges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert!(badges.contains(&"first_win"));
    assert!(badges.contains(&"flawless"));
}

#[tokio::test]
async fn test_reset_game() {
    let app = test_app();
    let (_, game) = post(&app, "/api/game/start", json!({ "mode": "human_vs_human" })).await;
    let id = game["id"].as_u64().unwrap();
    post(&app, &format!("/api/game/{}/move", id), json!({ "cell": 4 })).await;

    let (status, json) = post(&app, &format!("/api/game/{}/reset", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["moves"], json!([]));
    assert_eq!(json["active_side"], "A");
}

#[tokio::test]
async fn test_single_round_tournament() {
    let app = test_app();
    let (status, tournament) = post(
        &app,
        "/api/tournament/start",
        json!({ "rounds": 1, "contestants": ["Ada", "Robo"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tournament["status"], "active");
    assert_eq!(tournament["current_round"], 1);
    assert_eq!(tournament["contestants"][0]["name"], "Ada");
    let tid = tournament["id"].as_u64().unwrap();

    let (status, game) = post(
        &app,
        &format!("/api/tournament/{}/game", tid),
        json!({ "difficulty": "easy" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["mode"], "tournament");
    play_out(&app, game["id"].as_u64().unwrap()).await;

    let (_, tournament) = get(&app, &format!("/api/tournament/{}", tid)).await;
    assert_eq!(tournament["status"], "completed");
    assert!(tournament["outcome"]["verdict"].is_string());

    let (status, _) = post(&app, &format!("/api/tournament/{}/game", tid), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_end_game_releases_handle() {
    let app = test_app();
    let (_, game) = post(&app, "/api/game/start", json!({ "mode": "human_vs_human" })).await;
    let id = game["id"].as_u64().unwrap();
    post(&app, &format!("/api/game/{}/move", id), json!({ "cell": 4 })).await;

    let (status, json) = delete(&app, &format!("/api/game/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["moves"], json!([4]));

    let (status, _) = get(&app, &format!("/api/game/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete(&app, &format!("/api/game/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tournament_round_is_single_use() {
    let app = test_app();
    let (_, tournament) = post(&app, "/api/tournament/start", json!({ "rounds": 3 })).await;
    let tid = tournament["id"].as_u64().unwrap();
    let uri = format!("/api/tournament/{}/game", tid);

    let (status, game) = post(&app, &uri, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let gid = game["id"].as_u64().unwrap();

    // Second game for the same round
    let (status, _) = post(&app, &uri, json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // No restarting or abandoning the round
    let (status, _) = post(&app, &format!("/api/game/{}/reset", gid), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = delete(&app, &format!("/api/game/{}", gid)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    play_out(&app, gid).await;
    let (_, state) = get(&app, &format!("/api/tournament/{}", tid)).await;
    assert_eq!(state["current_round"], 2);
    let (status, _) = post(&app, &format!("/api/game/{}/reset", gid), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(&app, &uri, json!({})).await;
    assert_eq!(status, StatusCode::OK);
}
