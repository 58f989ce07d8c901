use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use digital_timer::{create_router, AppState};

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string()));
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn initial_render() {
    let (_state, router) = app();
    let (status, view) = call(&router, Method::GET, "/timer").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["heading"], "Digital Timer");
    assert_eq!(view["time"], "25:00");
    assert_eq!(view["status_label"], "Paused");
    assert_eq!(view["control"]["label"], "Start");
    assert_eq!(view["control"]["icon_alt"], "play icon");
    assert_eq!(view["reset"]["icon_alt"], "reset icon");
    assert_eq!(view["limit_text"], "Set Timer Limit");
    assert_eq!(view["limit_minutes"], 25);
    assert_eq!(view["limit_controls_enabled"], true);
    assert_eq!(view["phase"], "idle");
}

#[tokio::test]
async fn limit_controls_adjust_and_report_noops() {
    let (_state, router) = app();

    let (status, body) = call(&router, Method::POST, "/timer/limit/increase").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["view"]["time"], "26:00");

    for _ in 0..25 {
        call(&router, Method::POST, "/timer/limit/decrease").await;
    }
    let (_, body) = call(&router, Method::GET, "/timer").await;
    assert_eq!(body["time"], "01:00");

    let (status, body) = call(&router, Method::POST, "/timer/limit/decrease").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unchanged");
    assert_eq!(body["view"]["limit_minutes"], 1);
}

#[tokio::test(start_paused = true)]
async fn start_pause_and_reset_round_trip() {
    let (state, router) = app();

    let (_, body) = call(&router, Method::POST, "/timer/start-pause").await;
    assert_eq!(body["message"], "Timer started");
    assert_eq!(body["view"]["status_label"], "Running");
    assert_eq!(body["view"]["control"]["label"], "Pause");

    tokio::time::sleep(Duration::from_millis(125_500)).await;
    let (_, view) = call(&router, Method::GET, "/timer").await;
    assert_eq!(view["time"], "22:55");
    assert_eq!(view["limit_controls_enabled"], false);

    let (_, body) = call(&router, Method::POST, "/timer/limit/increase").await;
    assert_eq!(body["status"], "unchanged");
    assert_eq!(body["view"]["limit_minutes"], 25);

    let (_, body) = call(&router, Method::POST, "/timer/start-pause").await;
    assert_eq!(body["message"], "Timer paused");
    assert_eq!(body["view"]["status_label"], "Paused");
    assert_eq!(body["view"]["phase"], "paused");

    let (_, body) = call(&router, Method::POST, "/timer/reset").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["view"]["time"], "25:00");
    assert!(!state.has_tick_source().unwrap());
}

#[tokio::test(start_paused = true)]
async fn completed_timer_reads_paused_at_zero() {
    let (state, router) = app();
    for _ in 0..24 {
        call(&router, Method::POST, "/timer/limit/decrease").await;
    }
    call(&router, Method::POST, "/timer/start-pause").await;

    tokio::time::sleep(Duration::from_millis(61_500)).await;
    let (_, view) = call(&router, Method::GET, "/timer").await;
    assert_eq!(view["time"], "00:00");
    assert_eq!(view["status_label"], "Paused");
    assert_eq!(view["phase"], "completed");
    assert!(!state.has_tick_source().unwrap());
}

#[tokio::test]
async fn status_reports_last_action() {
    let (_state, router) = app();
    call(&router, Method::POST, "/timer/limit/increase").await;

    let (status, body) = call(&router, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "increase-limit");
    assert_eq!(body["port"], 20554);
    assert_eq!(body["view"]["limit_minutes"], 26);
}

#[tokio::test]
async fn health_is_ok() {
    let (_state, router) = app();
    let (status, body) = call(&router, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
