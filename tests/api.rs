use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use countdown_keypad::{
    api::responses::{ApiResponse, HealthResponse, StatusResponse},
    create_router,
    state::{AppState, CountdownPhase},
    utils::InstantClock,
    CountdownSettings,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn router() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        CountdownSettings {
            tick_interval: Duration::from_millis(100),
            start_delay: Duration::ZERO,
        },
        Arc::new(InstantClock::new()),
    ));
    let app = create_router(Arc::clone(&state));
    (state, app)
}

async fn call<T: DeserializeOwned>(app: &Router, method: &str, uri: &str) -> (StatusCode, Option<T>) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).ok())
}

#[tokio::test]
async fn typing_digits_updates_keypad_labels() {
    let (_state, app) = router();

    for digit in ["1", "3", "0", "0"] {
        let (status, _) = call::<ApiResponse>(&app, "POST", &format!("/keypad/digit/{}", digit)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = call::<ApiResponse>(&app, "POST", "/keypad/delete").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, "idle");
    assert_eq!(body.message, "Digit deleted");
    assert_eq!(body.snapshot.buffer, "130");
    assert_eq!(body.snapshot.keypad.minutes, "01m");
    assert_eq!(body.snapshot.keypad.seconds, "30s");
    assert!(body.snapshot.input_mode);
}

#[tokio::test]
async fn leading_zero_is_ignored_not_rejected() {
    let (_state, app) = router();

    let (status, body) = call::<ApiResponse>(&app, "POST", "/keypad/digit/0").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.message, "Digit ignored");
    assert_eq!(body.snapshot.buffer, "");
}

#[tokio::test]
async fn invalid_digit_is_bad_request() {
    let (_state, app) = router();

    let (status, _) = call::<ApiResponse>(&app, "POST", "/keypad/digit/12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call::<ApiResponse>(&app, "POST", "/keypad/digit/x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn start_then_stop_round_trip() {
    let (state, app) = router();
    call::<ApiResponse>(&app, "POST", "/keypad/digit/9").await;

    let (status, body) = call::<ApiResponse>(&app, "POST", "/countdown/start").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, "running");
    assert!(!body.snapshot.input_mode);

    let (_, body) = call::<ApiResponse>(&app, "POST", "/countdown/start").await;
    assert_eq!(body.unwrap().message, "Countdown already running");

    tokio::time::sleep(Duration::from_millis(2_050)).await;
    let (_, body) = call::<StatusResponse>(&app, "GET", "/status").await;
    let body = body.unwrap();
    assert_eq!(body.snapshot.countdown.remaining_label, "00:00:07");
    assert_eq!(body.last_action.as_deref(), Some("start"));

    let (status, body) = call::<ApiResponse>(&app, "POST", "/countdown/stop").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, "idle");
    assert_eq!(body.snapshot.countdown.remaining_label, "00:00:00");
    assert_eq!(body.snapshot.countdown.hours_progress, 1.0);
    assert_eq!(body.snapshot.buffer, "");
    assert_eq!(state.phase().unwrap(), CountdownPhase::Idle);
}

#[tokio::test]
async fn status_and_health() {
    let (_state, app) = router();

    let (status, body) = call::<StatusResponse>(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.port, 20554);
    assert_eq!(body.snapshot.keypad.hours, "00h");
    assert_eq!(body.snapshot.countdown.remaining_label, "00:00:00");
    assert!(body.last_action.is_none());

    let (status, body) = call::<HealthResponse>(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().status, "ok");
}
