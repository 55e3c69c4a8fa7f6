//! End-to-end tests for the phone auth flow.
//!
//! The challenge and OTP providers are the in-memory mocks from
//! `phone_auth::testing`; the identity bridge is the real reqwest client
//! pointed at an in-process stub backend.

use std::sync::Arc;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use phone_auth::testing::{MockChallengeProvider, MockOtpProvider};
use phone_auth::{AuthError, BackendError, HttpIdentityBridge, PhoneAuth, SessionState};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Stub backend serving the two identity endpoints with fixed statuses.
/// The verify endpoint sets a session cookie; the onboarding endpoint
/// reports whether that cookie came back.
async fn spawn_backend(verify_status: u16, onboarding_status: u16) -> String {
    let verify = move |Json(_body): Json<Value>| async move {
        (
            StatusCode::from_u16(verify_status).unwrap(),
            [(header::SET_COOKIE, "sid=test-session; Path=/")],
            Json(json!({"status": "ok"})),
        )
    };

    let onboarding = move |headers: HeaderMap, Json(_body): Json<Value>| async move {
        let has_cookie = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("sid=test-session"))
            .unwrap_or(false);

        (
            StatusCode::from_u16(onboarding_status).unwrap(),
            Json(json!({"status": "onboarded", "session_cookie_seen": has_cookie})),
        )
    };

    let app = Router::new()
        .route("/api/auth/firebase-verify", post(verify))
        .route("/api/auth/complete-onboarding", post(onboarding));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn auth_against(base_url: &str) -> PhoneAuth {
    PhoneAuth::new(
        Arc::new(MockOtpProvider::new()),
        Arc::new(MockChallengeProvider::new()),
        Arc::new(HttpIdentityBridge::new(base_url)),
    )
}

#[tokio::test]
async fn happy_path_sends_verifies_and_exchanges() {
    init_tracing();
    let base_url = spawn_backend(200, 200).await;
    let mut auth = auth_against(&base_url);

    let sent = auth.send_otp("+15551234567").await.unwrap();
    assert_eq!(sent.message, "OTP sent to your phone");
    assert!(!sent.verification_id.is_empty());

    let verified = auth.verify_otp("123456").await.unwrap();
    assert!(!verified.firebase_user.uid.is_empty());
    assert_eq!(verified.firebase_user.phone_number, "+15551234567");
    assert_eq!(verified.backend_response, json!({"status": "ok"}));
    assert_eq!(auth.session().state(), SessionState::Verified);
}

#[tokio::test]
async fn backend_failure_fails_the_whole_verify() {
    init_tracing();
    let base_url = spawn_backend(500, 200).await;
    let mut auth = auth_against(&base_url);

    auth.send_otp("+15551234567").await.unwrap();
    let err = auth.verify_otp("123456").await.unwrap_err();

    match &err {
        AuthError::Backend(BackendError::Status(code)) => assert_eq!(*code, 500),
        other => panic!("expected backend status error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn onboarding_error_carries_the_status_code() {
    init_tracing();
    let base_url = spawn_backend(200, 400).await;
    let auth = auth_against(&base_url);

    let err = auth
        .complete_onboarding(json!({"name": "A"}))
        .await
        .unwrap_err();

    match &err {
        AuthError::Backend(backend) => assert_eq!(backend.status(), Some(400)),
        other => panic!("expected backend status error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "HTTP error! status: 400");

    // Onboarding never touches the verification state machine.
    assert_eq!(auth.session().state(), SessionState::Idle);
}

#[tokio::test]
async fn session_cookie_from_exchange_rides_along_to_onboarding() {
    init_tracing();
    let base_url = spawn_backend(200, 200).await;
    let mut auth = auth_against(&base_url);

    auth.send_otp("+15551234567").await.unwrap();
    auth.verify_otp("123456").await.unwrap();

    let response = auth
        .complete_onboarding(json!({"name": "A", "email": "a@example.org"}))
        .await
        .unwrap();

    assert_eq!(response["session_cookie_seen"], json!(true));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    init_tracing();
    // Nothing listens here.
    let mut auth = auth_against("http://127.0.0.1:9");

    auth.send_otp("+15551234567").await.unwrap();
    let err = auth.verify_otp("123456").await.unwrap_err();

    match err {
        AuthError::Backend(BackendError::Transport(_)) => {}
        other => panic!("expected transport error, got {other:?}"),
    }
}
