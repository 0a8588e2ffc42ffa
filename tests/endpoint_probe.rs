//! Endpoint probe against a mock chat backend.

use ai_doctor::probe::endpoint::{render_body, ChatBody, ChatOutcome, EndpointProbe};

#[tokio::test]
async fn health_is_true_for_200() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let probe = EndpointProbe::with_base_url(&server.url()).unwrap();
    assert!(probe.check_health().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn health_is_false_for_non_200() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(503)
        .create_async()
        .await;

    let probe = EndpointProbe::with_base_url(&server.url()).unwrap();
    assert!(!probe.check_health().await);
}

#[tokio::test]
async fn health_is_false_for_unreachable_backend() {
    let probe = EndpointProbe::with_base_url("http://127.0.0.1:9").unwrap();
    assert!(!probe.check_health().await);
}

#[tokio::test]
async fn chat_extracts_reply_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/message")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response":"All systems go"}"#)
        .create_async()
        .await;

    let probe = EndpointProbe::with_base_url(&server.url()).unwrap();
    match probe.test_chat().await {
        ChatOutcome::Completed { status, body, .. } => {
            assert_eq!(status, 200);
            assert_eq!(body, ChatBody::Reply("All systems go".into()));
            // The reply sits alone between the marker lines.
            let rendered = render_body(&body);
            assert_eq!(
                rendered,
                "\n--- BACKEND RESPONSE ---\n\nAll systems go\n\n------------------------\n"
            );
        }
        other => panic!("expected completed chat, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_reports_json_without_reply_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat/message")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"model backend unavailable"}"#)
        .create_async()
        .await;

    let probe = EndpointProbe::with_base_url(&server.url()).unwrap();
    match probe.test_chat().await {
        ChatOutcome::Completed { status, body, .. } => {
            assert_eq!(status, 500);
            match body {
                ChatBody::JsonWithoutReply(data) => {
                    assert_eq!(data["detail"], "model backend unavailable");
                }
                other => panic!("unexpected body: {other:?}"),
            }
        }
        other => panic!("expected completed chat, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_reports_raw_text_for_non_json() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat/message")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let probe = EndpointProbe::with_base_url(&server.url()).unwrap();
    match probe.test_chat().await {
        ChatOutcome::Completed { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, ChatBody::Raw("Bad Gateway".into()));
            assert_eq!(
                render_body(&body),
                "Response Text (Not JSON): Bad Gateway"
            );
        }
        other => panic!("expected completed chat, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_failure_carries_no_status() {
    let probe = EndpointProbe::with_base_url("http://127.0.0.1:9").unwrap();
    match probe.test_chat().await {
        ChatOutcome::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected failed chat, got {other:?}"),
    }
}
