use std::time::Duration;

use nodewatch_core::config::NotifyConfig;
use nodewatch_core::errors::NotificationError;
use nodewatch_core::traits::INotificationSink;
use nodewatch_transport::{HttpClientConfig, LogSink, TelegramSink};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sink(base_url: &str) -> TelegramSink {
    TelegramSink::new(HttpClientConfig::new(base_url, Duration::from_secs(5)), "123:abc").unwrap()
}

#[tokio::test]
async fn posts_markdown_message_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(json!({
            "chat_id": "-100200",
            "text": "*ALERT: Node Down*",
            "parse_mode": "Markdown",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    sink(&server.uri())
        .notify("-100200", "*ALERT: Node Down*")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_rejection_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found",
        })))
        .mount(&server)
        .await;

    let err = sink(&server.uri()).notify("nope", "hi").await.unwrap_err();
    match err {
        NotificationError::Rejected { status, description } => {
            assert_eq!(status, 400);
            assert!(description.contains("chat not found"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn ok_false_on_success_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Forbidden: bot was blocked by the user",
        })))
        .mount(&server)
        .await;

    let err = sink(&server.uri()).notify("chat", "hi").await.unwrap_err();
    assert!(matches!(err, NotificationError::Rejected { status: 200, .. }));
}

#[tokio::test]
async fn unreachable_api_does_not_leak_token() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = sink(&url).notify("chat", "hi").await.unwrap_err();
    assert!(matches!(err, NotificationError::Unreachable { .. }));
    assert!(!err.to_string().contains("123:abc"));
}

#[test]
fn from_config_requires_a_token() {
    let mut config = NotifyConfig::default();
    assert!(TelegramSink::from_config(&config, Duration::from_secs(5)).is_none());
    config.bot_token = Some("  ".into());
    assert!(TelegramSink::from_config(&config, Duration::from_secs(5)).is_none());
    config.bot_token = Some("123:abc".into());
    assert!(TelegramSink::from_config(&config, Duration::from_secs(5))
        .unwrap()
        .is_ok());
}

#[tokio::test]
async fn log_sink_always_accepts() {
    assert!(LogSink.notify("anywhere", "text").await.is_ok());
    assert_eq!(LogSink.name(), "log");
}
