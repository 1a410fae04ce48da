//! End-to-end tests for the API router, with provider HTTP endpoints mocked.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use clap::Parser;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use service::config::{Config, RustEnv};
use tower::ServiceExt;
use web::{router::define_routes, AppState};

const BOUNDARY: &str = "X-API-ROUTES-TEST-BOUNDARY";

fn test_config(groq_url: &str, mailersend_url: &str) -> Config {
    Config::parse_from(["meeting_summarizer_rs"])
        .set_groq_api_key(Some("gsk_test_key".to_string()))
        .set_groq_base_url(groq_url.to_string())
        .set_mailersend_api_key(Some("test_api_key_123".to_string()))
        .set_mailersend_base_url(mailersend_url.to_string())
        .set_smtp_user(Some("sender@example.com".to_string()))
}

fn app(config: Config) -> axum::Router {
    define_routes(AppState::new(config))
}

fn multipart_request(filename: &str, content_type: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"transcript\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request builder must not fail")
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builder must not fail")
}

async fn response_json(response: axum::response::Response) -> Value {
    let body_bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must be collected")
        .to_bytes();
    serde_json::from_slice(body_bytes.as_ref()).expect("response body must be JSON")
}

#[tokio::test]
async fn health_check_responds() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upload_returns_decoded_transcript() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let request = multipart_request("notes.txt", "text/plain", b"hello test");

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let value = response_json(response).await;
    assert_eq!(value["message"], json!("File uploaded successfully"));
    assert_eq!(value["transcript"], json!("hello test"));
    assert_eq!(value["filename"], json!("notes.txt"));
}

#[tokio::test]
async fn upload_accepts_markdown_by_extension() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let request = multipart_request("agenda.md", "application/octet-stream", b"# Agenda");

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let value = response_json(response).await;
    assert_eq!(value["transcript"], json!("# Agenda"));
}

#[tokio::test]
async fn upload_without_file_field_returns_400() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nnot a file\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("No file uploaded"));
}

#[tokio::test]
async fn upload_rejects_unsupported_file_type() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let request = multipart_request("deck.pdf", "application/pdf", b"%PDF-1.4");

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("Only text files are allowed"));
}

#[tokio::test]
async fn upload_rejects_oversized_file_with_dedicated_error() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let oversized = vec![b'a'; 5 * 1024 * 1024 + 1];
    let request = multipart_request("big.txt", "text/plain", &oversized);

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("File too large. Max size is 5MB."));
}

#[tokio::test]
async fn upload_beyond_transport_limit_still_gets_dedicated_error() {
    // Large enough to trip the transport body limit itself, so the failure
    // surfaces as a multipart read error rather than the extraction check.
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let oversized = vec![b'a'; 6 * 1024 * 1024];
    let request = multipart_request("huge.txt", "text/plain", &oversized);

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("File too large. Max size is 5MB."));
}

#[tokio::test]
async fn summarize_missing_fields_returns_400_without_provider_call() {
    let mut groq = mockito::Server::new_async().await;
    let mock = groq
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let app = app(test_config(&groq.url(), "http://unused.invalid"));
    let request = json_request("/api/summarize", json!({ "transcript": "hello test" }));

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = response_json(response).await;
    assert_eq!(
        value["error"],
        json!("Transcript and custom instruction are required")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn summarize_empty_strings_are_treated_as_missing() {
    let mut groq = mockito::Server::new_async().await;
    let mock = groq
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let app = app(test_config(&groq.url(), "http://unused.invalid"));
    let request = json_request(
        "/api/summarize",
        json!({ "transcript": "", "customInstruction": "one sentence" }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    mock.assert_async().await;
}

#[tokio::test]
async fn summarize_returns_completion_verbatim() {
    let mut groq = mockito::Server::new_async().await;
    let mock = groq
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "X"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let app = app(test_config(&groq.url(), "http://unused.invalid"));
    let request = json_request(
        "/api/summarize",
        json!({ "transcript": "hello test", "customInstruction": "one sentence" }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let value = response_json(response).await;
    assert_eq!(value, json!({ "summary": "X" }));
    mock.assert_async().await;
}

#[tokio::test]
async fn summarize_provider_failure_returns_500_with_details() {
    let mut groq = mockito::Server::new_async().await;
    let _mock = groq
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(
            json!({"error": {"message": "Invalid API Key", "type": "invalid_request_error"}})
                .to_string(),
        )
        .create_async()
        .await;

    let app = app(test_config(&groq.url(), "http://unused.invalid"));
    let request = json_request(
        "/api/summarize",
        json!({ "transcript": "hello test", "customInstruction": "one sentence" }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("Failed to generate summary"));
    assert_eq!(value["details"], json!("Invalid API Key"));
    // Default runtime environment is development, so the error chain is included.
    assert!(value["stack"].is_string());
}

#[tokio::test]
async fn summarize_failure_suppresses_stack_in_production() {
    let mut groq = mockito::Server::new_async().await;
    let _mock = groq
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("provider exploded")
        .create_async()
        .await;

    let config = test_config(&groq.url(), "http://unused.invalid")
        .set_runtime_env(RustEnv::Production);
    let app = app(config);
    let request = json_request(
        "/api/summarize",
        json!({ "transcript": "hello test", "customInstruction": "one sentence" }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let value = response_json(response).await;
    assert_eq!(value["details"], json!("provider exploded"));
    assert!(value.get("stack").is_none());
}

#[tokio::test]
async fn send_email_empty_recipients_returns_400_without_provider_call() {
    let mut mailersend = mockito::Server::new_async().await;
    let mock = mailersend
        .mock("POST", "/email")
        .expect(0)
        .create_async()
        .await;

    let app = app(test_config("http://unused.invalid", &mailersend.url()));
    let request = json_request(
        "/api/send-email",
        json!({ "recipients": [], "summary": "A test." }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("Recipients and summary are required"));
    mock.assert_async().await;
}

#[tokio::test]
async fn send_email_missing_summary_returns_400() {
    let app = app(test_config("http://unused.invalid", "http://unused.invalid"));
    let request = json_request(
        "/api/send-email",
        json!({ "recipients": ["a@x.com"], "subject": "S" }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn send_email_returns_message_id_and_recipients() {
    let mut mailersend = mockito::Server::new_async().await;
    let mock = mailersend
        .mock("POST", "/email")
        .with_status(202)
        .with_header("x-message-id", "m1")
        .create_async()
        .await;

    let app = app(test_config("http://unused.invalid", &mailersend.url()));
    let request = json_request(
        "/api/send-email",
        json!({ "recipients": ["a@x.com", "b@x.com"], "summary": "A test." }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let value = response_json(response).await;
    assert_eq!(
        value,
        json!({
            "message": "Email sent successfully",
            "messageId": "m1",
            "recipients": ["a@x.com", "b@x.com"],
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn send_email_without_provider_message_id_reports_null() {
    let mut mailersend = mockito::Server::new_async().await;
    let _mock = mailersend
        .mock("POST", "/email")
        .with_status(202)
        .create_async()
        .await;

    let app = app(test_config("http://unused.invalid", &mailersend.url()));
    let request = json_request(
        "/api/send-email",
        json!({ "recipients": ["a@x.com"], "summary": "A test." }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let value = response_json(response).await;
    assert_eq!(value["message"], json!("Email sent successfully"));
    assert_eq!(value["messageId"], Value::Null);
    assert_eq!(value["recipients"], json!(["a@x.com"]));
}

#[tokio::test]
async fn send_email_provider_rejection_returns_500_with_message() {
    let mut mailersend = mockito::Server::new_async().await;
    let _mock = mailersend
        .mock("POST", "/email")
        .with_status(401)
        .with_body("Unauthenticated.")
        .create_async()
        .await;

    let app = app(test_config("http://unused.invalid", &mailersend.url()));
    let request = json_request(
        "/api/send-email",
        json!({ "recipients": ["a@x.com"], "summary": "A test." }),
    );

    let response = app.oneshot(request).await.expect("handler should respond");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let value = response_json(response).await;
    assert_eq!(value["error"], json!("Unauthenticated."));
}

#[tokio::test]
async fn upload_summarize_send_email_scenario() {
    let mut groq = mockito::Server::new_async().await;
    let mut mailersend = mockito::Server::new_async().await;

    let groq_mock = groq
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "A test."}}]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mail_mock = mailersend
        .mock("POST", "/email")
        .with_status(202)
        .with_header("x-message-id", "abc")
        .create_async()
        .await;

    let config = test_config(&groq.url(), &mailersend.url());

    // Upload a 10-byte .txt file.
    let response = app(config.clone())
        .oneshot(multipart_request("notes.txt", "text/plain", b"hello test"))
        .await
        .expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded = response_json(response).await;
    assert_eq!(uploaded["transcript"], json!("hello test"));

    // Summarize it with a one-sentence instruction.
    let response = app(config.clone())
        .oneshot(json_request(
            "/api/summarize",
            json!({
                "transcript": uploaded["transcript"],
                "customInstruction": "one sentence",
            }),
        ))
        .await
        .expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let summarized = response_json(response).await;
    assert_eq!(summarized["summary"], json!("A test."));

    // Email the summary out.
    let response = app(config)
        .oneshot(json_request(
            "/api/send-email",
            json!({
                "recipients": ["u@d.com"],
                "subject": "S",
                "summary": summarized["summary"],
            }),
        ))
        .await
        .expect("handler should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let sent = response_json(response).await;
    assert_eq!(sent["messageId"], json!("abc"));
    assert_eq!(sent["recipients"], json!(["u@d.com"]));

    groq_mock.assert_async().await;
    mail_mock.assert_async().await;
}
