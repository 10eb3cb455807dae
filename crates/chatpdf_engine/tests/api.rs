use std::time::Duration;

use chatpdf_engine::{ApiSettings, ChatApi, Credentials, FailureKind, ReqwestChatApi, WAKE_MESSAGE};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestChatApi {
    let settings = ApiSettings::with_base_url(&server.uri()).expect("mock server url");
    ReqwestChatApi::new(settings).expect("client")
}

#[tokio::test]
async fn ask_sends_question_flag_and_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/send"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(json!({ "question": "What is it?", "noDoc": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "**It** is X" })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = api_for(&server)
        .ask("tok-1", "What is it?", false)
        .await
        .expect("answer");
    assert_eq!(answer, "**It** is X");
}

#[tokio::test]
async fn ask_with_document_sends_no_doc_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/send"))
        .and(body_json(json!({ "question": "q", "noDoc": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "a" })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = api_for(&server).ask("tok", "q", true).await.expect("answer");
    assert_eq!(answer, "a");
}

#[tokio::test]
async fn ask_failure_keeps_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/send"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "vector dimensions mismatch" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).ask("tok", "q", true).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            status: 500,
            error: Some("vector dimensions mismatch".to_string()),
        }
    );
}

#[tokio::test]
async fn ask_failure_without_json_body_has_no_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/send"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = api_for(&server).ask("tok", "q", true).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            status: 502,
            error: None,
        }
    );
}

#[tokio::test]
async fn ask_success_without_answer_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "x" })))
        .mount(&server)
        .await;

    let err = api_for(&server).ask("tok", "q", true).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn ask_times_out_on_slow_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/send"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "answer": "late" })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::with_base_url(&server.uri()).unwrap()
    };
    let err = ReqwestChatApi::new(settings)
        .unwrap()
        .ask("tok", "q", true)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/upload"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("chapter one"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("notes.txt");
    tokio::fs::write(&file, "chapter one").await.unwrap();

    api_for(&server).upload("tok", &file).await.expect("upload ok");
}

#[tokio::test]
async fn upload_rejection_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/upload"))
        .respond_with(ResponseTemplate::new(415))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("image.png");
    tokio::fs::write(&file, [0u8, 1, 2]).await.unwrap();

    let err = api_for(&server).upload("tok", &file).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::HttpStatus { status: 415, .. }));
}

#[tokio::test]
async fn upload_of_missing_file_is_io_error() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();

    let err = api_for(&server)
        .upload("tok", &dir.path().join("missing.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn sign_in_and_sign_up_return_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/signin"))
        .and(body_json(json!({ "login": "reader", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t-in" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/signup"))
        .and(body_json(
            json!({ "username": "reader", "email": "r@example.com", "password": "pw" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t-up" })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let token = api
        .authenticate(&Credentials::SignIn {
            login: "reader".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token, "t-in");

    let token = api
        .authenticate(&Credentials::SignUp {
            username: "reader".to_string(),
            email: "r@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token, "t-up");
}

#[tokio::test]
async fn sign_in_rejection_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/signin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .authenticate(&Credentials::SignIn {
            login: "reader".to_string(),
            password: "bad".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            status: 401,
            error: Some("nope".to_string()),
        }
    );
}

#[tokio::test]
async fn wake_posts_warm_up_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/z"))
        .and(body_json(json!({ "message": WAKE_MESSAGE })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).wake().await.expect("wake ok");
}
