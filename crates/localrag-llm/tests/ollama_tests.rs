use std::time::Duration;

use localrag_core::error::OracleError;
use localrag_core::traits::{GenerateOptions, Generator};
use localrag_llm::OllamaGenerator;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The client is blocking, so it is built, used and dropped off the test's async executor.
async fn generate(endpoint: String, model: &'static str, prompt: &'static str, options: GenerateOptions) -> Result<String, OracleError> {
    tokio::task::spawn_blocking(move || OllamaGenerator::new(endpoint, model).generate(prompt, &options))
        .await
        .expect("join")
}

#[tokio::test(flavor = "multi_thread")]
async fn returns_trimmed_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.1",
            "prompt": "hello",
            "stream": false,
            "options": { "temperature": 0, "num_ctx": 4096 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "  SEARCH: quotas \n" })))
        .expect(1)
        .mount(&server)
        .await;

    let out = generate(server.uri(), "llama3.1", "hello", GenerateOptions::default()).await.expect("ok");
    assert_eq!(out, "SEARCH: quotas");
}

#[tokio::test(flavor = "multi_thread")]
async fn overrides_are_merged_over_defaults() {
    let server = MockServer::start().await;
    Mock::given(path("/api/generate"))
        .and(body_partial_json(json!({ "options": { "temperature": 0.7, "num_ctx": 4096 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "FINISH" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = GenerateOptions::default();
    options.overrides.insert("temperature".into(), json!(0.7));
    assert_eq!(generate(format!("{}/", server.uri()), "llama3.1", "p", options).await.expect("ok"), "FINISH");
}

#[tokio::test(flavor = "multi_thread")]
async fn error_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"error\":\"model 'nope' not found\"}"))
        .mount(&server)
        .await;

    match generate(server.uri(), "nope", "p", GenerateOptions::default()).await {
        Err(OracleError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_body_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = generate(server.uri(), "llama3.1", "p", GenerateOptions::default()).await.unwrap_err();
    assert!(matches!(err, OracleError::InvalidBody(ref b) if b.contains("proxy")));
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_or_missing_response_is_empty() {
    let server = MockServer::start().await;
    Mock::given(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "   " })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .mount(&server)
        .await;

    let first = generate(server.uri(), "llama3.1", "p", GenerateOptions::default()).await.unwrap_err();
    let second = generate(server.uri(), "llama3.1", "p", GenerateOptions::default()).await.unwrap_err();
    assert!(matches!(first, OracleError::EmptyResponse));
    assert!(matches!(second, OracleError::EmptyResponse));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_service_times_out_without_retry() {
    let server = MockServer::start().await;
    Mock::given(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "FINISH" })).set_delay(Duration::from_secs(2)))
        .expect(1)
        .mount(&server)
        .await;

    let err = generate(server.uri(), "llama3.1", "p", GenerateOptions::with_timeout(Duration::from_millis(200))).await.unwrap_err();
    assert!(matches!(err, OracleError::Unreachable { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_truncates_reply() {
    let server = MockServer::start().await;
    Mock::given(path("/api/generate"))
        .and(body_partial_json(json!({ "prompt": "Respond with only: FINISH" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "F".repeat(150) })))
        .mount(&server)
        .await;

    let endpoint = server.uri();
    let out = tokio::task::spawn_blocking(move || OllamaGenerator::new(endpoint, "llama3.1").ping(Duration::from_secs(5)))
        .await
        .expect("join")
        .expect("ok");
    assert_eq!(out.len(), 100);
}

#[test]
fn unreachable_service_fails_fast() {
    let generator = OllamaGenerator::new("http://127.0.0.1:9", "llama3.1");
    let err = generator.generate("p", &GenerateOptions::with_timeout(Duration::from_secs(2))).unwrap_err();
    assert!(matches!(err, OracleError::Unreachable { .. }));
}
