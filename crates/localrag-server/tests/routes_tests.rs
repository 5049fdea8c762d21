use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use localrag_agent::{Agent, PlannerConfig};
use localrag_core::error::OracleError;
use localrag_core::traits::{GenerateOptions, Generator};
use localrag_core::types::{ChunkMeta, DocumentChunk};
use localrag_text::CorpusIndex;
use serde_json::{json, Value};
use tower::ServiceExt;

struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, OracleError>>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<String, OracleError>>) -> Self {
        Self { replies: Mutex::new(replies.into()) }
    }
}

impl Generator for ScriptedGenerator {
    fn model(&self) -> &str { "llama3.1" }

    fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> Result<String, OracleError> {
        self.replies.lock().unwrap().pop_front().unwrap_or(Err(OracleError::EmptyResponse))
    }
}

fn agent(replies: &[&str]) -> Agent {
    agent_with(replies.iter().map(|r| Ok(r.to_string())).collect())
}

fn agent_with(replies: Vec<Result<String, OracleError>>) -> Agent {
    let index = CorpusIndex::from_chunks(vec![DocumentChunk {
        id: "api.pdf-p3".into(),
        content: "The API rate limit is 100 requests per minute".into(),
        metadata: ChunkMeta::page("api.pdf", 3),
    }]);
    Agent::new(Arc::new(ScriptedGenerator::new(replies)), Arc::new(index), PlannerConfig::default())
}

async fn send(agent: Agent, request: Request<Body>) -> (StatusCode, Value) {
    let response = localrag_server::router(agent).oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn post_agent(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, body) = send(agent(&[]), Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn agent_returns_answer_with_sources() {
    let agent = agent(&["SEARCH: rate limit", "FINISH", "100 requests per minute"]);
    let (status, body) = send(agent, post_agent("/agent", json!({ "query": "What is the rate limit?" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "100 requests per minute");
    assert_eq!(body["iterations"], 2);
    assert_eq!(body["sources"][0]["file"], "api.pdf");
    assert_eq!(body["sources"][0]["page_start"], 3);
    assert_eq!(body["sources"][0]["page_end"], 3);
    assert!(body["confidence"].as_f64().unwrap() > 0.0);
    assert!(body.get("trace").is_none());
}

#[tokio::test]
async fn debug_flag_adds_trace() {
    let agent = agent(&["SEARCH: rate limit", "FINISH", "answer"]);
    let (status, body) = send(agent, post_agent("/agent?debug=true", json!({ "query": "limits" }))).await;

    assert_eq!(status, StatusCode::OK);
    let trace = &body["trace"];
    assert_eq!(trace["iterations_list"][0], json!({ "action": "SEARCH", "search_query": "rate limit", "num_results": 1 }));
    assert_eq!(trace["iterations_list"][1], json!({ "action": "FINISH", "reason": "sufficient_info" }));
    assert_eq!(trace["docs"][0]["id"], "api.pdf-p3");
    assert_eq!(trace["docs"][0]["metadata"]["file"], "api.pdf");
    assert!(trace["docs"][0]["score"].as_f64().is_some());
}

#[tokio::test]
async fn fallback_answer_when_nothing_found() {
    let (status, body) = send(agent(&["FINISH"]), post_agent("/agent", json!({ "query": "anything" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], 0.0);
    assert_eq!(body["sources"], json!([]));
    assert_eq!(body["iterations"], 1);
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let (status, body) = send(agent(&[]), post_agent("/agent", json!({ "query": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_query_field_gets_json_error() {
    let (status, body) = send(agent(&[]), post_agent("/agent", json!({ "question": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let request = Request::post("/agent")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(agent(&[]), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn oracle_failure_is_a_server_error() {
    let agent = agent_with(vec![Err(OracleError::Unreachable { endpoint: "http://x".into(), reason: "refused".into() })]);
    let (status, body) = send(agent, post_agent("/agent", json!({ "query": "limits" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("refused"));
}

#[tokio::test]
async fn llm_ping_reports_model_and_reply() {
    let (status, body) = send(agent(&["FINISH"]), Request::get("/llm_ping").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "model": "llama3.1", "out": "FINISH" }));
}

#[tokio::test]
async fn llm_ping_reply_is_cut_to_one_hundred_chars() {
    let long = "F".repeat(150);
    let (status, body) = send(agent(&[long.as_str()]), Request::get("/llm_ping").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["out"].as_str().unwrap().len(), 100);
}

#[tokio::test]
async fn llm_ping_failure_is_a_server_error() {
    let (status, _) = send(agent(&[]), Request::get("/llm_ping").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
