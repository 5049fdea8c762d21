use localrag_agent::{AgentAnswer, Iteration, SourceRef};
use localrag_core::types::ScoredChunk;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AgentParams {
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub answer: String,
    pub confidence: f32,
    pub iterations: usize,
    pub sources: Vec<SourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<AgentTrace>,
}

#[derive(Debug, Serialize)]
pub struct AgentTrace {
    pub iterations_list: Vec<Iteration>,
    pub docs: Vec<ScoredChunk>,
}

impl AgentResponse {
    pub fn from_answer(answer: AgentAnswer, debug: bool) -> Self {
        let AgentAnswer { final_answer, confidence, sources, iterations, documents, .. } = answer;
        Self {
            answer: final_answer,
            confidence,
            iterations: iterations.len(),
            sources,
            trace: debug.then(|| AgentTrace { iterations_list: iterations, docs: documents }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub model: String,
    pub out: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
