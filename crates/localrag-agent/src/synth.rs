use serde::Serialize;
use tracing::info;

use localrag_core::error::OracleError;
use localrag_core::traits::{GenerateOptions, Generator};
use localrag_core::types::ScoredChunk;

use crate::confidence::{cite, confidence};
use crate::state::{AgentState, Iteration};

pub const FALLBACK_ANSWER: &str = "I couldn't find relevant excerpts.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRef {
    pub file: String,
    pub page_start: Option<u32>,
    pub page_end: Option<u32>,
    pub score: f32,
}

impl From<&ScoredChunk> for SourceRef {
    fn from(doc: &ScoredChunk) -> Self {
        let meta = doc.metadata();
        Self { file: meta.file.clone(), page_start: meta.page_start, page_end: meta.page_end, score: doc.score }
    }
}

/// Final result of one run, with the planner trace kept for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct AgentAnswer {
    pub query: String,
    pub final_answer: String,
    pub confidence: f32,
    pub sources: Vec<SourceRef>,
    pub iterations: Vec<Iteration>,
    pub documents: Vec<ScoredChunk>,
}

pub fn answer_prompt(query: &str, docs: &[ScoredChunk]) -> String {
    let excerpts: Vec<String> = docs.iter().map(|d| format!("[{}]\n{}", cite(d.metadata()), d.content())).collect();
    format!(
        "Answer using ONLY the PDF excerpts below.
Question: {query}

Excerpts:
{excerpts}

Be concise (bullets allowed). End with:
Sources: (file, pages) …",
        excerpts = excerpts.join("\n\n"),
    )
}

pub struct Synthesizer<'a> {
    generator: &'a dyn Generator,
    options: &'a GenerateOptions,
}

impl<'a> Synthesizer<'a> {
    pub fn new(generator: &'a dyn Generator, options: &'a GenerateOptions) -> Self { Self { generator, options } }

    /// Without documents the fallback answer is returned and the generator is not called.
    pub fn synthesize(&self, state: AgentState) -> Result<AgentAnswer, OracleError> {
        let AgentState { query, iterations, documents } = state;
        if documents.is_empty() {
            info!("No excerpts gathered, returning fallback answer");
            return Ok(AgentAnswer {
                query,
                final_answer: FALLBACK_ANSWER.to_string(),
                confidence: 0.0,
                sources: vec![],
                iterations,
                documents,
            });
        }

        let final_answer = self.generator.generate(&answer_prompt(&query, &documents), self.options)?;
        let confidence = confidence(&documents);
        let sources = documents.iter().map(SourceRef::from).collect();
        Ok(AgentAnswer { query, final_answer, confidence, sources, iterations, documents })
    }
}
