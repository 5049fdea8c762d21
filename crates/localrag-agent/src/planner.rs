//! Bounded search/finish loop.
//!
//! Each step asks the generator for one decision, runs it, and appends the
//! outcome to the state. The loop ends on the first FINISH record; the step
//! cap guarantees one arrives no matter what the generator says.

use tracing::{debug, info};

use localrag_core::error::OracleError;
use localrag_core::traits::{GenerateOptions, Generator, Retriever};

use crate::state::{AgentState, FinishReason, Iteration};

pub const DEFAULT_MAX_STEPS: usize = 3;
pub const DEFAULT_TOP_K: usize = 3;

const SEARCH_MARKER: &str = "SEARCH:";
const FINISH_MARKER: &str = "FINISH";

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub max_steps: usize,
    pub top_k: usize,
    pub options: GenerateOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_steps: DEFAULT_MAX_STEPS, top_k: DEFAULT_TOP_K, options: GenerateOptions::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Finish,
    Search(String),
    Unparseable,
}

/// Case-insensitive. A leading FINISH wins; otherwise the text after the last
/// `SEARCH:` is the next query.
pub fn parse_decision(response: &str) -> Decision {
    let trimmed = response.trim();
    // ASCII uppercasing keeps byte offsets aligned with `trimmed`
    let upper = trimmed.to_ascii_uppercase();
    if upper.starts_with(FINISH_MARKER) {
        return Decision::Finish;
    }
    match upper.rfind(SEARCH_MARKER) {
        Some(idx) => {
            let query = trimmed[idx + SEARCH_MARKER.len()..].trim();
            if query.is_empty() { Decision::Unparseable } else { Decision::Search(query.to_string()) }
        }
        None => Decision::Unparseable,
    }
}

pub fn planning_prompt(state: &AgentState) -> String {
    let previous: Vec<String> = state
        .searches()
        .enumerate()
        .map(|(i, (query, hits))| format!("  Search {}: {} → {} docs", i + 1, query, hits))
        .collect();
    let previous = if previous.is_empty() { "None yet".to_string() } else { previous.join("\n") };

    format!(
        "You are planning PDF retrieval steps for a user question.

Original question: {query}

Previous searches:
{previous}

Decide ONE next action and answer with a single line:
- SEARCH: <specific, different query>   if you still need information
- FINISH                                if you can answer now

Rules:
- Never repeat a previous search.
- Prefer narrowing or complementing previous searches.
Respond with ONLY \"SEARCH: ...\" or \"FINISH\".
",
        query = state.query,
    )
}

pub struct Planner<'a> {
    generator: &'a dyn Generator,
    retriever: &'a dyn Retriever,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    pub fn new(generator: &'a dyn Generator, retriever: &'a dyn Retriever, config: &'a PlannerConfig) -> Self {
        Self { generator, retriever, config }
    }

    /// Run steps until a FINISH record is appended.
    pub fn run(&self, query: &str) -> Result<AgentState, OracleError> {
        let mut state = AgentState::new(query);
        while !state.is_finished() {
            state = self.step(state)?;
        }
        info!(
            iterations = state.iterations.len(),
            documents = state.documents.len(),
            reason = ?state.finish_reason(),
            "Planner finished"
        );
        Ok(state)
    }

    /// One transition. Appends one record, or two when a second empty search
    /// in a row ends the loop.
    pub fn step(&self, state: AgentState) -> Result<AgentState, OracleError> {
        if state.iterations.len() >= self.config.max_steps {
            return Ok(state.finish(FinishReason::MaxIterations));
        }

        let response = self.generator.generate(&planning_prompt(&state), &self.config.options)?;
        let query = match parse_decision(&response) {
            Decision::Finish => return Ok(state.finish(FinishReason::SufficientInfo)),
            Decision::Unparseable => {
                debug!(response = response.as_str(), "Unusable planner response");
                return Ok(state.finish(FinishReason::ParseError));
            }
            Decision::Search(query) => query,
        };

        if state.last_search_query().is_some_and(|last| last.to_lowercase() == query.to_lowercase()) {
            return Ok(state.finish(FinishReason::RepeatedSearch));
        }

        let found = self.retriever.retrieve(&query, self.config.top_k);
        info!(step = state.iterations.len() + 1, query = query.as_str(), hits = found.len(), "Planner search");
        if found.is_empty() && state.last_search_was_empty() {
            return Ok(state
                .with_iteration(Iteration::Search { search_query: query, num_results: 0 })
                .finish(FinishReason::NoResults));
        }

        let num_results = found.len();
        Ok(state
            .with_iteration(Iteration::Search { search_query: query, num_results })
            .with_documents(found))
    }
}
