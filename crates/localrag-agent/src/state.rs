//! Planner state and iteration records.

use serde::{Deserialize, Serialize};

use localrag_core::types::ScoredChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    SufficientInfo,
    MaxIterations,
    RepeatedSearch,
    NoResults,
    ParseError,
}

/// One planner decision. Serializes as `{"action": "SEARCH", ...}` or
/// `{"action": "FINISH", "reason": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "UPPERCASE")]
pub enum Iteration {
    Search { search_query: String, num_results: usize },
    Finish { reason: FinishReason },
}

impl Iteration {
    pub fn is_finish(&self) -> bool { matches!(self, Self::Finish { .. }) }
}

/// Everything one agent run has accumulated. Both sequences are append-only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentState {
    pub query: String,
    pub iterations: Vec<Iteration>,
    pub documents: Vec<ScoredChunk>,
}

impl AgentState {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), iterations: Vec::new(), documents: Vec::new() }
    }

    pub fn with_iteration(mut self, iteration: Iteration) -> Self {
        self.iterations.push(iteration);
        self
    }

    pub fn with_documents(mut self, documents: Vec<ScoredChunk>) -> Self {
        self.documents.extend(documents);
        self
    }

    pub fn finish(self, reason: FinishReason) -> Self {
        self.with_iteration(Iteration::Finish { reason })
    }

    pub fn is_finished(&self) -> bool {
        self.iterations.last().is_some_and(Iteration::is_finish)
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self.iterations.last() {
            Some(Iteration::Finish { reason }) => Some(*reason),
            _ => None,
        }
    }

    /// Query of the most recent SEARCH, wherever it sits in the history.
    pub fn last_search_query(&self) -> Option<&str> {
        self.iterations.iter().rev().find_map(|it| match it {
            Iteration::Search { search_query, .. } => Some(search_query.as_str()),
            Iteration::Finish { .. } => None,
        })
    }

    /// True when the immediately preceding record is a SEARCH that found nothing.
    pub fn last_search_was_empty(&self) -> bool {
        matches!(self.iterations.last(), Some(Iteration::Search { num_results: 0, .. }))
    }

    pub fn searches(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iterations.iter().filter_map(|it| match it {
            Iteration::Search { search_query, num_results } => Some((search_query.as_str(), *num_results)),
            Iteration::Finish { .. } => None,
        })
    }
}
