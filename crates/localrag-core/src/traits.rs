use std::path::Path;
use std::time::Duration;

use crate::error::{OracleError, Result};
use crate::types::{RawPage, ScoredChunk};

/// Per-call knobs for a [`Generator`]. `overrides` are merged over the
/// generator's own default sampling options.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub timeout: Duration,
    pub overrides: serde_json::Map<String, serde_json::Value>,
}

impl GenerateOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout, overrides: serde_json::Map::new() }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self { Self::with_timeout(Duration::from_secs(120)) }
}

pub const PING_PROMPT: &str = "Respond with only: FINISH";
const PING_REPLY_CHARS: usize = 100;

/// Text-generation oracle. One blocking round-trip per call.
pub trait Generator: Send + Sync {
    fn model(&self) -> &str;
    fn generate(&self, prompt: &str, options: &GenerateOptions) -> std::result::Result<String, OracleError>;

    /// Connectivity check. Returns at most the first 100 characters of the reply.
    fn ping(&self, timeout: Duration) -> std::result::Result<String, OracleError> {
        let out = self.generate(PING_PROMPT, &GenerateOptions::with_timeout(timeout))?;
        Ok(out.chars().take(PING_REPLY_CHARS).collect())
    }
}

/// Yields per-page text for one document file.
pub trait PageSource: Send + Sync {
    fn accepts(&self, path: &Path) -> bool;
    fn pages(&self, path: &Path) -> Result<Vec<RawPage>>;
}

pub trait Retriever: Send + Sync {
    fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredChunk>;
}
