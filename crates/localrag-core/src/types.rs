//! Domain types shared by the index, the planner and the HTTP surface.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// Where a chunk came from. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMeta {
    pub file: String,
    pub page_start: Option<u32>,
    pub page_end: Option<u32>,
}

impl ChunkMeta {
    pub fn page(file: impl Into<String>, page: u32) -> Self {
        Self { file: file.into(), page_start: Some(page), page_end: Some(page) }
    }
}

/// One page of extracted text, immutable once loaded.
///
/// - `id`: `<file>-p<page>`
/// - `content`: whitespace-normalized page text, at most `max_page_chars` characters
/// - `metadata`: source file and page span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: ChunkId,
    pub content: String,
    pub metadata: ChunkMeta,
}

/// A chunk paired with the relevance it scored for one query.
///
/// `score` is always within `[0, 0.95]`; higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: DocumentChunk,
    pub score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: DocumentChunk, score: f32) -> Self { Self { chunk, score } }

    pub fn metadata(&self) -> &ChunkMeta { &self.chunk.metadata }

    pub fn content(&self) -> &str { &self.chunk.content }
}

/// Raw text of one page as produced by a [`crate::traits::PageSource`].
#[derive(Debug)]
pub struct RawPage {
    pub number: u32,
    pub text: crate::error::Result<String>,
}
