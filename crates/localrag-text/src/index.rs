use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::debug;

use localrag_core::loader::CorpusLoader;
use localrag_core::traits::{PageSource, Retriever};
use localrag_core::types::{DocumentChunk, ScoredChunk};

use crate::score::KeywordScorer;

/// Page chunks of one document directory, loaded on first use and read-only
/// afterwards. Concurrent first callers block until the single load finishes.
pub struct CorpusIndex {
    dir: PathBuf,
    source: Option<Box<dyn PageSource>>,
    loader: CorpusLoader,
    scorer: KeywordScorer,
    chunks: OnceLock<Vec<DocumentChunk>>,
}

impl CorpusIndex {
    pub fn new(dir: impl Into<PathBuf>, source: Box<dyn PageSource>) -> Self {
        Self {
            dir: dir.into(),
            source: Some(source),
            loader: CorpusLoader::default(),
            scorer: KeywordScorer::default(),
            chunks: OnceLock::new(),
        }
    }

    /// An index over chunks that are already in memory.
    pub fn from_chunks(chunks: Vec<DocumentChunk>) -> Self {
        Self {
            dir: PathBuf::new(),
            source: None,
            loader: CorpusLoader::default(),
            scorer: KeywordScorer::default(),
            chunks: OnceLock::from(chunks),
        }
    }

    pub fn with_loader(mut self, loader: CorpusLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_scorer(mut self, scorer: KeywordScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn dir(&self) -> &PathBuf { &self.dir }

    pub fn is_loaded(&self) -> bool { self.chunks.get().is_some() }

    pub fn chunks(&self) -> &[DocumentChunk] {
        self.chunks.get_or_init(|| match &self.source {
            Some(source) => self.loader.load_directory(&self.dir, source.as_ref()),
            None => Vec::new(),
        })
    }

    /// Force the load now instead of on the first query. Returns the page count.
    pub fn warm_up(&self) -> usize { self.chunks().len() }

    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        let chunks = self.chunks();
        if chunks.is_empty() { return vec![]; }
        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .filter_map(|c| {
                let score = self.scorer.score(query, &c.content);
                (score > 0.0).then(|| ScoredChunk::new(c.clone(), score))
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);
        debug!(query, top_k, hits = scored.len(), "Retrieved chunks");
        scored
    }
}

impl Retriever for CorpusIndex {
    fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> { Self::retrieve(self, query, top_k) }
}
