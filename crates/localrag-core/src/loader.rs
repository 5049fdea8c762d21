use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::traits::PageSource;
use crate::types::{ChunkMeta, DocumentChunk};

pub const DEFAULT_MAX_PAGE_CHARS: usize = 4000;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub max_page_chars: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { max_page_chars: DEFAULT_MAX_PAGE_CHARS }
    }
}

/// Turns a directory of documents into page-level chunks.
#[derive(Default)]
pub struct CorpusLoader {
    config: LoaderConfig,
}

impl CorpusLoader {
    pub fn new(config: LoaderConfig) -> Self { Self { config } }

    /// Load every accepted file directly under `dir`. Never fails: a missing
    /// directory gives an empty corpus, unreadable files and pages are skipped.
    pub fn load_directory(&self, dir: &Path, source: &dyn PageSource) -> Vec<DocumentChunk> {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Corpus directory not found, running with empty index");
            return vec![];
        }
        let files = self.list_files(dir, source);
        if files.is_empty() {
            warn!(dir = %dir.display(), "No documents found, running with empty index");
            return vec![];
        }
        let mut chunks = Vec::new();
        for path in &files {
            chunks.extend(self.load_file(path, source));
        }
        info!(pages = chunks.len(), files = files.len(), dir = %dir.display(), "Loaded corpus");
        chunks
    }

    pub fn load_file(&self, path: &Path, source: &dyn PageSource) -> Vec<DocumentChunk> {
        let name = file_name(path);
        let pages = match source.pages(path) {
            Ok(pages) => pages,
            Err(e) => {
                warn!(file = %name, error = %e, "Skipping unreadable document");
                return vec![];
            }
        };
        let mut chunks = Vec::new();
        for page in pages {
            let text = match page.text {
                Ok(text) => normalize_whitespace(&text),
                Err(e) => {
                    warn!(file = %name, page = page.number, error = %e, "Skipping unreadable page");
                    continue;
                }
            };
            if text.is_empty() { continue; }
            chunks.push(DocumentChunk {
                id: format!("{}-p{}", name, page.number),
                content: truncate_chars(&text, self.config.max_page_chars),
                metadata: ChunkMeta::page(name.clone(), page.number),
            });
        }
        chunks
    }

    fn list_files(&self, root: &Path, source: &dyn PageSource) -> Vec<PathBuf> {
        walkdir::WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && source.accepts(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| path.display().to_string())
}
