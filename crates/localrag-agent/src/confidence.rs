use localrag_core::types::{ChunkMeta, ScoredChunk};

const UNKNOWN_FILE: &str = "unknown.pdf";
const RELEVANCE_WEIGHT: f32 = 0.7;
const COVERAGE_WEIGHT: f32 = 0.3;
const SATURATING_SOURCES: f32 = 3.0;

/// Blend of mean relevance and how many sources back the answer (saturates at three).
pub fn confidence(docs: &[ScoredChunk]) -> f32 {
    if docs.is_empty() { return 0.0; }
    let n = docs.len() as f32;
    let mean = docs.iter().map(|d| d.score).sum::<f32>() / n;
    let coverage = (n / SATURATING_SOURCES).min(1.0);
    RELEVANCE_WEIGHT * mean + COVERAGE_WEIGHT * coverage
}

/// `file, p. 3–5`, `file, p. 3` or just `file`.
pub fn cite(meta: &ChunkMeta) -> String {
    let file = if meta.file.is_empty() { UNKNOWN_FILE } else { meta.file.as_str() };
    match (meta.page_start, meta.page_end) {
        (Some(start), Some(end)) if start != end => format!("{file}, p. {start}–{end}"),
        (Some(start), _) => format!("{file}, p. {start}"),
        _ => file.to_string(),
    }
}
