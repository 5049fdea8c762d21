//! Lexical overlap scoring.
//!
//! Crude on purpose: a query token counts as a hit when it occurs anywhere in
//! the lowercased page, even inside a longer word. Longer pages get a small
//! bonus, and the total is capped at [`MAX_SCORE`].

pub const MAX_SCORE: f32 = 0.95;

const MIN_TOKEN_CHARS: usize = 3;
const LENGTH_BONUS_PER_2000_CHARS: f32 = 0.05;
const LENGTH_BONUS_CAP_CHARS: usize = 19_000;

#[derive(Debug, Clone, Copy)]
pub struct KeywordScorer {
    api_limit_boost: bool,
}

impl Default for KeywordScorer {
    fn default() -> Self { Self { api_limit_boost: true } }
}

impl KeywordScorer {
    /// `api_limit_boost` adds one hit to pages that mention both " api " and
    /// "limit". It was tuned for API reference manuals and is not a general
    /// relevance signal.
    pub fn new(api_limit_boost: bool) -> Self { Self { api_limit_boost } }

    pub fn score(&self, query: &str, text: &str) -> f32 {
        let tokens = query_tokens(query);
        if tokens.is_empty() { return 0.0; }

        let lowered = text.to_lowercase();
        let mut hits = tokens.iter().filter(|t| lowered.contains(t.as_str())).count();
        if self.api_limit_boost && format!(" {lowered} ").contains(" api ") && lowered.contains("limit") {
            hits += 1;
        }

        let base = hits as f32 / tokens.len().max(1) as f32;
        let length = text.chars().count().min(LENGTH_BONUS_CAP_CHARS) as f32;
        let bonus = LENGTH_BONUS_PER_2000_CHARS * length / 2000.0;
        (base + bonus).min(MAX_SCORE)
    }
}

/// Distinct lowercase word tokens longer than two characters, in query order.
pub fn query_tokens(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for word in query.to_lowercase().split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if word.chars().count() < MIN_TOKEN_CHARS { continue; }
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens
}
