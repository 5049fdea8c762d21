//! localrag-text
//!
//! In-memory keyword retrieval over page chunks. `score` holds the lexical
//! overlap scorer, `index` the lazily loaded corpus it runs over.

pub mod index;
pub mod score;

pub use index::CorpusIndex;
pub use score::{KeywordScorer, MAX_SCORE};
