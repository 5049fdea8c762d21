//! Wiring shared by the `localrag` and `localrag-server` binaries.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use localrag_agent::{Agent, PlannerConfig};
use localrag_core::config::Settings;
use localrag_core::loader::{CorpusLoader, LoaderConfig};
use localrag_llm::OllamaGenerator;
use localrag_pdf::PdfPageSource;
use localrag_text::{CorpusIndex, KeywordScorer};

/// `RUST_LOG` wins; otherwise `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

pub fn build_index(settings: &Settings) -> CorpusIndex {
    CorpusIndex::new(&settings.corpus.dir, Box::new(PdfPageSource::new()))
        .with_loader(CorpusLoader::new(LoaderConfig { max_page_chars: settings.corpus.max_page_chars }))
        .with_scorer(KeywordScorer::new(settings.index.api_limit_boost))
}

pub fn build_agent(settings: &Settings, index: Arc<CorpusIndex>) -> Agent {
    let generator = Arc::new(OllamaGenerator::from_settings(&settings.oracle));
    Agent::new(generator, index, PlannerConfig::from_settings(settings))
}
