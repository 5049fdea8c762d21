//! localrag-agent
//!
//! The question-answering loop: `planner` decides between searching and
//! finishing, `synth` turns the gathered excerpts into a cited answer.

pub mod confidence;
pub mod planner;
pub mod state;
pub mod synth;

use std::sync::Arc;
use std::time::Duration;

use localrag_core::config::Settings;
use localrag_core::error::OracleError;
use localrag_core::traits::{GenerateOptions, Generator, Retriever};

pub use planner::{Planner, PlannerConfig};
pub use state::{AgentState, FinishReason, Iteration};
pub use synth::{AgentAnswer, SourceRef, Synthesizer, FALLBACK_ANSWER};

impl PlannerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_steps: settings.agent.max_steps,
            top_k: settings.agent.top_k,
            options: GenerateOptions::with_timeout(Duration::from_secs(settings.oracle.timeout_secs)),
        }
    }
}

/// Owns the collaborators of a run. Cheap to share; every `ask` has its own state.
#[derive(Clone)]
pub struct Agent {
    generator: Arc<dyn Generator>,
    retriever: Arc<dyn Retriever>,
    config: PlannerConfig,
}

impl Agent {
    pub fn new(generator: Arc<dyn Generator>, retriever: Arc<dyn Retriever>, config: PlannerConfig) -> Self {
        Self { generator, retriever, config }
    }

    pub fn generator(&self) -> &dyn Generator { self.generator.as_ref() }

    pub fn config(&self) -> &PlannerConfig { &self.config }

    pub fn ask(&self, query: &str) -> Result<AgentAnswer, OracleError> {
        let state = Planner::new(self.generator.as_ref(), self.retriever.as_ref(), &self.config).run(query)?;
        Synthesizer::new(self.generator.as_ref(), &self.config.options).synthesize(state)
    }
}
