//! Configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` nests, e.g. `APP_ORACLE__MODEL`) + the legacy
//! `PDF_DIR` / `OLLAMA_URL` / `OLLAMA_MODEL` variables.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loader::DEFAULT_MAX_PAGE_CHARS;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&env::current_dir()?)
    }

    /// Load with config files looked up in `base_dir`; relative paths in the
    /// settings resolve against it as well.
    pub fn load_from(base_dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&["PDF_DIR"]).map(|_| "corpus.dir".into()))
            .merge(Env::raw().only(&["OLLAMA_URL"]).map(|_| "oracle.url".into()))
            .merge(Env::raw().only(&["OLLAMA_MODEL"]).map(|_| "oracle.model".into()));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the typed settings. `corpus.dir` comes back
    /// expanded and resolved against the base directory.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        settings.corpus.dir = resolve_with_base(&self.base_dir, &settings.corpus.dir).to_string_lossy().to_string();
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub index: IndexSettings,
    pub oracle: OracleSettings,
    pub agent: AgentSettings,
    pub server: ServerSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.agent.max_steps == 0 {
            return Err(Error::InvalidConfig("agent.max_steps must be at least 1".into()));
        }
        if self.agent.top_k == 0 {
            return Err(Error::InvalidConfig("agent.top_k must be at least 1".into()));
        }
        if self.oracle.timeout_secs == 0 {
            return Err(Error::InvalidConfig("oracle.timeout_secs must be at least 1".into()));
        }
        if self.oracle.url.trim().is_empty() || self.oracle.model.trim().is_empty() {
            return Err(Error::InvalidConfig("oracle.url and oracle.model must be set".into()));
        }
        if self.corpus.max_page_chars == 0 {
            return Err(Error::InvalidConfig("corpus.max_page_chars must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSettings {
    pub dir: String,
    pub max_page_chars: usize,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self { dir: "pdfs".to_string(), max_page_chars: DEFAULT_MAX_PAGE_CHARS }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Extra hit for pages mentioning both " api " and "limit".
    pub api_limit_boost: bool,
}

impl Default for IndexSettings {
    fn default() -> Self { Self { api_limit_boost: true } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSettings {
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub num_ctx: u32,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout_secs: 120,
            temperature: 0.0,
            num_ctx: 4096,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    pub max_steps: usize,
    pub top_k: usize,
}

impl Default for AgentSettings {
    fn default() -> Self { Self { max_steps: 3, top_k: 3 } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub warm_corpus: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000, warm_corpus: true }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
