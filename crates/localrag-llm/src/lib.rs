//! Ollama `/api/generate` client.
//!
//! Blocking, one request per call, no retries. Callers run it off the async
//! executor (the server uses the blocking pool).

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use localrag_core::config::OracleSettings;
use localrag_core::error::OracleError;
use localrag_core::traits::{GenerateOptions, Generator};

#[derive(Clone)]
pub struct OllamaGenerator {
    endpoint: String,
    model: String,
    defaults: Map<String, Value>,
    http: Client,
}

impl OllamaGenerator {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let mut defaults = Map::new();
        defaults.insert("temperature".into(), json!(0));
        defaults.insert("num_ctx".into(), json!(4096));
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            defaults,
            http: Client::new(),
        }
    }

    pub fn from_settings(settings: &OracleSettings) -> Self {
        let mut generator = Self::new(&settings.url, &settings.model);
        generator.defaults.insert("temperature".into(), json!(settings.temperature));
        generator.defaults.insert("num_ctx".into(), json!(settings.num_ctx));
        generator
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    fn unreachable(&self, e: reqwest::Error) -> OracleError {
        OracleError::Unreachable { endpoint: self.endpoint.clone(), reason: e.to_string() }
    }
}

impl Generator for OllamaGenerator {
    fn model(&self) -> &str { &self.model }

    fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, OracleError> {
        let url = self.build_url("/api/generate");
        let mut merged = self.defaults.clone();
        merged.extend(options.overrides.clone());
        let payload = GenerateRequest { model: &self.model, prompt, stream: false, options: merged };

        debug!(model = self.model.as_str(), prompt_chars = prompt.len(), "Sending request to Ollama");
        let response = self
            .http
            .post(&url)
            .timeout(options.timeout)
            .json(&payload)
            .send()
            .map_err(|e| self.unreachable(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.unreachable(e))?;
        if status.is_client_error() || status.is_server_error() {
            return Err(OracleError::Status { status: status.as_u16(), body });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|_| OracleError::InvalidBody(body.chars().take(200).collect()))?;
        let text = parsed.response.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        info!(model = self.model.as_str(), chars = text.len(), "Received response from Ollama");
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: Map<String, Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}
